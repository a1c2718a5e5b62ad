//! Order endpoints
//!
//! Maps to the order service behind `/api/order`:
//! - Place an order
//! - List a user's orders, plain or with shop and dish details
//! - Look up when an order was created
//! - Mark an order as paid

use super::business::Business;
use super::food::Food;
use super::{IdRequest, PhoneRequest};
use crate::client::ElemeClient;
use crate::error::ApiResult;
use crate::request::RequestDescriptor;
use crate::response::ApiResponse;
use serde::{Deserialize, Serialize};

/// Order API interface
#[derive(Clone)]
pub struct OrderApi {
    client: ElemeClient,
}

impl OrderApi {
    /// Create a new order API interface
    pub(crate) fn new(client: ElemeClient) -> Self {
        Self { client }
    }

    /// Place an order
    ///
    /// POST /api/order/addUserOrder
    pub async fn create(&self, order: &OrderRequest) -> ApiResult<ApiResponse<serde_json::Value>> {
        let request = RequestDescriptor::post("/api/order/addUserOrder").json(order)?;
        self.client.send_json(request).await
    }

    /// Orders placed from `user_phone`
    ///
    /// POST /api/order/getAllUserOrder
    pub async fn get_user_orders(&self, user_phone: &str) -> ApiResult<ApiResponse<Vec<UserOrder>>> {
        let request = RequestDescriptor::post("/api/order/getAllUserOrder").json(&PhoneRequest {
            user_phone: user_phone.to_string(),
        })?;
        self.client.send_json(request).await
    }

    /// Orders placed from `user_phone`, with shop and dish details
    ///
    /// POST /api/order/getAllUserOrderDetails
    pub async fn get_user_order_details(
        &self,
        user_phone: &str,
    ) -> ApiResult<ApiResponse<Vec<OrderDetail>>> {
        let request =
            RequestDescriptor::post("/api/order/getAllUserOrderDetails").json(&PhoneRequest {
                user_phone: user_phone.to_string(),
            })?;
        self.client.send_json(request).await
    }

    /// Creation time of an order (`yyyy-MM-dd HH:mm:ss`)
    ///
    /// GET /api/order/{order_id}/time
    pub async fn get_order_time(&self, order_id: i64) -> ApiResult<ApiResponse<String>> {
        let path = format!("/api/order/{order_id}/time");
        self.client.send_json(RequestDescriptor::get(path)).await
    }

    /// Mark an order as paid
    ///
    /// POST /api/order/havePayed
    pub async fn mark_paid(&self, order_id: i64) -> ApiResult<ApiResponse<bool>> {
        let request =
            RequestDescriptor::post("/api/order/havePayed").json(&IdRequest { id: order_id })?;
        self.client.send_json(request).await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// New order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Shop id
    #[serde(rename = "businessID")]
    pub business_id: i64,
    /// Phone number the order was placed from
    pub user_phone: String,
    /// Ordered dish ids, one entry per portion
    pub order_list: Vec<i64>,
    /// Total price
    pub price: f64,
    /// Delivery address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    /// Receiver name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_name: Option<String>,
    /// Receiver phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver_phone: Option<String>,
    /// Note for the shop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    /// Delivery fee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_fee: Option<f64>,
}

impl OrderRequest {
    /// Order for `business_id` with no delivery details
    pub fn new(business_id: i64, user_phone: impl Into<String>, order_list: Vec<i64>, price: f64) -> Self {
        Self {
            business_id,
            user_phone: user_phone.into(),
            order_list,
            price,
            delivery_address: None,
            receiver_name: None,
            receiver_phone: None,
            remark: None,
            delivery_fee: None,
        }
    }

    /// Set the delivery address and receiver
    #[must_use]
    pub fn with_delivery(
        mut self,
        address: impl Into<String>,
        receiver_name: impl Into<String>,
        receiver_phone: impl Into<String>,
    ) -> Self {
        self.delivery_address = Some(address.into());
        self.receiver_name = Some(receiver_name.into());
        self.receiver_phone = Some(receiver_phone.into());
        self
    }

    /// Set a note for the shop
    #[must_use]
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }
}

/// Order as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOrder {
    /// Order id
    pub id: i64,
    /// Shop id
    pub business_id: Option<i64>,
    /// Phone number the order was placed from
    pub user_phone: Option<String>,
    /// Raw `-`-separated dish ids
    pub order_list: Option<String>,
    /// Total price
    pub price: Option<f64>,
    /// 0 = unpaid, 1 = paid
    pub state: Option<i32>,
    /// Creation time
    pub created_at: Option<String>,
    /// Last update time
    pub updated_at: Option<String>,
    /// Payment time
    pub paid_at: Option<String>,
    /// Delivery completion time
    pub completed_at: Option<String>,
    /// Delivery address
    pub delivery_address: Option<String>,
    /// Receiver name
    pub receiver_name: Option<String>,
    /// Receiver phone number
    pub receiver_phone: Option<String>,
    /// Note for the shop
    pub remark: Option<String>,
    /// Delivery fee
    pub delivery_fee: Option<f64>,
    /// Dish ids parsed from `order_list`
    #[serde(default)]
    pub order_item_ids: Vec<i64>,
    /// Shop, when resolved
    pub business: Option<Business>,
    /// Ordered dishes
    pub order_items: Option<Vec<Food>>,
}

impl UserOrder {
    /// Whether the order has been paid
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.state == Some(1)
    }
}

/// Order with its shop and dishes resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    /// Order id
    pub id: i64,
    /// Shop id
    #[serde(rename = "businessID")]
    pub business_id: Option<i64>,
    /// Phone number the order was placed from
    pub user_phone: Option<String>,
    /// Raw `-`-separated dish ids
    pub order_list: Option<String>,
    /// Total price
    pub price: Option<f64>,
    /// Payment state
    pub state: Option<i32>,
    /// Creation time
    pub created_at: Option<String>,
    /// Payment time
    pub paid_at: Option<String>,
    /// Delivery completion time
    pub completed_at: Option<String>,
    /// Delivery address
    pub delivery_address: Option<String>,
    /// Receiver name
    pub receiver_name: Option<String>,
    /// Receiver phone number
    pub receiver_phone: Option<String>,
    /// Note for the shop
    pub remark: Option<String>,
    /// Delivery fee
    pub delivery_fee: Option<f64>,
    /// Shop
    pub business: Option<Business>,
    /// Ordered dishes
    #[serde(default)]
    pub order_items: Vec<Food>,
}
