//! Food endpoints

use super::IdRequest;
use super::business::split_non_empty;
use crate::client::ElemeClient;
use crate::error::ApiResult;
use crate::request::RequestDescriptor;
use crate::response::ApiResponse;
use serde::{Deserialize, Serialize};

/// Food API interface
#[derive(Clone)]
pub struct FoodApi {
    client: ElemeClient,
}

impl FoodApi {
    /// Create a new food API interface
    pub(crate) fn new(client: ElemeClient) -> Self {
        Self { client }
    }

    /// One dish by id
    ///
    /// POST /api/food/getFoodById
    pub async fn get_by_id(&self, id: i64) -> ApiResult<ApiResponse<Food>> {
        let request = RequestDescriptor::post("/api/food/getFoodById").json(&IdRequest { id })?;
        self.client.send_json(request).await
    }

    /// Every dish a shop offers
    ///
    /// GET /api/food/business/{business_id}
    pub async fn get_by_business_id(&self, business_id: i64) -> ApiResult<ApiResponse<Vec<Food>>> {
        let path = format!("/api/food/business/{business_id}");
        self.client.send_json(RequestDescriptor::get(path)).await
    }
}

/// Dish record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    /// Dish id
    pub id: i64,
    /// Dish name
    pub name: Option<String>,
    /// Description
    pub text: Option<String>,
    /// Units sold, as displayed
    pub amount: Option<String>,
    /// Raw `-`-separated discount tags
    pub discount: Option<String>,
    /// Current price
    pub red_price: Option<f64>,
    /// Original price before discount
    pub gray_price: Option<String>,
    /// Owning shop id
    pub business: Option<i64>,
    /// Dish image URL
    pub img: Option<String>,
    /// Whether the dish can be ordered
    pub selling: Option<i32>,
    /// Dish status
    pub status: Option<i32>,
    /// Menu section the dish is listed under
    pub category: Option<String>,
    /// Creation time
    pub created_at: Option<String>,
    /// Last update time
    pub updated_at: Option<String>,
    /// Discount labels, split
    #[serde(default)]
    pub discount_list: Vec<String>,
}

impl Food {
    /// Discount tags, split from the raw field when the list was not sent
    #[must_use]
    pub fn discount_tags(&self) -> Vec<String> {
        if !self.discount_list.is_empty() {
            return self.discount_list.clone();
        }
        split_non_empty(self.discount.as_deref(), '-')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::MemorySession;
    use crate::testing::ScriptedTransport;
    use reqwest::Method;
    use serde_json::json;

    fn client() -> (ElemeClient, ScriptedTransport) {
        let transport = ScriptedTransport::default();
        let client = ElemeClient::builder()
            .transport(transport.clone())
            .session(MemorySession::new())
            .build()
            .unwrap();
        (client, transport)
    }

    #[test]
    fn test_get_by_id() {
        let (client, transport) = client();
        transport.respond_json(&json!({
            "code": 200,
            "data": { "id": 7, "name": "纯肉鲜肉（水饺）", "redPrice": 15.0, "business": 1 }
        }));

        let food = tokio_test::block_on(client.food().get_by_id(7))
            .unwrap()
            .into_data()
            .unwrap()
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/api/food/getFoodById");
        assert_eq!(request.body, Some(json!({ "ID": 7 })));
        assert_eq!(food.red_price, Some(15.0));
        assert_eq!(food.business, Some(1));
    }

    #[test]
    fn test_get_by_business_id_interpolates_path() {
        let (client, transport) = client();

        tokio_test::block_on(client.food().get_by_business_id(10001)).unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/api/food/business/10001");
        assert!(request.body.is_none());
        assert!(request.query.is_empty());
    }

    #[test]
    fn test_discount_tags() {
        let food: Food =
            serde_json::from_value(json!({ "id": 1, "discount": "新品-特价" })).unwrap();
        assert_eq!(food.discount_tags(), vec!["新品", "特价"]);
    }
}
