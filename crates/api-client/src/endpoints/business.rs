//! Business (shop) endpoints

use super::IdRequest;
use super::food::Food;
use crate::client::ElemeClient;
use crate::error::ApiResult;
use crate::request::RequestDescriptor;
use crate::response::ApiResponse;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Business API interface
#[derive(Clone)]
pub struct BusinessApi {
    client: ElemeClient,
}

impl BusinessApi {
    /// Create a new business API interface
    pub(crate) fn new(client: ElemeClient) -> Self {
        Self { client }
    }

    /// All shops that are open for business
    ///
    /// POST /api/business/getAll
    pub async fn get_all(&self) -> ApiResult<ApiResponse<Vec<Business>>> {
        debug!("Fetching all businesses");
        self.client
            .send_json(RequestDescriptor::post("/api/business/getAll"))
            .await
    }

    /// One shop by id
    ///
    /// POST /api/business/getBusinessById
    pub async fn get_by_id(&self, id: i64) -> ApiResult<ApiResponse<Business>> {
        debug!(business_id = id, "Fetching business");
        let request =
            RequestDescriptor::post("/api/business/getBusinessById").json(&IdRequest { id })?;
        self.client.send_json(request).await
    }

    /// Shops matching `keyword`
    ///
    /// GET /api/business/search?keyword=<keyword>
    pub async fn search(&self, keyword: &str) -> ApiResult<ApiResponse<Vec<Business>>> {
        debug!(keyword = %keyword, "Searching businesses");
        let request = RequestDescriptor::get("/api/business/search").query("keyword", keyword);
        self.client.send_json(request).await
    }
}

/// Shop record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    /// Shop id
    pub id: i64,
    /// Shop name
    pub business_name: Option<String>,
    /// Average rating, as displayed
    pub rating: Option<String>,
    /// Monthly sales, as displayed
    pub sales: Option<String>,
    /// Distance from the user, as displayed
    pub distance: Option<String>,
    /// Minimum order amount, as displayed
    pub min_order: Option<String>,
    /// Review count, as displayed
    pub comment: Option<String>,
    /// Raw `-`-separated discount tags
    pub discounts: Option<String>,
    /// Primary discount label
    pub discount: Option<String>,
    /// Shop announcement
    pub notice: Option<String>,
    /// Raw `/`-separated menu sections
    pub sidebar_items: Option<String>,
    /// Logo image URL
    pub img_logo: Option<String>,
    /// Delivery fee and time, as displayed
    pub delivery: Option<String>,
    /// Shop category
    #[serde(rename = "type")]
    pub business_type: Option<String>,
    /// Shop status
    pub status: Option<i32>,
    /// Creation time
    pub created_at: Option<String>,
    /// Last update time
    pub updated_at: Option<String>,
    /// Discount labels, split
    #[serde(default)]
    pub discounts_list: Vec<String>,
    /// Menu sections, split
    #[serde(default)]
    pub sidebar_items_list: Vec<String>,
    /// Dishes, when the service includes them
    pub food_list: Option<Vec<Food>>,
}

impl Business {
    /// Discount tags, split from the raw field when the list was not sent
    #[must_use]
    pub fn discount_tags(&self) -> Vec<String> {
        if !self.discounts_list.is_empty() {
            return self.discounts_list.clone();
        }
        split_non_empty(self.discounts.as_deref(), '-')
    }

    /// Menu section names, split from the raw field when the list was not sent
    #[must_use]
    pub fn sidebar_sections(&self) -> Vec<String> {
        if !self.sidebar_items_list.is_empty() {
            return self.sidebar_items_list.clone();
        }
        split_non_empty(self.sidebar_items.as_deref(), '/')
    }
}

pub(crate) fn split_non_empty(raw: Option<&str>, sep: char) -> Vec<String> {
    raw.filter(|s| !s.trim().is_empty())
        .map(|s| s.split(sep).map(str::to_string).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::MemorySession;
    use crate::testing::ScriptedTransport;
    use reqwest::Method;
    use serde_json::json;

    fn client(session: MemorySession) -> (ElemeClient, ScriptedTransport) {
        let transport = ScriptedTransport::default();
        let client = ElemeClient::builder()
            .transport(transport.clone())
            .session(session)
            .build()
            .unwrap();
        (client, transport)
    }

    #[test]
    fn test_get_by_id_wraps_id() {
        let (client, transport) = client(MemorySession::new());

        tokio_test::block_on(client.business().get_by_id(42)).unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/api/business/getBusinessById");
        assert_eq!(request.body, Some(json!({ "ID": 42 })));
    }

    #[test]
    fn test_get_all_has_no_body() {
        let (client, transport) = client(MemorySession::new());
        transport.respond_json(&json!({
            "code": 200,
            "data": [
                { "id": 1, "businessName": "万家饺子", "type": "饺子馄饨" },
                { "id": 2, "businessName": "小锅饭豆腐馆" }
            ]
        }));

        let response = tokio_test::block_on(client.business().get_all()).unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/api/business/getAll");
        assert!(request.body.is_none());

        let shops = response.into_data().unwrap().unwrap();
        assert_eq!(shops.len(), 2);
        assert_eq!(shops[0].business_type.as_deref(), Some("饺子馄饨"));
    }

    #[test]
    fn test_search_is_repeatable() {
        let (client, transport) = client(MemorySession::with_token("abc"));

        tokio_test::block_on(client.business().search("noodle")).unwrap();
        tokio_test::block_on(client.business().search("noodle")).unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], requests[1]);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].path, "/api/business/search");
        assert_eq!(
            requests[0].query,
            vec![("keyword".to_string(), "noodle".to_string())]
        );
    }

    #[test]
    fn test_discount_tags_fallback_to_raw_field() {
        let business: Business = serde_json::from_value(json!({
            "id": 3,
            "discounts": "满30减5-满60减12",
            "sidebarItems": "热销/主食/饮品"
        }))
        .unwrap();

        assert_eq!(business.discount_tags(), vec!["满30减5", "满60减12"]);
        assert_eq!(business.sidebar_sections(), vec!["热销", "主食", "饮品"]);
    }

    #[test]
    fn test_empty_raw_field_yields_no_tags() {
        let business: Business =
            serde_json::from_value(json!({ "id": 4, "discounts": "  " })).unwrap();
        assert!(business.discount_tags().is_empty());
    }
}
