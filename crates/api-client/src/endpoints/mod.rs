//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for one group of gateway routes.
//! Endpoint methods only shape the request (method, path, body) and decode
//! the standard result wrapper; they never catch pipeline errors.
//!
//! ## Mapping to gateway routes
//!
//! | Module | Route prefix | Description |
//! |--------|--------------|-------------|
//! | `user` | `/api/user` | Login, registration, profile |
//! | `business` | `/api/business` | Shop listing and search |
//! | `food` | `/api/food` | Dishes by id or shop |
//! | `order` | `/api/order` | Order placement, history, payment |
//! | `captcha` | `/api/captcha` | Captcha generation and validation |
//! | `notification` | `/api/notification` | Email and SMS dispatch |

use serde::{Deserialize, Serialize};

pub mod business;
pub mod captcha;
pub mod food;
pub mod notification;
pub mod order;
pub mod user;

pub use business::BusinessApi;
pub use captcha::CaptchaApi;
pub use food::FoodApi;
pub use notification::NotificationApi;
pub use order::OrderApi;
pub use user::UserApi;

/// `{"ID": id}` body used by the id-lookup routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRequest {
    /// Entity id
    #[serde(rename = "ID")]
    pub id: i64,
}

/// `{"userPhone": phone}` body used by the order history routes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneRequest {
    /// Phone number identifying the user
    pub user_phone: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_request_uses_uppercase_key() {
        assert_eq!(
            serde_json::to_value(IdRequest { id: 42 }).unwrap(),
            json!({ "ID": 42 })
        );
    }

    #[test]
    fn test_phone_request_is_camel_case() {
        let body = PhoneRequest {
            user_phone: "13800000000".to_string(),
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({ "userPhone": "13800000000" })
        );
    }
}
