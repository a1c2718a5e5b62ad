//! User account endpoints
//!
//! Maps to the user service behind `/api/user`:
//! - Login with phone number and password (returns a JWT)
//! - Register a new account
//! - Request an email verification code
//! - Fetch the profile of the logged-in user

use crate::client::ElemeClient;
use crate::error::ApiResult;
use crate::request::RequestDescriptor;
use crate::response::ApiResponse;
use serde::{Deserialize, Serialize};

/// User API interface
#[derive(Clone)]
pub struct UserApi {
    client: ElemeClient,
}

impl UserApi {
    /// Create a new user API interface
    pub(crate) fn new(client: ElemeClient) -> Self {
        Self { client }
    }

    /// Log in
    ///
    /// POST /api/user/login
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<ApiResponse<LoginResult>> {
        let request = RequestDescriptor::post("/api/user/login").json(credentials)?;
        self.client.send_json(request).await
    }

    /// Register a new account
    ///
    /// POST /api/user/register
    pub async fn register(
        &self,
        data: &RegisterRequest,
    ) -> ApiResult<ApiResponse<serde_json::Value>> {
        let request = RequestDescriptor::post("/api/user/register").json(data)?;
        self.client.send_json(request).await
    }

    /// Ask the service to email a verification code
    ///
    /// POST /api/user/sendVerifyCode
    pub async fn send_verify_code(
        &self,
        data: &VerifyCodeRequest,
    ) -> ApiResult<ApiResponse<serde_json::Value>> {
        let request = RequestDescriptor::post("/api/user/sendVerifyCode").json(data)?;
        self.client.send_json(request).await
    }

    /// Profile of the user owning the session token
    ///
    /// GET /api/user/info
    pub async fn get_user_info(&self) -> ApiResult<ApiResponse<User>> {
        self.client
            .send_json(RequestDescriptor::get("/api/user/info"))
            .await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Login credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Mainland mobile number
    pub phone_number: String,
    /// Password
    pub password: String,
    /// Captcha key, when the login form shows a captcha
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha_id: Option<String>,
    /// Captcha answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha_value: Option<String>,
}

impl LoginRequest {
    /// Phone/password login without captcha
    pub fn new(phone_number: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// Attach a solved captcha
    #[must_use]
    pub fn with_captcha(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.captcha_id = Some(id.into());
        self.captcha_value = Some(value.into());
        self
    }
}

/// Successful login payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResult {
    /// Bearer token for subsequent requests
    pub token: String,
    /// Logged-in user
    pub user: UserProfile,
}

/// Public part of a user record returned at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Mainland mobile number
    pub phone_number: String,
    /// Display name
    pub name: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Gender ("男" or "女")
    pub gender: Option<String>,
    /// Avatar image URL
    pub avatar: Option<String>,
}

/// Registration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Mainland mobile number
    pub phone_number: String,
    /// 6 to 20 characters
    pub password: String,
    /// Must repeat `password`
    pub confirm_password: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// "男" or "女"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Code received via [`UserApi::send_verify_code`]
    pub verify_code: String,
}

/// Verification code request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyCodeRequest {
    /// Address the code is sent to
    pub email: String,
}

/// User profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Mainland mobile number
    pub phone_number: String,
    /// Display name
    pub name: Option<String>,
    /// Gender ("男" or "女")
    pub gender: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Avatar image URL
    pub avatar: Option<String>,
    /// 1 = active
    pub status: Option<i32>,
    /// Creation time
    pub created_at: Option<String>,
    /// Last update time
    pub updated_at: Option<String>,
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
            .session(MemorySession::with_token("tok"))
            .build()
            .unwrap();
        (client, transport)
    }

    #[test]
    fn test_login_request_skips_missing_captcha() {
        let body = serde_json::to_value(LoginRequest::new("13800000000", "secret")).unwrap();
        assert_eq!(
            body,
            json!({ "phoneNumber": "13800000000", "password": "secret" })
        );

        let body = serde_json::to_value(
            LoginRequest::new("13800000000", "secret").with_captcha("k1", "ab12"),
        )
        .unwrap();
        assert_eq!(body["captchaId"], "k1");
        assert_eq!(body["captchaValue"], "ab12");
    }

    #[test]
    fn test_login_decodes_token() {
        let (client, transport) = client();
        transport.respond_json(&json!({
            "code": 200,
            "message": "登录成功",
            "data": {
                "token": "eyJhbGciOiJIUzI1NiJ9",
                "user": { "phoneNumber": "13800000000", "name": "张三" }
            }
        }));

        let response = tokio_test::block_on(
            client.user().login(&LoginRequest::new("13800000000", "secret")),
        )
        .unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/api/user/login");

        let result = response.into_data().unwrap().unwrap();
        assert_eq!(result.token, "eyJhbGciOiJIUzI1NiJ9");
        assert_eq!(result.user.name.as_deref(), Some("张三"));
    }

    #[test]
    fn test_register_and_verify_code_paths() {
        let (client, transport) = client();
        let register = RegisterRequest {
            phone_number: "13800000000".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            name: "李四".into(),
            email: "li@example.com".into(),
            gender: None,
            verify_code: "123456".into(),
        };

        tokio_test::block_on(client.user().register(&register)).unwrap();
        let request = transport.last_request();
        assert_eq!(request.path, "/api/user/register");
        assert_eq!(request.body.as_ref().unwrap()["confirmPassword"], "secret1");
        assert!(request.body.as_ref().unwrap().get("gender").is_none());

        tokio_test::block_on(client.user().send_verify_code(&VerifyCodeRequest {
            email: "li@example.com".into(),
        }))
        .unwrap();
        let request = transport.last_request();
        assert_eq!(request.path, "/api/user/sendVerifyCode");
        assert_eq!(request.body, Some(json!({ "email": "li@example.com" })));
    }

    #[test]
    fn test_get_user_info_is_bodyless_get() {
        let (client, transport) = client();
        transport.respond_json(&json!({
            "code": 200,
            "data": { "phoneNumber": "13800000000", "status": 1 }
        }));

        let response = tokio_test::block_on(client.user().get_user_info()).unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/api/user/info");
        assert!(request.body.is_none());
        assert_eq!(request.header_value("Authorization"), Some("Bearer tok"));
        assert_eq!(response.data.unwrap().status, Some(1));
    }
}
