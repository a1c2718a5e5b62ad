//! Captcha endpoints
//!
//! The captcha service answers with bare bodies, not the `{code, message, data}`
//! wrapper the other storefront services use.

use crate::client::ElemeClient;
use crate::error::ApiResult;
use crate::request::RequestDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Captcha API interface
#[derive(Clone)]
pub struct CaptchaApi {
    client: ElemeClient,
}

impl CaptchaApi {
    /// Create a new captcha API interface
    pub(crate) fn new(client: ElemeClient) -> Self {
        Self { client }
    }

    /// Generate a captcha; `None` means [`CaptchaKind::Image`]
    ///
    /// POST /api/captcha/generate
    pub async fn generate(&self, kind: Option<CaptchaKind>) -> ApiResult<CaptchaResponse> {
        let body = GenerateRequest {
            kind: kind.unwrap_or_default(),
        };
        let request = RequestDescriptor::post("/api/captcha/generate").json(&body)?;
        self.client.send_json(request).await
    }

    /// Check a user's answer
    ///
    /// POST /api/captcha/validate
    pub async fn validate(&self, data: &CaptchaValidateRequest) -> ApiResult<CaptchaValidation> {
        let request = RequestDescriptor::post("/api/captcha/validate").json(data)?;
        self.client.send_json(request).await
    }
}

/// Captcha flavours supported by the captcha service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaptchaKind {
    /// Distorted text image
    #[default]
    Image,
    /// Code sent by SMS
    Sms,
    /// Code sent by email
    Email,
    /// Slide-to-fit puzzle
    Slider,
    /// Click the named characters
    Click,
}

impl CaptchaKind {
    /// Wire name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "IMAGE",
            Self::Sms => "SMS",
            Self::Email => "EMAIL",
            Self::Slider => "SLIDER",
            Self::Click => "CLICK",
        }
    }
}

impl fmt::Display for CaptchaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaptchaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "IMAGE" => Ok(Self::Image),
            "SMS" => Ok(Self::Sms),
            "EMAIL" => Ok(Self::Email),
            "SLIDER" => Ok(Self::Slider),
            "CLICK" => Ok(Self::Click),
            other => Err(format!("unknown captcha type: {other}")),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    #[serde(rename = "type")]
    kind: CaptchaKind,
}

/// Generated captcha
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptchaResponse {
    /// Key to send back with the answer
    pub key: String,
    /// Captcha type
    #[serde(rename = "type")]
    pub kind: Option<CaptchaKind>,
    /// Captcha image (base64)
    pub image_base64: Option<String>,
    /// Captcha image as a `data:` URL
    pub image_data_url: Option<String>,
    /// Puzzle background image (base64)
    pub background_image: Option<String>,
    /// Slider piece image (base64)
    pub slider_image: Option<String>,
    /// Expected slider offset
    pub correct_position: Option<i32>,
    /// Image to click on (base64)
    pub click_image: Option<String>,
    /// Characters to click, in order
    pub click_text: Option<String>,
    /// Expiry time
    pub expire_time: Option<String>,
    /// Seconds until the captcha expires
    pub expire_seconds: Option<i32>,
    /// Phone or email the code was sent to
    pub receiver: Option<String>,
    /// Delivery status of the code
    pub send_status: Option<String>,
    /// Whether the captcha was issued
    pub success: Option<bool>,
    /// Service message
    pub message: Option<String>,
}

/// Answer to a captcha
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptchaValidateRequest {
    /// Captcha type
    #[serde(rename = "type")]
    pub kind: CaptchaKind,
    /// Key to send back with the answer
    pub key: String,
    /// The user's answer
    pub value: String,
    /// Phone or email the code was sent to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    /// Slider offset entered by the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slider_position: Option<i32>,
    /// Clicked positions, in order
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub click_points: Vec<CaptchaPoint>,
    /// Consume the captcha on successful validation
    pub use_immediately: bool,
}

impl CaptchaValidateRequest {
    /// Plain answer for `key`, consumed on success
    pub fn new(kind: CaptchaKind, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
            value: value.into(),
            receiver: None,
            slider_position: None,
            click_points: Vec::new(),
            use_immediately: true,
        }
    }
}

/// Verdict on a captcha answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptchaValidation {
    /// Whether the answer matched
    pub valid: bool,
    /// Service message, e.g. "验证码验证成功"
    #[serde(default)]
    pub message: Option<String>,
}

/// Click position for [`CaptchaKind::Click`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptchaPoint {
    /// Horizontal offset in pixels
    pub x: i32,
    /// Vertical offset in pixels
    pub y: i32,
}
