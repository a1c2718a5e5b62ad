//! Notification endpoints
//!
//! The notification service answers with the bare dispatch record, not the
//! `{code, message, data}` wrapper.

use crate::client::ElemeClient;
use crate::error::ApiResult;
use crate::request::RequestDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Notification API interface
#[derive(Clone)]
pub struct NotificationApi {
    client: ElemeClient,
}

impl NotificationApi {
    /// Create a new notification API interface
    pub(crate) fn new(client: ElemeClient) -> Self {
        Self { client }
    }

    /// Send an email
    ///
    /// POST /api/notification/send-email
    pub async fn send_email(
        &self,
        email: &EmailRequest,
    ) -> ApiResult<NotificationResponse> {
        let request = RequestDescriptor::post("/api/notification/send-email").json(email)?;
        self.client.send_json(request).await
    }

    /// Send a templated SMS
    ///
    /// POST /api/notification/send-sms
    pub async fn send_sms(&self, sms: &SmsRequest) -> ApiResult<NotificationResponse> {
        let request = RequestDescriptor::post("/api/notification/send-sms").json(sms)?;
        self.client.send_json(request).await
    }
}

/// Template variables
pub type TemplateParams = BTreeMap<String, serde_json::Value>;

/// Outgoing email
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    /// Recipient address
    pub to: String,
    /// Copy recipients
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub cc: Vec<String>,
    /// Blind-copy recipients
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub bcc: Vec<String>,
    /// Subject line
    pub subject: String,
    /// Body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Render `content` as HTML
    pub is_html: bool,
    /// Template to render
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_code: Option<String>,
    /// Template variables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_params: Option<TemplateParams>,
    /// Files attached to the email
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attachments: Vec<EmailAttachment>,
    /// Kind of business event this message belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    /// Id of the related business record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,
    /// User the message concerns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl EmailRequest {
    /// Plain-text email
    pub fn text(to: impl Into<String>, subject: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Render the body as HTML
    #[must_use]
    pub fn html(mut self) -> Self {
        self.is_html = true;
        self
    }
}

/// Base64-encoded attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAttachment {
    /// File name
    pub name: String,
    /// MIME type
    pub content_type: String,
    /// Base64 payload
    pub content: String,
    /// Size in bytes
    pub size: Option<i64>,
}

/// Outgoing SMS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsRequest {
    /// Mainland mobile number, e.g. `13800000000`
    pub phone: String,
    /// Template to render
    pub template_code: String,
    /// Template variables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_params: Option<TemplateParams>,
    /// Kind of business event this message belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,
    /// Id of the related business record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,
}

/// Dispatch record returned by the notification service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    /// Dispatch record id
    pub id: Option<i64>,
    /// `EMAIL` or `SMS`
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Recipient address or phone number
    pub receiver: Option<String>,
    /// Message title
    pub title: Option<String>,
    /// Rendered body
    pub content: Option<String>,
    /// Dispatch status, e.g. `SENT`
    pub status: Option<String>,
    /// Kind of business event this message belongs to
    pub business_type: Option<String>,
    /// Id of the related business record
    pub business_id: Option<String>,
    /// Id assigned by the upstream mail/SMS provider
    pub external_id: Option<String>,
    /// When the record was created
    pub create_time: Option<String>,
    /// When the message was sent
    pub send_time: Option<String>,
    /// Why dispatch failed
    pub failure_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::MemorySession;
    use crate::testing::ScriptedTransport;
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
    fn test_send_email_body() {
        let (client, transport) = client();
        transport.respond_json(&json!({ "id": 41, "type": "EMAIL", "status": "SENT" }));
        let email = EmailRequest::text("user@example.com", "订单已送达", "您的订单已送达").html();

        let record = tokio_test::block_on(client.notification().send_email(&email)).unwrap();

        assert_eq!(record.id, Some(41));
        assert_eq!(record.kind.as_deref(), Some("EMAIL"));

        let request = transport.last_request();
        assert_eq!(request.path, "/api/notification/send-email");
        assert_eq!(
            request.body,
            Some(json!({
                "to": "user@example.com",
                "subject": "订单已送达",
                "content": "您的订单已送达",
                "isHtml": true
            }))
        );
    }

    #[test]
    fn test_send_sms_decodes_record() {
        let (client, transport) = client();
        transport.respond_json(&json!({
            "id": 99,
            "type": "SMS",
            "receiver": "13800000000",
            "status": "SENT",
            "createTime": "2024-05-01 12:30:00"
        }));

        let sms = SmsRequest {
            phone: "13800000000".into(),
            template_code: "ORDER_PAID".into(),
            template_params: Some(TemplateParams::from([(
                "orderId".to_string(),
                json!(12),
            )])),
            business_type: None,
            business_id: None,
        };

        let record = tokio_test::block_on(client.notification().send_sms(&sms)).unwrap();

        let request = transport.last_request();
        assert_eq!(request.path, "/api/notification/send-sms");
        assert_eq!(request.body.as_ref().unwrap()["templateParams"]["orderId"], 12);

        assert_eq!(record.id, Some(99));
        assert_eq!(record.status.as_deref(), Some("SENT"));
        assert_eq!(record.create_time.as_deref(), Some("2024-05-01 12:30:00"));
    }
}
