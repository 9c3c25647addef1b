//! WhatsApp Cloud API DTOs.
//!
//! Inbound webhook payloads nest the message several levels deep and omit
//! any field that doesn't apply, so everything defaults to empty.

use serde::{Deserialize, Serialize};

/// Body of a webhook `POST`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    /// "whatsapp_business_account" for message notifications.
    pub object: Option<String>,

    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookEntry {
    #[serde(default)]
    pub changes: Vec<WebhookChange>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookChange {
    #[serde(default)]
    pub value: ChangeValue,
}

/// Payload of a change. Status updates have no `messages`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeValue {
    #[serde(default)]
    pub messages: Vec<InboundMessage>,
}

/// A message a user sent to the business number.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    /// Sender's phone number.
    pub from: String,

    /// "text", "image", "sticker", ...
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Present only for text messages.
    pub text: Option<TextBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextBody {
    pub body: String,
}

/// A text message pulled out of a webhook payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingText {
    pub from: String,
    pub body: String,
}

impl WebhookPayload {
    /// The first text message of the first change, if the payload has one.
    pub fn first_text_message(&self) -> Option<IncomingText> {
        self.object.as_ref()?;
        let message = self
            .entry
            .first()?
            .changes
            .first()?
            .value
            .messages
            .first()?;
        let text = message.text.as_ref()?;

        Some(IncomingText {
            from: message.from.clone(),
            body: text.body.clone(),
        })
    }
}

/// Request body for `POST /{phone_id}/messages`.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest<'a> {
    pub messaging_product: &'static str,
    pub to: &'a str,
    pub text: OutboundText<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutboundText<'a> {
    pub body: &'a str,
    pub preview_url: bool,
}

impl<'a> SendMessageRequest<'a> {
    pub fn text(to: &'a str, body: &'a str) -> Self {
        Self {
            messaging_product: "whatsapp",
            to,
            text: OutboundText {
                body,
                preview_url: false,
            },
        }
    }
}

/// Response from a successful send.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub messages: Vec<SentMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SentMessage {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT_WEBHOOK: &str = r#"{
        "object": "whatsapp_business_account",
        "entry": [{
            "id": "1234",
            "changes": [{
                "field": "messages",
                "value": {
                    "messaging_product": "whatsapp",
                    "metadata": {"display_phone_number": "15550000000", "phone_number_id": "42"},
                    "contacts": [{"profile": {"name": "Asha"}, "wa_id": "919800000000"}],
                    "messages": [{
                        "from": "919800000000",
                        "id": "wamid.abc",
                        "timestamp": "1700000000",
                        "type": "text",
                        "text": {"body": "4pm mangalore bus"}
                    }]
                }
            }]
        }]
    }"#;

    #[test]
    fn extracts_text_message() {
        let payload: WebhookPayload = serde_json::from_str(TEXT_WEBHOOK).unwrap();

        assert_eq!(
            payload.first_text_message(),
            Some(IncomingText {
                from: "919800000000".to_string(),
                body: "4pm mangalore bus".to_string(),
            })
        );
    }

    #[test]
    fn status_update_has_no_message() {
        let json = r#"{
            "object": "whatsapp_business_account",
            "entry": [{"changes": [{"value": {"statuses": [{"id": "wamid.abc", "status": "read"}]}}]}]
        }"#;

        let payload: WebhookPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.first_text_message(), None);
    }

    #[test]
    fn non_text_message_is_ignored() {
        let json = r#"{
            "object": "whatsapp_business_account",
            "entry": [{"changes": [{"value": {"messages": [
                {"from": "919800000000", "type": "sticker", "sticker": {"id": "1"}}
            ]}}]}]
        }"#;

        let payload: WebhookPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.first_text_message(), None);
    }

    #[test]
    fn missing_object_is_ignored() {
        let json = r#"{"entry": [{"changes": [{"value": {"messages": [
            {"from": "1", "type": "text", "text": {"body": "hi"}}
        ]}}]}]}"#;

        let payload: WebhookPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.first_text_message(), None);
    }

    #[test]
    fn send_request_shape() {
        let req = SendMessageRequest::text("919800000000", "Hello!");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({
                "messaging_product": "whatsapp",
                "to": "919800000000",
                "text": {"body": "Hello!", "preview_url": false}
            })
        );
    }
}
