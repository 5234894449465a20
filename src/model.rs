use serde::{Deserialize, Serialize};

/// Query string of the webhook verification handshake.
#[derive(Debug, Deserialize)]
pub struct VerifyQuery {
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    /// Empty when absent, so the body is rejected as a non-page event.
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub entry: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
pub struct Entry {
    /// Always a single event in practice, even though the platform sends an array.
    /// Kept raw so one malformed event cannot fail the whole batch.
    #[serde(default)]
    pub messaging: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagingEvent {
    pub sender: Participant,
    pub message: Option<IncomingMessage>,
    pub postback: Option<Postback>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub text: Option<String>,
    pub quick_reply: Option<QuickReplyPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuickReplyPayload {
    pub payload: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postback {
    pub payload: Option<String>,
}

/// Message body accepted by the Send API: plain text, optionally with quick replies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingMessage {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_replies: Option<Vec<QuickReply>>,
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self {
        OutgoingMessage {
            text: text.into(),
            quick_replies: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickReply {
    pub content_type: String,
    pub title: String,
    pub payload: String,
}

#[derive(Debug, Serialize)]
pub struct SendRequest<'a> {
    pub recipient: Participant,
    pub message: &'a OutgoingMessage,
}

#[derive(Debug, Deserialize)]
pub struct WeatherApiResponse {
    pub name: Option<String>,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
pub struct WeatherCondition {
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub place: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messaging_event_with_quick_reply() {
        let json = r#"{
            "sender": {"id": "psid-1"},
            "recipient": {"id": "page-1"},
            "timestamp": 1458692752478,
            "message": {
                "mid": "m_1",
                "text": "Singapore",
                "quick_reply": {"payload": "1880252"}
            }
        }"#;
        let event: MessagingEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.sender.id, "psid-1");
        let message = event.message.unwrap();
        assert_eq!(message.quick_reply.unwrap().payload, "1880252");
        assert!(event.postback.is_none());
    }

    #[test]
    fn test_payload_tolerates_missing_object_and_odd_events() {
        let payload: WebhookPayload = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.object, "");
        assert!(payload.entry.is_empty());

        let payload: WebhookPayload = serde_json::from_str(
            r#"{"object": "page", "entry": [{"messaging": [{"read": {"watermark": 1}}]}]}"#,
        )
        .unwrap();
        assert_eq!(payload.entry[0].messaging.len(), 1);
    }

    #[test]
    fn test_text_message_omits_quick_replies() {
        let value = serde_json::to_value(OutgoingMessage::text("hello")).unwrap();
        assert_eq!(value, serde_json::json!({ "text": "hello" }));
    }
}
