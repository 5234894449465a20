use crate::{
    error::BotError,
    model::{OutgoingMessage, Participant, SendRequest},
};

/// Messenger Platform Send API.
#[derive(Clone)]
pub struct Messenger {
    client: reqwest::Client,
    send_url: String,
    access_token: String,
}

impl Messenger {
    pub fn new(
        client: reqwest::Client,
        send_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Messenger {
            client,
            send_url: send_url.into(),
            access_token: access_token.into(),
        }
    }

    pub async fn send(&self, psid: &str, message: &OutgoingMessage) -> Result<(), BotError> {
        let body = SendRequest {
            recipient: Participant {
                id: psid.to_string(),
            },
            message,
        };

        let res = self
            .client
            .post(&self.send_url)
            .query(&[("access_token", &self.access_token)])
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(BotError::Status {
                service: "Send API",
                status: res.status(),
            });
        }

        Ok(())
    }
}
