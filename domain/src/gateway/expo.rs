use crate::error::{DomainErrorKind, Error, ExternalErrorKind};
use log::*;
use serde::{Deserialize, Serialize};
use service::config::Config;

/// Expo push notification client.
///
/// Expo's push API is unauthenticated for standard usage; delivery is
/// authorized by possession of a valid `ExponentPushToken`.
pub struct ExpoClient {
    client: reqwest::Client,
    base_url: String,
}

/// A single push message in Expo's send format.
#[derive(Debug, Serialize)]
pub struct PushMessage {
    pub to: String,
    pub title: String,
    pub body: String,
    pub sound: &'static str,
}

/// Per-message ticket returned by Expo.
#[derive(Debug, Deserialize)]
pub struct PushTicket {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PushResponse {
    data: Vec<PushTicket>,
}

impl PushMessage {
    pub fn new(to: String, title: String, body: String) -> Self {
        Self {
            to,
            title,
            body,
            sound: "default",
        }
    }
}

/// Whether a string looks like an Expo push token. Tokens that fail this
/// check are never sent to the API.
pub fn is_valid_push_token(token: &str) -> bool {
    (token.starts_with("ExponentPushToken[") || token.starts_with("ExpoPushToken["))
        && token.ends_with(']')
}

impl ExpoClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        Self::with_base_url(config.expo_base_url().to_string())
    }

    /// Create a client against an explicit base URL, e.g. a mock server in tests.
    pub fn with_base_url(base_url: String) -> Result<Self, Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, base_url })
    }

    /// Sends a single push message and returns Expo's ticket for it.
    pub async fn send_push(&self, message: PushMessage) -> Result<PushTicket, Error> {
        if !is_valid_push_token(&message.to) {
            warn!("Refusing to send push to invalid token");
            return Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                    "Invalid Expo push token".to_string(),
                )),
            });
        }

        let url = format!("{}/--/api/v2/push/send", self.base_url);
        debug!("Sending push notification: {}", message.title);

        let response = self.client.post(&url).json(&[&message]).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Expo push API call failed: {status} - {error_text}");
            return Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            });
        }

        let mut parsed = response.json::<PushResponse>().await?;
        parsed.data.pop().ok_or_else(|| Error {
            source: None,
            error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                "Expo returned no push ticket".to_string(),
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn push_token_validation_accepts_expo_formats() {
        assert!(is_valid_push_token("ExponentPushToken[abc123]"));
        assert!(is_valid_push_token("ExpoPushToken[abc123]"));
        assert!(!is_valid_push_token("abc123"));
        assert!(!is_valid_push_token("ExponentPushToken[abc123"));
    }

    #[tokio::test]
    async fn send_push_posts_the_message_and_parses_the_ticket() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/--/api/v2/push/send")
            .match_body(mockito::Matcher::Json(serde_json::json!([{
                "to": "ExponentPushToken[abc123]",
                "title": "New message",
                "body": "Coach Alex sent you a message",
                "sound": "default"
            }])))
            .with_status(200)
            .with_body(r#"{"data":[{"status":"ok"}]}"#)
            .create_async()
            .await;

        let client = ExpoClient::with_base_url(server.url()).unwrap();
        let ticket = client
            .send_push(PushMessage::new(
                "ExponentPushToken[abc123]".to_string(),
                "New message".to_string(),
                "Coach Alex sent you a message".to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(ticket.status, "ok");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn send_push_rejects_an_invalid_token_without_calling_the_api() {
        let server = Server::new_async().await;

        let client = ExpoClient::with_base_url(server.url()).unwrap();
        let result = client
            .send_push(PushMessage::new(
                "not-a-token".to_string(),
                "title".to_string(),
                "body".to_string(),
            ))
            .await;

        assert!(result.is_err());
    }
}
