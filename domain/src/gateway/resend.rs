use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use email_address::EmailAddress;
use log::*;
use serde::{Deserialize, Serialize};
use service::config::Config;

/// Resend API client for sending transactional emails.
pub struct ResendClient {
    client: reqwest::Client,
    base_url: String,
}

/// Request payload for sending an email via Resend.
#[derive(Debug, Serialize)]
pub struct SendEmailRequest {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Response from the Resend API.
#[derive(Debug, Deserialize)]
pub struct SendEmailResponse {
    pub id: Option<String>,
}

impl ResendClient {
    /// Create a new Resend client with authentication from config.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let api_key = config.resend_api_key().ok_or_else(|| {
            error!("Resend API key not configured");
            Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
            }
        })?;
        Self::with_base_url(config.resend_base_url().to_string(), api_key)
    }

    /// Create a client against an explicit base URL, e.g. a mock server in tests.
    pub fn with_base_url(base_url: String, api_key: String) -> Result<Self, Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        let mut auth_value =
            reqwest::header::HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|_| {
                Error {
                    source: None,
                    error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
                }
            })?;
        auth_value.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Send an email using the Resend API.
    pub async fn send_email(&self, request: SendEmailRequest) -> Result<SendEmailResponse, Error> {
        // Validate recipient addresses before sending
        for recipient in &request.to {
            if !is_valid_email(recipient) {
                warn!("Invalid recipient email: {recipient}");
                return Err(Error {
                    source: None,
                    error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(format!(
                        "Invalid recipient email address: {recipient}"
                    ))),
                });
            }
        }

        let url = format!("{}/emails", self.base_url);

        info!("Sending email to {} recipient(s)", request.to.len());
        debug!("Email subject: {}", request.subject);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to send email request: {e:?}");
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        let status = response.status();
        if status.is_success() {
            let parsed = response.json::<SendEmailResponse>().await.unwrap_or(
                SendEmailResponse { id: None },
            );
            info!("Email sent successfully, id: {:?}", parsed.id);
            Ok(parsed)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Failed to send email: {status} - {error_text}");
            Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            })
        }
    }
}

/// Accepts either a bare address or the `Name <address>` display form.
fn is_valid_email(value: &str) -> bool {
    let address = match (value.rfind('<'), value.rfind('>')) {
        (Some(start), Some(end)) if start < end => &value[start + 1..end],
        _ => value,
    };
    EmailAddress::is_valid(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn is_valid_email_accepts_bare_and_display_forms() {
        assert!(is_valid_email("jamie@example.com"));
        assert!(is_valid_email("FitCoach <no-reply@fitcoach.app>"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("FitCoach <not-an-email>"));
    }

    #[tokio::test]
    async fn send_email_posts_to_the_emails_endpoint() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/emails")
            .match_header("authorization", "Bearer re_test_key")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "from": "FitCoach <no-reply@fitcoach.app>",
                "to": ["jamie@example.com"],
                "subject": "You're invited",
                "html": "<p>Welcome</p>"
            })))
            .with_status(200)
            .with_body(r#"{"id":"email_123"}"#)
            .create_async()
            .await;

        let client =
            ResendClient::with_base_url(server.url(), "re_test_key".to_string()).unwrap();
        let response = client
            .send_email(SendEmailRequest {
                from: "FitCoach <no-reply@fitcoach.app>".to_string(),
                to: vec!["jamie@example.com".to_string()],
                subject: "You're invited".to_string(),
                html: Some("<p>Welcome</p>".to_string()),
                text: None,
            })
            .await
            .unwrap();

        assert_eq!(response.id.as_deref(), Some("email_123"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn send_email_rejects_an_invalid_recipient_without_calling_the_api() {
        let server = Server::new_async().await;

        let client =
            ResendClient::with_base_url(server.url(), "re_test_key".to_string()).unwrap();
        let result = client
            .send_email(SendEmailRequest {
                from: "FitCoach <no-reply@fitcoach.app>".to_string(),
                to: vec!["nope".to_string()],
                subject: "subject".to_string(),
                html: None,
                text: Some("body".to_string()),
            })
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn send_email_surfaces_api_errors() {
        let mut server = Server::new_async().await;

        let _mock = server
            .mock("POST", "/emails")
            .with_status(422)
            .with_body(r#"{"message":"invalid from address"}"#)
            .create_async()
            .await;

        let client =
            ResendClient::with_base_url(server.url(), "re_test_key".to_string()).unwrap();
        let result = client
            .send_email(SendEmailRequest {
                from: "FitCoach <no-reply@fitcoach.app>".to_string(),
                to: vec!["jamie@example.com".to_string()],
                subject: "subject".to_string(),
                html: None,
                text: Some("body".to_string()),
            })
            .await;

        assert!(result.is_err());
    }
}
