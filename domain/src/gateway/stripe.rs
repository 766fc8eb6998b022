use crate::error::{DomainErrorKind, EntityErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use hmac::{Hmac, Mac};
use log::*;
use serde::{Deserialize, Serialize};
use service::config::Config;
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Maximum allowed age for webhook events (5 minutes).
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Maximum allowed clock skew for future events (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Stripe API client for customer and checkout session management.
pub struct StripeClient {
    client: reqwest::Client,
    base_url: String,
}

/// The subset of a Stripe customer object the platform uses.
#[derive(Debug, Deserialize)]
pub struct Customer {
    pub id: String,
}

/// The subset of a Stripe Checkout Session object the platform uses.
#[derive(Debug, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

/// A Stripe webhook event. Only the fields the platform acts on are
/// captured; the `data.object` payload stays a raw JSON value because its
/// shape depends on the event type.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub created: i64,
    pub data: StripeEventData,
    #[serde(default)]
    pub livemode: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

impl StripeClient {
    /// Create a new Stripe client with authentication from config.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let api_key = config.stripe_secret_key().ok_or_else(|| {
            error!("Stripe secret key not configured");
            Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
            }
        })?;
        Self::with_base_url(config.stripe_base_url().to_string(), api_key)
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

    /// Creates a Stripe customer for a tenant. The tenant id is stored as
    /// metadata so the account is traceable from the Stripe dashboard.
    pub async fn create_customer(
        &self,
        name: &str,
        email: &str,
        tenant_id: &str,
    ) -> Result<Customer, Error> {
        let url = format!("{}/customers", self.base_url);
        info!("Creating Stripe customer for tenant {tenant_id}");

        let params = [
            ("name", name),
            ("email", email),
            ("metadata[tenant_id]", tenant_id),
        ];

        let response = self.client.post(&url).form(&params).send().await?;
        parse_response(response).await
    }

    /// Creates a subscription-mode Checkout Session for an existing customer.
    pub async fn create_checkout_session(
        &self,
        customer_id: &str,
        price_id: &str,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession, Error> {
        let url = format!("{}/checkout/sessions", self.base_url);
        info!("Creating checkout session for customer {customer_id}");

        let params = [
            ("mode", "subscription"),
            ("customer", customer_id),
            ("line_items[0][price]", price_id),
            ("line_items[0][quantity]", "1"),
            ("success_url", success_url),
            ("cancel_url", cancel_url),
        ];

        let response = self.client.post(&url).form(&params).send().await?;
        parse_response(response).await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, Error> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json::<T>().await?)
    } else {
        let error_text = response.text().await.unwrap_or_default();
        warn!("Stripe API call failed: {status} - {error_text}");
        Err(Error {
            source: None,
            error_kind: DomainErrorKind::External(ExternalErrorKind::Other(format!(
                "Stripe API returned {status}"
            ))),
        })
    }
}

/// Parsed components from the `Stripe-Signature` header.
///
/// Format: `t=<timestamp>,v1=<signature>[,v1=...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub v1_signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    pub fn parse(header: &str) -> Result<Self, Error> {
        let mut timestamp: Option<i64> = None;
        let mut v1_signatures: Vec<Vec<u8>> = Vec::new();

        for part in header.split(',') {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| signature_error("invalid Stripe-Signature header format"))?;

            match key {
                "t" => {
                    timestamp = Some(
                        value
                            .parse()
                            .map_err(|_| signature_error("invalid timestamp"))?,
                    );
                }
                "v1" => {
                    v1_signatures.push(
                        hex::decode(value)
                            .map_err(|_| signature_error("invalid v1 signature hex"))?,
                    );
                }
                // Ignore unknown fields (v0 and future schemes) for forward compatibility
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or_else(|| signature_error("missing timestamp"))?;
        if v1_signatures.is_empty() {
            return Err(signature_error("missing v1 signature"));
        }

        Ok(SignatureHeader {
            timestamp,
            v1_signatures,
        })
    }
}

/// Verifier for Stripe webhook signatures.
///
/// Implements Stripe's scheme: HMAC-SHA256 over `"{t}.{payload}"` with the
/// endpoint's signing secret, constant-time comparison, and a timestamp
/// window to reject replays.
pub struct WebhookVerifier {
    secret: String,
}

impl WebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verifies the signature header against the raw payload and parses the
    /// event. Every verification failure surfaces as an authentication
    /// error so the webhook endpoint answers 401 without detail.
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<StripeEvent, Error> {
        let header = SignatureHeader::parse(signature_header)?;

        self.validate_timestamp(header.timestamp)?;

        let expected = self.compute_signature(header.timestamp, payload);
        let matched = header
            .v1_signatures
            .iter()
            .any(|candidate| constant_time_compare(&expected, candidate));
        if !matched {
            return Err(signature_error("signature mismatch"));
        }

        let event: StripeEvent = serde_json::from_slice(payload).map_err(|e| Error {
            source: Some(Box::new(e)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::Invalid,
            )),
        })?;

        Ok(event)
    }

    fn validate_timestamp(&self, timestamp: i64) -> Result<(), Error> {
        let now = chrono::Utc::now().timestamp();
        let age = now - timestamp;

        if age > MAX_EVENT_AGE_SECS {
            return Err(signature_error("timestamp outside tolerance"));
        }
        if age < -MAX_CLOCK_SKEW_SECS {
            return Err(signature_error("timestamp in the future"));
        }

        Ok(())
    }

    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Vec<u8> {
        let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));

        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(signed_payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

fn signature_error(msg: &str) -> Error {
    Error {
        source: Some(msg.to_string().into()),
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
            EntityErrorKind::Unauthenticated,
        )),
    }
}

/// Constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, EntityErrorKind, InternalErrorKind};

    const SECRET: &str = "whsec_test123secret456";

    fn sign(payload: &[u8], secret: &str, timestamp: i64) -> String {
        let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(signed_payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn event_payload() -> &'static [u8] {
        br#"{"id":"evt_1","type":"customer.subscription.updated","created":1700000000,"data":{"object":{}},"livemode":false}"#
    }

    #[test]
    fn verify_accepts_a_valid_signature() {
        let verifier = WebhookVerifier::new(SECRET);
        let payload = event_payload();
        let timestamp = chrono::Utc::now().timestamp();
        let header = format!("t={},v1={}", timestamp, sign(payload, SECRET, timestamp));

        let event = verifier.verify_and_parse(payload, &header).unwrap();
        assert_eq!(event.id, "evt_1");
        assert_eq!(event.event_type, "customer.subscription.updated");
    }

    #[test]
    fn verify_rejects_a_signature_from_the_wrong_secret() {
        let verifier = WebhookVerifier::new(SECRET);
        let payload = event_payload();
        let timestamp = chrono::Utc::now().timestamp();
        let header = format!(
            "t={},v1={}",
            timestamp,
            sign(payload, "wrong_secret", timestamp)
        );

        let err = verifier.verify_and_parse(payload, &header).unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(
                EntityErrorKind::Unauthenticated
            ))
        );
    }

    #[test]
    fn verify_rejects_a_modified_payload() {
        let verifier = WebhookVerifier::new(SECRET);
        let payload = event_payload();
        let timestamp = chrono::Utc::now().timestamp();
        let header = format!("t={},v1={}", timestamp, sign(payload, SECRET, timestamp));

        let tampered =
            br#"{"id":"evt_2","type":"customer.subscription.deleted","created":1700000000,"data":{"object":{}},"livemode":false}"#;
        assert!(verifier.verify_and_parse(tampered, &header).is_err());
    }

    #[test]
    fn verify_rejects_an_old_timestamp() {
        let verifier = WebhookVerifier::new(SECRET);
        let payload = event_payload();
        // 10 minutes ago, beyond the 5 minute tolerance
        let timestamp = chrono::Utc::now().timestamp() - 600;
        let header = format!("t={},v1={}", timestamp, sign(payload, SECRET, timestamp));

        assert!(verifier.verify_and_parse(payload, &header).is_err());
    }

    #[test]
    fn verify_rejects_a_header_without_timestamp() {
        let verifier = WebhookVerifier::new(SECRET);
        let payload = event_payload();
        let header = format!(
            "v1={}",
            sign(payload, SECRET, chrono::Utc::now().timestamp())
        );

        assert!(verifier.verify_and_parse(payload, &header).is_err());
    }

    #[test]
    fn signature_header_parses_multiple_v1_entries() {
        let header =
            SignatureHeader::parse("t=1700000000,v1=deadbeef,v1=cafebabe").unwrap();
        assert_eq!(header.timestamp, 1700000000);
        assert_eq!(header.v1_signatures.len(), 2);
    }

    #[test]
    fn signature_header_ignores_unknown_schemes() {
        let header = SignatureHeader::parse("t=1700000000,v0=00ff,v1=deadbeef").unwrap();
        assert_eq!(header.v1_signatures.len(), 1);
    }
}
