//! Webhook signature verification.
//!
//! The provider signs each delivery with HMAC-SHA256 over
//! `"{timestamp}.{raw_body}"` using a shared secret. Verification MUST run
//! against the raw, unparsed bytes: re-serializing the payload can change
//! its byte layout and silently break the check. Timestamp bounds reject
//! replayed deliveries.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::WebhookError;
use super::event::ProviderEvent;

type HmacSha256 = Hmac<Sha256>;

/// Maximum allowed age for a signed delivery (5 minutes).
const MAX_SIGNED_AGE_SECS: i64 = 300;

/// Tolerance for timestamps from the future (1 minute of clock skew).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Parsed components of the signature header.
///
/// Format: `t=<timestamp>,v1=<hex signature>[,v0=<legacy>]`; unknown fields
/// are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp the provider signed.
    pub timestamp: i64,
    /// Primary HMAC-SHA256 signature.
    pub v1: Vec<u8>,
}

impl SignatureHeader {
    /// Parse a signature header string.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        if header.is_empty() {
            return Err(WebhookError::MalformedHeader("empty header".to_string()));
        }

        let mut timestamp: Option<i64> = None;
        let mut v1: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                return Err(WebhookError::MalformedHeader(
                    "expected key=value pairs".to_string(),
                ));
            };

            match key.trim() {
                "t" => {
                    timestamp = Some(value.trim().parse().map_err(|_| {
                        WebhookError::MalformedHeader("invalid timestamp".to_string())
                    })?);
                }
                "v1" => {
                    v1 = Some(hex_decode(value.trim()).ok_or_else(|| {
                        WebhookError::MalformedHeader("v1 is not valid hex".to_string())
                    })?);
                }
                _ => {}
            }
        }

        Ok(Self {
            timestamp: timestamp.ok_or_else(|| {
                WebhookError::MalformedHeader("missing timestamp".to_string())
            })?,
            v1: v1.ok_or_else(|| {
                WebhookError::MalformedHeader("missing v1 signature".to_string())
            })?,
        })
    }
}

/// Verifies webhook deliveries against the shared signing secret.
pub struct WebhookVerifier {
    secret: SecretString,
}

impl WebhookVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Verify a delivery and parse it into an event.
    ///
    /// Verification order is load-bearing: header parse, timestamp bounds,
    /// signature over the raw bytes, and only then JSON parsing. Nothing is
    /// parsed from an unverified payload.
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<ProviderEvent, WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;

        self.check_timestamp(header.timestamp)?;

        let expected = self.compute_signature(header.timestamp, payload);
        if !constant_time_eq(&expected, &header.v1) {
            tracing::warn!(signed_timestamp = header.timestamp, "webhook signature mismatch");
            return Err(WebhookError::InvalidSignature);
        }

        ProviderEvent::from_payload(payload)
    }

    fn check_timestamp(&self, timestamp: i64) -> Result<(), WebhookError> {
        let now = chrono::Utc::now().timestamp();
        let age = now - timestamp;

        if age > MAX_SIGNED_AGE_SECS {
            tracing::warn!(
                signed_timestamp = timestamp,
                age_secs = age,
                "webhook delivery outside replay window"
            );
            return Err(WebhookError::StaleTimestamp);
        }

        if age < -MAX_CLOCK_SKEW_SECS {
            tracing::warn!(
                signed_timestamp = timestamp,
                "webhook delivery timestamped in the future"
            );
            return Err(WebhookError::FutureTimestamp);
        }

        Ok(())
    }

    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key size");
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

/// Constant-time equality for signature bytes.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Decode a hex string to bytes.
fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.is_empty() || hex.len() % 2 != 0 {
        return None;
    }

    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for i in (0..hex.len()).step_by(2) {
        bytes.push(u8::from_str_radix(hex.get(i..i + 2)?, 16).ok()?);
    }
    Some(bytes)
}

/// Encode bytes as lowercase hex.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Build a valid signature header for a payload, as the provider would.
///
/// Exposed so integration tests can sign fixture deliveries.
pub fn sign_for_tests(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key size");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    format!("t={},v1={}", timestamp, hex_encode(&mac.finalize().into_bytes()))
}
