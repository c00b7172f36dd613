use crate::constants::AWS4_REQUEST;
use cloudsign_core::hash::{hex_hmac_sha256, hmac_sha256};
use cloudsign_core::Result;
use std::fmt::{Debug, Formatter};

/// Scope-bound symmetric key for one signature.
///
/// Derived fresh for every call and never cached.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(***)")
    }
}

impl SigningKey {
    /// Derive the signing key for `date_stamp/region/service/aws4_request`.
    ///
    /// Every step feeds its raw HMAC output as the key of the next one.
    pub fn derive(secret: &str, date_stamp: &str, region: &str, service: &str) -> Result<Self> {
        // Sign secret
        let secret = format!("AWS4{secret}");
        // Sign date
        let sign_date = hmac_sha256(secret.as_bytes(), date_stamp.as_bytes())?;
        // Sign region
        let sign_region = hmac_sha256(&sign_date, region.as_bytes())?;
        // Sign service
        let sign_service = hmac_sha256(&sign_region, service.as_bytes())?;
        // Sign request
        let sign_request = hmac_sha256(&sign_service, AWS4_REQUEST.as_bytes())?;

        Ok(Self(sign_request))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Hex encoded HMAC-SHA256 of the string to sign.
    pub fn sign(&self, string_to_sign: &str) -> Result<String> {
        hex_hmac_sha256(&self.0, string_to_sign.as_bytes())
    }
}
