mod execute_api;
mod sigv4_compat;

use cloudsign_aws_v4::{Credential, RequestSigner};
use cloudsign_core::time::{parse_rfc3339, DateTime};

/// Credential used by the published AWS SigV4 test suite.
pub fn suite_credential() -> Credential {
    Credential::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
}

/// Signer and instant used by the published AWS SigV4 test suite.
pub fn init_suite() -> (RequestSigner, DateTime) {
    let _ = env_logger::builder().is_test(true).try_init();

    let now = parse_rfc3339("2015-08-30T12:36:00Z").expect("suite time must be valid");
    (RequestSigner::new("service", "us-east-1"), now)
}

/// Split an authorization header into (credential, signed headers, signature).
pub fn parse_authorization(value: &str) -> (&str, &str, &str) {
    let rest = value
        .strip_prefix("AWS4-HMAC-SHA256 ")
        .expect("authorization must start with the algorithm");
    let mut parts = rest.split(", ");

    let credential = parts
        .next()
        .and_then(|v| v.strip_prefix("Credential="))
        .expect("credential must be present");
    let signed_headers = parts
        .next()
        .and_then(|v| v.strip_prefix("SignedHeaders="))
        .expect("signed headers must be present");
    let signature = parts
        .next()
        .and_then(|v| v.strip_prefix("Signature="))
        .expect("signature must be present");
    assert!(parts.next().is_none(), "unexpected authorization part");

    (credential, signed_headers, signature)
}
