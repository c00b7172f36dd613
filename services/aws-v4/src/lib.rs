//! AWS SigV4 signer for AWS-fronted cloud APIs.
//!
//! Turns a [`RequestDescription`], a [`Credential`] and an instant into the
//! [`SignedHeaders`] an AWS endpoint accepts. Signing is a pure function:
//! no I/O, no shared state, no clock reads unless you ask for
//! [`RequestSigner::sign_now`].
//!
//! ## Example
//!
//! ```
//! use cloudsign_aws_v4::{Credential, RequestDescription, RequestSigner};
//! use cloudsign_core::time::parse_rfc3339;
//!
//! let signer = RequestSigner::new("execute-api", "us-east-1");
//! let req = RequestDescription::new("GET", "abc.execute-api.us-east-1.amazonaws.com", "/v1/robot/pmaps")
//!     .query("visible", true)
//!     .query("activeDetails", 2)
//!     .header("accept", "application/json");
//! let cred = Credential::new("AKIDEXAMPLE", "secret").with_session_token("token");
//!
//! let now = parse_rfc3339("2024-01-01T00:00:00Z")?;
//! let signed = signer.sign(&req, &cred, now)?;
//!
//! assert!(signed
//!     .authorization()
//!     .unwrap()
//!     .starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20240101/us-east-1/execute-api/aws4_request"));
//! assert_eq!(signed.get("x-amz-security-token"), Some("token"));
//! # Ok::<(), cloudsign_core::Error>(())
//! ```

mod canonical;
pub use canonical::CanonicalRequest;

mod config;
pub use config::Config;

mod constants;
pub use constants::{
    AWS_ACCESS_KEY_ID, AWS_REGION, AWS_SECRET_ACCESS_KEY, AWS_SESSION_TOKEN, CLOUDSIGN_SERVICE,
    DEFAULT_SERVICE, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN,
};

mod credential;
pub use credential::Credential;
pub use credential::IdentityCredentials;

mod key;
pub use key::SigningKey;

mod region;
pub use region::parse_region_from_identity_id;

mod request;
pub use request::RequestDescription;

mod sign_request;
pub use sign_request::RequestSigner;
pub use sign_request::SignedHeaders;
