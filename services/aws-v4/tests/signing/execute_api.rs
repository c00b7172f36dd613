//! Signing an API Gateway request the way the robot map endpoints expect.

use super::parse_authorization;
use cloudsign_aws_v4::{
    parse_region_from_identity_id, CanonicalRequest, Credential, IdentityCredentials,
    RequestDescription, RequestSigner,
};
use cloudsign_core::time::{parse_rfc3339, DateTime, SigningContext};
use pretty_assertions::assert_eq;

const HOST: &str = "abc.execute-api.us-east-1.amazonaws.com";

fn pmaps_request() -> RequestDescription {
    RequestDescription::new("GET", HOST, "/v1/robot/pmaps")
        .query("visible", true)
        .query("activeDetails", 2)
        .payload("")
        .header("accept", "application/json")
        .header("content-type", "application/json")
        .header("user-agent", "aws-sdk-iOS/2.27.6 iOS/18.0.1 en_US")
}

fn mocked_now() -> DateTime {
    parse_rfc3339("2024-10-16T08:30:00Z").unwrap()
}

#[test]
fn test_pmaps_authorization() {
    let _ = env_logger::builder().is_test(true).try_init();

    let signer = RequestSigner::new("execute-api", "us-east-1");
    let cred = Credential::new("AKIDEXAMPLE", "secret");
    let signed = signer.sign(&pmaps_request(), &cred, mocked_now()).unwrap();

    let (credential, signed_headers, signature) =
        parse_authorization(signed.authorization().unwrap());
    assert_eq!(
        credential,
        "AKIDEXAMPLE/20241016/us-east-1/execute-api/aws4_request"
    );
    assert_eq!(
        signed_headers,
        "accept;content-type;host;user-agent;x-amz-date"
    );
    assert_eq!(signature.len(), 64);
    assert!(signature
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));

    assert_eq!(signed.get("x-amz-date"), Some("20241016T083000Z"));
    assert_eq!(signed.get("host"), Some(HOST));
    assert!(!signed.contains("x-amz-security-token"));

    // Same instant, same signature.
    let again = signer.sign(&pmaps_request(), &cred, mocked_now()).unwrap();
    assert_eq!(signed.authorization(), again.authorization());
}

#[test]
fn test_pmaps_canonical_request() {
    let creq = CanonicalRequest::build(&pmaps_request(), &SigningContext::new(mocked_now())).unwrap();

    assert_eq!(
        creq.to_string(),
        [
            "GET",
            "/v1/robot/pmaps",
            "activeDetails=2&visible=true",
            "accept:application/json",
            "content-type:application/json",
            &format!("host:{HOST}"),
            "user-agent:aws-sdk-iOS/2.27.6 iOS/18.0.1 en_US",
            "x-amz-date:20241016T083000Z",
            "",
            "accept;content-type;host;user-agent;x-amz-date",
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        ]
        .join("\n")
    );
}

#[test]
fn test_sign_with_identity_credentials() {
    let doc: IdentityCredentials = serde_json::from_str(
        r#"{
            "AccessKeyId": "ASIAEXAMPLE",
            "SecretKey": "secret",
            "SessionToken": "session-token",
            "CognitoId": "us-east-1:4fe7b1c2-0d5e-4a55-9a4a-2c8f0f1d0b6e",
            "Expiration": "2024-10-16T09:30:00Z"
        }"#,
    )
    .unwrap();

    let region = doc.region().unwrap();
    assert_eq!(region, parse_region_from_identity_id(&doc.cognito_id).unwrap());

    let signer = RequestSigner::new("execute-api", &region);
    let cred = doc.into_credential().unwrap();
    let signed = signer.sign(&pmaps_request(), &cred, mocked_now()).unwrap();

    assert_eq!(signed.get("x-amz-security-token"), Some("session-token"));
    assert!(signed
        .authorization()
        .unwrap()
        .starts_with("AWS4-HMAC-SHA256 Credential=ASIAEXAMPLE/20241016/us-east-1/execute-api/aws4_request, "));
}

#[test]
fn test_sign_from_uri() {
    let uri: http::Uri =
        "https://abc.execute-api.us-east-1.amazonaws.com/v1/robot/pmaps?visible=true&activeDetails=2"
            .parse()
            .unwrap();
    let req = RequestDescription::from_uri("GET", &uri)
        .unwrap()
        .header("accept", "application/json")
        .header("content-type", "application/json")
        .header("user-agent", "aws-sdk-iOS/2.27.6 iOS/18.0.1 en_US");

    let signer = RequestSigner::new("execute-api", "us-east-1");
    let cred = Credential::new("AKIDEXAMPLE", "secret");

    let from_uri = signer.sign(&req, &cred, mocked_now()).unwrap();
    let from_builder = signer.sign(&pmaps_request(), &cred, mocked_now()).unwrap();
    assert_eq!(from_uri.authorization(), from_builder.authorization());
}

#[test]
fn test_encoded_path_segment_is_encoded_again() {
    let uri: http::Uri = format!("https://{HOST}/v1/robot/pmaps/a%20b/c%2Fd")
        .parse()
        .unwrap();
    let req = RequestDescription::from_uri("GET", &uri).unwrap();
    let creq = CanonicalRequest::build(&req, &SigningContext::new(mocked_now())).unwrap();

    assert_eq!(creq.uri(), "/v1/robot/pmaps/a%2520b/c%252Fd");

    // An escaped slash and a real one are different resources.
    let nested = RequestDescription::new("GET", HOST, "/v1/robot/pmaps/a%20b/c/d");
    let signer = RequestSigner::new("execute-api", "us-east-1");
    let cred = Credential::new("AKIDEXAMPLE", "secret");
    assert_ne!(
        signer.sign(&req, &cred, mocked_now()).unwrap().authorization(),
        signer.sign(&nested, &cred, mocked_now()).unwrap().authorization()
    );
}
