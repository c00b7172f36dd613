//! Cross check against the official `aws-sigv4` crate.

use cloudsign_aws_v4::{Credential, RequestDescription, RequestSigner};
use cloudsign_core::time::now;
use std::time::SystemTime;

use aws_credential_types::Credentials;
use aws_sigv4::http_request::SignableBody;
use aws_sigv4::http_request::SignableRequest;
use aws_sigv4::http_request::SigningSettings;
use aws_sigv4::sign::v4;
use pretty_assertions::assert_eq;

/// (name, uri, headers, payload)
type TestCase = (
    &'static str,
    &'static str,
    Vec<(&'static str, &'static str)>,
    &'static str,
);

fn test_cases() -> Vec<TestCase> {
    vec![
        (
            "get_request",
            "https://abc.execute-api.us-east-1.amazonaws.com/v1/robot/pmaps",
            vec![],
            "",
        ),
        (
            "get_request_with_query",
            "https://abc.execute-api.us-east-1.amazonaws.com/v1/robot/pmaps?visible=true&activeDetails=2",
            vec![
                ("accept", "application/json"),
                ("content-type", "application/json"),
            ],
            "",
        ),
        (
            "get_request_with_encoded_path",
            "https://abc.execute-api.us-east-1.amazonaws.com/v1/robot/pmaps/a%20b",
            vec![("accept", "application/json")],
            "",
        ),
        (
            "get_request_with_encoded_slash",
            "https://abc.execute-api.us-east-1.amazonaws.com/v1/robot/pmaps/a%2Fb",
            vec![],
            "",
        ),
        (
            "get_request_with_reserved_query",
            "https://abc.execute-api.us-east-1.amazonaws.com/v1/robot/pmaps?prefix=CI/&q=a%20b*",
            vec![],
            "",
        ),
        (
            "post_request_with_payload",
            "https://abc.execute-api.us-east-1.amazonaws.com/v2/login",
            vec![("content-type", "application/json")],
            r#"{"app_id":"IOS-1234"}"#,
        ),
    ]
}

#[test]
fn test_matches_aws_sigv4() {
    let _ = env_logger::builder().is_test(true).try_init();

    for (name, uri, headers, payload) in test_cases() {
        let method = if payload.is_empty() { "GET" } else { "POST" };
        let now = now();

        let ss = SigningSettings::default();
        let id = Credentials::new(
            "access_key_id",
            "secret_access_key",
            None,
            None,
            "hardcoded-credentials",
        )
        .into();
        let sp = v4::SigningParams::builder()
            .identity(&id)
            .region("us-east-1")
            .name("execute-api")
            .time(SystemTime::from(now))
            .settings(ss)
            .build()
            .expect("signing params must be valid");

        let output = aws_sigv4::http_request::sign(
            SignableRequest::new(
                method,
                uri,
                headers.iter().copied(),
                SignableBody::Bytes(payload.as_bytes()),
            )
            .expect("signable request must be valid"),
            &sp.into(),
        )
        .expect("signing must succeed");
        let (aws_sig, _) = output.into_parts();

        let mut expected_req = http::Request::builder()
            .method(method)
            .uri(uri)
            .body(payload)
            .expect("request must be valid");
        for (k, v) in headers.iter() {
            expected_req
                .headers_mut()
                .insert(*k, v.parse().expect("header must be valid"));
        }
        aws_sig.apply_to_request_http1x(&mut expected_req);

        let mut req =
            RequestDescription::from_uri(method, &uri.parse::<http::Uri>().expect("uri must be valid"))
                .expect("request must be valid")
                .payload(payload);
        for (k, v) in headers.iter() {
            req = req.header(*k, *v);
        }
        let signer = RequestSigner::new("execute-api", "us-east-1");
        let signed = signer
            .sign(
                &req,
                &Credential::new("access_key_id", "secret_access_key"),
                now,
            )
            .unwrap_or_else(|err| panic!("{name} should sign: {err:?}"));

        assert_eq!(
            expected_req.headers()["authorization"]
                .to_str()
                .expect("must be valid"),
            signed.authorization().expect("must be signed"),
            "{name} authorization mismatch"
        );
        assert_eq!(
            expected_req.headers()["x-amz-date"],
            signed.get("x-amz-date").expect("must be set"),
            "{name} date mismatch"
        );
    }
}
