// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::constants::{AWS4_HMAC_SHA256, AWS4_REQUEST, X_AMZ_SECURITY_TOKEN};
use crate::{CanonicalRequest, Credential, RequestDescription, SigningKey};
use cloudsign_core::hash::hex_sha256;
use cloudsign_core::time::{DateTime, SigningContext};
use cloudsign_core::{Error, Result};
use http::header::AUTHORIZATION;
use http::request::Parts;
use http::{HeaderMap, HeaderValue};
use log::debug;
use std::fmt::Write;

/// RequestSigner that implement AWS SigV4.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// The signer holds no state besides its scope, so one instance can be
/// shared across threads and used for any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    service: String,
    region: String,
}

impl RequestSigner {
    /// Create a new signer for the given service and region.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),
        }
    }

    /// Service name used in the credential scope.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Region used in the credential scope.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Sign the request at the given instant.
    ///
    /// The result only depends on the arguments: the same request,
    /// credential and instant always produce the same headers.
    pub fn sign(
        &self,
        req: &RequestDescription,
        cred: &Credential,
        now: DateTime,
    ) -> Result<SignedHeaders> {
        self.validate(req, cred, now)?;
        let ctx = SigningContext::new(now);

        let creq = CanonicalRequest::build(req, &ctx)?;
        let creq_string = creq.to_string();
        debug!("calculated canonical request: {creq_string}");

        // Scope: "20220313/<region>/<service>/aws4_request"
        let scope = format!(
            "{}/{}/{}/{}",
            ctx.date_stamp(),
            self.region,
            self.service,
            AWS4_REQUEST
        );
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "{AWS4_HMAC_SHA256}")?;
            writeln!(f, "{}", ctx.amz_date())?;
            writeln!(f, "{scope}")?;
            write!(f, "{}", hex_sha256(creq_string.as_bytes()))?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = SigningKey::derive(
            &cred.secret_access_key,
            &ctx.date_stamp(),
            &self.region,
            &self.service,
        )?;
        let signature = signing_key.sign(&string_to_sign)?;

        let mut authorization = HeaderValue::from_str(&format!(
            "{AWS4_HMAC_SHA256} Credential={}/{}, SignedHeaders={}, Signature={}",
            cred.access_key_id,
            scope,
            creq.signed_headers(),
            signature
        ))
        .map_err(|e| {
            Error::request_invalid("failed to create authorization header").with_source(e)
        })?;
        authorization.set_sensitive(true);

        let mut headers = creq.into_headers();
        headers.insert(AUTHORIZATION, authorization);

        // The token is attached after signing, it's not part of the signed headers.
        if let Some(token) = &cred.session_token {
            let mut value = HeaderValue::from_str(token).map_err(|e| {
                Error::credential_invalid("failed to create security token header").with_source(e)
            })?;
            // Set token value sensitive to avoid leaking.
            value.set_sensitive(true);

            headers.insert(X_AMZ_SECURITY_TOKEN, value);
        }

        Ok(SignedHeaders { headers })
    }

    /// Sign the request with the current time read from the system clock.
    ///
    /// The clock is read exactly once.
    pub fn sign_now(&self, req: &RequestDescription, cred: &Credential) -> Result<SignedHeaders> {
        let ctx = SigningContext::capture()?;
        self.sign(req, cred, ctx.now())
    }

    fn validate(&self, req: &RequestDescription, cred: &Credential, now: DateTime) -> Result<()> {
        if self.service.is_empty() {
            return Err(Error::config_invalid("service is required for signing"));
        }
        if self.region.is_empty() {
            return Err(Error::config_invalid("region is required for signing"));
        }
        req.validate()?;

        if cred.access_key_id.is_empty() {
            return Err(Error::config_invalid("access key id is required for signing"));
        }
        if cred.secret_access_key.is_empty() {
            return Err(Error::config_invalid(
                "secret access key is required for signing",
            ));
        }
        if !cred.is_valid_at(now) {
            return Err(Error::credential_invalid(format!(
                "credential expired at {:?}",
                cred.expires_in
            )));
        }

        Ok(())
    }
}

/// Headers produced by signing, ready to be attached to the outgoing request.
///
/// Contains `host`, `x-amz-date`, every caller header, `authorization`, and
/// `x-amz-security-token` when the credential carries a session token. Header
/// names are case-insensitive and stored lowercase.
#[derive(Debug, Clone)]
pub struct SignedHeaders {
    headers: HeaderMap,
}

impl SignedHeaders {
    /// The `Authorization` header value.
    pub fn authorization(&self) -> Option<&str> {
        self.get(AUTHORIZATION.as_str())
    }

    /// Get a header value by case-insensitive name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Check whether a header is present.
    pub fn contains(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Returns true if there are no headers.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Borrow the underlying header map.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Consume into the underlying header map.
    pub fn into_headers(self) -> HeaderMap {
        self.headers
    }

    /// Render as `(name, value)` pairs sorted by name.
    ///
    /// Names are lowercase except `Authorization`, which keeps its
    /// conventional spelling.
    pub fn to_pairs(&self) -> Result<Vec<(String, String)>> {
        let mut pairs = self
            .headers
            .iter()
            .map(|(k, v)| -> Result<(String, String)> {
                let name = if *k == AUTHORIZATION {
                    "Authorization".to_string()
                } else {
                    k.as_str().to_string()
                };
                Ok((name, v.to_str()?.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        pairs.sort_by_key(|(k, _)| k.to_ascii_lowercase());

        Ok(pairs)
    }

    /// Apply the signed headers to an outgoing request, replacing any
    /// existing values of the same names.
    pub fn apply(self, parts: &mut Parts) {
        for (name, value) in self.headers {
            if let Some(name) = name {
                parts.headers.insert(name, value);
            }
        }
    }
}
