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

//! Canonical request construction.
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders\n
//! SignedHeaders\n
//! HashedPayload
//! ```
//!
//! `CanonicalHeaders` carries one `name:value\n` line per header, so the
//! block is followed by an empty line in the final string.

use crate::constants::{AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET, X_AMZ_DATE};
use crate::RequestDescription;
use cloudsign_core::hash::hex_sha256;
use cloudsign_core::time::SigningContext;
use cloudsign_core::{Error, Result};
use http::header::{HeaderName, HOST};
use http::{HeaderMap, HeaderValue};
use percent_encoding::utf8_percent_encode;
use std::fmt;
use std::fmt::Write;

/// The deterministic, normalized text form of a request.
#[derive(Debug, Clone)]
pub struct CanonicalRequest {
    method: String,
    uri: String,
    query: String,
    headers: HeaderMap,
    canonical_headers: String,
    signed_headers: String,
    payload_hash: String,
}

impl CanonicalRequest {
    /// Canonicalize the request at the captured instant.
    ///
    /// Header merge: `host` and `x-amz-date` are set first, then every
    /// caller header is inserted in order. Names are case-insensitive, so a
    /// caller header replaces a default of the same name and a later caller
    /// header replaces an earlier one that differs only by case.
    ///
    /// Header values are copied verbatim. Whitespace is neither trimmed nor
    /// collapsed.
    pub fn build(req: &RequestDescription, ctx: &SigningContext) -> Result<Self> {
        let headers = merge_headers(req, ctx)?;

        let mut names: Vec<&str> = headers.keys().map(HeaderName::as_str).collect();
        names.sort_unstable();

        let mut canonical_headers = String::with_capacity(names.len() * 32);
        for name in &names {
            let value = headers[*name].to_str().map_err(|e| {
                Error::request_invalid(format!("header {name} is not visible ascii")).with_source(e)
            })?;
            writeln!(canonical_headers, "{name}:{value}")?;
        }
        let signed_headers = names.join(";");

        Ok(Self {
            method: req.method().to_uppercase(),
            uri: canonical_uri(req.path()),
            query: canonical_query_string(req),
            canonical_headers,
            signed_headers,
            payload_hash: hex_sha256(req.payload_bytes()),
            headers,
        })
    }

    /// Signed-headers list: sorted lowercase header names joined by `;`.
    pub fn signed_headers(&self) -> &str {
        &self.signed_headers
    }

    /// Canonical query string.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Canonical URI.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Hex SHA256 of the payload.
    pub fn payload_hash(&self) -> &str {
        &self.payload_hash
    }

    /// The merged headers that were signed.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Consume the canonical request, returning the merged headers.
    pub fn into_headers(self) -> HeaderMap {
        self.headers
    }
}

impl fmt::Display for CanonicalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.uri)?;
        writeln!(f, "{}", self.query)?;
        writeln!(f, "{}", self.canonical_headers)?;
        writeln!(f, "{}", self.signed_headers)?;
        write!(f, "{}", self.payload_hash)
    }
}

fn merge_headers(req: &RequestDescription, ctx: &SigningContext) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(req.headers().len() + 2);
    headers.insert(HOST, HeaderValue::from_str(req.host())?);
    headers.insert(X_AMZ_DATE, HeaderValue::from_str(&ctx.amz_date())?);

    for (name, value) in req.headers() {
        // HeaderName lowercases on parse, which gives us the case-insensitive key.
        let name = HeaderName::from_bytes(name.as_bytes())?;
        headers.insert(name, HeaderValue::from_str(value)?);
    }

    Ok(headers)
}

/// Percent-encode the path as given, keeping `/` as separator.
///
/// An escape already present in the path is encoded again, `%` becomes `%25`.
fn canonical_uri(path: &str) -> String {
    utf8_percent_encode(path, &AWS_URI_ENCODE_SET).to_string()
}

/// Sort by raw key, then encode both key and value.
fn canonical_query_string(req: &RequestDescription) -> String {
    // BTreeMap<String, _> iterates in byte order, which is code point order for utf-8.
    req.query_params()
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
