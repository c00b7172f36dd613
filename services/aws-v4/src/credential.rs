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

use crate::region::parse_region_from_identity_id;
use cloudsign_core::time::{parse_rfc3339, DateTime};
use cloudsign_core::utils::Redact;
use cloudsign_core::{Error, Result};
use serde::Deserialize;
use std::fmt::{Debug, Formatter};

/// Credential that holds the access_key and secret_key.
#[derive(Default, Clone)]
pub struct Credential {
    /// Access key id for aws services.
    pub access_key_id: String,
    /// Secret access key for aws services.
    pub secret_access_key: String,
    /// Session token for aws services.
    pub session_token: Option<String>,
    /// Expiration time for this credential.
    pub expires_in: Option<DateTime>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("session_token", &Redact::from(&self.session_token))
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

impl Credential {
    /// Create a long-term credential without session token.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            ..Default::default()
        }
    }

    /// Attach a session token, turning this into a temporary credential.
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Set the instant this credential stops being accepted.
    pub fn with_expiration(mut self, expires_in: DateTime) -> Self {
        self.expires_in = Some(expires_in);
        self
    }

    /// Check whether this credential can still sign a request at `now`.
    pub fn is_valid_at(&self, now: DateTime) -> bool {
        if self.access_key_id.is_empty() || self.secret_access_key.is_empty() {
            return false;
        }
        // Take 120s as buffer to avoid edge cases.
        if let Some(valid) = self
            .expires_in
            .map(|v| v > now + chrono::TimeDelta::try_minutes(2).expect("in bounds"))
        {
            return valid;
        }

        true
    }
}

/// Temporary credentials handed out by an identity pool after login.
///
/// The login flow returns this document verbatim; field names follow the
/// service's PascalCase JSON.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IdentityCredentials {
    /// Access key id.
    pub access_key_id: String,
    /// Secret key. The document calls it `SecretKey`, not `SecretAccessKey`.
    pub secret_key: String,
    /// Session token bound to the temporary key pair.
    pub session_token: String,
    /// Identity id in the form `<region>:<uuid>`.
    pub cognito_id: String,
    /// RFC 3339 expiration, if the service reported one.
    #[serde(default)]
    pub expiration: Option<String>,
}

impl Debug for IdentityCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityCredentials")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("session_token", &Redact::from(&self.session_token))
            .field("cognito_id", &self.cognito_id)
            .field("expiration", &self.expiration)
            .finish()
    }
}

impl IdentityCredentials {
    /// Region the identity lives in, taken from the identity id.
    pub fn region(&self) -> Result<String> {
        parse_region_from_identity_id(&self.cognito_id)
    }

    /// Convert into a signing credential.
    pub fn into_credential(self) -> Result<Credential> {
        let expires_in = match self.expiration.as_deref() {
            Some(v) => Some(parse_rfc3339(v).map_err(|e| {
                Error::credential_invalid(format!("invalid credential expiration: {v}"))
                    .with_source(e)
            })?),
            None => None,
        };

        Ok(Credential {
            access_key_id: self.access_key_id,
            secret_access_key: self.secret_key,
            session_token: Some(self.session_token),
            expires_in,
        })
    }
}
