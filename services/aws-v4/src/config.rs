use crate::constants::*;
use crate::{Credential, RequestSigner};
use cloudsign_core::utils::Redact;
use cloudsign_core::{Env, Error, Result};
use log::debug;
use std::fmt::{Debug, Formatter};

/// Config for signing requests.
#[derive(Clone, Default)]
pub struct Config {
    /// `region` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_REGION`]
    pub region: Option<String>,
    /// `service` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CLOUDSIGN_SERVICE`]
    /// - default to [`DEFAULT_SERVICE`] when building a signer
    pub service: Option<String>,
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SECRET_ACCESS_KEY`]
    pub secret_access_key: Option<String>,
    /// `session_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SESSION_TOKEN`]
    pub session_token: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("service", &self.service)
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("session_token", &Redact::from(&self.session_token))
            .finish()
    }
}

impl Config {
    /// Load config from env, keeping every field that's already set.
    pub fn from_env(mut self, env: &dyn Env) -> Self {
        let envs = env.vars();

        if self.region.is_none() {
            self.region = envs.get(AWS_REGION).cloned();
        }
        if self.service.is_none() {
            self.service = envs.get(CLOUDSIGN_SERVICE).cloned();
        }
        if self.access_key_id.is_none() {
            self.access_key_id = envs.get(AWS_ACCESS_KEY_ID).cloned();
        }
        if self.secret_access_key.is_none() {
            self.secret_access_key = envs.get(AWS_SECRET_ACCESS_KEY).cloned();
        }
        if self.session_token.is_none() {
            self.session_token = envs.get(AWS_SESSION_TOKEN).cloned();
        }

        debug!("config loaded from env: {self:?}");
        self
    }

    /// Build the credential described by this config.
    ///
    /// Returns `None` unless both access key id and secret access key are set.
    pub fn credential(&self) -> Option<Credential> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(ak), Some(sk)) => Some(Credential {
                access_key_id: ak.clone(),
                secret_access_key: sk.clone(),
                session_token: self.session_token.clone(),
                expires_in: None,
            }),
            _ => None,
        }
    }

    /// Build a request signer for the configured scope.
    pub fn signer(&self) -> Result<RequestSigner> {
        let region = self
            .region
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("region is required but not configured"))?;
        let service = self.service.as_deref().unwrap_or(DEFAULT_SERVICE);
        if service.is_empty() {
            return Err(Error::config_invalid("service is configured but empty"));
        }

        Ok(RequestSigner::new(service, region))
    }
}
