use cloudsign_core::{Error, Result};
use http::Uri;
use std::collections::BTreeMap;
use std::fmt::Write;

/// The request being signed.
///
/// Built by the caller for every call and only read by the signer. Query
/// parameters form a mapping, so setting the same key twice keeps the last
/// value. Headers keep the caller's insertion order; names are compared
/// case-insensitively when they are merged for signing, see
/// [`CanonicalRequest`](crate::CanonicalRequest).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDescription {
    method: String,
    host: String,
    path: String,
    query: BTreeMap<String, String>,
    headers: Vec<(String, String)>,
    payload: Vec<u8>,
}

impl RequestDescription {
    /// Create a new request description without query, headers or payload.
    pub fn new(
        method: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            host: host.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    /// Create a request description from an URI.
    ///
    /// Host comes from the URI authority and path from the URI path. Query
    /// pairs in the URI are decoded into the parameter mapping.
    pub fn from_uri(method: impl Into<String>, uri: &Uri) -> Result<Self> {
        let host = uri
            .authority()
            .ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?
            .as_str();

        let mut req = Self::new(method, host, uri.path());
        if let Some(query) = uri.query() {
            for (k, v) in form_urlencoded::parse(query.as_bytes()) {
                req.query.insert(k.into_owned(), v.into_owned());
            }
        }

        Ok(req)
    }

    /// Set a query parameter, replacing any previous value of the same key.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.insert(key.into(), value.to_string());
        self
    }

    /// Replace all query parameters.
    pub fn queries<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        self.query = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.to_string()))
            .collect();
        self
    }

    /// Add an extra header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the request payload.
    pub fn payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = payload.into();
        self
    }

    /// HTTP method as given by the caller.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Host the request is sent to.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Request path, before encoding.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters ordered by key.
    pub fn query_params(&self) -> &BTreeMap<String, String> {
        &self.query
    }

    /// Extra headers in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Request payload.
    pub fn payload_bytes(&self) -> &[u8] {
        &self.payload
    }

    /// Build the `https` URI this request should be sent to.
    ///
    /// Query parameters are serialized as `application/x-www-form-urlencoded`,
    /// the same way a browser builds a search string.
    pub fn uri(&self) -> Result<Uri> {
        let mut s = String::with_capacity(self.host.len() + self.path.len() + 16);
        write!(s, "https://{}{}", self.host, self.path)?;
        if !self.query.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query.iter())
                .finish();
            write!(s, "?{query}")?;
        }

        Ok(s.parse::<Uri>()?)
    }

    /// Check the fields the signer can't work without.
    pub(crate) fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("method", &self.method),
            ("host", &self.host),
            ("path", &self.path),
        ] {
            if value.is_empty() {
                return Err(Error::config_invalid(format!(
                    "request {name} is required for signing"
                )));
            }
        }

        Ok(())
    }
}
