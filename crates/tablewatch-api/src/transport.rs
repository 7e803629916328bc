// Transport configuration for building reqwest::Client instances.
//
// The reservation service expects the same static header set on every
// request: an API-key-bearing authorization value, an origin/referer pair,
// and a browser user-agent. None of these derive from session state, so
// they are installed once as default headers here.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

const ORIGIN_VALUE: &str = "https://resy.com";
const REFERER_VALUE: &str = "https://resy.com/";
// The service rejects unadorned client strings.
const USER_AGENT_VALUE: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Transport settings shared by every request.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` carrying the static header set.
    ///
    /// The authorization header is marked sensitive so it never shows up
    /// in debug output.
    pub fn build_client(&self, api_key: &SecretString) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("ResyAPI api_key=\"{}\"", api_key.expose_secret());
        let mut auth = HeaderValue::from_str(&auth_value).map_err(|e| Error::Validation {
            field: "api_key",
            reason: format!("invalid header value: {e}"),
        })?;
        auth.set_sensitive(true);

        headers.insert(AUTHORIZATION, auth);
        headers.insert(ORIGIN, HeaderValue::from_static(ORIGIN_VALUE));
        headers.insert(REFERER, HeaderValue::from_static(REFERER_VALUE));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }
}
