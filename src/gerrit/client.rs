//! HTTP transport for the Gerrit REST API
//!
//! `ChangeSource` is the seam between the pagination logic and the network.

use std::fmt;

use digest_auth::{AuthContext, WwwAuthenticateHeader};
use tracing::debug;
use ureq::tls::TlsConfig;

use crate::error::{AppError, FetchError};

/// Something that can answer a `/changes/` query URL with a raw body
pub(crate) trait ChangeSource {
    /// Requests must use the `/a/` prefix
    fn authenticated(&self) -> bool {
        false
    }

    /// GET the URL and return the undecoded body text
    fn get(&mut self, url: &str) -> Result<String, FetchError>;
}

/// HTTP digest credentials
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Credentials {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl Credentials {
    /// Parse `user:password`; the password may itself contain `:`.
    pub(crate) fn parse(input: &str) -> Result<Self, AppError> {
        let (username, password) = input.split_once(':').ok_or(AppError::InvalidAuth)?;
        if username.is_empty() {
            return Err(AppError::InvalidAuth);
        }
        Ok(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

pub(crate) struct HttpChangeSource {
    agent: ureq::Agent,
    credentials: Option<Credentials>,
    /// Last digest challenge, reused for later pages
    challenge: Option<WwwAuthenticateHeader>,
}

impl HttpChangeSource {
    pub(crate) fn new(credentials: Option<Credentials>, insecure: bool) -> Self {
        let mut config = ureq::Agent::config_builder().http_status_as_error(false);
        if insecure {
            config = config.tls_config(TlsConfig::builder().disable_verification(true).build());
        }
        let agent: ureq::Agent = config.build().into();

        Self {
            agent,
            credentials,
            challenge: None,
        }
    }

    fn send(
        &self,
        url: &str,
        authorization: Option<&str>,
    ) -> Result<ureq::http::Response<ureq::Body>, FetchError> {
        let mut request = self
            .agent
            .get(url)
            .header("Accept", "application/json");
        if let Some(value) = authorization {
            request = request.header("Authorization", value);
        }
        Ok(request.call()?)
    }

    /// Answer the stored challenge for this URL, if there is one
    fn authorization(&mut self, url: &str) -> Result<Option<String>, FetchError> {
        let (Some(credentials), Some(challenge)) = (&self.credentials, self.challenge.as_mut())
        else {
            return Ok(None);
        };
        let uri = request_uri(url);
        let context = AuthContext::new(
            credentials.username.as_str(),
            credentials.password.as_str(),
            uri.as_str(),
        );
        let header = challenge
            .respond(&context)
            .map_err(|e| FetchError::Digest(e.to_string()))?;
        Ok(Some(header.to_header_string()))
    }
}

impl ChangeSource for HttpChangeSource {
    fn authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    fn get(&mut self, url: &str) -> Result<String, FetchError> {
        let authorization = self.authorization(url)?;
        let mut response = self.send(url, authorization.as_deref())?;

        if response.status().as_u16() == 401 && self.credentials.is_some() {
            let header = response
                .headers()
                .get("www-authenticate")
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned)
                .ok_or(FetchError::MissingChallenge)?;
            debug!("received digest challenge, retrying with credentials");
            self.challenge =
                Some(digest_auth::parse(&header).map_err(|e| FetchError::Digest(e.to_string()))?);
            let authorization = self.authorization(url)?;
            response = self.send(url, authorization.as_deref())?;
        }

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let mut body = response.into_body();
        Ok(body.read_to_string()?)
    }
}

/// Path and query of a URL, as the digest `uri` parameter expects
fn request_uri(url: &str) -> String {
    url.parse::<ureq::http::Uri>()
        .ok()
        .and_then(|uri| uri.path_and_query().map(|pq| pq.as_str().to_string()))
        .unwrap_or_else(|| "/".to_string())
}
