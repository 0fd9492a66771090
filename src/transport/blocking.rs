//! The default transport, backed by a blocking `ureq` agent.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ureq::http;

use super::{RawResponse, Request, Transport, TransportError};
use crate::config::TransportConfig;
use crate::options::{Auth, Redirects};

/// A [`Transport`] over a pooled `ureq` agent.
///
/// The agent never turns HTTP error statuses into errors, so a `404` comes
/// back as an ordinary response. Redirect and timeout policy are applied per
/// request from the [`Request`]; the transport's [`TransportConfig`] supplies
/// the user agent, the default timeout and a cap on redirect hops.
///
/// The status message of each response is the canonical reason phrase for
/// its code, not the phrase the server sent.
#[derive(Clone, Debug)]
pub struct UreqTransport {
    agent: ureq::Agent,
    config: TransportConfig,
}

impl UreqTransport {
    /// Creates a transport with its own connection pool.
    #[must_use]
    pub fn new(config: &TransportConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .user_agent(config.user_agent.as_str())
            .timeout_global(config.timeout)
            .build()
            .new_agent();

        Self {
            agent,
            config: config.clone(),
        }
    }

    /// Returns the configuration this transport was built with.
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn build<B>(&self, request: &Request, body: B) -> Result<http::Request<B>, TransportError>
    where
        B: ureq::AsSendBody,
    {
        let mut builder = http::Request::builder()
            .method(request.method.as_str())
            .uri(request.url.as_str());

        for (name, value) in request.headers.pairs() {
            builder = builder.header(name, value);
        }

        if let Some(auth) = &request.auth
            && !request.headers.contains("authorization")
        {
            builder = builder.header("Authorization", authorization(auth));
        }

        builder
            .body(body)
            .map_err(|error| TransportError::InvalidRequest(error.to_string()))
    }

    fn send<B>(&self, request: &Request, body: B) -> Result<RawResponse, TransportError>
    where
        B: ureq::AsSendBody,
    {
        let prepared = self.build(request, body)?;

        let max_hops = match request.redirects {
            Redirects::Follow { max_hops } => max_hops.min(self.config.max_redirects),
            Redirects::NoFollow => 0,
        };

        let configured = self
            .agent
            .configure_request(prepared)
            .max_redirects(max_hops)
            .max_redirects_will_error(false)
            .timeout_global(request.timeout.or(self.config.timeout))
            .build();

        let mut response = self.agent.run(configured).map_err(transport_error)?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response
            .body_mut()
            .with_config()
            .limit(self.config.body_limit)
            .read_to_vec()
            .map_err(transport_error)?;

        // ureq does not expose the wire reason phrase.
        Ok(RawResponse {
            status_code: status.as_u16(),
            status_message: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(&TransportConfig::default())
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &Request) -> Result<RawResponse, TransportError> {
        match &request.body {
            Some(bytes) => self.send(request, bytes.as_slice()),
            None => self.send(request, ()),
        }
    }
}

fn authorization(auth: &Auth) -> String {
    match auth {
        Auth::Basic { user, password } => {
            format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
        }
        Auth::Bearer(token) => format!("Bearer {token}"),
    }
}

fn transport_error(error: ureq::Error) -> TransportError {
    match error {
        ureq::Error::Timeout(_) => TransportError::Timeout(error.to_string()),
        ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => {
            TransportError::Connection(error.to_string())
        }
        ureq::Error::BadUri(detail) => TransportError::InvalidUrl(detail),
        ureq::Error::Http(detail) => TransportError::InvalidRequest(detail.to_string()),
        ureq::Error::Io(detail) => TransportError::Io(detail.to_string()),
        ureq::Error::Tls(detail) => TransportError::Tls(detail.to_string()),
        other => TransportError::Other(other.to_string()),
    }
}
