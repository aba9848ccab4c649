//! Purpose: Fetch the orders payload from an HTTP endpoint.
//! Exports: `RemoteClient`.
//! Role: Blocking transport behind `OrdersSource`; the core never sees ureq types.
//! Invariants: Endpoint URLs are absolute http(s) URLs; query strings are preserved.
//! Invariants: Network failures, non-2xx statuses, and undecodable bodies are `Transport`.
//! Invariants: One GET per call; no retries.
#![allow(clippy::result_large_err)]

use super::source::OrdersSource;
use crate::core::error::{Error, ErrorKind};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

type ApiResult<T> = Result<T, Error>;

#[derive(Clone)]
pub struct RemoteClient {
    inner: Arc<RemoteClientInner>,
}

struct RemoteClientInner {
    url: Url,
    token: Option<String>,
    agent: ureq::Agent,
}

impl RemoteClient {
    pub fn new(url: impl Into<String>) -> ApiResult<Self> {
        let url = normalize_endpoint_url(url.into())?;
        let agent = ureq::AgentBuilder::new().build();
        Ok(Self {
            inner: Arc::new(RemoteClientInner {
                url,
                token: None,
                agent,
            }),
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        if let Some(inner) = Arc::get_mut(&mut self.inner) {
            inner.token = Some(token.into());
        } else {
            self.inner = Arc::new(RemoteClientInner {
                url: self.inner.url.clone(),
                token: Some(token.into()),
                agent: self.inner.agent.clone(),
            });
        }
        self
    }

    /// Caps the whole request (connect, send, and body read).
    pub fn with_timeout(self, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        self.with_agent(agent)
    }

    pub fn url(&self) -> &Url {
        &self.inner.url
    }

    fn request(&self) -> ureq::Request {
        let mut request = self
            .inner
            .agent
            .get(self.inner.url.as_str())
            .set("Accept", "application/json");
        if let Some(token) = &self.inner.token {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }
        request
    }

    fn with_agent(mut self, agent: ureq::Agent) -> Self {
        if let Some(inner) = Arc::get_mut(&mut self.inner) {
            inner.agent = agent;
        } else {
            self.inner = Arc::new(RemoteClientInner {
                url: self.inner.url.clone(),
                token: self.inner.token.clone(),
                agent,
            });
        }
        self
    }
}

impl OrdersSource for RemoteClient {
    fn fetch_orders_payload(&self) -> ApiResult<Value> {
        let url = self.inner.url.as_str();
        match self.request().call() {
            Ok(resp) => {
                let status = resp.status();
                let value = read_json_response(resp).map_err(|err| err.with_url(url))?;
                tracing::info!(url, status, "fetched orders payload");
                Ok(value)
            }
            Err(ureq::Error::Status(code, resp)) => Err(status_error(code, resp).with_url(url)),
            Err(ureq::Error::Transport(err)) => Err(Error::new(ErrorKind::Transport)
                .with_message("request failed")
                .with_url(url)
                .with_source(err)),
        }
    }
}

impl std::fmt::Debug for RemoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteClient")
            .field("url", &self.inner.url.as_str())
            .field("token", &self.inner.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn normalize_endpoint_url(raw: String) -> ApiResult<Url> {
    let mut url = Url::parse(raw.trim()).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message("invalid orders endpoint url")
            .with_url(raw.clone())
            .with_source(err)
    })?;
    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("orders endpoint url must use http or https scheme")
            .with_url(raw));
    }
    url.set_fragment(None);
    Ok(url)
}

fn read_json_response(response: ureq::Response) -> ApiResult<Value> {
    let body = response.into_string().map_err(|err| {
        Error::new(ErrorKind::Transport)
            .with_message("failed to read response body")
            .with_source(err)
    })?;
    serde_json::from_str(&body).map_err(|err| {
        Error::new(ErrorKind::Transport)
            .with_message("response body is not valid json")
            .with_source(err)
    })
}

fn status_error(status: u16, response: ureq::Response) -> Error {
    let reason = response.status_text().trim();
    let message = if reason.is_empty() {
        format!("orders endpoint returned status {status}")
    } else {
        format!("orders endpoint returned status {status} {reason}")
    };
    let err = Error::new(ErrorKind::Transport)
        .with_message(message)
        .with_status(status);
    match status {
        401 | 403 => err.with_hint("Check the bearer token (--token or ORDERVALUE_TOKEN)."),
        404 => err.with_hint("Check the endpoint url (--url or ORDERVALUE_URL)."),
        _ => err,
    }
}
