//! HTTP transport to the case-records backend.
//!
//! Every endpoint is a `POST`. JSON calls decode the response body and
//! report non-2xx answers with the status and body text; blob calls return
//! raw bytes. Nothing is retried.

use reqwest::blocking::{Client, RequestBuilder, Response, multipart::Form};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::session::SessionStore;

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "x-token";

/// Whether a request carries the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    None,
    Required,
}

pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    session: Box<dyn SessionStore>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: Box<dyn SessionStore>) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            config,
            session,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    /// POST a JSON body and decode the JSON answer.
    pub fn post_json<B, T>(&self, endpoint: &str, body: Option<&B>, auth: Auth) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.request(endpoint, auth)?;
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = self.send(endpoint, request)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(endpoint, status = status.as_u16(), "request failed");
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = response.bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// POST a multipart form; the boundary header is set by the form.
    pub fn post_multipart<T>(&self, endpoint: &str, form: Form, auth: Auth) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let request = self.request(endpoint, auth)?.multipart(form);
        let response = self.send(endpoint, request)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(endpoint, status = status.as_u16(), "upload failed");
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = response.bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// POST a JSON body and return the raw answer (file downloads).
    pub fn post_blob<B>(&self, endpoint: &str, body: &B, auth: Auth) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(endpoint, auth)?.json(body);
        let response = self.send(endpoint, request)?;
        let status = response.status();
        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "download failed");
            return Err(ClientError::Download {
                status: status.as_u16(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }

    fn request(&self, endpoint: &str, auth: Auth) -> Result<RequestBuilder> {
        let url = self.config.url(endpoint)?;
        let mut request = self.http.post(url);
        if auth == Auth::Required {
            match self.session.token() {
                Some(token) if !token.is_empty() => request = request.header(TOKEN_HEADER, token),
                _ => debug!(endpoint, "no session token for authenticated request"),
            }
        }
        Ok(request)
    }

    fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Response> {
        debug!(endpoint, "POST");
        Ok(request.send()?)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("authenticated", &self.session.is_authenticated())
            .finish_non_exhaustive()
    }
}
