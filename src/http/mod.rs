mod session;

pub use session::TransportSession;

use async_trait::async_trait;

use crate::errors::TransportError;
use crate::models::{HttpMethod, Response};

/// One probe request: method, relative path, and the category's fixed form
/// field set. For GET the fields travel as a query string, for POST as a
/// form-encoded body.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub method: HttpMethod,
    pub path: String,
    pub form: Vec<(String, String)>,
    pub follow_redirects: bool,
}

impl ProbeRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            form: Vec::new(),
            follow_redirects: true,
        }
    }

    pub fn post(path: impl Into<String>, form: Vec<(String, String)>) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            form,
            follow_redirects: true,
        }
    }

    pub fn without_redirects(mut self) -> Self {
        self.follow_redirects = false;
        self
    }
}

/// The transport capability: send one request, get back status, headers and
/// body. The production implementation is [`TransportSession`]; tests
/// substitute scripted or failing transports.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ProbeRequest) -> Result<Response, TransportError>;
}
