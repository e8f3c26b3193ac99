use crate::http::ProbeRequest;
use crate::models::{Finding, Payload, ProbeCategory, Response};

use super::Probe;

const AUTH_PATH: &str = "login.php";
const INVALID_TOKEN: &str = "invalid_token_12345";

/// Submits the login form first with the anti-forgery token omitted, then
/// with a bogus value. A login that succeeds either way has no working CSRF
/// check. The `CSRF` substring as the rejection indicator is a heuristic
/// taken at face value.
pub struct RequestForgeryProbe;

impl RequestForgeryProbe {
    fn token_description(payload: &Payload) -> &'static str {
        if payload.is_empty() {
            "missing token"
        } else {
            "invalid token"
        }
    }
}

#[async_trait::async_trait]
impl Probe for RequestForgeryProbe {
    fn category(&self) -> ProbeCategory {
        ProbeCategory::RequestForgery
    }

    /// The payload is the token value sent; the empty payload omits the
    /// field entirely.
    fn payloads(&self) -> Vec<Payload> {
        vec![Payload::new(""), Payload::new(INVALID_TOKEN)]
    }

    fn request(&self, payload: &Payload) -> ProbeRequest {
        let mut form = vec![
            ("username".to_string(), "testuser".to_string()),
            ("password".to_string(), "testpass".to_string()),
            ("action".to_string(), "login".to_string()),
        ];
        if !payload.is_empty() {
            form.push(("csrf_token".to_string(), payload.value().to_string()));
        }
        ProbeRequest::post(AUTH_PATH, form)
    }

    fn classify(&self, response: &Response, payload: &Payload) -> Finding {
        let what = Self::token_description(payload);
        if response.body.contains("CSRF") {
            Finding::pass(
                self.category(),
                format!("request rejected with {}", what),
            )
        } else if response.body.contains("Welcome") {
            Finding::fail(
                self.category(),
                format!("login accepted despite {}", what),
            )
        } else {
            Finding::pass(self.category(), format!("form rejected with {}", what))
        }
    }
}
