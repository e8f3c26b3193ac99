use crate::http::ProbeRequest;
use crate::models::{Finding, Payload, ProbeCategory, Response};

use super::Probe;

const PROTECTED_PATH: &str = "dashboard.php";

const REQUIRED_HEADERS: &[(&str, &str)] = &[
    ("X-Frame-Options", "protects against clickjacking"),
    ("X-Content-Type-Options", "prevents MIME sniffing"),
    ("X-XSS-Protection", "browser XSS filter"),
    ("Content-Security-Policy", "controls resource loading"),
    ("Referrer-Policy", "controls referrer information"),
];

/// One payload per required hardening header; absence is a Fail naming the
/// header. Session-independent, safe to run on an isolated transport.
pub struct SecurityHeadersProbe;

impl SecurityHeadersProbe {
    fn purpose(header: &str) -> &'static str {
        REQUIRED_HEADERS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(header))
            .map(|(_, purpose)| *purpose)
            .unwrap_or("hardening header")
    }
}

#[async_trait::async_trait]
impl Probe for SecurityHeadersProbe {
    fn category(&self) -> ProbeCategory {
        ProbeCategory::SecurityHeaders
    }

    fn payloads(&self) -> Vec<Payload> {
        REQUIRED_HEADERS
            .iter()
            .map(|(name, _)| Payload::new(*name))
            .collect()
    }

    fn request(&self, _payload: &Payload) -> ProbeRequest {
        ProbeRequest::get(PROTECTED_PATH)
    }

    fn shares_session_state(&self) -> bool {
        false
    }

    fn classify(&self, response: &Response, payload: &Payload) -> Finding {
        let header = payload.value();
        match response.header(header) {
            Some(value) => Finding::pass(
                self.category(),
                format!("{} present ({})", header, Self::purpose(header)),
            )
            .with_detail(value.to_string()),
            None => Finding::fail(
                self.category(),
                format!("missing header: {} ({})", header, Self::purpose(header)),
            ),
        }
    }
}
