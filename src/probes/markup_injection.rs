use crate::http::ProbeRequest;
use crate::models::{Finding, Payload, ProbeCategory, Response};

use super::Probe;

const REGISTER_PATH: &str = "register.php";

const MARKUP_PAYLOADS: &[&str] = &[
    "<script>alert('XSS')</script>",
    "<img src=x onerror=alert('XSS')>",
    "<iframe src='javascript:alert(1)'>",
    "javascript:alert('XSS')",
    "<svg onload=alert('XSS')>",
];

/// Reflection check: the literal payload appearing verbatim in the body is
/// a cheap, conservative proxy for "untrusted input reflected unescaped".
/// It is not proof of exploitability.
pub struct MarkupInjectionProbe;

impl MarkupInjectionProbe {
    fn escaped_form_present(body: &str, payload: &Payload) -> bool {
        let encoded = html_escape::encode_text(payload.value());
        (encoded != payload.value() && body.contains(encoded.as_ref())) || body.contains("&lt;")
    }
}

#[async_trait::async_trait]
impl Probe for MarkupInjectionProbe {
    fn category(&self) -> ProbeCategory {
        ProbeCategory::MarkupInjection
    }

    fn payloads(&self) -> Vec<Payload> {
        MARKUP_PAYLOADS.iter().copied().map(Payload::new).collect()
    }

    fn request(&self, payload: &Payload) -> ProbeRequest {
        ProbeRequest::post(
            REGISTER_PATH,
            vec![
                ("username".to_string(), payload.value().to_string()),
                ("password1".to_string(), "testtest123".to_string()),
                ("password2".to_string(), "testtest123".to_string()),
                ("csrf_token".to_string(), "test".to_string()),
            ],
        )
    }

    fn classify(&self, response: &Response, payload: &Payload) -> Finding {
        if response.body.contains(payload.value()) {
            Finding::fail(self.category(), "payload reflected without escaping")
                .with_detail(payload.preview())
        } else if Self::escaped_form_present(&response.body, payload) {
            Finding::pass(
                self.category(),
                format!("payload entity-encoded: {}", payload.preview()),
            )
        } else {
            Finding::warn(
                self.category(),
                format!("no reflection found, inconclusive: {}", payload.preview()),
            )
        }
    }
}
