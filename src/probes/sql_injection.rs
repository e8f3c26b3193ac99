use crate::http::ProbeRequest;
use crate::models::{Finding, Payload, ProbeCategory, Response};

use super::Probe;

const AUTH_PATH: &str = "login.php";

/// Classic SQL-style login bypass strings. A response carrying the
/// authenticated-area marker means the injected credential was accepted.
const INJECTION_PAYLOADS: &[&str] = &[
    "admin' OR '1'='1",
    "admin'--",
    "admin' OR '1'='1'--",
    "'; DROP TABLE users;--",
    "' UNION SELECT NULL--",
    "1' AND '1'='1",
];

pub struct SqlInjectionProbe;

impl SqlInjectionProbe {
    fn login_succeeded(body: &str) -> bool {
        body.contains("Welcome") || body.to_lowercase().contains("dashboard")
    }
}

#[async_trait::async_trait]
impl Probe for SqlInjectionProbe {
    fn category(&self) -> ProbeCategory {
        ProbeCategory::SqlInjection
    }

    fn payloads(&self) -> Vec<Payload> {
        INJECTION_PAYLOADS.iter().copied().map(Payload::new).collect()
    }

    fn request(&self, payload: &Payload) -> ProbeRequest {
        ProbeRequest::post(
            AUTH_PATH,
            vec![
                ("username".to_string(), payload.value().to_string()),
                ("password".to_string(), "test".to_string()),
                ("action".to_string(), "login".to_string()),
                ("csrf_token".to_string(), "test".to_string()),
            ],
        )
    }

    fn classify(&self, response: &Response, payload: &Payload) -> Finding {
        if Self::login_succeeded(&response.body) {
            Finding::fail(
                self.category(),
                "injected credential accepted at login",
            )
            .with_detail(payload.preview())
        } else {
            Finding::pass(
                self.category(),
                format!("injected credential rejected: {}", payload.preview()),
            )
        }
    }
}
