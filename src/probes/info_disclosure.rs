use regex::Regex;

use crate::http::ProbeRequest;
use crate::models::{Finding, Payload, ProbeCategory, Response};

use super::Probe;

const LANDING_PATH: &str = "login.php";

const MARKERS: &[(&str, &str)] = &[
    (r"PHP_VERSION", "PHP version disclosure"),
    (r"(?i)mysql", "database engine disclosure"),
    (r"Warning:", "runtime warnings displayed"),
    (r"Fatal error:", "raw error text displayed"),
    (r"(?i)stack trace", "stack trace displayed"),
];

/// Purely observational: sweeps the landing page for disclosure markers.
/// A hit is Warn, never Fail; leaked internals are a hygiene signal, not a
/// confirmed vulnerability.
pub struct InfoDisclosureProbe {
    markers: Vec<(Regex, &'static str)>,
}

impl InfoDisclosureProbe {
    pub fn new() -> Self {
        let markers = MARKERS
            .iter()
            .map(|(pattern, label)| (Regex::new(pattern).unwrap(), *label))
            .collect();
        Self { markers }
    }
}

impl Default for InfoDisclosureProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Probe for InfoDisclosureProbe {
    fn category(&self) -> ProbeCategory {
        ProbeCategory::InfoDisclosure
    }

    /// One payload per disclosure marker pattern.
    fn payloads(&self) -> Vec<Payload> {
        self.markers
            .iter()
            .map(|(pattern, _)| Payload::new(pattern.as_str()))
            .collect()
    }

    fn request(&self, _payload: &Payload) -> ProbeRequest {
        ProbeRequest::get(LANDING_PATH)
    }

    fn shares_session_state(&self) -> bool {
        false
    }

    fn classify(&self, response: &Response, payload: &Payload) -> Finding {
        let marker = self
            .markers
            .iter()
            .find(|(pattern, _)| pattern.as_str() == payload.value());

        match marker {
            Some((pattern, label)) if pattern.is_match(&response.body) => {
                Finding::warn(self.category(), format!("information disclosure: {}", label))
            }
            Some((_, label)) => {
                Finding::pass(self.category(), format!("no {}", label))
            }
            // Unknown pattern means the payload did not come from this
            // probe; classify only what the response shows.
            None => Finding::warn(
                self.category(),
                format!("unrecognized disclosure pattern: {}", payload.preview()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Verdict;
    use std::collections::HashMap;

    fn response_with_body(body: &str) -> Response {
        Response::new(200, HashMap::new(), Vec::new(), body.to_string())
    }

    #[test]
    fn test_stack_trace_marker_warns() {
        let probe = InfoDisclosureProbe::new();
        let payload = Payload::new(r"(?i)stack trace");
        let response = response_with_body("Exception!\nStack trace:\n#0 index.php(12)");

        let finding = probe.classify(&response, &payload);
        assert_eq!(finding.verdict, Verdict::Warn);
        assert!(finding.message.contains("stack trace"));
    }

    #[test]
    fn test_clean_body_passes() {
        let probe = InfoDisclosureProbe::new();
        let payload = Payload::new(r"Fatal error:");
        let response = response_with_body("<html><body>Login</body></html>");

        let finding = probe.classify(&response, &payload);
        assert_eq!(finding.verdict, Verdict::Pass);
    }

    #[test]
    fn test_engine_marker_is_case_insensitive() {
        let probe = InfoDisclosureProbe::new();
        let payload = Payload::new(r"(?i)mysql");
        let response = response_with_body("MySQL server has gone away");

        let finding = probe.classify(&response, &payload);
        assert_eq!(finding.verdict, Verdict::Warn);
    }

    #[test]
    fn test_every_marker_has_a_payload() {
        let probe = InfoDisclosureProbe::new();
        assert_eq!(probe.payloads().len(), MARKERS.len());
    }
}
