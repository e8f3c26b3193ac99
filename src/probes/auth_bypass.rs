use crate::http::ProbeRequest;
use crate::models::{Finding, Payload, ProbeCategory, Response};

use super::Probe;

/// Requests the protected area with redirects disabled. A redirect means
/// the target pushed us to authentication; protected content markers in a
/// direct 200 mean the area is reachable without credentials.
pub struct AuthBypassProbe;

impl AuthBypassProbe {
    fn protected_content_present(body: &str) -> bool {
        body.contains("Welcome")
    }
}

#[async_trait::async_trait]
impl Probe for AuthBypassProbe {
    fn category(&self) -> ProbeCategory {
        ProbeCategory::AuthBypass
    }

    /// The payload is the protected path under test.
    fn payloads(&self) -> Vec<Payload> {
        vec![Payload::new("dashboard.php")]
    }

    fn request(&self, payload: &Payload) -> ProbeRequest {
        ProbeRequest::get(payload.value()).without_redirects()
    }

    fn classify(&self, response: &Response, payload: &Payload) -> Finding {
        if response.is_redirect() {
            Finding::pass(
                self.category(),
                format!("{} redirects unauthenticated access", payload.value()),
            )
        } else if Self::protected_content_present(&response.body) {
            Finding::fail(
                self.category(),
                format!("{} served protected content without authentication", payload.value()),
            )
        } else {
            Finding::pass(
                self.category(),
                format!("{} denied unauthenticated access", payload.value()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Verdict;
    use std::collections::HashMap;

    fn payload() -> Payload {
        Payload::new("dashboard.php")
    }

    #[test]
    fn test_redirect_to_login_passes() {
        let probe = AuthBypassProbe;
        let mut headers = HashMap::new();
        headers.insert("Location".to_string(), "/login.php".to_string());
        let response = Response::new(302, headers, Vec::new(), String::new());

        let finding = probe.classify(&response, &payload());
        assert_eq!(finding.verdict, Verdict::Pass);
    }

    #[test]
    fn test_protected_content_without_redirect_fails() {
        let probe = AuthBypassProbe;
        let response = Response::new(
            200,
            HashMap::new(),
            Vec::new(),
            "<h1>Welcome, student!</h1>".to_string(),
        );

        let finding = probe.classify(&response, &payload());
        assert_eq!(finding.verdict, Verdict::Fail);
        assert_eq!(finding.category, ProbeCategory::AuthBypass);
    }

    #[test]
    fn test_plain_denial_passes() {
        let probe = AuthBypassProbe;
        let response = Response::new(
            403,
            HashMap::new(),
            Vec::new(),
            "Access denied".to_string(),
        );

        let finding = probe.classify(&response, &payload());
        assert_eq!(finding.verdict, Verdict::Pass);
    }

    #[test]
    fn test_request_disables_redirect_following() {
        let probe = AuthBypassProbe;
        let request = probe.request(&payload());
        assert!(!request.follow_redirects);
    }
}
