use crate::http::ProbeRequest;
use crate::models::{Finding, Payload, ProbeCategory, Response};

use super::Probe;

const AUTH_PATH: &str = "login.php";

/// Observational probe: inspects the attributes of the session identifier
/// cookie issued by the target. Never auto-fails; a missing Secure flag is
/// acceptable over plaintext transport and reported as Warn.
pub struct SessionCookieProbe;

struct CookieLine<'a> {
    name: &'a str,
    attributes: Vec<&'a str>,
}

impl SessionCookieProbe {
    fn parse(raw: &str) -> Option<CookieLine<'_>> {
        let mut parts = raw.split(';');
        let pair = parts.next()?.trim();
        let name = pair.split('=').next()?.trim();
        if name.is_empty() {
            return None;
        }
        Some(CookieLine {
            name,
            attributes: parts.map(|a| a.trim()).collect(),
        })
    }

    // PHPSESSID does not contain the substring "session", hence the
    // second pattern.
    fn is_session_cookie(name: &str) -> bool {
        let lower = name.to_lowercase();
        lower.contains("session") || lower.contains("sessid")
    }

    fn has_secure_flag(cookie: &CookieLine<'_>) -> bool {
        cookie
            .attributes
            .iter()
            .any(|a| a.eq_ignore_ascii_case("secure"))
    }
}

#[async_trait::async_trait]
impl Probe for SessionCookieProbe {
    fn category(&self) -> ProbeCategory {
        ProbeCategory::SessionCookie
    }

    /// The payload is the cookie-name pattern under inspection.
    fn payloads(&self) -> Vec<Payload> {
        vec![Payload::new("session")]
    }

    fn request(&self, _payload: &Payload) -> ProbeRequest {
        ProbeRequest::get(AUTH_PATH)
    }

    fn classify(&self, response: &Response, _payload: &Payload) -> Finding {
        let session_cookie = response
            .set_cookies()
            .iter()
            .filter_map(|raw| Self::parse(raw))
            .find(|c| Self::is_session_cookie(c.name));

        match session_cookie {
            Some(cookie) if Self::has_secure_flag(&cookie) => Finding::pass(
                self.category(),
                format!("Secure flag set on session cookie {}", cookie.name),
            ),
            Some(cookie) => Finding::warn(
                self.category(),
                format!(
                    "session cookie {} missing Secure flag (acceptable over plaintext transport)",
                    cookie.name
                ),
            ),
            None => Finding::warn(self.category(), "no session cookie issued"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Verdict;
    use std::collections::HashMap;

    fn response_with_cookies(cookies: &[&str]) -> Response {
        Response::new(
            200,
            HashMap::new(),
            cookies.iter().map(|c| c.to_string()).collect(),
            String::new(),
        )
    }

    fn payload() -> Payload {
        Payload::new("session")
    }

    #[test]
    fn test_secure_session_cookie_passes() {
        let probe = SessionCookieProbe;
        let response =
            response_with_cookies(&["PHPSESSID=abc123; Path=/; Secure; HttpOnly"]);

        let finding = probe.classify(&response, &payload());
        assert_eq!(finding.verdict, Verdict::Pass);
        assert!(finding.message.contains("PHPSESSID"));
    }

    #[test]
    fn test_missing_secure_flag_warns() {
        let probe = SessionCookieProbe;
        let response = response_with_cookies(&["session_id=xyz; Path=/; HttpOnly"]);

        let finding = probe.classify(&response, &payload());
        assert_eq!(finding.verdict, Verdict::Warn);
        assert!(finding.message.contains("session_id"));
    }

    #[test]
    fn test_no_session_cookie_warns() {
        let probe = SessionCookieProbe;
        let response = response_with_cookies(&["theme=dark; Path=/"]);

        let finding = probe.classify(&response, &payload());
        assert_eq!(finding.verdict, Verdict::Warn);
        assert!(finding.message.contains("no session cookie"));
    }

    #[test]
    fn test_non_session_cookies_are_skipped() {
        let probe = SessionCookieProbe;
        let response = response_with_cookies(&[
            "tracking=1; Path=/",
            "PHPSESSID=abc; Path=/; Secure",
        ]);

        let finding = probe.classify(&response, &payload());
        assert_eq!(finding.verdict, Verdict::Pass);
    }
}
