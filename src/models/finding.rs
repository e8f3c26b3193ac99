use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProbeCategory {
    SqlInjection,
    MarkupInjection,
    RequestForgery,
    SessionCookie,
    SecurityHeaders,
    AuthBypass,
    InfoDisclosure,
}

impl fmt::Display for ProbeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProbeCategory::SqlInjection => "SQL Injection",
            ProbeCategory::MarkupInjection => "Cross-Site Scripting",
            ProbeCategory::RequestForgery => "CSRF Protection",
            ProbeCategory::SessionCookie => "Session Security",
            ProbeCategory::SecurityHeaders => "Security Headers",
            ProbeCategory::AuthBypass => "Authentication Bypass",
            ProbeCategory::InfoDisclosure => "Information Disclosure",
        };
        write!(f, "{}", s)
    }
}

/// Pass = protection confirmed, Fail = vulnerability indicated,
/// Warn = inconclusive or transport error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    Fail,
    Warn,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
            Verdict::Warn => "WARN",
        };
        write!(f, "{}", s)
    }
}

/// The classified result of one payload execution. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub category: ProbeCategory,
    pub verdict: Verdict,
    pub message: String,
    pub detail: Option<String>,
}

impl Finding {
    pub fn pass(category: ProbeCategory, message: impl Into<String>) -> Self {
        Self::new(category, Verdict::Pass, message)
    }

    pub fn fail(category: ProbeCategory, message: impl Into<String>) -> Self {
        Self::new(category, Verdict::Fail, message)
    }

    pub fn warn(category: ProbeCategory, message: impl Into<String>) -> Self {
        Self::new(category, Verdict::Warn, message)
    }

    fn new(category: ProbeCategory, verdict: Verdict, message: impl Into<String>) -> Self {
        Self {
            category,
            verdict,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_verdict() {
        assert_eq!(
            Finding::pass(ProbeCategory::SecurityHeaders, "header present").verdict,
            Verdict::Pass
        );
        assert_eq!(
            Finding::fail(ProbeCategory::SqlInjection, "login bypassed").verdict,
            Verdict::Fail
        );
        assert_eq!(
            Finding::warn(ProbeCategory::MarkupInjection, "no reflection").verdict,
            Verdict::Warn
        );
    }

    #[test]
    fn test_detail_attaches_payload_preview() {
        let finding = Finding::fail(ProbeCategory::SqlInjection, "login bypassed")
            .with_detail("admin' OR '1'='1");
        assert_eq!(finding.detail.as_deref(), Some("admin' OR '1'='1"));
    }
}
