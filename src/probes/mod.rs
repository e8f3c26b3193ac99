mod auth_bypass;
mod info_disclosure;
mod markup_injection;
mod request_forgery;
mod security_headers;
mod session_cookie;
mod sql_injection;

pub use auth_bypass::AuthBypassProbe;
pub use info_disclosure::InfoDisclosureProbe;
pub use markup_injection::MarkupInjectionProbe;
pub use request_forgery::RequestForgeryProbe;
pub use security_headers::SecurityHeadersProbe;
pub use session_cookie::SessionCookieProbe;
pub use sql_injection::SqlInjectionProbe;

use async_trait::async_trait;

use crate::errors::TransportError;
use crate::http::{ProbeRequest, Transport};
use crate::models::{Finding, Payload, ProbeCategory, Response};

/// A self-contained test unit for one vulnerability category. Each probe
/// owns its payload set, its request recipe and its classification rule.
///
/// `classify` is a pure function of the response and the payload that
/// produced it: the same pair always yields the same finding. The verdicts
/// are heuristic string checks, not exploit confirmation.
#[async_trait]
pub trait Probe: Send + Sync {
    fn category(&self) -> ProbeCategory;

    /// Finite, never empty; order fixes the report order.
    fn payloads(&self) -> Vec<Payload>;

    /// The single request this probe issues for one payload.
    fn request(&self, payload: &Payload) -> ProbeRequest;

    async fn execute(
        &self,
        transport: &dyn Transport,
        payload: &Payload,
    ) -> Result<Response, TransportError> {
        transport.send(&self.request(payload)).await
    }

    fn classify(&self, response: &Response, payload: &Payload) -> Finding;

    /// Probes that depend on cookie state set by earlier probes must stay
    /// in the ordered pipeline. The rest may run on isolated sessions.
    fn shares_session_state(&self) -> bool {
        true
    }
}

/// The fixed probe order. Auth-state probes run before the bypass probe on
/// purpose: the runner makes no isolation promises between probes.
pub fn registry() -> Vec<Box<dyn Probe>> {
    vec![
        Box::new(SqlInjectionProbe),
        Box::new(MarkupInjectionProbe),
        Box::new(RequestForgeryProbe),
        Box::new(SessionCookieProbe),
        Box::new(SecurityHeadersProbe),
        Box::new(AuthBypassProbe),
        Box::new(InfoDisclosureProbe::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_every_category() {
        let categories: Vec<ProbeCategory> =
            registry().iter().map(|p| p.category()).collect();
        assert_eq!(
            categories,
            vec![
                ProbeCategory::SqlInjection,
                ProbeCategory::MarkupInjection,
                ProbeCategory::RequestForgery,
                ProbeCategory::SessionCookie,
                ProbeCategory::SecurityHeaders,
                ProbeCategory::AuthBypass,
                ProbeCategory::InfoDisclosure,
            ]
        );
    }

    #[test]
    fn test_no_probe_has_an_empty_payload_set() {
        for probe in registry() {
            assert!(
                !probe.payloads().is_empty(),
                "{} has no payloads",
                probe.category()
            );
        }
    }

    #[test]
    fn test_only_stateless_probes_leave_the_pipeline() {
        for probe in registry() {
            let stateless = matches!(
                probe.category(),
                ProbeCategory::SecurityHeaders | ProbeCategory::InfoDisclosure
            );
            assert_eq!(probe.shares_session_state(), !stateless);
        }
    }
}
