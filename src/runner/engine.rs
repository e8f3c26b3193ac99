use std::sync::Arc;

use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use crate::http::Transport;
use crate::models::{Finding, Report};
use crate::probes::Probe;

/// Executes the probe registry against the target and aggregates findings.
///
/// Probes sharing session state run strictly sequentially on the one shared
/// transport; their ordering is part of the contract. Session-independent
/// probes run concurrently when isolated transports are supplied, and their
/// findings are merged back in registry order rather than interleaved.
pub struct Runner {
    transport: Arc<dyn Transport>,
    probes: Vec<Box<dyn Probe>>,
    isolated: Vec<Arc<dyn Transport>>,
    verbose: bool,
}

impl Runner {
    pub fn new(transport: Arc<dyn Transport>, probes: Vec<Box<dyn Probe>>) -> Self {
        Self {
            transport,
            probes,
            isolated: Vec::new(),
            verbose: false,
        }
    }

    /// Hand the session-independent probes their own transports. Probes
    /// beyond the supplied count stay in the sequential pipeline.
    pub fn with_isolated_transports(mut self, transports: Vec<Arc<dyn Transport>>) -> Self {
        self.isolated = transports;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn total_payloads(&self) -> usize {
        self.probes.iter().map(|p| p.payloads().len()).sum()
    }

    /// Runs every probe to completion and returns the report. Never aborts:
    /// transport failures become Warn findings and the run continues.
    pub async fn run(&self) -> Report {
        let pb = self.create_progress_bar(self.total_payloads());

        let mut isolated = self.isolated.iter();
        let mut ordered = Vec::new();
        let mut detached = Vec::new();

        for (index, probe) in self.probes.iter().enumerate() {
            if !probe.shares_session_state() {
                if let Some(transport) = isolated.next() {
                    detached.push((index, probe, Arc::clone(transport)));
                    continue;
                }
            }
            ordered.push((index, probe));
        }

        let pipeline = async {
            let mut collected = Vec::new();
            for (index, probe) in ordered {
                let findings = self.run_probe(probe.as_ref(), self.transport.as_ref(), &pb).await;
                collected.push((index, findings));
            }
            collected
        };

        let parallel = join_all(detached.into_iter().map(|(index, probe, transport)| {
            let pb = &pb;
            async move {
                let findings = self.run_probe(probe.as_ref(), transport.as_ref(), pb).await;
                (index, findings)
            }
        }));

        let (sequential_results, parallel_results) = futures::join!(pipeline, parallel);

        let mut slots: Vec<Vec<Finding>> = vec![Vec::new(); self.probes.len()];
        for (index, findings) in sequential_results.into_iter().chain(parallel_results) {
            slots[index] = findings;
        }

        pb.finish_with_message("probe run complete");

        let mut report = Report::new();
        for findings in slots {
            for finding in findings {
                report.push(finding);
            }
        }
        report
    }

    async fn run_probe(
        &self,
        probe: &dyn Probe,
        transport: &dyn Transport,
        pb: &ProgressBar,
    ) -> Vec<Finding> {
        let category = probe.category();
        let mut findings = Vec::new();

        for payload in probe.payloads() {
            pb.set_message(category.to_string());

            let finding = match probe.execute(transport, &payload).await {
                Ok(response) => {
                    debug!(%category, status = response.status, "classifying response");
                    probe.classify(&response, &payload)
                }
                Err(err) => {
                    warn!(%category, %err, "probe request failed");
                    Finding::warn(category, format!("probe error: {}", err))
                        .with_detail(payload.preview())
                }
            };

            findings.push(finding);
            pb.inc(1);
        }

        findings
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        if !self.verbose {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        pb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    use crate::errors::TransportError;
    use crate::http::ProbeRequest;
    use crate::models::{Response, Verdict};
    use crate::probes::{registry, SecurityHeadersProbe};

    /// Returns the same canned response for every request.
    struct StaticTransport {
        response: Response,
    }

    impl StaticTransport {
        fn with_body(body: &str) -> Self {
            Self {
                response: Response::new(200, HashMap::new(), Vec::new(), body.to_string()),
            }
        }
    }

    #[async_trait]
    impl Transport for StaticTransport {
        async fn send(&self, _request: &ProbeRequest) -> Result<Response, TransportError> {
            Ok(self.response.clone())
        }
    }

    /// Times out on every request.
    struct TimeoutTransport;

    #[async_trait]
    impl Transport for TimeoutTransport {
        async fn send(&self, request: &ProbeRequest) -> Result<Response, TransportError> {
            Err(TransportError::Timeout {
                url: request.path.clone(),
            })
        }
    }

    #[tokio::test]
    async fn test_every_payload_yields_exactly_one_finding() {
        let transport = Arc::new(StaticTransport::with_body("Invalid credentials"));
        let runner = Runner::new(transport, registry());

        let expected = runner.total_payloads();
        let report = runner.run().await;

        assert_eq!(report.len(), expected);
    }

    #[tokio::test]
    async fn test_total_transport_failure_yields_all_warn_and_success() {
        let runner = Runner::new(Arc::new(TimeoutTransport), registry());
        let report = runner.run().await;

        assert!(!report.is_empty());
        assert!(report
            .findings()
            .iter()
            .all(|f| f.verdict == Verdict::Warn));
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn test_runs_are_idempotent_for_stateless_probes() {
        let probes = || -> Vec<Box<dyn Probe>> { vec![Box::new(SecurityHeadersProbe)] };
        let transport = Arc::new(StaticTransport::with_body("<html></html>"));

        let first = Runner::new(Arc::clone(&transport) as Arc<dyn Transport>, probes())
            .run()
            .await;
        let second = Runner::new(transport, probes()).run().await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_findings_keep_registry_order() {
        let transport = Arc::new(StaticTransport::with_body("nothing here"));
        let runner = Runner::new(transport, registry());
        let report = runner.run().await;

        let categories: Vec<_> = report.findings().iter().map(|f| f.category).collect();
        let mut sorted_by_registry = categories.clone();
        sorted_by_registry.sort_by_key(|c| {
            registry()
                .iter()
                .position(|p| p.category() == *c)
                .expect("category in registry")
        });
        assert_eq!(categories, sorted_by_registry);
    }

    #[tokio::test]
    async fn test_isolated_transports_preserve_registry_order() {
        let shared = Arc::new(StaticTransport::with_body("nothing here"));
        let isolated: Vec<Arc<dyn Transport>> = vec![
            Arc::new(StaticTransport::with_body("nothing here")),
            Arc::new(StaticTransport::with_body("nothing here")),
        ];

        let sequential = Runner::new(
            Arc::clone(&shared) as Arc<dyn Transport>,
            registry(),
        )
        .run()
        .await;

        let merged = Runner::new(shared, registry())
            .with_isolated_transports(isolated)
            .run()
            .await;

        assert_eq!(sequential, merged);
    }

    #[tokio::test]
    async fn test_one_failing_probe_does_not_abort_the_run() {
        // Body that trips the SQL injection probe while the rest carry on.
        let transport = Arc::new(StaticTransport::with_body("Welcome back"));
        let runner = Runner::new(transport, registry());

        let expected = runner.total_payloads();
        let report = runner.run().await;

        assert_eq!(report.len(), expected);
        assert!(report.fail_count() > 0);
        assert!(!report.is_success());
    }
}
