use serde::{Deserialize, Serialize};

use super::{Finding, Verdict};

/// Ordered accumulation of findings. Insertion order is execution order,
/// which the console report relies on for its section grouping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    findings: Vec<Finding>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn count(&self, verdict: Verdict) -> usize {
        self.findings.iter().filter(|f| f.verdict == verdict).count()
    }

    pub fn pass_count(&self) -> usize {
        self.count(Verdict::Pass)
    }

    pub fn fail_count(&self) -> usize {
        self.count(Verdict::Fail)
    }

    pub fn warn_count(&self) -> usize {
        self.count(Verdict::Warn)
    }

    /// The Fail set is exactly the set of findings treated as
    /// "vulnerability confirmed".
    pub fn failures(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.verdict == Verdict::Fail)
    }

    pub fn is_success(&self) -> bool {
        self.fail_count() == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub pass_count: usize,
    pub fail_count: usize,
    pub warn_count: usize,
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn from_report(report: &Report, duration_ms: u64) -> Self {
        Self {
            total: report.len(),
            pass_count: report.pass_count(),
            fail_count: report.fail_count(),
            warn_count: report.warn_count(),
            duration_ms,
        }
    }
}
