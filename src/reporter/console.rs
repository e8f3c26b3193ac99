use colored::Colorize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::models::{ProbeCategory, Report, RunSummary, Verdict};

/// Console presentation of a report. Styling is a constructor choice, not a
/// process-wide toggle.
pub struct ConsoleReporter {
    color: bool,
}

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Pass")]
    pass: usize,
    #[tabled(rename = "Fail")]
    fail: usize,
    #[tabled(rename = "Warn")]
    warn: usize,
    #[tabled(rename = "Status")]
    status: String,
}

impl ConsoleReporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn print_header(&self, target: &str) {
        println!("\n{}", self.style_bold("webprobe - security probe run"));
        println!("Target: {}\n", target);
    }

    /// One labeled line per finding, section header per category, in
    /// execution order.
    pub fn print_findings(&self, report: &Report) {
        let mut current: Option<ProbeCategory> = None;

        for finding in report.findings() {
            if current != Some(finding.category) {
                println!("\n=== {} ===", finding.category);
                current = Some(finding.category);
            }

            let line = match &finding.detail {
                Some(detail) => format!("{} ({})", finding.message, detail),
                None => finding.message.clone(),
            };
            println!("{} {}", self.label(finding.verdict), line);
        }
    }

    pub fn print_table(&self, report: &Report) {
        let categories: Vec<ProbeCategory> =
            report
                .findings()
                .iter()
                .fold(Vec::new(), |mut seen, finding| {
                    if !seen.contains(&finding.category) {
                        seen.push(finding.category);
                    }
                    seen
                });

        let rows: Vec<TableRow> = categories
            .into_iter()
            .map(|category| {
                let (mut pass, mut fail, mut warn) = (0, 0, 0);
                for finding in report.findings().iter().filter(|f| f.category == category) {
                    match finding.verdict {
                        Verdict::Pass => pass += 1,
                        Verdict::Fail => fail += 1,
                        Verdict::Warn => warn += 1,
                    }
                }

                let status = if fail > 0 {
                    self.paint("FAIL", Verdict::Fail)
                } else if warn > 0 {
                    self.paint("WARN", Verdict::Warn)
                } else {
                    self.paint("OK", Verdict::Pass)
                };

                TableRow {
                    category: category.to_string(),
                    pass,
                    fail,
                    warn,
                    status,
                }
            })
            .collect();

        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .to_string();

        println!("\n{}", table);
    }

    pub fn print_summary(&self, report: &Report, duration_ms: u64) {
        let summary = RunSummary::from_report(report, duration_ms);

        println!("\n{}", self.style_bold("Summary"));
        println!(
            "{} probes classified in {:.2}s",
            summary.total,
            summary.duration_ms as f64 / 1000.0
        );
        println!("  {}: {}", self.paint("PASS", Verdict::Pass), summary.pass_count);
        println!("  {}: {}", self.paint("FAIL", Verdict::Fail), summary.fail_count);
        println!("  {}: {}", self.paint("WARN", Verdict::Warn), summary.warn_count);

        if report.is_success() {
            println!(
                "\n{}",
                self.paint("No vulnerabilities indicated.", Verdict::Pass)
            );
        } else {
            println!(
                "\n{}",
                self.paint("Vulnerabilities indicated:", Verdict::Fail)
            );
            for finding in report.failures() {
                let line = match &finding.detail {
                    Some(detail) => {
                        format!("{}: {} ({})", finding.category, finding.message, detail)
                    }
                    None => format!("{}: {}", finding.category, finding.message),
                };
                println!("  - {}", line);
            }
        }
        println!();
    }

    fn label(&self, verdict: Verdict) -> String {
        let symbol = match verdict {
            Verdict::Pass => "[+]",
            Verdict::Fail => "[x]",
            Verdict::Warn => "[!]",
        };
        self.paint(symbol, verdict)
    }

    fn paint(&self, text: &str, verdict: Verdict) -> String {
        if !self.color {
            return text.to_string();
        }
        match verdict {
            Verdict::Pass => text.green().to_string(),
            Verdict::Fail => text.red().to_string(),
            Verdict::Warn => text.yellow().to_string(),
        }
    }

    fn style_bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_labels_without_color() {
        let reporter = ConsoleReporter::new(false);
        assert_eq!(reporter.label(Verdict::Pass), "[+]");
        assert_eq!(reporter.label(Verdict::Fail), "[x]");
        assert_eq!(reporter.label(Verdict::Warn), "[!]");
    }

    #[test]
    fn test_plain_paint_is_identity() {
        let reporter = ConsoleReporter::new(false);
        assert_eq!(reporter.paint("FAIL", Verdict::Fail), "FAIL");
    }
}
