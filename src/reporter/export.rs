use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use tera::{Context as TeraContext, Tera};

use crate::models::{Finding, Report, RunSummary};

#[derive(Serialize, Deserialize)]
struct ExportData {
    scan_time: String,
    target: String,
    summary: RunSummary,
    findings: Vec<Finding>,
}

pub struct JsonExporter;

impl JsonExporter {
    pub fn export(report: &Report, target: &str, duration_ms: u64, path: &str) -> Result<()> {
        let output = ExportData {
            scan_time: Utc::now().to_rfc3339(),
            target: target.to_string(),
            summary: RunSummary::from_report(report, duration_ms),
            findings: report.findings().to_vec(),
        };

        let json = serde_json::to_string_pretty(&output)?;
        fs::write(path, json).with_context(|| format!("Failed to write to {}", path))?;
        Ok(())
    }

    pub fn load(path: &str) -> Result<(Report, String)> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;

        let data: ExportData = serde_json::from_str(&content)?;
        let mut report = Report::new();
        for finding in data.findings {
            report.push(finding);
        }
        Ok((report, data.target))
    }
}

pub struct HtmlExporter;

#[derive(Serialize)]
struct HtmlRow {
    category: String,
    verdict: String,
    verdict_class: String,
    message: String,
    detail: String,
}

impl HtmlExporter {
    pub fn export(report: &Report, target: &str, path: &str) -> Result<()> {
        let mut tera = Tera::default();
        tera.add_raw_template("report", Self::TEMPLATE)?;

        let summary = RunSummary::from_report(report, 0);

        let mut context = TeraContext::new();
        context.insert(
            "scan_time",
            &Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        );
        context.insert("target", target);
        context.insert("total", &summary.total);
        context.insert("pass_count", &summary.pass_count);
        context.insert("fail_count", &summary.fail_count);
        context.insert("warn_count", &summary.warn_count);
        context.insert("success", &report.is_success());

        let rows: Vec<HtmlRow> = report
            .findings()
            .iter()
            .map(|f| HtmlRow {
                category: f.category.to_string(),
                verdict: f.verdict.to_string(),
                verdict_class: f.verdict.to_string().to_lowercase(),
                message: f.message.clone(),
                detail: f.detail.clone().unwrap_or_default(),
            })
            .collect();
        context.insert("rows", &rows);

        let html = tera.render("report", &context)?;
        fs::write(path, html).with_context(|| format!("Failed to write to {}", path))?;
        Ok(())
    }

    const TEMPLATE: &'static str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>webprobe report - {{ target }}</title>
<style>
body { font-family: sans-serif; margin: 2rem; color: #222; }
table { border-collapse: collapse; width: 100%; margin-top: 1rem; }
th, td { border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; }
th { background: #f0f0f0; }
.pass { color: #1a7f37; }
.fail { color: #c62828; font-weight: bold; }
.warn { color: #b26a00; }
.verdict { font-size: 1.1rem; margin: 0.5rem 0 1rem; }
</style>
</head>
<body>
<h1>webprobe report</h1>
<p>Target: {{ target }}<br>Generated: {{ scan_time }}</p>
<p class="verdict">
{% if success %}<span class="pass">No vulnerabilities indicated</span>
{% else %}<span class="fail">{{ fail_count }} vulnerability finding(s)</span>
{% endif %}
&mdash; {{ total }} findings ({{ pass_count }} pass / {{ fail_count }} fail / {{ warn_count }} warn)
</p>
<table>
<tr><th>Category</th><th>Verdict</th><th>Message</th><th>Detail</th></tr>
{% for row in rows %}
<tr>
<td>{{ row.category }}</td>
<td class="{{ row.verdict_class }}">{{ row.verdict }}</td>
<td>{{ row.message }}</td>
<td>{{ row.detail }}</td>
</tr>
{% endfor %}
</table>
</body>
</html>
"#;
}
