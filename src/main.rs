use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use webprobe::cli::{Cli, Commands};
use webprobe::http::{Transport, TransportSession};
use webprobe::probes;
use webprobe::reporter::{ConsoleReporter, HtmlExporter, JsonExporter};
use webprobe::runner::Runner;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            url,
            timeout,
            output,
            parallel,
            no_color,
            verbose,
        } => {
            let timeout = Duration::from_secs(timeout);
            let session: Arc<dyn Transport> =
                Arc::new(TransportSession::new(&url, timeout)?);

            let probes = probes::registry();
            let stateless = probes.iter().filter(|p| !p.shares_session_state()).count();
            let mut runner = Runner::new(session, probes).with_verbose(verbose);

            if parallel {
                let mut isolated: Vec<Arc<dyn Transport>> = Vec::with_capacity(stateless);
                for _ in 0..stateless {
                    isolated.push(Arc::new(TransportSession::new(&url, timeout)?));
                }
                runner = runner.with_isolated_transports(isolated);
            }

            let reporter = ConsoleReporter::new(!no_color);
            reporter.print_header(&url);

            let start = Instant::now();
            let report = runner.run().await;
            let duration_ms = start.elapsed().as_millis() as u64;

            reporter.print_findings(&report);
            reporter.print_table(&report);
            reporter.print_summary(&report, duration_ms);

            if let Some(path) = output {
                JsonExporter::export(&report, &url, duration_ms, &path)?;
                println!("Report written to {}", path);
            }

            Ok(if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Report {
            input,
            format,
            output,
        } => {
            let (report, target) = JsonExporter::load(&input)?;

            match format.as_str() {
                "html" => {
                    let path = output.unwrap_or_else(|| "report.html".to_string());
                    HtmlExporter::export(&report, &target, &path)?;
                    println!("Report written to {}", path);
                }
                "json" => {
                    println!("{}", serde_json::to_string_pretty(report.findings())?);
                }
                other => bail!("unsupported report format: {}", other),
            }

            Ok(ExitCode::SUCCESS)
        }
    }
}
