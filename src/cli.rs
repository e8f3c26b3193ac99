use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "webprobe")]
#[command(version, about = "Black-box web vulnerability probe runner")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the probe suite against a target
    Scan {
        #[arg(short, long, default_value = "http://localhost:8080/")]
        url: String,

        /// Per-request timeout in seconds
        #[arg(short, long, default_value = "5")]
        timeout: u64,

        /// Write the report as JSON
        #[arg(short, long)]
        output: Option<String>,

        /// Run session-independent probes on their own sessions
        #[arg(long)]
        parallel: bool,

        #[arg(long)]
        no_color: bool,

        #[arg(short, long)]
        verbose: bool,
    },

    /// Re-render a previously exported report
    Report {
        #[arg(short, long)]
        input: String,

        #[arg(short, long, default_value = "html")]
        format: String,

        #[arg(short, long)]
        output: Option<String>,
    },
}
