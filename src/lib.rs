pub mod cli;
pub mod errors;
pub mod http;
pub mod models;
pub mod probes;
pub mod reporter;
pub mod runner;

pub use errors::TransportError;
pub use http::{ProbeRequest, Transport, TransportSession};
pub use models::{
    Finding, HttpMethod, Payload, ProbeCategory, Report, Response, RunSummary, Verdict,
};
pub use probes::{registry, Probe};
pub use reporter::{ConsoleReporter, HtmlExporter, JsonExporter};
pub use runner::Runner;
