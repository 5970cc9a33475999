//! Common functionality.

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

/// Commonly used command line arguments.
#[derive(Parser, Debug)]
pub struct Args {
    /// Verbosity of the program
    #[clap(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            verbose: Verbosity::new(0, 0),
        }
    }
}

/// Helper to print the current memory resident set size via `tracing`.
pub fn trace_rss_now() {
    let me = procfs::process::Process::myself().unwrap();
    let page_size = procfs::page_size();
    tracing::debug!(
        "RSS now: {}",
        bytesize::ByteSize::b(me.stat().unwrap().rss * page_size)
    );
}

/// Build a node identifier from a prefix and a human-readable label.
///
/// Labels may contain spaces; identifiers never do.
pub fn slugify(prefix: &str, label: &str) -> String {
    format!("{}-{}", prefix, label.replace(' ', "_"))
}

/// Recover the human-readable label from a node identifier.
pub fn unslug(node_id: &str, prefix: &str) -> String {
    node_id
        .strip_prefix(&format!("{prefix}-"))
        .unwrap_or(node_id)
        .replace('_', " ")
}
