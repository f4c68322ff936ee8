//! # Max Quantity Storefront
//!
//! A command-driven storefront that hosts the max quantity plugin in memory.
//!
//! ## Module Organization
//! ```text
//! maxqty_storefront/
//! ├── lib.rs          ◄─── You are here (startup & command loop)
//! ├── config.rs       ◄─── Environment configuration
//! ├── storefront.rs   ◄─── In-memory host with the plugin registered
//! ├── commands.rs     ◄─── Command parsing & dispatch
//! └── error.rs        ◄─── App error type for command responses
//! ```
//!
//! ## Protocol
//! Commands are read from stdin, one per line. Every line gets exactly one
//! JSON line on stdout: the command's response, or `{"error": {...}}`.
//! Logs go to stderr so stdout stays machine-readable.

pub mod commands;
pub mod config;
pub mod error;
pub mod storefront;

use std::io::{self, BufRead, Write};

use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::execute;
use config::StorefrontConfig;
use storefront::Storefront;

/// Runs the storefront until stdin closes.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging                                                  │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: INFO (DEBUG for maxqty crates), override with RUST_LOG   │
/// │                                                                         │
/// │  2. Load Configuration                                                  │
/// │     • MAXQTY_* environment variables over defaults                      │
/// │                                                                         │
/// │  3. Build Storefront                                                    │
/// │     • Seed settings and catalog                                         │
/// │     • Register the plugin if the commerce plugin is active              │
/// │                                                                         │
/// │  4. Command Loop                                                        │
/// │     • One line in, one JSON line out                                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> io::Result<()> {
    init_tracing();

    info!("Starting max quantity storefront");

    let config = StorefrontConfig::from_env();
    debug!(?config, "Configuration loaded");

    let store = Storefront::new(&config);

    serve(&store, io::stdin().lock(), io::stdout().lock())?;

    info!("Input closed, shutting down");
    Ok(())
}

/// Answers every line of `input` with one JSON line on `output`.
///
/// Bytes that aren't UTF-8 are replaced, so a garbled line gets an
/// `INVALID_COMMAND` response instead of ending the session. Blank lines are
/// skipped.
pub fn serve<R: BufRead, W: Write>(store: &Storefront, mut input: R, mut output: W) -> io::Result<()> {
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }

        let line = String::from_utf8_lossy(&buf);
        if line.trim().is_empty() {
            continue;
        }

        let response = line
            .parse()
            .and_then(|command| execute(store, command))
            .unwrap_or_else(|err| {
                debug!(error = %err, "Command failed");
                json!({ "error": err })
            });

        writeln!(output, "{}", response)?;
        output.flush()?;
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=maxqty_host=trace` - Trace the host adapter only
/// - Default: INFO, DEBUG for every `maxqty*` target
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,maxqty=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(input: &[u8]) -> Vec<serde_json::Value> {
        let store = Storefront::new(&StorefrontConfig::default());
        let mut output = Vec::new();
        serve(&store, input, &mut output).unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_one_response_per_line() {
        let responses = session(b"limit set 2\n\nadd 7 2\nadd 7");

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0], json!({ "limit": 2 }));
        assert_eq!(responses[1]["accepted"], json!(true));
        assert_eq!(responses[2]["accepted"], json!(false));
    }

    #[test]
    fn test_invalid_utf8_line_does_not_end_session() {
        let responses = session(b"limit set 2\nadd 7 \xff\nadd 7 1\n");

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[1]["error"]["code"], json!("INVALID_COMMAND"));
        assert_eq!(responses[2]["accepted"], json!(true));
        assert_eq!(responses[2]["inCart"], json!(1));
    }
}
