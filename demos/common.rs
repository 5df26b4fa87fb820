//! Shared utilities for demo programs.
//!
//! Provides common functionality used across all demos:
//! - Command-line argument parsing
//! - Logging initialization
//! - Client connection with a printing lifecycle observer

#![allow(dead_code)]

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use phkvs_console::{ConnectionObserver, ConsoleClient, Result};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Constants
// ============================================================================

/// Console URL used when neither the command line nor the environment
/// provides one.
pub const DEFAULT_CONSOLE_URL: &str = "http://127.0.0.1:8080/";

// ============================================================================
// Types
// ============================================================================

/// Command-line arguments for demos.
#[derive(Debug, Clone)]
pub struct Args {
    pub debug: bool,
    pub console_url: String,
}

impl Args {
    /// Parse command-line arguments.
    ///
    /// The first non-flag argument is the console URL; the
    /// `PHKVS_CONSOLE_URL` environment variable is the fallback.
    pub fn parse() -> Self {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let console_url = args
            .iter()
            .find(|a| !a.starts_with("--"))
            .cloned()
            .or_else(|| std::env::var("PHKVS_CONSOLE_URL").ok())
            .unwrap_or_else(|| DEFAULT_CONSOLE_URL.to_string());

        Self {
            debug: args.iter().any(|a| a == "--debug"),
            console_url,
        }
    }
}

/// Observer that prints lifecycle transitions, like the console's status
/// indicator.
pub struct PrintObserver;

impl ConnectionObserver for PrintObserver {
    fn on_connect(&self) {
        println!("[ws] connected");
    }

    fn on_error(&self) {
        println!("[ws] error");
    }

    fn on_disconnect(&self) {
        println!("[ws] disconnected");
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Initialize tracing/logging.
pub fn init_logging(debug: bool) {
    let filter = if debug {
        "phkvs_console=debug"
    } else {
        "phkvs_console=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}

/// Connects a client to the configured console URL.
pub async fn connect(args: &Args) -> Result<ConsoleClient> {
    println!("Connecting to {} ...", args.console_url);

    ConsoleClient::builder()
        .console_url(args.console_url.as_str())
        .observer(Arc::new(PrintObserver))
        .connect()
        .await
}
