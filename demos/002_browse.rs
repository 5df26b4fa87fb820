//! Key namespace browsing.
//!
//! Demonstrates:
//! - Listing a directory of the key namespace
//! - Walking subdirectories breadth-first
//!
//! Usage:
//!   cargo run --example 002_browse [URL]
//!   cargo run --example 002_browse -- --debug

mod common;

// ============================================================================
// Imports
// ============================================================================

use std::collections::VecDeque;

use common::Args;
use phkvs_console::Result;

// ============================================================================
// Constants
// ============================================================================

/// How deep below the start directory the walk descends.
const MAX_DEPTH: usize = 3;

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    common::init_logging(args.debug);

    if let Err(e) = run(args).await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    println!("=== 002: Browse ===\n");

    let client = common::connect(&args).await?;

    let mut queue = VecDeque::from([("/".to_string(), 0usize)]);

    while let Some((dir, depth)) = queue.pop_front() {
        let listing = client.get_dir_entries(dir.as_str()).await?;
        let indent = "    ".repeat(depth + 1);
        println!("{}{}", indent, listing.dir);

        for entry in &listing.content {
            if entry.is_dir() {
                if depth + 1 < MAX_DEPTH {
                    queue.push_back((join_dir(&dir, &entry.name), depth + 1));
                }
                println!("{indent}  [dir] {}", entry.name);
            } else {
                let value = entry.value.as_deref().unwrap_or("");
                println!("{indent}  [key] {} = {value}", entry.name);
            }
        }
    }

    println!("\n=== Done ===");
    client.close();
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn join_dir(base: &str, name: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{name}")
    } else {
        format!("{base}/{name}")
    }
}
