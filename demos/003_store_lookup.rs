//! Storing and looking up typed values.
//!
//! Demonstrates:
//! - Storing each supported value type
//! - Looking values back up
//! - A server-side rejection surfacing as an RPC error
//! - Erasing keys and directories
//!
//! Usage:
//!   cargo run --example 003_store_lookup [URL]
//!   cargo run --example 003_store_lookup -- --debug

mod common;

// ============================================================================
// Imports
// ============================================================================

use common::Args;
use phkvs_console::{Result, ValueType};

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
    println!("=== 003: Store & Lookup ===\n");

    let client = common::connect(&args).await?;

    // ========================================================================
    // Store
    // ========================================================================

    let samples = [
        (ValueType::Uint8, "200"),
        (ValueType::Uint32, "70000"),
        (ValueType::Double, "3.5"),
        (ValueType::String, "hello"),
        (ValueType::Blob, "deadbeef"),
    ];

    println!("[1] Storing sample values under /demo...");
    for (value_type, value) in samples {
        let key = format!("/demo/{value_type}");
        client.store(key.as_str(), value_type, value).await?;
        println!("    ✓ {key} = {value}");
    }
    println!();

    // ========================================================================
    // Lookup
    // ========================================================================

    println!("[2] Looking the values back up...");
    for (value_type, _) in samples {
        let key = format!("/demo/{value_type}");
        let found = client.lookup(key.as_str()).await?;
        println!("    {key}: ({}) {}", found.value_type, found.value);
    }
    println!();

    // ========================================================================
    // Server-side Rejection
    // ========================================================================

    println!("[3] Storing an out-of-range uint8 (expected to fail)...");
    match client.store("/demo/bad", ValueType::Uint8, "999").await {
        Ok(()) => println!("    ✗ Server accepted it unexpectedly"),
        Err(e) => println!("    ✓ Rejected: {e}"),
    }
    println!();

    // ========================================================================
    // Erase
    // ========================================================================

    println!("[4] Erasing one key, then the whole directory...");
    client.erase_key("/demo/string").await?;
    println!("    ✓ /demo/string erased");
    client.erase_dir_recursive("/demo").await?;
    println!("    ✓ /demo erased recursively\n");

    println!("=== Done ===");
    client.close();
    Ok(())
}
