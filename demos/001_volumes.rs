//! Volume management walkthrough.
//!
//! Demonstrates:
//! - Listing mounted volumes
//! - Creating and mounting a new volume
//! - Unmounting it again
//!
//! Usage:
//!   cargo run --example 001_volumes [URL]
//!   cargo run --example 001_volumes -- --debug

mod common;

// ============================================================================
// Imports
// ============================================================================

use common::Args;
use phkvs_console::{Result, VolumeInfo};

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
    println!("=== 001: Volumes ===\n");

    let client = common::connect(&args).await?;

    // ========================================================================
    // List Volumes
    // ========================================================================

    println!("[1] Listing mounted volumes...");
    let volumes = client.get_volumes_list().await?;
    print_volumes(&volumes);

    // ========================================================================
    // Create And Mount
    // ========================================================================

    println!("[2] Creating and mounting a demo volume...");
    let volume_id = client
        .create_and_mount_volume(".", "demo_volume", "/demo")
        .await?;
    println!("    ✓ Mounted as volume {volume_id}\n");

    println!("[3] Listing volumes again...");
    let volumes = client.get_volumes_list().await?;
    print_volumes(&volumes);

    // ========================================================================
    // Unmount
    // ========================================================================

    println!("[4] Unmounting volume {volume_id}...");
    client.unmount_volume(volume_id).await?;
    println!("    ✓ Unmounted\n");

    println!("=== Done ===");
    client.close();
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn print_volumes(volumes: &[VolumeInfo]) {
    if volumes.is_empty() {
        println!("    (no volumes mounted)\n");
        return;
    }

    println!("    {:<4} {:<24} {:<16} {}", "id", "path", "name", "mount point");
    for v in volumes {
        println!(
            "    {:<4} {:<24} {:<16} {}",
            v.volume_id.get(),
            v.volume_path,
            v.volume_name,
            v.mount_point_path
        );
    }
    println!();
}
