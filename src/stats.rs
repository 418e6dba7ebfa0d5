//! Index statistics overview.
//!
//! Prints what's indexed — document, chunk, and embedding totals plus a
//! per-destination breakdown — so it's easy to confirm an ingest did what
//! was expected before wiring the retriever into a planner.

use anyhow::Result;

use crate::retriever::Retriever;

/// Run the stats command: query the index and print a summary.
pub async fn run_stats(retriever: &Retriever) -> Result<()> {
    let stats = retriever.stats().await?;

    let db_size = std::fs::metadata(&retriever.config().store.path)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("itinera — Index Stats");
    println!("=====================");
    println!();
    println!(
        "  Store:       {}",
        retriever.config().store.path.display()
    );
    println!("  Size:        {}", format_bytes(db_size));
    println!();
    println!("  Documents:   {}", stats.documents);
    println!("  Chunks:      {}", stats.chunks);
    println!(
        "  Embedded:    {} / {} ({}%)",
        stats.vectors,
        stats.chunks,
        if stats.chunks > 0 {
            (stats.vectors * 100) / stats.chunks
        } else {
            0
        }
    );

    if !stats.by_destination.is_empty() {
        println!();
        println!("  By destination:");
        println!("  {:<20} {:>6} {:>8}", "DESTINATION", "DOCS", "CHUNKS");
        println!("  {}", "-".repeat(38));
        for entry in &stats.by_destination {
            println!(
                "  {:<20} {:>6} {:>8}",
                entry.destination, entry.documents, entry.chunks
            );
        }
    }

    println!();
    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
