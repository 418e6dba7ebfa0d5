//! Document inspection by name.
//!
//! Fetches a stored document and its chunks from the index, mostly useful
//! for checking what a destination tag was inferred as and where the chunk
//! boundaries landed.

use anyhow::{bail, Result};
use sqlx::Row;

use crate::retriever::Retriever;

/// Print a document's metadata, body, and chunk breakdown.
pub async fn run_get(retriever: &Retriever, name: &str) -> Result<()> {
    let pool = retriever.pool();

    let doc_row = sqlx::query(
        "SELECT id, name, path, destination, body, ingested_at FROM documents WHERE name = ?",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    let doc_row = match doc_row {
        Some(row) => row,
        None => bail!("document not found: {}", name),
    };

    let doc_id: String = doc_row.get("id");
    let destination: Option<String> = doc_row.get("destination");
    let ingested_at: i64 = doc_row.get("ingested_at");

    let chunk_rows = sqlx::query(
        "SELECT chunk_index, text FROM chunks WHERE document_id = ? ORDER BY chunk_index ASC",
    )
    .bind(&doc_id)
    .fetch_all(pool)
    .await?;

    println!("--- Document ---");
    println!("name:        {}", name);
    println!("id:          {}", doc_id);
    println!("path:        {}", doc_row.get::<String, _>("path"));
    println!(
        "destination: {}",
        destination.as_deref().unwrap_or("(untagged)")
    );
    println!("ingested_at: {}", format_ts_iso(ingested_at));
    println!();

    println!("--- Body ---");
    println!("{}", doc_row.get::<String, _>("body"));
    println!();

    println!("--- Chunks ({}) ---", chunk_rows.len());
    for row in &chunk_rows {
        println!("[chunk {}]", row.get::<i64, _>("chunk_index"));
        println!("{}", row.get::<String, _>("text"));
        println!();
    }

    Ok(())
}

fn format_ts_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| ts.to_string())
}
