//! Integration tests for the knowledge retriever.
//!
//! Everything runs offline against the deterministic hash embedding
//! provider, so no network access or API key is needed.

use std::path::Path;

use tempfile::TempDir;

use itinera::config::Config;
use itinera::error::QueryError;
use itinera::retriever::Retriever;

fn test_config(root: &Path) -> Config {
    let mut config = Config::default();
    config.store.path = root.join("data").join("index.sqlite");
    config.knowledge.dir = root.join("knowledge");
    config.embedding.provider = "hash".to_string();
    config.embedding.dims = 256;
    config
}

async fn open_retriever(root: &Path) -> Retriever {
    Retriever::open(test_config(root)).await.expect("open retriever")
}

#[tokio::test]
async fn ingest_then_query_finds_the_source_document() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("knowledge");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("rome.txt"),
        "The Colosseum hosts gladiator history tours every morning. \
         Ancient forum walks depart from the main gate at nine.",
    )
    .unwrap();
    std::fs::write(
        dir.join("bali.txt"),
        "Surf lessons and rice terrace hikes fill most mornings in Ubud. \
         Temples ask for a sarong at the entrance.",
    )
    .unwrap();

    let retriever = open_retriever(tmp.path()).await;
    retriever.ingest(&dir).await.unwrap();

    let result = retriever
        .query("gladiator history tours", None, 3)
        .await
        .unwrap();
    assert!(!result.passages.is_empty());
    assert_eq!(result.passages[0].source_document, "rome");
    assert!(result.passages[0].score > 0.0);
}

#[tokio::test]
async fn empty_directory_is_seeded_with_defaults() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("knowledge");
    // Directory intentionally not created.

    let retriever = open_retriever(tmp.path()).await;
    let report = retriever.ingest(&dir).await.unwrap();

    assert!(report.seeded);
    assert!(report.documents_ingested >= 6);
    assert!(report.chunks_written > 0);
    assert!(dir.join("italy.txt").exists());

    // The index is never empty after a successful ingest.
    let stats = retriever.stats().await.unwrap();
    assert!(stats.chunks > 0);
    assert_eq!(stats.chunks, stats.vectors);
}

#[tokio::test]
async fn ingest_is_idempotent_by_document_name() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("knowledge");

    let retriever = open_retriever(tmp.path()).await;
    let first = retriever.ingest(&dir).await.unwrap();
    let chunks_after_first = retriever.stats().await.unwrap().chunks;

    let second = retriever.ingest(&dir).await.unwrap();
    let chunks_after_second = retriever.stats().await.unwrap().chunks;

    assert_eq!(second.documents_ingested, 0);
    assert_eq!(second.documents_skipped, first.documents_ingested);
    assert_eq!(chunks_after_first, chunks_after_second);
}

#[tokio::test]
async fn k_bounds_the_result_count() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("knowledge");

    let retriever = open_retriever(tmp.path()).await;
    retriever.ingest(&dir).await.unwrap();
    let stats = retriever.stats().await.unwrap();
    assert!(stats.chunks >= 3);

    let three = retriever.query("travel advice", None, 3).await.unwrap();
    assert_eq!(three.passages.len(), 3);

    let one = retriever.query("travel advice", None, 1).await.unwrap();
    assert_eq!(one.passages.len(), 1);
}

#[tokio::test]
async fn destination_filter_restricts_candidates() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("knowledge");

    let retriever = open_retriever(tmp.path()).await;
    retriever.ingest(&dir).await.unwrap();

    let result = retriever
        .query("best time to visit", Some("Italy"), 5)
        .await
        .unwrap();

    assert!(!result.passages.is_empty());
    assert!(!result.filter_fallback);
    for passage in &result.passages {
        let tag = passage.destination.as_deref().unwrap_or_default();
        assert!(
            tag.to_lowercase().contains("italy"),
            "unexpected destination {:?}",
            passage.destination
        );
    }
}

#[tokio::test]
async fn unmatched_filter_falls_back_to_unfiltered_ranking() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("knowledge");

    let retriever = open_retriever(tmp.path()).await;
    retriever.ingest(&dir).await.unwrap();

    let result = retriever
        .query("packing tips", Some("Atlantis"), 3)
        .await
        .unwrap();

    assert!(result.filter_fallback);
    assert!(!result.passages.is_empty());
    assert!(result.prompt_block().contains("Atlantis"));
}

#[tokio::test]
async fn seeded_italy_document_answers_passport_queries() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("knowledge");

    let retriever = open_retriever(tmp.path()).await;
    retriever.ingest(&dir).await.unwrap();

    let result = retriever
        .query("passport requirements", Some("Italy"), 1)
        .await
        .unwrap();

    assert_eq!(result.passages.len(), 1);
    assert!(result.passages[0].text.contains("passport"));
    assert_eq!(result.passages[0].destination.as_deref(), Some("Italy"));
}

#[tokio::test]
async fn query_against_empty_index_errors() {
    let tmp = TempDir::new().unwrap();
    let retriever = open_retriever(tmp.path()).await;

    let err = retriever.query("anything", None, 3).await.unwrap_err();
    assert!(matches!(err, QueryError::EmptyIndex));
}

#[tokio::test]
async fn blank_query_text_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("knowledge");

    let retriever = open_retriever(tmp.path()).await;
    retriever.ingest(&dir).await.unwrap();

    let err = retriever.query("   ", None, 3).await.unwrap_err();
    assert!(matches!(err, QueryError::EmptyQuery));
}

#[tokio::test]
async fn changed_content_stays_stale_until_rebuild() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("knowledge");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("rome.txt"), "Gladiator tours at the Colosseum.").unwrap();

    let retriever = open_retriever(tmp.path()).await;
    retriever.ingest(&dir).await.unwrap();

    // Same name, new content: plain ingest must skip it.
    std::fs::write(
        dir.join("rome.txt"),
        "The ancient aqueduct walk is the city's best kept secret.",
    )
    .unwrap();
    let report = retriever.ingest(&dir).await.unwrap();
    assert_eq!(report.documents_ingested, 0);

    let stale = retriever.query("ancient aqueduct walk", None, 1).await.unwrap();
    assert!(!stale.passages[0].text.contains("aqueduct"));

    // Rebuild drops everything and picks up the new content.
    retriever.rebuild(&dir).await.unwrap();
    let fresh = retriever.query("ancient aqueduct walk", None, 1).await.unwrap();
    assert!(fresh.passages[0].text.contains("aqueduct"));
}
