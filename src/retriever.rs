//! The knowledge retriever.
//!
//! Owns the persisted index — documents, chunks, and embeddings in SQLite —
//! and exposes the two operations its caller composes into LLM prompts:
//! [`Retriever::ingest`] and [`Retriever::query`]. `rebuild` (full drop and
//! re-ingest) is the only repair path for stale or corrupt content; there is
//! no incremental per-chunk delete or update.
//!
//! Lifecycle: [`Retriever::open`] loads or creates the store; the index is
//! ready once `ingest` succeeds. The instance is constructed explicitly by
//! whoever assembles the pipeline and passed by reference — there is no
//! process-wide singleton. Queries only read once the index is ready, so
//! concurrent readers are safe; ingestion is expected to run exclusively.

use std::cmp::Ordering;
use std::path::Path;

use sqlx::{Row, SqlitePool};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::chunk::chunk_text;
use crate::config::Config;
use crate::db;
use crate::destinations::infer_destination;
use crate::embedding::{self, blob_to_vec, cosine_similarity, vec_to_blob, EmbeddingProvider};
use crate::error::{IndexInitError, QueryError};
use crate::knowledge::{self, KnowledgeDoc};
use crate::migrate;
use crate::models::{DestinationStats, IndexStats, IngestReport, Passage, Retrieval};
use crate::seed;

pub struct Retriever {
    pool: SqlitePool,
    provider: Box<dyn EmbeddingProvider>,
    config: Config,
}

impl Retriever {
    /// Open (creating if missing) the index store, run migrations, and
    /// construct the configured embedding provider.
    pub async fn open(config: Config) -> Result<Self, IndexInitError> {
        let pool = db::connect(&config.store.path).await?;
        migrate::run_migrations(&pool).await?;

        let provider =
            embedding::create_provider(&config.embedding).map_err(IndexInitError::Provider)?;

        info!(
            store = %config.store.path.display(),
            model = provider.model_name(),
            "index store ready"
        );

        Ok(Self {
            pool,
            provider,
            config,
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Ingest every document in `dir` that is not already indexed.
    ///
    /// An empty or absent directory is seeded with the built-in default
    /// documents first, so the index is never empty after a successful
    /// ingest. Idempotent by document name: re-running over an unchanged
    /// directory writes nothing; changed content under an existing name is
    /// left stale until `rebuild`.
    pub async fn ingest(&self, dir: &Path) -> Result<IngestReport, IndexInitError> {
        let include = &self.config.knowledge.include_globs;
        let exclude = &self.config.knowledge.exclude_globs;

        let mut docs = knowledge::scan_knowledge_dir(dir, include, exclude)
            .map_err(IndexInitError::Source)?;

        let mut report = IngestReport::default();

        if docs.is_empty() {
            let written = seed::write_seed_documents(dir)?;
            info!(
                count = written,
                dir = %dir.display(),
                "knowledge directory empty; wrote built-in documents"
            );
            report.seeded = true;
            docs = knowledge::scan_knowledge_dir(dir, include, exclude)
                .map_err(IndexInitError::Source)?;
        }

        for doc in &docs {
            if self.document_exists(&doc.name).await? {
                debug!(name = %doc.name, "already indexed; skipping");
                report.documents_skipped += 1;
                continue;
            }

            let chunks_stored = self.ingest_document(doc).await?;
            report.documents_ingested += 1;
            report.chunks_written += chunks_stored;
            report.embeddings_written += chunks_stored;
        }

        info!(
            ingested = report.documents_ingested,
            skipped = report.documents_skipped,
            chunks = report.chunks_written,
            "ingest complete"
        );

        Ok(report)
    }

    /// Drop every document, chunk, and vector, then re-ingest `dir`.
    pub async fn rebuild(&self, dir: &Path) -> Result<IngestReport, IndexInitError> {
        sqlx::query("DELETE FROM chunk_vectors")
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM chunks").execute(&self.pool).await?;
        sqlx::query("DELETE FROM documents")
            .execute(&self.pool)
            .await?;

        info!("dropped existing index contents");
        self.ingest(dir).await
    }

    /// Answer a similarity query with at most `k` passages.
    ///
    /// When `destination_filter` is set, candidates are restricted to chunks
    /// whose destination tag case-insensitively equals or contains the
    /// filter. A filter that matches nothing falls back to the unfiltered
    /// ranking — on a non-empty index the result is never empty purely
    /// because of the filter — and the fallback is surfaced via
    /// [`Retrieval::filter_fallback`], not an error.
    pub async fn query(
        &self,
        text: &str,
        destination_filter: Option<&str>,
        k: usize,
    ) -> Result<Retrieval, QueryError> {
        if text.trim().is_empty() {
            return Err(QueryError::EmptyQuery);
        }
        let k = k.max(1);

        let total_chunks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chunks")
            .fetch_one(&self.pool)
            .await?;
        if total_chunks == 0 {
            return Err(QueryError::EmptyIndex);
        }

        let query_vec = self
            .provider
            .embed(&[text.to_string()])
            .await
            .map_err(QueryError::Provider)?
            .into_iter()
            .next()
            .ok_or_else(|| QueryError::Provider(anyhow::anyhow!("empty embedding response")))?;

        let mut filter_fallback = false;
        let mut candidates = self.fetch_candidates(destination_filter).await?;
        if candidates.is_empty() && destination_filter.is_some() {
            debug!(
                filter = destination_filter,
                "destination filter matched nothing; falling back to unfiltered ranking"
            );
            filter_fallback = true;
            candidates = self.fetch_candidates(None).await?;
        }

        let mut scored: Vec<(Candidate, f64)> = candidates
            .into_iter()
            .map(|c| {
                let similarity = cosine_similarity(&query_vec, &blob_to_vec(&c.embedding)) as f64;
                (c, similarity)
            })
            .collect();

        // Similarity descending; ties broken by chunk position, then source
        // document name, so identical queries always rank identically.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.chunk_index.cmp(&b.0.chunk_index))
                .then(a.0.document_name.cmp(&b.0.document_name))
        });
        scored.truncate(k);

        Ok(Retrieval {
            query: text.to_string(),
            destination_filter: destination_filter.map(|f| f.to_string()),
            filter_fallback,
            passages: scored
                .into_iter()
                .map(|(c, score)| Passage {
                    text: c.text,
                    source_document: c.document_name,
                    destination: c.destination,
                    score,
                })
                .collect(),
        })
    }

    /// Totals and per-destination breakdown for inspection.
    pub async fn stats(&self) -> Result<IndexStats, QueryError> {
        let documents: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(&self.pool)
            .await?;
        let chunks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chunks")
            .fetch_one(&self.pool)
            .await?;
        let vectors: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chunk_vectors")
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query(
            r#"
            SELECT
                COALESCE(d.destination, '(untagged)') AS destination,
                COUNT(DISTINCT d.id) AS doc_count,
                COUNT(c.id) AS chunk_count
            FROM documents d
            LEFT JOIN chunks c ON c.document_id = d.id
            GROUP BY COALESCE(d.destination, '(untagged)')
            ORDER BY doc_count DESC, destination ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let by_destination = rows
            .iter()
            .map(|row| DestinationStats {
                destination: row.get("destination"),
                documents: row.get("doc_count"),
                chunks: row.get("chunk_count"),
            })
            .collect();

        Ok(IndexStats {
            documents,
            chunks,
            vectors,
            by_destination,
        })
    }

    async fn document_exists(&self, name: &str) -> Result<bool, IndexInitError> {
        let existing: Option<String> =
            sqlx::query_scalar("SELECT id FROM documents WHERE name = ?")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(existing.is_some())
    }

    /// Chunk, embed, and persist one document in a single transaction.
    async fn ingest_document(&self, doc: &KnowledgeDoc) -> Result<u64, IndexInitError> {
        let destination = infer_destination(&doc.name, &self.config.destinations);
        let doc_id = Uuid::new_v4().to_string();

        let chunks = chunk_text(
            &doc_id,
            destination.as_deref(),
            &doc.body,
            self.config.chunking.window_chars,
            self.config.chunking.overlap_chars,
        );

        if chunks.is_empty() {
            warn!(name = %doc.name, "document produced no chunks; skipping");
            return Ok(0);
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self
            .provider
            .embed(&texts)
            .await
            .map_err(IndexInitError::Provider)?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO documents (id, name, path, destination, body, ingested_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&doc_id)
        .bind(&doc.name)
        .bind(doc.path.to_string_lossy().to_string())
        .bind(&destination)
        .bind(&doc.body)
        .bind(chrono::Utc::now().timestamp())
        .execute(&mut *tx)
        .await?;

        for (chunk, vector) in chunks.iter().zip(vectors.iter()) {
            sqlx::query(
                "INSERT INTO chunks (id, document_id, chunk_index, destination, text, hash) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(&chunk.id)
            .bind(&chunk.document_id)
            .bind(chunk.chunk_index)
            .bind(&chunk.destination)
            .bind(&chunk.text)
            .bind(&chunk.hash)
            .execute(&mut *tx)
            .await?;

            sqlx::query(
                "INSERT INTO chunk_vectors (chunk_id, document_id, model, dims, embedding) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&chunk.id)
            .bind(&chunk.document_id)
            .bind(self.provider.model_name())
            .bind(self.provider.dims() as i64)
            .bind(vec_to_blob(vector))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(
            name = %doc.name,
            destination = destination.as_deref().unwrap_or("-"),
            chunks = chunks.len(),
            "document indexed"
        );

        Ok(chunks.len() as u64)
    }

    async fn fetch_candidates(
        &self,
        destination_filter: Option<&str>,
    ) -> Result<Vec<Candidate>, sqlx::Error> {
        let rows = match destination_filter {
            Some(filter) => {
                sqlx::query(
                    r#"
                    SELECT cv.embedding, c.text, c.chunk_index, c.destination,
                           d.name AS document_name
                    FROM chunk_vectors cv
                    JOIN chunks c ON c.id = cv.chunk_id
                    JOIN documents d ON d.id = c.document_id
                    WHERE c.destination IS NOT NULL
                      AND LOWER(c.destination) LIKE '%' || LOWER(?) || '%'
                    "#,
                )
                .bind(filter)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT cv.embedding, c.text, c.chunk_index, c.destination,
                           d.name AS document_name
                    FROM chunk_vectors cv
                    JOIN chunks c ON c.id = cv.chunk_id
                    JOIN documents d ON d.id = c.document_id
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows
            .iter()
            .map(|row| Candidate {
                embedding: row.get("embedding"),
                text: row.get("text"),
                chunk_index: row.get("chunk_index"),
                destination: row.get("destination"),
                document_name: row.get("document_name"),
            })
            .collect())
    }
}

/// A chunk candidate loaded for query-time scoring.
struct Candidate {
    embedding: Vec<u8>,
    text: String,
    chunk_index: i64,
    destination: Option<String>,
    document_name: String,
}
