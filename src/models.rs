//! Core data types flowing through the ingestion and retrieval pipeline.

use serde::Serialize;

/// A named unit of source text, stored once at ingestion time.
///
/// `name` is the file stem of the source document and is the identity used
/// for idempotent re-ingestion: a document whose name is already indexed is
/// skipped. `destination` is inferred from the name against the configured
/// vocabulary and copied onto every chunk for query-time filtering.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub name: String,
    pub path: String,
    pub destination: Option<String>,
    pub body: String,
    pub ingested_at: i64,
}

/// A bounded slice of a document's body, the unit actually indexed.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub id: String,
    pub document_id: String,
    pub chunk_index: i64,
    pub destination: Option<String>,
    pub text: String,
    pub hash: String,
}

/// One ranked result from a similarity query.
#[derive(Debug, Clone, Serialize)]
pub struct Passage {
    pub text: String,
    pub source_document: String,
    pub destination: Option<String>,
    pub score: f64,
}

/// The full result of a similarity query, ready for prompt assembly.
///
/// `filter_fallback` is true when a destination filter matched no chunk and
/// the ranking fell back to the unfiltered candidate set — degraded
/// relevance beats no information for a downstream prompt.
#[derive(Debug, Clone, Serialize)]
pub struct Retrieval {
    pub query: String,
    pub destination_filter: Option<String>,
    pub filter_fallback: bool,
    pub passages: Vec<Passage>,
}

impl Retrieval {
    /// Render the passages as a text block with source citations, suitable
    /// for direct inclusion in an LLM prompt.
    pub fn prompt_block(&self) -> String {
        let mut out = String::new();
        out.push_str("## Travel Knowledge Base Results\n\n");
        out.push_str(&format!("**Query:** {}\n\n", self.query));

        if self.filter_fallback {
            if let Some(ref filter) = self.destination_filter {
                out.push_str(&format!(
                    "_No indexed passages matched destination \"{}\"; showing the best overall matches._\n\n",
                    filter
                ));
            }
        }

        for (i, passage) in self.passages.iter().enumerate() {
            out.push_str(&format!("### Result {}\n", i + 1));
            out.push_str(passage.text.trim());
            out.push_str("\n\n");
            match &passage.destination {
                Some(dest) => out.push_str(&format!(
                    "*Source: {} (destination: {}, score {:.3})*\n\n",
                    passage.source_document, dest, passage.score
                )),
                None => out.push_str(&format!(
                    "*Source: {} (score {:.3})*\n\n",
                    passage.source_document, passage.score
                )),
            }
            out.push_str("---\n\n");
        }

        out
    }
}

/// Summary of one ingest run.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    pub documents_ingested: u64,
    pub documents_skipped: u64,
    pub chunks_written: u64,
    pub embeddings_written: u64,
    /// True when the knowledge directory was empty or absent and the
    /// built-in default documents were written before scanning.
    pub seeded: bool,
}

/// Totals and per-destination breakdown for the `stats` command.
#[derive(Debug, Clone)]
pub struct IndexStats {
    pub documents: i64,
    pub chunks: i64,
    pub vectors: i64,
    pub by_destination: Vec<DestinationStats>,
}

/// Document and chunk counts for one destination tag.
#[derive(Debug, Clone)]
pub struct DestinationStats {
    pub destination: String,
    pub documents: i64,
    pub chunks: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_retrieval(fallback: bool) -> Retrieval {
        Retrieval {
            query: "passport requirements".to_string(),
            destination_filter: Some("Italy".to_string()),
            filter_fallback: fallback,
            passages: vec![Passage {
                text: "Italy requires a valid passport.".to_string(),
                source_document: "italy".to_string(),
                destination: Some("Italy".to_string()),
                score: 0.91,
            }],
        }
    }

    #[test]
    fn prompt_block_cites_source_and_destination() {
        let block = sample_retrieval(false).prompt_block();
        assert!(block.contains("**Query:** passport requirements"));
        assert!(block.contains("Italy requires a valid passport."));
        assert!(block.contains("*Source: italy (destination: Italy, score 0.910)*"));
        assert!(!block.contains("best overall matches"));
    }

    #[test]
    fn prompt_block_notes_filter_fallback() {
        let block = sample_retrieval(true).prompt_block();
        assert!(block.contains("No indexed passages matched destination \"Italy\""));
    }

    #[test]
    fn prompt_block_omits_destination_when_untagged() {
        let retrieval = Retrieval {
            query: "packing".to_string(),
            destination_filter: None,
            filter_fallback: false,
            passages: vec![Passage {
                text: "Roll clothes to save space.".to_string(),
                source_document: "packing".to_string(),
                destination: None,
                score: 0.5,
            }],
        };
        let block = retrieval.prompt_block();
        assert!(block.contains("*Source: packing (score 0.500)*"));
    }
}
