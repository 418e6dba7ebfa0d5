//! # itinera CLI (`itin`)
//!
//! The `itin` binary drives the travel knowledge retriever and the mock
//! travel-data tools from the command line.
//!
//! ## Usage
//!
//! ```bash
//! itin --config ./config/itinera.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `itin init` | Create the SQLite index store and run schema migrations |
//! | `itin ingest` | Index the knowledge directory (seeds defaults if empty) |
//! | `itin rebuild` | Drop the index and re-ingest from scratch |
//! | `itin query "<text>"` | Retrieve the top-k passages, optionally by destination |
//! | `itin get <name>` | Print a stored document and its chunks |
//! | `itin stats` | Show index totals and per-destination breakdown |
//! | `itin flights` / `hotels` / `activities` | Run one mock travel tool |
//! | `itin plan` | Assemble a markdown itinerary from tools + retrieval |
//!
//! ## Examples
//!
//! ```bash
//! # First run: creates the store, seeds the knowledge directory, indexes it
//! itin init && itin ingest
//!
//! # Filtered retrieval, prompt-ready output
//! itin query "passport requirements" --destination Italy --k 1
//!
//! # Full mock itinerary
//! itin plan --origin "New York" --destination Rome \
//!     --depart 2025-09-10 --return-date 2025-09-17 --interests "food, history"
//! ```

mod chunk;
mod config;
mod db;
mod destinations;
mod embedding;
mod error;
mod get;
mod itinerary;
mod knowledge;
mod migrate;
mod models;
mod retriever;
mod seed;
mod stats;
mod tools;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::itinerary::PlanRequest;
use crate::models::IngestReport;
use crate::retriever::Retriever;
use crate::tools::{ActivityQuery, CabinClass, FlightQuery, HotelQuery, ToolRequest};

/// itinera CLI — local travel knowledge retrieval and mock booking data
/// for LLM itinerary planners.
#[derive(Parser)]
#[command(
    name = "itin",
    about = "itinera — local travel knowledge retrieval and mock booking data for LLM itinerary planners",
    version,
    long_about = "itinera ingests a directory of travel knowledge documents into a persisted \
    vector index and answers similarity queries with prompt-ready passages, optionally filtered \
    by destination. Mock flight/hotel/activity tools and a markdown itinerary assembler round \
    out the demo pipeline."
)]
struct Cli {
    /// Path to configuration file (TOML). Built-in defaults apply when the
    /// file does not exist.
    #[arg(long, global = true, default_value = "./config/itinera.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the index store schema.
    ///
    /// Creates the SQLite database file and all required tables. Idempotent;
    /// running it multiple times is safe.
    Init,

    /// Ingest the knowledge directory into the index.
    ///
    /// Documents already indexed (by name) are skipped. An empty or absent
    /// directory is seeded with the built-in default documents first.
    Ingest {
        /// Override the knowledge directory from config.
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Drop all indexed content and re-ingest from scratch.
    ///
    /// The only supported repair path for stale or corrupt index content.
    Rebuild {
        /// Override the knowledge directory from config.
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Retrieve the most similar passages for a query.
    Query {
        /// The query text.
        text: String,

        /// Restrict results to a destination tag (case-insensitive; falls
        /// back to the unfiltered ranking when nothing matches).
        #[arg(long)]
        destination: Option<String>,

        /// Number of passages to return (defaults to retrieval.top_k).
        #[arg(long)]
        k: Option<usize>,

        /// Emit the result as JSON instead of the prompt block.
        #[arg(long)]
        json: bool,
    },

    /// Print a stored document and its chunks by name.
    Get {
        /// Document name (source file stem).
        name: String,
    },

    /// Show index totals and a per-destination breakdown.
    Stats,

    /// Search mock flight options.
    Flights {
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        /// Departure date (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, default_value_t = 1)]
        travelers: u32,
        #[arg(long, value_enum, default_value_t = CabinClass::Economy)]
        cabin: CabinClass,
    },

    /// Search mock hotel options.
    Hotels {
        #[arg(long)]
        destination: String,
        /// Check-in date (YYYY-MM-DD).
        #[arg(long)]
        check_in: NaiveDate,
        /// Check-out date (YYYY-MM-DD).
        #[arg(long)]
        check_out: NaiveDate,
        #[arg(long, default_value_t = 2)]
        guests: u32,
        #[arg(long, default_value_t = 3.0)]
        min_rating: f32,
    },

    /// Search mock activities and tours.
    Activities {
        #[arg(long)]
        destination: String,
        /// Comma-separated interests (e.g. "food, history, art").
        #[arg(long)]
        interests: String,
        #[arg(long, default_value_t = 4)]
        duration_hours: u32,
    },

    /// Assemble a markdown itinerary from mock tools and retrieval.
    Plan {
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
        /// Departure date (YYYY-MM-DD).
        #[arg(long)]
        depart: NaiveDate,
        /// Return date (YYYY-MM-DD).
        #[arg(long)]
        return_date: NaiveDate,
        #[arg(long, default_value_t = 2)]
        travelers: u32,
        #[arg(long, value_enum, default_value_t = CabinClass::Economy)]
        cabin: CabinClass,
        #[arg(long, default_value = "food, history, culture")]
        interests: String,
        #[arg(long, default_value_t = 3.5)]
        min_rating: f32,
        /// Where to write the itinerary markdown.
        #[arg(long, default_value = "itinerary.md")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            let pool = db::connect(&cfg.store.path).await?;
            migrate::run_migrations(&pool).await?;
            pool.close().await;
            println!("Index store initialized successfully.");
        }
        Commands::Ingest { dir } => {
            let dir = dir.unwrap_or_else(|| cfg.knowledge.dir.clone());
            let retriever = Retriever::open(cfg).await?;
            let report = retriever.ingest(&dir).await?;
            print_report("ingest", &report);
        }
        Commands::Rebuild { dir } => {
            let dir = dir.unwrap_or_else(|| cfg.knowledge.dir.clone());
            let retriever = Retriever::open(cfg).await?;
            let report = retriever.rebuild(&dir).await?;
            print_report("rebuild", &report);
        }
        Commands::Query {
            text,
            destination,
            k,
            json,
        } => {
            let k = k.unwrap_or(cfg.retrieval.top_k);
            let retriever = Retriever::open(cfg).await?;
            let retrieval = retriever.query(&text, destination.as_deref(), k).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&retrieval)?);
            } else {
                print!("{}", retrieval.prompt_block());
            }
        }
        Commands::Get { name } => {
            let retriever = Retriever::open(cfg).await?;
            get::run_get(&retriever, &name).await?;
        }
        Commands::Stats => {
            let retriever = Retriever::open(cfg).await?;
            stats::run_stats(&retriever).await?;
        }
        Commands::Flights {
            origin,
            destination,
            date,
            travelers,
            cabin,
        } => {
            let request = ToolRequest::Flights(FlightQuery {
                origin,
                destination,
                departure_date: date,
                travelers,
                cabin_class: cabin,
            });
            println!("{}", tools::dispatch(&request)?);
        }
        Commands::Hotels {
            destination,
            check_in,
            check_out,
            guests,
            min_rating,
        } => {
            let request = ToolRequest::Hotels(HotelQuery {
                destination,
                check_in,
                check_out,
                guests,
                min_rating,
            });
            println!("{}", tools::dispatch(&request)?);
        }
        Commands::Activities {
            destination,
            interests,
            duration_hours,
        } => {
            let request = ToolRequest::Activities(ActivityQuery {
                destination,
                interests,
                duration_hours,
            });
            println!("{}", tools::dispatch(&request)?);
        }
        Commands::Plan {
            origin,
            destination,
            depart,
            return_date,
            travelers,
            cabin,
            interests,
            min_rating,
            output,
        } => {
            let knowledge_dir = cfg.knowledge.dir.clone();
            let top_k = cfg.retrieval.top_k;
            let retriever = Retriever::open(cfg).await?;
            retriever.ingest(&knowledge_dir).await?;

            let request = PlanRequest {
                origin,
                destination,
                depart,
                return_date,
                travelers,
                cabin_class: cabin,
                interests,
                min_hotel_rating: min_rating,
            };

            let flights = tools::dispatch(&ToolRequest::Flights(request.flight_query()))?;
            let hotels = tools::dispatch(&ToolRequest::Hotels(request.hotel_query()))?;
            let activities = tools::dispatch(&ToolRequest::Activities(request.activity_query()))?;

            // Retrieval failure degrades to neutral text rather than
            // aborting the whole plan.
            let tips_query = format!(
                "visa requirements, local customs, and best time to visit {}",
                request.destination
            );
            let tips = match retriever
                .query(&tips_query, Some(&request.destination), top_k)
                .await
            {
                Ok(retrieval) => retrieval.prompt_block(),
                Err(e) => {
                    eprintln!("Warning: travel knowledge unavailable: {}", e);
                    "No travel knowledge available.".to_string()
                }
            };

            let doc = itinerary::compose(&request, &flights, &hotels, &activities, &tips);
            itinerary::write_itinerary(&output, &doc)?;
            println!("Itinerary written to {}", output.display());
        }
    }

    Ok(())
}

fn print_report(label: &str, report: &IngestReport) {
    println!("{}", label);
    if report.seeded {
        println!("  seeded built-in documents");
    }
    println!("  documents ingested: {}", report.documents_ingested);
    println!("  documents skipped:  {}", report.documents_skipped);
    println!("  chunks written:     {}", report.chunks_written);
    println!("  embeddings written: {}", report.embeddings_written);
    println!("ok");
}
