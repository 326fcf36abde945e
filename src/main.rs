use clap::{Parser, Subcommand};
use recx_core::{recommend, Rating, Record};
use recx_storage::Catalog;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// A content-based catalog recommendation engine
#[derive(Parser, Debug)]
#[command(name = "recx")]
#[command(about = "Content-based recommendations over a titled catalog", long_about = None)]
struct Args {
    /// Path to the catalog file
    #[arg(short, long, default_value = "./data/catalog.json")]
    catalog: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add one record to the catalog
    Add {
        #[arg(long)]
        title: String,

        /// Comma-joined author list
        #[arg(long, default_value = "")]
        author: String,

        /// Raw description (may contain HTML)
        #[arg(long, default_value = "")]
        description: String,

        /// Plain-text description; records without one cannot be recommended
        #[arg(long, default_value = "")]
        clean_description: String,

        /// Comma-separated category labels
        #[arg(long, default_value = "")]
        categories: String,

        /// Rating, numeric or "N/A"
        #[arg(long, default_value = "N/A")]
        rating: String,
    },

    /// Bulk-add records from a JSON array file
    Import {
        /// Path to a JSON file containing an array of records
        file: PathBuf,
    },

    /// Recommend records similar to a seed title
    Recommend {
        title: String,

        /// Only return candidates sharing at least one of these labels
        #[arg(long, value_delimiter = ',')]
        genres: Vec<String>,

        /// Maximum number of results
        #[arg(long, default_value_t = 5)]
        top_n: usize,
    },

    /// Print category label frequencies, most common first
    Genres,

    /// Print catalog titles in stored order
    List,
}

fn parse_rating(raw: &str) -> Rating {
    raw.parse::<f64>()
        .map(Rating::Number)
        .unwrap_or_else(|_| Rating::Text(raw.to_string()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let catalog = Catalog::open(&args.catalog)?;
    info!("Catalog: {:?} ({} records)", args.catalog, catalog.len());

    match args.command {
        Command::Add {
            title,
            author,
            description,
            clean_description,
            categories,
            rating,
        } => {
            let record = Record::new(title)
                .with_author(author)
                .with_description(description)
                .with_clean_description(clean_description)
                .with_categories(categories)
                .with_rating(parse_rating(&rating));

            let title = record.title.clone();
            if catalog.upsert_if_absent(record)? {
                info!("Added: {}", title);
            } else {
                warn!("Already in catalog, skipped: {}", title);
            }
        }

        Command::Import { file } => {
            let data = std::fs::read(&file)?;
            let records: Vec<Record> = serde_json::from_slice(&data)?;
            info!("Importing {} records from {:?}", records.len(), file);

            let mut added = 0usize;
            let mut skipped = 0usize;
            for record in records {
                let title = record.title.clone();
                if catalog.upsert_if_absent(record)? {
                    added += 1;
                } else {
                    warn!("Already in catalog, skipped: {}", title);
                    skipped += 1;
                }
            }
            info!("Import complete: {} added, {} skipped", added, skipped);
        }

        Command::Recommend {
            title,
            genres,
            top_n,
        } => {
            let results = recommend(&catalog.all(), &title, &genres, top_n)?;
            if results.is_empty() {
                info!("No results for '{}' with the given filters", title);
            }
            println!("{}", serde_json::to_string_pretty(&results)?);
        }

        Command::Genres => {
            let mut counts: HashMap<String, usize> = HashMap::new();
            for record in catalog.all() {
                for label in record.category_labels() {
                    *counts.entry(label).or_insert(0) += 1;
                }
            }

            let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
            counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

            for (label, count) in counts {
                println!("{}\t{}", label, count);
            }
        }

        Command::List => {
            for record in catalog.all() {
                println!("{}", record.title);
            }
        }
    }

    Ok(())
}
