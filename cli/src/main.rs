use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use docs_core::config::{DEFAULT_MAX_RESULTS, DEFAULT_PAGE_LIMIT};
use docs_core::{Category, DocIndex, PageRequest, TitleLookup};
use serde_json::json;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "docs")]
#[command(about = "Inspect and query a scraped documentation corpus", long_about = None)]
struct Cli {
    /// Corpus directory (or a single JSON/JSONL file)
    #[arg(long, global = true, default_value = "./data/docs_tavily")]
    corpus: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Page counts per category and with code
    Stats,
    /// Ranked full-text search
    Search {
        query: String,
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: usize,
    },
    /// Pages with code examples for a topic
    Code {
        topic: String,
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: usize,
    },
    /// Fetch one page by title, or print suggestions
    Get { title: String },
    /// Page through the catalog
    List {
        /// class, guide or all
        #[arg(long, default_value = "all")]
        category: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
        #[arg(long, default_value_t = DEFAULT_PAGE_LIMIT as i64, allow_negative_numbers = true)]
        limit: i64,
    },
    /// Every page's id, title, url, category and code flag
    Catalog,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    let index = DocIndex::open(Path::new(&cli.corpus))?;
    tracing::debug!(num_docs = index.num_docs(), corpus = %cli.corpus, "corpus ready");

    let out = match cli.command {
        Commands::Stats => json!(index.stats()),
        Commands::Search { query, max_results } => {
            json!({ "query": query, "results": index.search(&query, max_results)? })
        }
        Commands::Code { topic, max_results } => {
            json!({ "topic": topic, "results": index.code_examples(&topic, max_results)? })
        }
        Commands::Get { title } => match index.get_by_title(&title)? {
            TitleLookup::Found { document, kind } => json!({ "match": kind, "document": document }),
            TitleLookup::Suggestions(titles) => json!({ "match": null, "suggestions": titles }),
            TitleLookup::NotFound => bail!("no documentation page matches {title:?}"),
        },
        Commands::List { category, offset, limit } => {
            let page = index.list(Category::parse_filter(&category)?, PageRequest::new(offset, limit)?);
            json!({
                "category": page.label(),
                "total": page.total,
                "offset": page.offset,
                "has_more": page.has_more,
                "next_offset": page.next_offset,
                "pages": page.documents.iter().map(|d| &d.title).collect::<Vec<_>>(),
            })
        }
        Commands::Catalog => json!(index.catalog()),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
