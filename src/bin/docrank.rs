//! docrank: load a JSON corpus and rank queries against it.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use docrank::{
    index_corpus, load_corpus, paginate, DocumentStatus, ExecutionPolicy, IndexResult,
    SearchConfig, SearchServer,
};

#[derive(Parser)]
#[command(name = "docrank", version, about = "Rank documents against free-text queries with TF-IDF")]
struct Cli {
    /// JSON corpus: an array of {id, text, status, ratings}
    #[arg(short, long)]
    corpus: PathBuf,

    /// Space-separated stop words
    #[arg(short, long, default_value = "")]
    stop_words: String,

    /// TOML ranking config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only return documents with this status
    #[arg(long, default_value = "actual", value_parser = parse_status)]
    status: DocumentStatus,

    /// Rank on the rayon thread pool
    #[arg(short, long)]
    parallel: bool,

    /// Results per printed page
    #[arg(long, default_value_t = 2)]
    page_size: usize,

    /// Print results as JSON instead of pages
    #[arg(long)]
    json: bool,

    /// Queries to run
    #[arg(required = true)]
    queries: Vec<String>,
}

fn parse_status(name: &str) -> Result<DocumentStatus, String> {
    DocumentStatus::from_name(name).ok_or_else(|| format!("unknown status {name:?}"))
}

fn run(cli: Cli) -> IndexResult<()> {
    let config = match &cli.config {
        Some(path) => SearchConfig::from_file(path)?,
        None => SearchConfig::default(),
    };
    let mut server = SearchServer::from_stop_words_text(&cli.stop_words)?.with_config(config)?;
    index_corpus(&mut server, &load_corpus(&cli.corpus)?)?;

    let policy = if cli.parallel {
        ExecutionPolicy::Parallel
    } else {
        ExecutionPolicy::Sequential
    };

    for query in &cli.queries {
        let documents = server.find_top_documents_by_status(policy, query, cli.status)?;
        if cli.json {
            println!(
                "{}",
                serde_json::json!({ "query": query, "documents": documents })
            );
            continue;
        }
        println!("Results for \"{query}\":");
        for page in &paginate(&documents, cli.page_size) {
            println!("{page}");
            println!("Page break");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
