//! CLI argument definitions

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lexsearch")]
#[command(
    author,
    version,
    about = "Semantic and hybrid search over judicial rulings"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage rulings
    Ruling(RulingArgs),

    /// Manage tags
    Tags(TagsArgs),

    /// Analyze a ruling with the extraction model
    Analyze(AnalyzeArgs),

    /// Analyze a ruling and regenerate its embedding
    Process(AnalyzeArgs),

    /// Generate embeddings
    Embed(EmbedArgs),

    /// Semantic search (vector ranking with optional exact filters)
    Search(SearchArgs),

    /// Hybrid search (tag/date filters plus vector ranking)
    Query(QueryArgs),

    /// Show store status
    Status,
}

#[derive(Args)]
pub struct RulingArgs {
    #[command(subcommand)]
    pub action: RulingAction,
}

#[derive(Subcommand)]
pub enum RulingAction {
    /// Add a new ruling
    Add {
        /// Case caption
        caption: String,
        /// Decision date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        court: Option<String>,
        /// Case/docket number
        #[arg(long)]
        docket: Option<String>,
        #[arg(long)]
        subject_matter: Option<String>,
        #[arg(long)]
        process_type: Option<String>,
        #[arg(long)]
        judge: Option<String>,
        /// Read the full text from a file
        #[arg(long)]
        text_file: Option<PathBuf>,
        /// Source URL
        #[arg(long)]
        url: Option<String>,
    },
    /// Show a ruling with its tags
    Show { id: i64 },
    /// List rulings
    List {
        #[arg(long, default_value = "20")]
        limit: usize,
        #[arg(long, default_value = "0")]
        offset: usize,
        #[arg(long)]
        subject_matter: Option<String>,
    },
    /// Remove a ruling
    #[command(alias = "rm")]
    Remove { id: i64 },
}

#[derive(Args)]
pub struct TagsArgs {
    #[command(subcommand)]
    pub action: TagsAction,
}

#[derive(Subcommand)]
pub enum TagsAction {
    /// List tags
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// List distinct tag categories
    Categories,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Ruling id
    pub id: i64,
}

#[derive(Args)]
pub struct EmbedArgs {
    /// Embed a single ruling
    pub id: Option<i64>,

    /// Embed every ruling without a stored embedding
    #[arg(long, conflicts_with = "id")]
    pub missing: bool,

    /// Re-embed every ruling
    #[arg(long, conflicts_with_all = ["id", "missing"])]
    pub all: bool,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search query
    pub query: Vec<String>,

    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    #[arg(long)]
    pub subject_matter: Option<String>,

    #[arg(long)]
    pub process_type: Option<String>,
}

#[derive(Args)]
pub struct QueryArgs {
    /// Search query
    pub query: Vec<String>,

    #[arg(short, long, default_value = "10")]
    pub limit: usize,

    /// Restrict to rulings carrying any of these tags (repeatable)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    #[arg(long)]
    pub subject_matter: Option<String>,

    #[arg(long)]
    pub process_type: Option<String>,

    /// Decision date lower bound (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Decision date upper bound (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output
    Cli,
    /// JSON lines
    Json,
}
