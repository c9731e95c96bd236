use std::{
    fs::File,
    io::{self, BufReader, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use outfit_api::{
    cli::{write_outfits, Questionnaire},
    models::{Catalog, FormattedOutfit, UserPreferences},
    services::{normalizer, Recommender},
    Config,
};

/// Outfit recommendations from a tagged wardrobe catalog
#[derive(Parser, Debug)]
#[command(name = "outfit", version, about)]
struct Cli {
    /// CSV catalog to load instead of DATASET_PATH
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recommend outfits for a question, a tag list or a preferences file
    Recommend(RecommendArgs),
    /// Answer the questionnaire interactively, then recommend
    Questionnaire {
        /// Number of outfits
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["query", "tags", "preferences"]),
))]
struct RecommendArgs {
    /// Free-text question, e.g. "What should I wear to a summer wedding?"
    #[arg(short, long)]
    query: Option<String>,

    /// Comma-separated tags
    #[arg(short, long, value_delimiter = ',')]
    tags: Option<Vec<String>>,

    /// JSON file with questionnaire preferences
    #[arg(short, long)]
    preferences: Option<PathBuf>,

    /// Number of outfits
    #[arg(short = 'n', long)]
    count: Option<usize>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(dataset) = cli.dataset {
        config.dataset_path = dataset;
    }

    let catalog = Catalog::load(&config.dataset_path)
        .with_context(|| format!("loading {}", config.dataset_path.display()))?;
    let recommender = Recommender::new(catalog).with_max_outfits(config.max_outfits);

    match cli.command {
        Command::Recommend(args) => {
            let count = args.count.unwrap_or(config.default_count);
            recommend(&recommender, args, count)
        }
        Command::Questionnaire { count } => {
            let count = count.unwrap_or(config.default_count);
            questionnaire(&recommender, count)
        }
    }
}

fn recommend(recommender: &Recommender, args: RecommendArgs, count: usize) -> anyhow::Result<()> {
    let (source, tags, outfits) = if let Some(query) = args.query {
        let tags = recommender.extract_tags(&query);
        let outfits = recommender.recommend_from_tags(&tags, count);
        (format!("Query: {query}"), tags, outfits)
    } else if let Some(tags) = args.tags {
        let tags: Vec<String> = tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        let outfits = recommender.recommend_from_tags(&tags, count);
        (format!("Tags: {}", tags.join(", ")), tags, outfits)
    } else if let Some(path) = args.preferences {
        let prefs = read_preferences(&path)?;
        let (tags, outfits) = recommender.recommend_from_preferences(&prefs, count);
        (format!("Preferences file: {}", path.display()), tags, outfits)
    } else {
        anyhow::bail!("one of --query, --tags or --preferences is required");
    };

    let formatted = recommender.format(&outfits);
    let mut stdout = io::stdout().lock();
    match args.output {
        OutputFormat::Json => {
            let body = json!({
                "source": source,
                "tags": tags,
                "outfits": formatted,
            });
            serde_json::to_writer_pretty(&mut stdout, &body)?;
            writeln!(stdout)?;
        }
        OutputFormat::Text => print_report(&mut stdout, &source, &formatted)?,
    }
    Ok(())
}

fn questionnaire(recommender: &Recommender, count: usize) -> anyhow::Result<()> {
    let stdin = io::stdin().lock();
    let prefs = Questionnaire::new(stdin, io::stdout()).run()?;

    let tags = normalizer::questionnaire_tags(&prefs);
    if tags.is_empty() {
        println!("\nNo preferences given, nothing to recommend.");
        return Ok(());
    }

    let outfits = recommender.recommend_from_tags(&tags, count);
    let formatted = recommender.format(&outfits);
    let source = format!("Questionnaire: {}", tags.join(", "));
    print_report(&mut io::stdout().lock(), &source, &formatted)?;
    Ok(())
}

fn read_preferences(path: &Path) -> anyhow::Result<UserPreferences> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let prefs: UserPreferences = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    prefs.validate()?;
    Ok(prefs)
}

fn print_report<W: Write>(
    out: &mut W,
    source: &str,
    outfits: &[FormattedOutfit],
) -> anyhow::Result<()> {
    writeln!(out, "\nOutfit recommendations based on {source}\n")?;
    if outfits.is_empty() {
        writeln!(out, "No complete outfits found. Try broader tags.")?;
        return Ok(());
    }
    write_outfits(out, outfits)?;
    Ok(())
}
