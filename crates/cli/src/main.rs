use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::DEFAULT_DELIMITER;
use enrichment::config::DEFAULT_MAX_CONCURRENCY;
use enrichment::{
    EndState, EnrichedFilm, EnrichmentConfig, EnrichmentOrchestrator, EnrichmentReport,
    RatingRule,
};
use pipeline::filters::TOP_RATING;
use pipeline::{ScorePair, score_with_breakdown};
use sources::scraper::DEFAULT_SCRAPE_BASE_URL;
use sources::tmdb::{DEFAULT_IMAGE_BASE_URL, DEFAULT_TMDB_BASE_URL};
use sources::{
    HttpScraper, LookupConfig, MetadataLookup, ScrapeConfig, SignalScraper, TmdbClient,
    select_match,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// film-map - place your favourite films on a complexity × intent map
#[derive(Parser)]
#[command(name = "film-map")]
#[command(about = "Enrich a film diary export with metadata and map scores", long_about = None)]
struct Cli {
    /// Bearer token for the metadata service
    #[arg(long, env = "TMDB_API_TOKEN", hide_env_values = true, global = true)]
    tmdb_token: Option<String>,

    /// Base URL of the metadata service
    #[arg(long, env = "TMDB_BASE_URL", default_value = DEFAULT_TMDB_BASE_URL, global = true)]
    tmdb_base_url: String,

    /// Prefix for poster paths
    #[arg(long, env = "TMDB_IMAGE_BASE_URL", default_value = DEFAULT_IMAGE_BASE_URL, global = true)]
    image_base_url: String,

    /// Base URL of the free-text document source
    #[arg(long, env = "SCRAPE_BASE_URL", default_value = DEFAULT_SCRAPE_BASE_URL, global = true)]
    scrape_base_url: String,

    /// Timeout for a single HTTP request, in seconds
    #[arg(long, default_value = "15", global = true)]
    http_timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich every eligible film in a CSV export
    Enrich {
        /// Path to the CSV file (needs Name, Year and Rating columns)
        csv: PathBuf,

        /// Print the enriched films as a JSON array instead of a list
        #[arg(long)]
        json: bool,

        /// Only enrich rows whose rating equals this value
        #[arg(long, default_value = TOP_RATING)]
        rating: String,

        /// Only enrich rows rated at least this much (overrides --rating)
        #[arg(long)]
        min_rating: Option<f32>,

        /// Column delimiter
        #[arg(long, default_value_t = DEFAULT_DELIMITER)]
        delimiter: char,

        /// Maximum number of films enriched at once
        #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
        concurrency: usize,

        /// Time budget per film, in seconds
        #[arg(long, default_value = "20")]
        timeout_secs: u64,
    },

    /// Look up, scrape and score a single film, showing each step
    Score {
        /// Film title
        #[arg(long)]
        title: String,

        /// Release year, narrows the search
        #[arg(long)]
        year: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (lookup, scraper) = build_clients(&cli)?;

    match cli.command {
        Commands::Enrich {
            csv,
            json,
            rating,
            min_rating,
            delimiter,
            concurrency,
            timeout_secs,
        } => {
            let rating_rule = match min_rating {
                Some(min) => RatingRule::AtLeast(min),
                None => RatingRule::Exact(rating),
            };
            let config = EnrichmentConfig::default()
                .with_rating_rule(rating_rule)
                .with_delimiter(delimiter)
                .with_max_concurrency(concurrency)
                .with_unit_timeout(Duration::from_secs(timeout_secs));
            let orchestrator =
                EnrichmentOrchestrator::new(Arc::new(lookup), Arc::new(scraper), config);
            handle_enrich(&orchestrator, &csv, json).await?
        }
        Commands::Score { title, year } => {
            handle_score(&lookup, &scraper, &title, year.as_deref()).await?
        }
    }

    Ok(())
}

fn build_clients(cli: &Cli) -> Result<(TmdbClient, HttpScraper)> {
    let http_timeout = Duration::from_secs(cli.http_timeout_secs);

    let mut lookup_config = LookupConfig::default()
        .with_base_url(&cli.tmdb_base_url)
        .with_image_base_url(&cli.image_base_url)
        .with_timeout(http_timeout);
    if let Some(token) = &cli.tmdb_token {
        lookup_config = lookup_config.with_api_token(token);
    }
    let lookup = TmdbClient::new(lookup_config).context("Failed to build metadata client")?;

    let scraper = HttpScraper::new(
        ScrapeConfig::default()
            .with_base_url(&cli.scrape_base_url)
            .with_timeout(http_timeout),
    )
    .context("Failed to build scraper")?;

    Ok((lookup, scraper))
}

/// Handle the 'enrich' command
async fn handle_enrich(orchestrator: &EnrichmentOrchestrator, csv: &Path, json: bool) -> Result<()> {
    info!(path = %csv.display(), "Reading upload");
    let text = std::fs::read_to_string(csv)
        .with_context(|| format!("Failed to read {}", csv.display()))?;

    let start = Instant::now();
    let report = orchestrator
        .run_csv(&text)
        .await
        .with_context(|| format!("Failed to enrich {}", csv.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report.films)?);
    } else {
        print_report(&report, orchestrator.config());
        println!(
            "{} Enriched {} films in {:.2?}",
            "✓".green(),
            report.films.len(),
            start.elapsed()
        );
    }
    Ok(())
}

/// Handle the 'score' command
async fn handle_score(
    lookup: &TmdbClient,
    scraper: &HttpScraper,
    title: &str,
    year: Option<&str>,
) -> Result<()> {
    let (candidates, signal) = tokio::join!(lookup.search(title, year), scraper.scrape(title));
    let candidates = candidates.context("Metadata lookup failed")?;

    println!("{}", format!("Scoring '{}':", title).bold().blue());
    println!("{}Search returned {} candidates", "• ".cyan(), candidates.len());

    let selected = select_match(&candidates, title, year);
    match selected {
        Some((candidate, tier)) => {
            println!(
                "{}Selected: {} ({}) via {:?}",
                "• ".green(),
                candidate.title,
                candidate.release_date,
                tier
            );
            println!("{}Genres: {}", "• ".green(), candidate.genres.join(", "));
            if let Some(vote_average) = candidate.vote_average {
                println!("{}Vote average: {:.1}", "• ".green(), vote_average);
            }
        }
        None => println!("{}No candidate selected", "• ".yellow()),
    }

    let join = |words: &std::collections::BTreeSet<String>| {
        words.iter().cloned().collect::<Vec<_>>().join(", ")
    };
    println!(
        "{}Complexity keywords: [{}]",
        "• ".cyan(),
        join(&signal.complexity_keywords_found)
    );
    println!(
        "{}Reception keywords: [{}]",
        "• ".cyan(),
        join(&signal.reception_keywords_found)
    );

    let breakdown = score_with_breakdown(selected.map(|(c, _)| c), &signal);
    println!("  metadata {}", format_pair(breakdown.metadata));
    println!("  signal   {}", format_pair(breakdown.signal));
    println!("  score    {}", format_pair(breakdown.blended).bold());
    Ok(())
}

fn format_pair(pair: ScorePair) -> String {
    format!("x={:.2} y={:.2}", pair.x, pair.y)
}

/// Helper function to format and print an enrichment report
fn print_report(report: &EnrichmentReport, config: &EnrichmentConfig) {
    match report.end_state {
        EndState::NoEligibleFilms => {
            let rule = match &config.rating_rule {
                RatingRule::Exact(value) => format!("rated {}", value),
                RatingRule::AtLeast(min) => format!("rated at least {}", min),
            };
            println!(
                "{}",
                format!("No films {} among {} rows", rule, report.stats.total_rows).yellow()
            );
            return;
        }
        EndState::AllLookupsFailed => println!(
            "{}",
            "Every metadata lookup failed; scores below use keyword signals only".yellow()
        ),
        EndState::Completed => {}
    }

    println!("{}", "Film Map:".bold().blue());
    for (index, film) in report.films.iter().enumerate() {
        print_film(index + 1, film);
    }
    println!(
        "{} matched, {} lookup failures ({} timed out), {} ragged rows skipped",
        report.stats.matched,
        report.stats.lookup_failures,
        report.stats.timed_out,
        report.stats.ragged_rows
    );
}

fn print_film(rank: usize, film: &EnrichedFilm) {
    let genres = film
        .genres
        .as_ref()
        .map(|g| g.join(", "))
        .unwrap_or_default();
    println!(
        "{}. {} ({}) [{}] - {}",
        rank.to_string().green(),
        film.name,
        film.year,
        genres,
        format_pair(film.score)
    );
    if let Some(kind) = film.lookup_error {
        println!("   {}", format!("lookup {:?}", kind).red());
    } else if !film.matched {
        println!("   {}", "no match found".yellow());
    }
}
