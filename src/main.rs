//! Sextant CLI
//!
//! Command-line interface for index pattern resolution:
//! - Resolve configured or ad-hoc patterns to concrete indices
//! - List configured patterns
//! - Generate a default config file

use anyhow::{bail, Context};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use futures_util::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;

use sextant::backend::ElasticsearchClient;
use sextant::config::{generate_default_config, Config, LoggingConfig};
use sextant::pattern::{Field, IndexPattern};
use sextant::resolve::{IndexList, Resolver, SortOrder, TimeBound};

#[derive(Parser)]
#[command(name = "sextant")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve index patterns to the indices a time-bounded search must query")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Search backend URL, overriding the config
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Log resolution details at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve patterns to index lists
    Resolve {
        /// Ids of configured patterns
        ids: Vec<String>,
        /// Ad-hoc pattern id (literal, wildcard or rollover template)
        #[arg(short, long)]
        pattern: Option<String>,
        /// Time field of the ad-hoc pattern
        #[arg(short, long)]
        time_field: Option<String>,
        /// Rollover interval of the ad-hoc pattern (hours, days, weeks, months, years)
        #[arg(short, long)]
        interval: Option<String>,
        /// Range start. Supports: "now", ISO 8601, epoch millis
        #[arg(long)]
        start: Option<String>,
        /// Range stop. Supports: "now", ISO 8601, epoch millis
        #[arg(long)]
        stop: Option<String>,
        /// Shorthand for a start relative to now (e.g., 12h, 7d, 4w)
        #[arg(short, long, conflicts_with = "start")]
        last: Option<String>,
        /// Sort order (asc, desc)
        #[arg(short, long)]
        sort: Option<String>,
    },

    /// List configured patterns
    Patterns,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.backend_url {
        config.backend.url = url.clone();
    }

    // Results on stdout, logs on stderr
    cli_logging(&config.logging, cli.verbose).init_stderr();

    match cli.command {
        Commands::Resolve {
            ids,
            pattern,
            time_field,
            interval,
            start,
            stop,
            last,
            sort,
        } => {
            let mut patterns = Vec::new();
            for id in &ids {
                let configured = config
                    .pattern(id)
                    .with_context(|| format!("No configured pattern '{}'", id))?;
                patterns.push(configured.clone());
            }
            if let Some(id) = pattern {
                patterns.push(ad_hoc_pattern(id, time_field, interval));
            }
            if patterns.is_empty() {
                bail!("Nothing to resolve: pass configured pattern ids or --pattern");
            }

            let now = Utc::now();
            let start = match (start, last) {
                (Some(s), _) => Some(parse_time_bound(&s, now)?),
                (None, Some(l)) => Some(TimeBound::instant(now - parse_duration(&l)?)),
                (None, None) => None,
            };
            let stop = stop.map(|s| parse_time_bound(&s, now)).transpose()?;
            let sort_order = sort
                .map(|s| s.parse::<SortOrder>())
                .transpose()
                .map_err(anyhow::Error::msg)?;

            let client = Arc::new(ElasticsearchClient::new(config.backend.client_config())?);
            let resolver =
                Resolver::with_client(client).max_indices(config.resolve.max_indices);

            let results = join_all(patterns.iter().map(|p| {
                resolver.to_index_list(p, start.as_ref(), stop.as_ref(), sort_order)
            }))
            .await;

            let mut resolved = Vec::with_capacity(patterns.len());
            for (p, result) in patterns.iter().zip(results) {
                let indices =
                    result.with_context(|| format!("Failed to resolve pattern '{}'", p.id))?;
                resolved.push((p, resolver.strategy(p).as_str(), indices));
            }

            match cli.format.as_str() {
                "json" => {
                    let out: Vec<serde_json::Value> = resolved
                        .iter()
                        .map(|(p, strategy, indices)| {
                            serde_json::json!({
                                "pattern": p.id,
                                "strategy": strategy,
                                "indices": indices,
                            })
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                _ => print_resolved(&resolved),
            }
        }

        Commands::Patterns => {
            if config.patterns.is_empty() {
                println!("No patterns configured.");
                println!();
                println!("Generate a config file with:");
                println!("  sextant config -o config.toml");
                return Ok(());
            }

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&config.patterns)?),
                _ => {
                    println!("{:<32} {:<16} {:<10} {}", "Pattern", "Time Field", "Interval", "Fields");
                    println!("{}", "-".repeat(70));
                    for p in &config.patterns {
                        println!(
                            "{:<32} {:<16} {:<10} {}",
                            p.id,
                            p.time_field_name.as_deref().unwrap_or("-"),
                            p.get_interval().unwrap_or("-"),
                            p.fields.len()
                        );
                    }
                }
            }
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

/// Configured logging, raised to debug by `--verbose`
fn cli_logging(logging: &LoggingConfig, verbose: bool) -> LoggingConfig {
    let mut logging = logging.clone();
    if verbose {
        logging.level = "debug".to_string();
    }
    logging
}

/// Pattern built from command-line flags
///
/// The time field is added as a date field so a wildcard id qualifies for
/// field-stats resolution.
fn ad_hoc_pattern(
    id: String,
    time_field: Option<String>,
    interval: Option<String>,
) -> IndexPattern {
    let mut pattern = IndexPattern::new(id);
    if let Some(field) = time_field {
        pattern = pattern
            .fields(vec![Field::new(field.as_str(), "date")])
            .time_field(field);
    }
    if let Some(interval) = interval {
        pattern = pattern.interval(interval);
    }
    pattern
}

fn parse_time_bound(s: &str, now: DateTime<Utc>) -> anyhow::Result<TimeBound> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("now") {
        return Ok(TimeBound::instant(now));
    }
    if let Ok(millis) = s.parse::<i64>() {
        return Ok(TimeBound::raw(millis));
    }
    let dt = DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("Invalid time bound: {}. Use: now, ISO 8601, epoch millis", s))?;
    Ok(TimeBound::instant(dt.with_timezone(&Utc)))
}

fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    let s = s.trim().to_lowercase();

    if let Some(hours) = s.strip_suffix('h') {
        Ok(Duration::hours(hours.parse()?))
    } else if let Some(days) = s.strip_suffix('d') {
        Ok(Duration::days(days.parse()?))
    } else if let Some(weeks) = s.strip_suffix('w') {
        Ok(Duration::weeks(weeks.parse()?))
    } else {
        bail!("Invalid duration format: {}. Use: 12h, 7d, 4w", s)
    }
}

fn print_resolved(resolved: &[(&IndexPattern, &str, IndexList)]) {
    println!("{:<32} {:<12} {}", "Pattern", "Strategy", "Indices");
    println!("{}", "-".repeat(70));
    for (pattern, strategy, indices) in resolved {
        let shown = match indices {
            IndexList::Many(names) if names.is_empty() => "(none)".to_string(),
            other => other.to_path(),
        };
        println!("{:<32} {:<12} {}", pattern.id, strategy, shown);
    }
}
