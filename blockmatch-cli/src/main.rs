use blockmatch::io::{load_gray8, load_rgb24};
use blockmatch::{BlockMatcher, ClipRule, MatchConfig, MatchOutcome, OutputMode, Point};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Block matching CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum FormatConfig {
    #[default]
    Gray8,
    Rgb24,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ClipRuleConfig {
    #[default]
    Bounded,
    Legacy,
}

impl From<ClipRuleConfig> for ClipRule {
    fn from(value: ClipRuleConfig) -> Self {
        match value {
            ClipRuleConfig::Bounded => ClipRule::Bounded,
            ClipRuleConfig::Legacy => ClipRule::Legacy,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MatchConfigJson {
    block_size: usize,
    search_radius: usize,
    clip_rule: ClipRuleConfig,
    parallel: bool,
}

impl Default for MatchConfigJson {
    fn default() -> Self {
        let cfg = MatchConfig::default();
        Self {
            block_size: cfg.block_size,
            search_radius: cfg.search_radius,
            clip_rule: ClipRuleConfig::Bounded,
            parallel: cfg.parallel,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    source_path: String,
    search_path: String,
    output_path: Option<String>,
    format: FormatConfig,
    relative: bool,
    points: Vec<(i32, i32)>,
    #[serde(rename = "match")]
    match_cfg: MatchConfigJson,
}

#[derive(Debug, Serialize)]
struct PointRecord {
    x: i32,
    y: i32,
    /// Absolute center or displacement; `None` for skipped points.
    result: Option<(i32, i32)>,
    /// Sum of squared differences of the chosen block.
    error: Option<u64>,
}

#[derive(Debug, Serialize)]
struct Output {
    relative: bool,
    matched: usize,
    skipped: usize,
    /// Points whose whole window was clipped; their result is the seed.
    unsearched: usize,
    points: Vec<PointRecord>,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    matched: usize,
    skipped: usize,
    unsearched: usize,
}

impl Summary {
    fn from_outcomes(outcomes: &[MatchOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome {
                MatchOutcome::Found { .. } => summary.matched += 1,
                MatchOutcome::Skipped => summary.skipped += 1,
                MatchOutcome::Unsearched => summary.unsearched += 1,
            }
        }
        summary
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("blockmatch=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.source_path.is_empty() || config.search_path.is_empty() {
        return Err("source_path and search_path must be set in the config".into());
    }

    let (source, search) = match config.format {
        FormatConfig::Gray8 => (
            load_gray8(&config.source_path)?,
            load_gray8(&config.search_path)?,
        ),
        FormatConfig::Rgb24 => (
            load_rgb24(&config.source_path)?,
            load_rgb24(&config.search_path)?,
        ),
    };

    let matcher = BlockMatcher::new().with_config(MatchConfig {
        block_size: config.match_cfg.block_size,
        search_radius: config.match_cfg.search_radius,
        clip_rule: config.match_cfg.clip_rule.into(),
        parallel: config.match_cfg.parallel,
    });

    let points: Vec<Point> = config.points.iter().copied().map(Point::from).collect();
    tracing::info!(
        width = source.width(),
        height = source.height(),
        points = points.len(),
        "buffers loaded"
    );
    let outcomes = matcher.match_outcomes(source.view(), &points, search.view())?;
    let mode = OutputMode::from_relative_flag(config.relative);

    let records: Vec<PointRecord> = points
        .iter()
        .zip(&outcomes)
        .map(|(&reference, &outcome)| {
            let encoded = outcome.encode(reference, mode);
            PointRecord {
                x: reference.x,
                y: reference.y,
                result: (!encoded.is_sentinel()).then_some((encoded.x, encoded.y)),
                error: outcome.error(),
            }
        })
        .collect();
    let summary = Summary::from_outcomes(&outcomes);
    let output = Output {
        relative: config.relative,
        matched: summary.matched,
        skipped: summary.skipped,
        unsearched: summary.unsearched,
        points: records,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
