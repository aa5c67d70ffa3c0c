use clap::Parser;
use serde::{Deserialize, Serialize};
use shiftdiff::io::{load_rgb_image, save_rgb_image};
use shiftdiff::{
    Comparator, CompareConfig, CompareStats, Comparison, MismatchImages, Outcome, PixelTotal, Rgb,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "ShiftDiff CLI (JSON config driven)")]
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
    /// Enable tracing output for the comparison passes.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum PixelTotalConfig {
    WidthSquared,
    WidthHeight,
}

impl From<PixelTotalConfig> for PixelTotal {
    fn from(value: PixelTotalConfig) -> Self {
        match value {
            PixelTotalConfig::WidthSquared => PixelTotal::WidthSquared,
            PixelTotalConfig::WidthHeight => PixelTotal::WidthHeight,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct CompareConfigJson {
    pixel_threshold: f32,
    max_usage_per_pixel: u32,
    max_search_distance: usize,
    max_box_width: usize,
    max_box_height: usize,
    percent_allowed_different: f32,
    outline_color: [u8; 3],
    pixel_total: PixelTotalConfig,
    parallel: bool,
}

impl Default for CompareConfigJson {
    fn default() -> Self {
        let cfg = CompareConfig::default();
        Self {
            pixel_threshold: cfg.pixel_threshold,
            max_usage_per_pixel: cfg.max_usage_per_pixel,
            max_search_distance: cfg.max_search_distance,
            max_box_width: cfg.max_box_width,
            max_box_height: cfg.max_box_height,
            percent_allowed_different: cfg.percent_allowed_different,
            outline_color: cfg.outline_color.into(),
            pixel_total: PixelTotalConfig::WidthSquared,
            parallel: cfg.parallel,
        }
    }
}

impl From<CompareConfigJson> for CompareConfig {
    fn from(value: CompareConfigJson) -> Self {
        Self {
            pixel_threshold: value.pixel_threshold,
            max_usage_per_pixel: value.max_usage_per_pixel,
            max_search_distance: value.max_search_distance,
            max_box_width: value.max_box_width,
            max_box_height: value.max_box_height,
            percent_allowed_different: value.percent_allowed_different,
            outline_color: Rgb::from(value.outline_color),
            pixel_total: value.pixel_total.into(),
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    baseline_path: String,
    candidate_path: String,
    output_dir: Option<String>,
    report_path: Option<String>,
    compare: CompareConfigJson,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum OutcomeRecord {
    SizeMismatch,
    Match,
    Mismatch,
}

#[derive(Debug, Serialize)]
struct StatsRecord {
    forward_failed: usize,
    backward_failed: usize,
    forward_boxes: usize,
    backward_boxes: usize,
    total_units: u64,
    failure_ratio: f32,
}

impl From<CompareStats> for StatsRecord {
    fn from(value: CompareStats) -> Self {
        Self {
            forward_failed: value.forward_failed,
            backward_failed: value.backward_failed,
            forward_boxes: value.forward_boxes,
            backward_boxes: value.backward_boxes,
            total_units: value.total_units,
            failure_ratio: value.failure_ratio,
        }
    }
}

#[derive(Debug, Serialize)]
struct Report {
    outcome: OutcomeRecord,
    stats: Option<StatsRecord>,
    images: Vec<String>,
}

fn write_images(
    images: &MismatchImages,
    dir: &Path,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;
    let outputs = [
        ("comparison-forward.png", &images.forward_comparison),
        ("comparison-backward.png", &images.backward_comparison),
        ("diff-forward.png", &images.forward_diff),
        ("diff-backward.png", &images.backward_diff),
    ];
    let mut written = Vec::with_capacity(outputs.len());
    for (name, img) in outputs {
        let path = dir.join(name);
        save_rgb_image(img, &path)?;
        tracing::info!(path = %path.display(), "wrote result image");
        written.push(path.display().to_string());
    }
    Ok(written)
}

fn build_report(
    comparison: Comparison,
    output_dir: Option<&str>,
) -> Result<Report, Box<dyn std::error::Error>> {
    let stats = comparison.stats.map(StatsRecord::from);
    let report = match comparison.outcome {
        Outcome::SizeMismatch => Report {
            outcome: OutcomeRecord::SizeMismatch,
            stats,
            images: Vec::new(),
        },
        Outcome::Match => Report {
            outcome: OutcomeRecord::Match,
            stats,
            images: Vec::new(),
        },
        Outcome::Mismatch(images) => {
            let written = match output_dir {
                Some(dir) => write_images(&images, Path::new(dir))?,
                None => Vec::new(),
            };
            Report {
                outcome: OutcomeRecord::Mismatch,
                stats,
                images: written,
            }
        }
    };
    Ok(report)
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("shiftdiff=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(ExitCode::SUCCESS);
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(ExitCode::SUCCESS);
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.baseline_path.is_empty() || config.candidate_path.is_empty() {
        return Err("baseline_path and candidate_path must be set in the config".into());
    }

    let baseline = load_rgb_image(&config.baseline_path)?;
    let candidate = load_rgb_image(&config.candidate_path)?;

    let comparator = Comparator::new(config.compare.into())?;
    let comparison = comparator.compare_detailed(baseline.view(), candidate.view())?;
    let matched = comparison.outcome.is_match();

    let report = build_report(comparison, config.output_dir.as_deref())?;
    let json = serde_json::to_string_pretty(&report)?;

    match config.report_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(if matched {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
