use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use species_planted::config::PRESETS;
use species_planted::{CityConfig, RunOptions, stats, storage};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "species-planted",
    version,
    about = "Chart historical tree planting by species with annotated milestones"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a city's chart (and optionally show it, print stats, export the data).
    Render(RenderArgs),
    /// List built-in city presets.
    Presets,
    /// Print a preset as JSON, a starting point for --config.
    Config {
        /// Preset name (e.g., calgary)
        city: String,
    },
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Built-in preset (calgary, winnipeg). Ignored when --config is given.
    city: Option<String>,
    /// JSON city configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Input spreadsheet (.xlsx/.xls/.ods/.csv). Defaults to the config's input.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Output image (.png or .svg). Defaults to the config's output.
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Output resolution in dots per inch (default from config, 450 for presets).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    dpi: Option<u32>,
    /// Locale for tick labels (en, de, fr, ...).
    #[arg(long)]
    locale: Option<String>,
    /// TrueType font for chart text (default: $SPECIES_PLANTED_FONT or a system font).
    #[arg(long)]
    font: Option<PathBuf>,
    /// Do not open a window with the chart after saving.
    #[arg(long, default_value_t = false)]
    no_show: bool,
    /// Print per-species statistics and per-year totals for the charted years to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
    /// Save the filtered table (format from extension: .csv or .json).
    #[arg(long)]
    export: Option<PathBuf>,
}

fn fmt_share(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{:.1}%", x * 100.0),
        _ => "NA".to_string(),
    }
}

fn fmt_year(v: Option<i32>) -> String {
    v.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Presets => {
            for name in PRESETS {
                println!("{name}");
            }
            Ok(())
        }
        Command::Config { city } => {
            let cfg = preset(&city)?;
            println!("{}", cfg.to_json_pretty()?);
            Ok(())
        }
    }
}

fn preset(name: &str) -> Result<CityConfig> {
    CityConfig::preset(name).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown city {name:?}; expected one of: {}",
            PRESETS.join(", ")
        )
    })
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let cfg = match (&args.config, &args.city) {
        (Some(path), _) => CityConfig::from_json_file(path)?,
        (None, Some(city)) => preset(city)?,
        (None, None) => anyhow::bail!("give a city preset or --config <file.json>"),
    };

    let opts = RunOptions {
        input: args.input,
        output: args.out,
        dpi: args.dpi,
        locale: args.locale,
        font: args.font,
        show: !args.no_show,
    };
    let report = species_planted::run(&cfg, &opts)?;
    eprintln!("Wrote chart to {}", report.output.display());

    let table = &report.scene.table;
    if let Some(path) = args.export.as_ref() {
        let fmt = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv")
            .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(table, path)?,
            "json" => storage::save_json(table, path)?,
            other => anyhow::bail!("unsupported export format: {}", other),
        }
        eprintln!("Saved {} rows to {}", table.len(), path.display());
    }

    if args.stats {
        let names = cfg.species.names();
        for s in stats::species_summary(table, &names) {
            println!(
                "{}  total={} years={} first={} peak={} ({}) share={}",
                s.species,
                s.total,
                s.years_planted,
                fmt_year(s.first_year),
                fmt_year(s.peak_year),
                s.peak_count,
                fmt_share(s.share)
            );
        }
        for (row, (year, total)) in table.rows.iter().zip(stats::yearly_totals(table, &names)) {
            let shares: Vec<String> = names
                .iter()
                .filter(|n| row.count(n) > 0)
                .map(|n| format!("{n}={}", fmt_share(stats::share_in_year(row, n, &names))))
                .collect();
            println!("{year}  total={total}  {}", shares.join(" "));
        }
    }

    Ok(())
}
