/*!
rankhue Command Line Interface

Loads a CSV series, assigns highlight and gradient colors, and prints the
assignment or a Vega-Lite bar chart.
*/

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rankhue::presets::REGION_EXTREMES;
use rankhue::reader::{
    discover_field, filter_eq, series_from_frame, series_from_row, sum_columns, CsvReader, Reader,
    TokenTally,
};
use rankhue::writer::{BarChart, VegaLiteWriter, Writer};
use rankhue::{
    assign_extremes, ColorAssignment, ColorFormat, DataFrame, HighlightMode, LabelMatcher,
    RankedGradient, RankhueConfig, Rgb, Series, VERSION,
};

#[derive(Parser)]
#[command(name = "rankhue")]
#[command(about = "Rank-based highlight and gradient colors for bar charts")]
#[command(version = VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assign colors to a series and print them
    Colorize {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        colors: ColorArgs,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        output: String,
    },

    /// Render a colored bar chart as Vega-Lite JSON
    Chart {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        colors: ColorArgs,

        /// Chart title
        #[arg(long)]
        title: Option<String>,

        /// Hide the value labels above bars
        #[arg(long)]
        no_values: bool,

        /// Keep bars in input order instead of sorting by value
        #[arg(long)]
        keep_order: bool,

        /// Output file path (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List columns, or find the one column whose name contains a substring
    Columns {
        /// CSV file to read
        file: PathBuf,

        /// Column delimiter
        #[arg(long, default_value = ",")]
        separator: char,

        /// Substring to look for in column names
        #[arg(long)]
        find: Option<String>,
    },

    /// Count delimited category tokens in a text column (max/min/other colors)
    Tally {
        /// CSV file to read
        file: PathBuf,

        /// Text column holding the category tokens
        #[arg(long)]
        column: String,

        /// Comma-separated category list (defaults to Busan districts)
        #[arg(long)]
        categories: Option<String>,

        /// Token delimiter inside a cell
        #[arg(long, default_value = ",")]
        delimiter: char,

        /// Column delimiter
        #[arg(long, default_value = ",")]
        separator: char,

        /// Text removed from every token before matching (repeatable)
        #[arg(long)]
        strip: Vec<String>,
    },
}

#[derive(Args)]
pub struct SourceArgs {
    /// CSV file to read
    #[arg(long)]
    file: PathBuf,

    /// Column delimiter
    #[arg(long, default_value = ",")]
    separator: char,

    /// Label column
    #[arg(long)]
    label: Option<String>,

    /// Use the single column whose name contains this text as label column
    #[arg(long, conflicts_with = "label")]
    label_like: Option<String>,

    /// Value column; join several with '+' to sum them per row
    #[arg(long)]
    value: Option<String>,

    /// Read one row of a wide table instead: KEY_COLUMN=KEY
    #[arg(long, conflicts_with_all = ["label", "label_like", "value"])]
    row: Option<String>,

    /// Keep only rows where COLUMN=VALUE (repeatable)
    #[arg(long = "filter")]
    filters: Vec<String>,

    /// Keep the N highest values
    #[arg(long)]
    top: Option<usize>,
}

#[derive(Args)]
pub struct ColorArgs {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Gradient preset (mbti, subway, blues)
    #[arg(long)]
    preset: Option<String>,

    /// Highlight color (any CSS color)
    #[arg(long)]
    highlight: Option<String>,

    /// Gradient start color
    #[arg(long)]
    start: Option<String>,

    /// Gradient end color
    #[arg(long)]
    end: Option<String>,

    /// Saturation cap in [0, 1]
    #[arg(long)]
    cap: Option<f64>,

    /// Highlight the first label matching exact:TEXT, contains:TEXT or regex:PATTERN
    #[arg(long = "match")]
    matcher: Option<String>,

    /// Color output format (hex, rgb)
    #[arg(long)]
    format: Option<String>,
}

fn ascii_separator(separator: char) -> anyhow::Result<u8> {
    if separator.is_ascii() {
        Ok(separator as u8)
    } else {
        bail!("Separator must be a single ASCII character, got '{}'", separator)
    }
}

fn split_pair(arg: &str) -> anyhow::Result<(&str, &str)> {
    arg.split_once('=')
        .ok_or_else(|| anyhow!("Expected COLUMN=VALUE, got '{}'", arg))
}

fn read_csv(file: &Path, separator: char) -> anyhow::Result<DataFrame> {
    let reader = CsvReader::new().with_separator(ascii_separator(separator)?);
    let source = file.to_string_lossy();
    Ok(reader.read(&source)?)
}

fn load_series(args: &SourceArgs) -> anyhow::Result<Series> {
    let mut df = read_csv(&args.file, args.separator)?;

    for filter in &args.filters {
        let (column, value) = split_pair(filter)?;
        df = filter_eq(&df, column, value)?;
    }

    let series = if let Some(row) = &args.row {
        let (key_column, key) = split_pair(row)?;
        series_from_row(&df, key_column, key)?
    } else {
        let label = match (&args.label, &args.label_like) {
            (Some(label), _) => label.clone(),
            (None, Some(needle)) => discover_field(&df, needle)?,
            (None, None) => bail!("Either --label, --label-like or --row is required"),
        };
        let value = args
            .value
            .as_deref()
            .context("--value is required unless --row is given")?;

        if value.contains('+') {
            let columns: Vec<&str> = value.split('+').map(str::trim).collect();
            df = sum_columns(&df, &columns, value)?;
        }
        series_from_frame(&df, &label, value)?
    };

    match args.top {
        Some(n) => Ok(series.top_n(n)?),
        None => Ok(series),
    }
}

fn resolve_colors(args: &ColorArgs) -> anyhow::Result<(RankedGradient, HighlightMode, ColorFormat)> {
    let mut config = match &args.config {
        Some(path) => RankhueConfig::from_file(path)?,
        None => RankhueConfig::default(),
    };

    let overrides = [
        (&mut config.gradient.preset, &args.preset),
        (&mut config.gradient.highlight, &args.highlight),
        (&mut config.gradient.start, &args.start),
        (&mut config.gradient.end, &args.end),
    ];
    for (slot, value) in overrides {
        if value.is_some() {
            *slot = value.clone();
        }
    }
    if args.cap.is_some() {
        config.gradient.saturation_cap = args.cap;
    }
    if let Some(format) = &args.format {
        config.output.format = format.parse()?;
    }

    let mode = match &args.matcher {
        Some(m) => HighlightMode::Predicate(m.parse::<LabelMatcher>()?),
        None => HighlightMode::Extremum,
    };

    Ok((config.gradient()?, mode, config.output.format))
}

fn colorize(source: &SourceArgs, colors: &ColorArgs) -> anyhow::Result<(ColorAssignment, ColorFormat)> {
    let series = load_series(source)?;
    let (gradient, mode, format) = resolve_colors(colors)?;
    info!(labels = series.len(), mode = %mode, "assigning colors");
    Ok((gradient.assign(&series, &mode)?, format))
}

fn print_assignment(colors: &ColorAssignment, format: ColorFormat, output: &str) -> anyhow::Result<()> {
    match output {
        "json" => {
            let rows: Vec<_> = colors
                .entries()
                .iter()
                .map(|e| {
                    json!({
                        "label": e.label,
                        "value": e.value,
                        "color": e.color.format(format),
                        "highlighted": e.highlighted,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        "table" => {
            for e in colors.entries() {
                let marker = if e.highlighted { "*" } else { "" };
                println!("{}\t{}\t{}{}", e.label, e.value, e.color.format(format), marker);
            }
        }
        other => bail!("Unknown output format '{}' (expected table or json)", other),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rankhue=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Colorize {
            source,
            colors,
            output,
        } => {
            let (assignment, format) = colorize(&source, &colors)?;
            print_assignment(&assignment, format, &output)?;
        }

        Commands::Chart {
            source,
            colors,
            title,
            no_values,
            keep_order,
            out,
        } => {
            let (assignment, format) = colorize(&source, &colors)?;
            let mut chart = BarChart::new(assignment)
                .with_format(format)
                .with_values(!no_values)
                .with_input_order(keep_order);
            if let Some(title) = title {
                chart = chart.with_title(title);
            }

            let json = VegaLiteWriter::new().write(&chart)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, &json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!(path = %path.display(), "Vega-Lite JSON written");
                }
                None => println!("{}", json),
            }
        }

        Commands::Columns {
            file,
            separator,
            find,
        } => {
            let df = read_csv(&file, separator)?;
            match find {
                Some(needle) => println!("{}", discover_field(&df, &needle)?),
                None => {
                    for name in df.get_column_names() {
                        println!("{}", name);
                    }
                }
            }
        }

        Commands::Tally {
            file,
            column,
            categories,
            delimiter,
            separator,
            strip,
        } => {
            let df = read_csv(&file, separator)?;
            let mut tally = match categories {
                Some(list) => TokenTally::new(list.split(',').map(|s| s.trim().to_string())),
                None => TokenTally::busan_districts(),
            }
            .with_delimiter(delimiter);
            for text in strip {
                tally = tally.with_strip(text);
            }

            let series = tally.tally_column(&df, &column)?.ranked();
            let colors = assign_extremes(
                &series,
                Rgb::parse(REGION_EXTREMES.max)?,
                Rgb::parse(REGION_EXTREMES.min)?,
                Rgb::parse(REGION_EXTREMES.other)?,
            );
            print_assignment(&colors, ColorFormat::Hex, "table")?;
        }
    }

    Ok(())
}
