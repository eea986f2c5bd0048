//! numera CLI - extract numbers, durations and dates from spoken-language text
//!
//! Usage:
//!   numera number "dos millones quinientos mil"
//!   numera duration "tardó una hora y diez minutos"
//!   numera datetime "mañana a las tres de la tarde" --now 2023-08-15T14:30:00
//!   numera tokens "a las 3:30"
//!
//! Results are printed as JSON on stdout; `null` when nothing is found.
//! Diagnostics go to stderr, filtered by `RUST_LOG`.

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use numera::{parse_reference, ExtractOptions, Extractor, NumberMode, Segment};

#[derive(Parser, Debug)]
#[command(name = "numera")]
#[command(about = "Extract numbers, durations and dates from spoken-language text")]
#[command(version)]
struct Cli {
    /// Locale of the input text
    #[arg(long, short = 'l', global = true, default_value = "es")]
    locale: String,

    /// Log extraction details to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract a number
    Number {
        /// Text to search
        text: String,

        /// How ordinal-looking words are read
        #[arg(long, value_enum, default_value_t = ModeArg::PreferFraction)]
        mode: ModeArg,

        /// Split the whole text into text and numbers
        #[arg(long)]
        all: bool,
    },
    /// Extract a duration
    Duration {
        /// Text to search
        text: String,

        /// Split the whole text into text and durations
        #[arg(long)]
        all: bool,
    },
    /// Extract a date and/or time
    Datetime {
        /// Text to search
        text: String,

        /// Reference instant, local time (e.g. 2023-08-15T14:30:00). Defaults to
        /// the current time in --timezone
        #[arg(long)]
        now: Option<String>,

        /// IANA timezone for the default reference instant
        #[arg(long, default_value = "UTC")]
        timezone: String,

        /// Split the whole text into text and dates/times
        #[arg(long)]
        all: bool,
    },
    /// Print the categorized tokens
    Tokens {
        /// Text to tokenize
        text: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    PreferOrdinal,
    PreferFraction,
    NoOrdinal,
}

impl From<ModeArg> for NumberMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::PreferOrdinal => NumberMode::PreferOrdinal,
            ModeArg::PreferFraction => NumberMode::PreferFraction,
            ModeArg::NoOrdinal => NumberMode::NoOrdinal,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let extractor = Extractor::for_locale(&cli.locale)
        .with_context(|| format!("cannot load locale '{}'", cli.locale))?;

    let output = match cli.command {
        Commands::Number { text, mode, all } => {
            let options = ExtractOptions { mode: mode.into() };
            if all {
                serde_json::to_value(extractor.extract_numerals(&text, &options))?
            } else {
                serde_json::to_value(extractor.extract_numeral(&text, &options))?
            }
        }
        Commands::Duration { text, all } => {
            if all {
                serde_json::to_value(extractor.extract_durations(&text))?
            } else {
                match extractor.extract_duration(&text) {
                    Some(duration) => json!({
                        "duration": duration,
                        "text": duration.to_string(),
                    }),
                    None => Value::Null,
                }
            }
        }
        Commands::Datetime {
            text,
            now,
            timezone,
            all,
        } => {
            let reference = reference_instant(now.as_deref(), &timezone)?;
            if all {
                let segments = extractor.extract_date_times(&text, reference);
                serde_json::to_value(
                    segments
                        .into_iter()
                        .map(|segment| match segment {
                            Segment::Entity {
                                value,
                                text,
                                start,
                                end,
                            } => json!({
                                "type": "entity",
                                "value": value,
                                "resolved": value.resolve(reference),
                                "text": text,
                                "start": start,
                                "end": end,
                            }),
                            Segment::Text { text } => json!({ "type": "text", "text": text }),
                        })
                        .collect::<Vec<_>>(),
                )?
            } else {
                match extractor.extract_date_time(&text, reference) {
                    Some(result) => json!({
                        "result": result,
                        "resolved": result.resolve(reference),
                    }),
                    None => Value::Null,
                }
            }
        }
        Commands::Tokens { text } => serde_json::to_value(extractor.tokenize(&text))?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn reference_instant(now: Option<&str>, timezone: &str) -> Result<NaiveDateTime> {
    if let Some(now) = now {
        return parse_reference(now).context("invalid --now");
    }
    let tz: Tz = timezone
        .parse()
        .map_err(|e| anyhow!("invalid timezone '{timezone}': {e}"))?;
    Ok(Utc::now().with_timezone(&tz).naive_local())
}
