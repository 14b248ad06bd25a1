//! stampview CLI entry point.
//!
//! Renders a timestamp in every display form, reports how it was
//! classified, or copies one form to the system clipboard.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::sync::Arc;

use stampview::application::TimestampFormatter;
use stampview::domain::{DisplayPattern, DisplayZone, TimestampValue, classify};
use stampview::infra::app_config::{self, AppConfig};
use stampview::infra::clipboard::SystemClipboard;
use stampview::ui::tooltip::{CopyTarget, TimestampTooltip, TooltipAction};

#[derive(Parser, Debug)]
#[command(name = "stampview")]
#[command(version)]
#[command(about = "Classify and render micro-epoch and ISO-8601 timestamps", long_about = None)]
struct Args {
    /// strftime display pattern (overrides config)
    #[arg(short, long, global = true)]
    pattern: Option<String>,

    /// Zone for the local form: local, utc or +HH:MM (overrides config)
    #[arg(short, long, global = true)]
    zone: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the label and every tooltip row
    Render {
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Emit the rendered forms as JSON
        #[arg(long)]
        json: bool,

        /// Print a placeholder instead of failing on unparseable input
        #[arg(long)]
        lenient: bool,
    },

    /// Print how the value is classified
    Classify {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Copy one rendered form to the clipboard
    Copy {
        #[arg(allow_hyphen_values = true)]
        value: String,

        #[arg(short, long, value_enum, default_value_t = Field::Local)]
        field: Field,
    },

    /// Show the config file location and contents
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Field {
    Utc,
    Local,
    Relative,
    Raw,
}

impl From<Field> for CopyTarget {
    fn from(field: Field) -> Self {
        match field {
            Field::Utc => CopyTarget::Utc,
            Field::Local => CopyTarget::Local,
            Field::Relative => CopyTarget::Relative,
            Field::Raw => CopyTarget::Raw,
        }
    }
}

/// Canonical integers become numbers; everything else stays text, so
/// "0000000000000001" keeps its 16 characters.
fn parse_value(raw: &str) -> TimestampValue {
    match raw.parse::<i64>() {
        Ok(n) if n.to_string() == raw => TimestampValue::Integer(n),
        _ => TimestampValue::Text(raw.to_string()),
    }
}

fn build_formatter(args: &Args, config: &AppConfig) -> Result<TimestampFormatter> {
    let mut formatter = config.formatter();
    if let Some(pattern) = &args.pattern {
        let pattern = DisplayPattern::new(pattern.clone()).context("Invalid --pattern")?;
        formatter = formatter.with_pattern(pattern);
    }
    if let Some(zone) = &args.zone {
        let zone = zone.parse::<DisplayZone>().context("Invalid --zone")?;
        formatter = formatter.with_zone(zone);
    }
    Ok(formatter)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = app_config::load_config();
    let formatter = build_formatter(&args, &config)?;

    match &args.command {
        Commands::Render {
            value,
            json,
            lenient,
        } => {
            let value = parse_value(value);
            let rendered = if *lenient {
                formatter.render_or_placeholder(value)
            } else {
                formatter
                    .render(value)
                    .context("Failed to render timestamp")?
            };

            if *json {
                let out = serde_json::to_string_pretty(&rendered)
                    .context("Failed to serialize rendered timestamp")?;
                println!("{}", out);
                return Ok(());
            }

            let tooltip = TimestampTooltip::new(rendered, Arc::new(SystemClipboard));
            println!("{}", tooltip.label());
            for row in tooltip.rows() {
                println!("  {:<10} {}", row.label, row.caption());
            }
        }
        Commands::Classify { value } => {
            println!("{}", classify(&parse_value(value)).kind());
        }
        Commands::Copy { value, field } => {
            let rendered = formatter
                .render(parse_value(value))
                .context("Failed to render timestamp")?;
            let target = CopyTarget::from(*field);

            let mut tooltip = TimestampTooltip::new(rendered, Arc::new(SystemClipboard))
                .with_ack_duration(config.copy_ack());
            let copied = tooltip
                .copy(target)
                .with_context(|| format!("Failed to copy {}", target.label()))?;
            println!("Copied {}: {}", target.label(), copied);
            tooltip.dispatch(TooltipAction::Teardown);
        }
        Commands::Config { init } => {
            let path = app_config::config_path();
            if *init && !path.exists() {
                app_config::save_config(&AppConfig::default())
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
            println!("# {}", path.display());
            let contents =
                toml::to_string_pretty(&config).context("Failed to serialize config")?;
            print!("{}", contents);
        }
    }

    Ok(())
}
