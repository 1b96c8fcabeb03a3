//! Parse command - extract items from a receipt text file or stdin.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::debug;

use recr_core::{HeuristicReceiptParser, ParseOutcome, ParserConfig, ReceiptParser};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input text file (stdin when omitted)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show warnings collected during parsing
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = if let Some(path) = config_path {
        ParserConfig::from_file(std::path::Path::new(path))?
    } else {
        ParserConfig::default()
    };

    let text = match &args.input {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    debug!(chars = text.len(), "read receipt text");

    let parser = HeuristicReceiptParser::with_config(config);
    let outcome = parser
        .parse(&text)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if args.show_warnings {
        for warning in &outcome.warnings {
            eprintln!("{} {}", style("warning:").yellow(), warning);
        }
    }

    let rendered = render(&outcome, args.format)?;
    match &args.output {
        Some(path) => fs::write(path, rendered)?,
        None => print!("{rendered}"),
    }

    Ok(())
}

fn render(outcome: &ParseOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(outcome)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["name", "amount"])?;
            for item in &outcome.items {
                writer.write_record([item.name.as_str(), &item.amount.to_string()])?;
            }
            let data = writer
                .into_inner()
                .map_err(|e| anyhow::anyhow!("failed to flush csv output: {e}"))?;
            Ok(String::from_utf8(data)?)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            for item in &outcome.items {
                out.push_str(&format!("{:<40} {:>10}\n", item.name, item.amount));
            }
            out.push_str(&format!(
                "({} items, {:?}, confidence {:.2})\n",
                outcome.items.len(),
                outcome.strategy,
                outcome.confidence
            ));
            Ok(out)
        }
    }
}
