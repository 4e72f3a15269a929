use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use khata_core::{TxnType, category_stats, financial_years, monthly_stats};
use khata_ingest::{StatementParser, dedupe, partition_by_month};
use std::fs;
use std::path::PathBuf;

mod config;
mod output;

#[derive(Parser, Debug)]
#[command(name = "khata", version, about = "Bank statement extraction pipeline")]
struct Cli {
    /// Config file (default: ./khata.toml when present, else built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse the statement dump and write per-month JSON partitions
    Build {
        /// Statement text file (default: from config)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output directory (default: from config)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print monthly and category totals for one year
    Stats {
        /// Statement text file (default: from config)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Year to summarize (default: latest year in the data)
        #[arg(long)]
        year: Option<i32>,
    },

    /// Write the deduplicated transactions as a flat CSV
    Export {
        /// Statement text file (default: from config)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Destination file
        #[arg(long, default_value = "transactions.csv")]
        out: PathBuf,
    },
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Build { input, out } => build(&cfg, input, out),
        Command::Stats { input, year } => stats(&cfg, input, year),
        Command::Export { input, out } => export(&cfg, input, out),
    }
}

fn read_statement(cfg: &config::Config, input: Option<PathBuf>) -> Result<String> {
    let path = input.unwrap_or_else(|| cfg.paths.input.clone());
    if !path.exists() {
        bail!(
            "statement file not found: {} (pass --input <path>)",
            path.display()
        );
    }
    fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
}

fn parse_deduped(cfg: &config::Config, input: Option<PathBuf>) -> Result<(usize, Vec<khata_core::Transaction>)> {
    let text = read_statement(cfg, input)?;
    let parser = StatementParser::new(cfg.bank_identity())?;
    let parsed = parser.parse(&text);
    let parsed_count = parsed.len();
    Ok((parsed_count, dedupe(parsed)))
}

fn build(cfg: &config::Config, input: Option<PathBuf>, out: Option<PathBuf>) -> Result<()> {
    let (parsed_count, deduped) = parse_deduped(cfg, input)?;
    let dropped = parsed_count - deduped.len();

    let partitions = partition_by_month(deduped);
    let files = output::render_partitions(&partitions)?;

    let out_dir = out.unwrap_or_else(|| cfg.paths.out_dir.clone());
    output::write_all(&out_dir, &files)?;

    println!(
        "Parsed {} transactions ({} duplicates dropped)",
        parsed_count, dropped
    );
    println!(
        "Wrote {} month files + manifest to {}",
        partitions.len(),
        out_dir.display()
    );
    Ok(())
}

fn stats(cfg: &config::Config, input: Option<PathBuf>, year: Option<i32>) -> Result<()> {
    let (_, txns) = parse_deduped(cfg, input)?;

    let year = match year.or_else(|| financial_years(&txns).first().copied()) {
        Some(y) => y,
        None => bail!("no transactions parsed; nothing to summarize"),
    };

    println!("Statement summary for {year}\n");
    println!(
        "{:<6} {:>12} {:>12} {:>12}",
        "Month", "Income", "Expense", "Savings"
    );
    for (i, m) in monthly_stats(&txns, year).iter().enumerate() {
        println!(
            "{:<6} {:>12.2} {:>12.2} {:>12.2}",
            MONTHS[i], m.income, m.expense, m.savings
        );
    }

    for (label, kind) in [("Debit", TxnType::Debit), ("Credit", TxnType::Credit)] {
        let totals = category_stats(&txns, year, kind);
        if totals.is_empty() {
            continue;
        }
        println!("\n{label} by category:");
        for (category, total) in totals {
            println!("  {:<18} {:>12.2}", category.as_str(), total);
        }
    }
    Ok(())
}

fn export(cfg: &config::Config, input: Option<PathBuf>, out: PathBuf) -> Result<()> {
    let (_, txns) = parse_deduped(cfg, input)?;
    let csv = output::render_csv(&txns)?;
    fs::write(&out, csv).with_context(|| format!("write {}", out.display()))?;
    println!("Exported {} transactions to {}", txns.len(), out.display());
    Ok(())
}
