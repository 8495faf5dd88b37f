use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::debug;

use reform_cli::config::{AppConfig, Overrides};
use reform_cli::logging;
use reform_cli::report::{
    CalculationReport, ComparisonList, CstList, NcmDetailReport, NcmTree, RateTableReport,
    RegimeList, ScenarioReport, SourceList,
};
use reform_core::calculations::common::amount_from_f64;
use reform_core::{ActivityGroup, ScenarioInput, ScenarioSimulator, TaxClassification};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// CBS/IBS tax calculator for the consumption tax transition.
///
/// Resolves a CST classification code to its rate rule and prints the tax
/// owed on a base amount. Also searches the NCM and CST reference tables.
#[derive(Debug, Parser)]
#[command(name = "reform", version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// CSV file with rate rules, replacing the builtin table.
    #[arg(long, global = true)]
    rates: Option<PathBuf>,

    /// NCM JSON document, replacing the builtin NCM list.
    #[arg(long, global = true)]
    ncm_json: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `reform_core=debug`. `RUST_LOG` wins.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate CBS and IBS for a classification code.
    Calculate {
        /// CST classification code, e.g. `011`.
        #[arg(long)]
        code: String,

        /// Base amount of the operation.
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
    },

    /// Estimate tax with the flat-rate scenario simulator.
    Simulate {
        /// `commerce` or `services` (`comercio`, `servicos`).
        #[arg(long, default_value = "commerce")]
        group: String,

        /// Tax situation code; `06` is zero-rated by default.
        #[arg(long, default_value = "01")]
        situation: String,

        /// `normal`, `imune` or `isento`.
        #[arg(long, default_value = "normal")]
        classification: String,

        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
    },

    /// List the codes in the active rate table.
    Codes,

    /// Search NCM entries by code or description, grouped by top-level code.
    Ncm { term: Option<String> },

    /// Show an NCM entry and its subcategories.
    NcmDetail { code: String },

    /// Search CST entries by code, description or kind.
    Cst { term: Option<String> },

    /// Legacy taxes and the CBS/IBS rates replacing them.
    Comparisons,

    /// How the transition affects each taxation regime.
    Regimes,

    /// Official sources of information.
    Sources,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(cli.config.as_deref())?.with_overrides(Overrides {
        rate_table: cli.rates,
        ncm_json: cli.ncm_json,
        log_level: cli.log_level,
    });
    logging::init_logging(config.log_filter())?;
    debug!(?config, "configuration loaded");

    run(cli.command, &config)
}

fn run(
    command: Command,
    config: &AppConfig,
) -> anyhow::Result<()> {
    match command {
        Command::Calculate { code, amount } => {
            let table = config.rate_table()?;
            let result = table
                .calculate(&code, amount)
                .with_context(|| format!("cannot calculate tax for code '{code}'"))?;
            print!(
                "{}",
                CalculationReport {
                    code: &code,
                    result: &result,
                }
            );
        }
        Command::Simulate {
            group,
            situation,
            classification,
            amount,
        } => {
            let Some(group) = ActivityGroup::parse(&group) else {
                bail!("unknown activity group '{group}'");
            };
            let Some(classification) = TaxClassification::parse(&classification) else {
                bail!("unknown classification '{classification}'");
            };
            let input = ScenarioInput {
                group,
                situation_code: situation,
                classification,
                amount_base: amount_from_f64(amount)?,
            };
            let result = ScenarioSimulator::new(config.scenario.clone()).simulate(&input)?;
            print!(
                "{}",
                ScenarioReport {
                    input: &input,
                    result: &result,
                }
            );
        }
        Command::Codes => {
            let table = config.rate_table()?;
            print!("{}", RateTableReport(&table));
        }
        Command::Ncm { term } => {
            let catalog = config.catalog()?;
            let groups = catalog.search_ncm_grouped(term.as_deref().unwrap_or_default());
            print!("{}", NcmTree(&groups));
        }
        Command::NcmDetail { code } => {
            let catalog = config.catalog()?;
            let Some(detail) = catalog.ncm_with_subcategories(&code) else {
                bail!("NCM code '{code}' not found");
            };
            print!("{}", NcmDetailReport(&detail));
        }
        Command::Cst { term } => {
            let catalog = config.catalog()?;
            let entries = catalog.search_cst(term.as_deref().unwrap_or_default());
            print!("{}", CstList(&entries));
        }
        Command::Comparisons => {
            print!("{}", ComparisonList(config.catalog()?.rate_comparisons()));
        }
        Command::Regimes => {
            print!("{}", RegimeList(config.catalog()?.regimes()));
        }
        Command::Sources => {
            print!("{}", SourceList(config.catalog()?.sources()));
        }
    }
    Ok(())
}
