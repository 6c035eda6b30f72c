//! relicdb CLI - import relic crafting data into SQLite and report on it

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use relicdb::config::{self, RelicdbConfig};
use relicdb::report::{self, Report, EXAMPLE_QUERIES, TOP_COMPOSITIONS};
use relicdb::ui::{self, Icons, OutputFormat};
use relicdb::{loader, RarityTier, RelicStore};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "relicdb")]
#[command(version)]
#[command(about = "Load relic and relic-crafting data into SQLite and print statistics")]
#[command(long_about = r#"
relicdb rebuilds a SQLite database from a relics JSON document:
  • relics (name, group, rarity, image, description)
  • relic craft results (input composition and output yield per rarity)

Example usage:
  relicdb import --input relics-infos.json --database relics.db
  relicdb stats --database relics.db --tier legendary --limit 3
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a relicdb.toml configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the database from a JSON document, then print statistics
    Import {
        /// Path to the relics JSON document
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Path to the database file (replaced on every import)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Skip the statistics report after importing
        #[arg(long)]
        no_stats: bool,

        /// Output format for the report
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print statistics for an existing database
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Rarity tier used to rank compositions
        #[arg(short, long, value_enum, ignore_case = true, default_value_t = RarityTier::Mythical)]
        tier: RarityTier,

        /// Number of compositions to list
        #[arg(short, long, default_value_t = TOP_COMPOSITIONS)]
        limit: usize,

        /// Output format for the report
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(cli) {
        ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::load_config(cli.config.as_deref())?.unwrap_or_default();

    match cli.command {
        Commands::Import { input, database, no_stats, format } => {
            run_import(&config, input, database, no_stats, format)
        }
        Commands::Stats { database, tier, limit, format } => {
            let database = config.resolve_database(database);
            let store = RelicStore::open_read_only(&database)?;
            if format.is_human() {
                let stats = store.stats()?;
                ui::header(&format!("Relic database {}", database.display()));
                ui::summary_row("Relics:", &stats.relics.to_string());
                ui::summary_row("Craft results:", &stats.craft_results.to_string());
                println!();
            }
            let report = report::report_for_tier(&store, tier, limit)?;
            print_report(&report, format)
        }
    }
}

fn run_import(
    config: &RelicdbConfig,
    input: Option<PathBuf>,
    database: Option<PathBuf>,
    no_stats: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let input = config.resolve_input(input);
    let database = config.resolve_database(database);
    config::ensure_db_dir(&database)?;

    let human = format.is_human();
    if human {
        ui::header("Importing relic data");
        ui::info("Input", &input.display().to_string());
        ui::info("Database", &database.display().to_string());
    }

    let (store, summary) = loader::load_file(&input, &database)?;

    if human {
        if summary.replaced_existing {
            ui::summary_row(Icons::DEL, &format!("Replaced existing database: {}", database.display()));
        }
        ui::success(&format!("Database created: {}", database.display()));
        ui::success(&format!("Imported {} craft results", summary.craft_results));
        ui::success(&format!("Imported {} relics", summary.relics));
    }
    // stderr, safe for JSON output
    if summary.warnings > 0 {
        ui::warn(&format!(
            "{} craft percentages were outside 0-100 and kept as-is",
            summary.warnings
        ));
    }

    if no_stats {
        return Ok(());
    }

    if human {
        ui::section(&format!("{} Database Statistics", Icons::STATS));
    }
    let report = report::report(&store)?;
    print_report(&report, format)?;

    if human {
        print_example_queries(&database);
    }
    Ok(())
}

fn print_report(report: &Report, format: OutputFormat) -> anyhow::Result<()> {
    print!("{}", ui::render_report(report, format, ui::theme())?);
    Ok(())
}

fn print_example_queries(database: &Path) {
    ui::section(&format!("{} Example queries", Icons::SEARCH));
    for (description, sql) in EXAMPLE_QUERIES {
        ui::summary_row(&format!("# {}:", description), "");
        ui::summary_row("", sql);
    }
    ui::info("Try", &format!("sqlite3 {}", database.display()));
}
