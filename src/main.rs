use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use region_explorer::{
    config::ExplorerConfig,
    io::WriteMode,
    models::Extreme,
    session::Session,
    visualization::{
        print_density_summary, print_extreme_summary, print_population_chart,
        print_population_summary, print_region_list, print_species_chart, print_species_table,
    },
    Explorer,
};

#[derive(Parser)]
#[command(
    name = "region-explorer",
    about = "Region Explorer - threatened species and population statistics by UN sub-region",
    version,
    author
)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding Country_Data.csv, Threatened_Species.csv and Population_Data.csv
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default)
    Interactive,

    /// List the available sub-regions
    Regions,

    /// Average threatened species per country of a sub-region
    Species {
        /// Sub-region name, exactly as stored
        #[arg(short, long)]
        region: String,

        /// Country to highlight
        #[arg(short = 'n', long)]
        country: String,

        /// Show a bar chart of the counts per category
        #[arg(long)]
        chart: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Population change and average over the observed years
    Population {
        #[arg(short = 'n', long)]
        country: String,

        /// Sub-region used for the regional comparison chart
        #[arg(short, long)]
        region: String,

        #[arg(long)]
        chart: bool,

        #[arg(long)]
        json: bool,
    },

    /// Population density of a country for one year
    Density {
        #[arg(short = 'n', long)]
        country: String,

        #[arg(short, long)]
        year: i32,

        /// Save `country,year,density` to this file
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Append to the export file instead of overwriting it
        #[arg(long, requires = "export")]
        append: bool,

        #[arg(long)]
        json: bool,
    },

    /// Country with the fewest or most threatened species in a sub-region
    Extreme {
        #[arg(short, long)]
        region: String,

        /// min or max
        #[arg(short, long, default_value = "max")]
        kind: String,

        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<ExplorerConfig> {
    let config = match &cli.config {
        Some(path) => ExplorerConfig::load(path)?,
        None => ExplorerConfig::default(),
    };
    Ok(match &cli.data_dir {
        Some(dir) => config.with_data_dir(dir),
        None => config,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let explorer = Explorer::new(load_config(&cli)?);

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            Session::new(&explorer, stdin.lock(), stdout.lock()).run()?;
        }

        Commands::Regions => {
            let regions = explorer.regions()?;
            print_region_list(&regions);
        }

        Commands::Species {
            region,
            country,
            chart,
            json,
        } => {
            let report = explorer.species_report(&region, &country)?;
            if json {
                print_json(&report)?;
            } else {
                print_species_table(&report);
                if chart {
                    print_species_chart(&report);
                }
            }
        }

        Commands::Population {
            country,
            region,
            chart,
            json,
        } => {
            let report = explorer.population_report(&country, &region)?;
            if json {
                print_json(&report)?;
            } else {
                print_population_summary(&report);
                if chart {
                    print_population_chart(&report);
                }
            }
        }

        Commands::Density {
            country,
            year,
            export,
            append,
            json,
        } => {
            let report = explorer.population_density(year, &country)?;
            if json {
                print_json(&report)?;
            } else {
                print_density_summary(&report);
            }

            if let Some(path) = export {
                let mode = if append {
                    WriteMode::Append
                } else {
                    WriteMode::Overwrite
                };
                explorer.export_density(&report, &path, mode)?;
                eprintln!("{} Data saved to {}", "Success:".green().bold(), path.display());
            }
        }

        Commands::Extreme { region, kind, json } => {
            let extreme: Extreme = kind.parse()?;
            let report = explorer.species_extreme(&region, extreme)?;
            if json {
                print_json(&report)?;
            } else {
                print_extreme_summary(&report);
            }
        }
    }

    Ok(())
}
