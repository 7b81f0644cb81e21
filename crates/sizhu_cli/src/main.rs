use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use sizhu_base::{Branch, Pillar, Stem, nayin};
use sizhu_chart::{BirthRequest, CallerId, ChartConfig, ChartService};
use sizhu_time::{ALL_SOLAR_TERMS, APPROX_BOUNDARY_DAY, GeoPoint};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sizhu", about = "Four-pillar chart CLI")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a chart and print it as JSON
    Chart {
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Local birth time (HH:MM)
        #[arg(long)]
        time: String,
        /// UTC offset in minutes (default from config, 480)
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<i32>,
        /// Rule catalog name
        #[arg(long)]
        catalog: Option<String>,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        gender: String,
        /// Free-text birth place
        #[arg(long)]
        location: Option<String>,
        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,
        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,
        /// Flag the request for true solar time correction
        #[arg(long)]
        true_solar_time: bool,
        /// Store the chart for this caller (needs record_file in config)
        #[arg(long)]
        caller: Option<String>,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// List the 24 solar terms of a year
    Terms {
        #[arg(long)]
        year: i32,
    },
    /// List the registered rule catalogs
    Catalogs,
    /// Nayin label of a stem/branch pair
    Nayin {
        /// Stem, character or pinyin (e.g. 甲 or Jia)
        #[arg(long)]
        stem: String,
        /// Branch, character or pinyin (e.g. 子 or Zi)
        #[arg(long)]
        branch: String,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Chart {
            date,
            time,
            offset,
            catalog,
            name,
            gender,
            location,
            lat,
            lon,
            true_solar_time,
            caller,
            compact,
        } => {
            let service = load_service(cli.config.as_deref());
            let request = BirthRequest {
                name,
                gender,
                date,
                time,
                true_solar_time,
                location,
                offset_minutes: offset,
                coordinates: lat.zip(lon).map(|(lat, lon)| GeoPoint { lat, lon }),
                catalog,
            };
            let caller = caller.map(CallerId::new);
            let chart = service
                .compute(&request, caller.as_ref())
                .unwrap_or_else(|e| {
                    eprintln!("{e}");
                    std::process::exit(2);
                });
            let json = if compact {
                serde_json::to_string(&chart)
            } else {
                serde_json::to_string_pretty(&chart)
            };
            match json {
                Ok(text) => println!("{text}"),
                Err(e) => {
                    eprintln!("Failed to serialize chart: {e}");
                    std::process::exit(1);
                }
            }
        }

        Commands::Terms { year } => {
            let service = load_service(cli.config.as_deref());
            match service.terms().lookup(year) {
                Some((terms, source)) => {
                    println!("{year} ({})", source.name());
                    for (term, instant) in terms.iter() {
                        let kind = if term.is_jie() { "jie" } else { "qi" };
                        println!(
                            "  {:<4} {:<12} {:<3} {}",
                            term.name(),
                            term.pinyin(),
                            kind,
                            instant.to_rfc3339()
                        );
                    }
                }
                None => {
                    println!("{year} (approximate: no term data, fixed month boundaries)");
                    let jie = ALL_SOLAR_TERMS.iter().filter(|t| t.is_jie());
                    for (month, (term, day)) in (1..).zip(jie.zip(APPROX_BOUNDARY_DAY)) {
                        println!(
                            "  {:<4} {:<12} {year}-{month:02}-{day:02}",
                            term.name(),
                            term.pinyin()
                        );
                    }
                }
            }
        }

        Commands::Catalogs => {
            let service = load_service(cli.config.as_deref());
            let default = &service.config().default_catalog;
            for catalog in service.catalogs().iter() {
                let mark = if &catalog.name == default { "*" } else { " " };
                println!(
                    "{mark} {:<12} v{:<8} {:>3} rules  {}",
                    catalog.name,
                    catalog.version,
                    catalog.len(),
                    catalog.description
                );
            }
        }

        Commands::Nayin { stem, branch } => {
            let stem: Stem = stem.parse().unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            });
            let branch: Branch = branch.parse().unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            });
            let pillar = Pillar::try_new(stem, branch).unwrap_or_else(|e| {
                eprintln!("{e}");
                std::process::exit(1);
            });
            let n = nayin(pillar);
            println!("{pillar} {} ({}, {})", n.name, n.english, n.element);
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_service(config: Option<&Path>) -> ChartService {
    let config = match config {
        Some(path) => ChartConfig::load(path).unwrap_or_else(|e| {
            eprintln!("Failed to load config {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => ChartConfig::default(),
    };
    debug!(?config, "starting chart service");
    ChartService::from_config(config).unwrap_or_else(|e| {
        eprintln!("Failed to start chart service: {e}");
        std::process::exit(1);
    })
}
