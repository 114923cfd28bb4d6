use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use stylist_core::sampling;
use stylist_core::{
    best_fit, check_measurement, measurement_set, remap_skin_code, Catalog, Category,
    ColorReport, ColorVoter, FitReport, MeasurementKey, DEFAULT_SAMPLE_SIZE,
};

mod batch;

#[derive(Parser)]
#[command(name = "stylist", about = "Personal color and garment fit assistant")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify lip color from a pre-masked lip crop
    Lip {
        /// Image file (non-lip pixels blacked out)
        image: PathBuf,
        #[command(flatten)]
        sampling: SamplingArgs,
    },
    /// Report the season for a raw skin-tone classifier code
    Skin {
        /// Raw classifier output (0-3)
        #[arg(short, long)]
        code: u8,
    },
    /// Find the best-fitting garment for a set of body measurements
    Fit {
        /// Garment category: shirt, pants, jacket, t-shirt
        #[arg(short = 'k', long)]
        category: Category,
        /// Measurement in cm, e.g. `-m chest=95 -m "shoulder width=44"`
        #[arg(short, long = "measure", value_parser = parse_measure, required = true)]
        measures: Vec<(MeasurementKey, f64)>,
        /// TOML catalog to use instead of the built-in one
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// List catalog garments
    Catalog {
        #[arg(short = 'k', long)]
        category: Option<Category>,
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Run lip analysis over every image in a directory
    Batch {
        dir: PathBuf,
        /// Results file name, written inside the directory
        #[arg(short, long, default_value = "results.json")]
        output: String,
        #[command(flatten)]
        sampling: SamplingArgs,
    },
    /// Show daemon status
    Status {
        /// Query the system bus instead of the session bus
        #[arg(long)]
        system: bool,
    },
}

#[derive(clap::Args)]
struct SamplingArgs {
    /// Pixels sampled before voting
    #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    samples: usize,
    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,
}

impl SamplingArgs {
    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn parse_measure(s: &str) -> Result<(MeasurementKey, f64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {s:?}"))?;
    let key: MeasurementKey = key.parse().map_err(|e| format!("{e}"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("not a number: {:?}", value.trim()))?;
    let value = check_measurement(key, value).map_err(|e| format!("{e}"))?;
    Ok((key, value))
}

// D-Bus proxy for the daemon; only the status call is needed here.
#[zbus::proxy(
    interface = "org.freedesktop.Stylist1",
    default_service = "org.freedesktop.Stylist1",
    default_path = "/org/freedesktop/Stylist1"
)]
trait Stylist {
    async fn status(&self) -> zbus::Result<String>;
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Ok(Catalog::load(path)?),
        None => Ok(Catalog::builtin()?.clone()),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Lip { image, sampling: opts } => {
            let pixels = sampling::pixels_from_path(&image)
                .with_context(|| format!("reading {}", image.display()))?;
            let samples = sampling::sample(&pixels, opts.samples, &mut opts.rng());
            tracing::info!(pixels = pixels.len(), sampled = samples.len(), "sampled lip pixels");
            let classification = ColorVoter::default().classify(&samples)?;
            print_json(&ColorReport::lip(&classification))?;
        }
        Commands::Skin { code } => {
            let season = remap_skin_code(code)?;
            print_json(&ColorReport::skin(season))?;
        }
        Commands::Fit {
            category,
            measures,
            catalog,
        } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let measurements = measurement_set(measures)?;
            let outcome = best_fit(&measurements, category, catalog.garments());
            print_json(&FitReport::from(&outcome))?;
        }
        Commands::Catalog { category, catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let garments: Vec<_> = match category {
                Some(category) => catalog.by_category(category).collect(),
                None => catalog.garments().iter().collect(),
            };
            print_json(&garments)?;
        }
        Commands::Batch {
            dir,
            output,
            sampling: opts,
        } => {
            let images = batch::find_images(&dir)?;
            if images.is_empty() {
                anyhow::bail!("no images found in {}", dir.display());
            }
            println!("Found {} images in {}", images.len(), dir.display());
            let (results, summary) = batch::run(&images, opts.samples, &mut opts.rng());
            let out = dir.join(output);
            batch::write_results(&out, &results)?;
            println!("Results written to {}", out.display());
            batch::print_summary(&summary);
        }
        Commands::Status { system } => {
            let connection = if system {
                zbus::Connection::system()
                    .await
                    .context("connecting to the system bus")?
            } else {
                zbus::Connection::session()
                    .await
                    .context("connecting to the session bus")?
            };
            let proxy = StylistProxy::new(&connection).await?;
            match proxy.status().await {
                Ok(status) => println!("{status}"),
                Err(e) => println!("stylistd: not reachable ({e})"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_measure() {
        assert_eq!(parse_measure("chest=95"), Ok((MeasurementKey::Chest, 95.0)));
        assert_eq!(
            parse_measure("shoulder width= 44.5"),
            Ok((MeasurementKey::ShoulderWidth, 44.5))
        );
        assert!(parse_measure("chest").is_err());
        assert!(parse_measure("chest=wide").is_err());
        assert!(parse_measure("elbow=3").is_err());
        assert!(parse_measure("chest=nan").is_err());
        assert!(parse_measure("chest=inf").is_err());
        assert!(parse_measure("chest=-95").is_err());
    }

    #[test]
    fn test_fit_duplicate_measures_rejected() {
        let cli = Cli::try_parse_from([
            "stylist",
            "fit",
            "-k",
            "shirt",
            "-m",
            "shoulder width=44",
            "-m",
            "shoulder_width=47",
        ])
        .unwrap();
        let Commands::Fit { measures, .. } = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(
            measurement_set(measures),
            Err(stylist_core::ParseError::DuplicateMeasurement(
                MeasurementKey::ShoulderWidth
            ))
        );
    }

    #[test]
    fn test_status_bus_flag() {
        let cli = Cli::try_parse_from(["stylist", "status"]).unwrap();
        assert!(matches!(cli.command, Commands::Status { system: false }));
        let cli = Cli::try_parse_from(["stylist", "status", "--system"]).unwrap();
        assert!(matches!(cli.command, Commands::Status { system: true }));
    }

    #[test]
    fn test_fit_args() {
        let cli = Cli::try_parse_from([
            "stylist", "fit", "-k", "t-shirt", "-m", "chest=99", "-m", "height=171",
        ])
        .unwrap();
        match cli.command {
            Commands::Fit { category, measures, catalog } => {
                assert_eq!(category, Category::TShirt);
                assert_eq!(measures.len(), 2);
                assert!(catalog.is_none());
            }
            _ => panic!("expected fit"),
        }
    }

    #[test]
    fn test_fit_requires_measurements() {
        assert!(Cli::try_parse_from(["stylist", "fit", "-k", "shirt"]).is_err());
    }

    #[test]
    fn test_sampling_defaults() {
        let cli = Cli::try_parse_from(["stylist", "lip", "lips.png"]).unwrap();
        match cli.command {
            Commands::Lip { sampling, .. } => {
                assert_eq!(sampling.samples, 40);
                assert!(sampling.seed.is_none());
            }
            _ => panic!("expected lip"),
        }
    }
}
