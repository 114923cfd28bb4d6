use std::path::PathBuf;
use stylist_core::DEFAULT_SAMPLE_SIZE;

/// Which D-Bus bus the daemon registers on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusKind {
    Session,
    System,
}

/// Daemon configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Optional TOML catalog replacing the embedded one.
    pub catalog_path: Option<PathBuf>,
    /// Pixels drawn from each lip crop before voting.
    pub sample_size: usize,
    /// Fixed RNG seed for reproducible sampling; entropy-seeded when unset.
    pub sample_seed: Option<u64>,
    pub bus: BusKind,
}

impl Config {
    /// Load configuration from `STYLIST_*` environment variables with defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bus = match lookup("STYLIST_BUS").as_deref() {
            Some("system") => BusKind::System,
            _ => BusKind::Session,
        };

        Self {
            catalog_path: lookup("STYLIST_CATALOG_PATH").map(PathBuf::from),
            sample_size: parse_or(lookup("STYLIST_SAMPLE_SIZE"), DEFAULT_SAMPLE_SIZE).max(1),
            sample_seed: lookup("STYLIST_SAMPLE_SEED").and_then(|v| v.parse().ok()),
            bus,
        }
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}
