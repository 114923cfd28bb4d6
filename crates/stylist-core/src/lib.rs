//! stylist-core — Personal color season voting and garment fit matching.
//!
//! Pure, synchronous algorithms over read-only tables. Image decoding and
//! random sampling of masked pixel crops feed the color voter; body
//! measurements from an external pose pipeline feed the garment matcher.

pub mod catalog;
pub mod matcher;
pub mod palette;
pub mod report;
pub mod sampling;
pub mod season;
pub mod types;
pub mod voter;

pub use catalog::{Catalog, CatalogError};
pub use matcher::{best_fit, EuclideanMatcher, GarmentMatcher, MatchOutcome, NoMatch};
pub use palette::{Palette, REFERENCE_PALETTES};
pub use report::{ColorReport, FitReport};
pub use sampling::{SamplingError, DEFAULT_SAMPLE_SIZE};
pub use season::{remap_skin_code, Season, SeasonError};
pub use types::{
    check_measurement, measurement_set, parse_measurements, Category, Garment, MeasurementKey,
    MeasurementSet, ParseError, Rgb,
};
pub use voter::{classify, Classification, ClassifyError, ColorVoter, VoteCounts};
