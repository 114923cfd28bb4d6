use crate::engine::{EngineError, EngineHandle};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use stylist_core::{
    best_fit, remap_skin_code, Catalog, Category, ColorReport, FitReport, MeasurementSet,
    ParseError,
};
use zbus::interface;

/// D-Bus interface for the Stylist analysis daemon.
///
/// Bus name: org.freedesktop.Stylist1
/// Object path: /org/freedesktop/Stylist1
pub struct StylistService {
    pub engine: EngineHandle,
    pub catalog: Arc<Catalog>,
    pub sample_size: usize,
}

#[interface(name = "org.freedesktop.Stylist1")]
impl StylistService {
    /// Classify the lip color of a pre-masked crop (encoded image bytes).
    async fn classify_lip(&self, image: Vec<u8>) -> zbus::fdo::Result<String> {
        tracing::info!(bytes = image.len(), "classify_lip requested");
        let result = self.engine.classify_lip(image).await.map_err(engine_error)?;
        tracing::debug!(pixels = result.pixels, season = %result.classification.season, "classify_lip done");
        to_json(&ColorReport::lip(&result.classification))
    }

    /// Remap a raw skin-tone classifier code (0-3) to a season report.
    async fn classify_skin(&self, raw_code: u8) -> zbus::fdo::Result<String> {
        tracing::info!(raw_code, "classify_skin requested");
        let season = remap_skin_code(raw_code)
            .map_err(|e| zbus::fdo::Error::InvalidArgs(e.to_string()))?;
        to_json(&ColorReport::skin(season))
    }

    /// Find the best-fitting garment of `category` for the given measurements (cm).
    async fn match_garment(
        &self,
        category: &str,
        measurements: HashMap<String, f64>,
    ) -> zbus::fdo::Result<String> {
        tracing::info!(category, keys = measurements.len(), "match_garment requested");
        let report = fit(&self.catalog, category, &measurements).map_err(parse_error)?;
        to_json(&report)
    }

    /// List catalog garments, optionally filtered by category ("" for all).
    async fn list_catalog(&self, category: &str) -> zbus::fdo::Result<String> {
        let garments: Vec<_> = if category.is_empty() {
            self.catalog.garments().iter().collect()
        } else {
            let category: Category = category.parse().map_err(parse_error)?;
            self.catalog.by_category(category).collect()
        };
        to_json(&garments)
    }

    /// Return daemon status information.
    async fn status(&self) -> zbus::fdo::Result<String> {
        Ok(serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "catalog_garments": self.catalog.len(),
            "sample_size": self.sample_size,
        })
        .to_string())
    }
}

/// Parse the loosely typed D-Bus arguments and run the matcher.
fn fit(
    catalog: &Catalog,
    category: &str,
    measurements: &HashMap<String, f64>,
) -> Result<FitReport, ParseError> {
    let category: Category = category.parse()?;
    let measurements: MeasurementSet = stylist_core::parse_measurements(
        measurements.iter().map(|(k, v)| (k.as_str(), *v)),
    )?;
    let outcome = best_fit(&measurements, category, catalog.garments());
    let report = FitReport::from(&outcome);
    tracing::debug!(?report, "match_garment result");
    Ok(report)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> zbus::fdo::Result<String> {
    serde_json::to_string(value).map_err(|e| zbus::fdo::Error::Failed(e.to_string()))
}

fn parse_error(e: ParseError) -> zbus::fdo::Error {
    zbus::fdo::Error::InvalidArgs(e.to_string())
}

fn engine_error(e: EngineError) -> zbus::fdo::Error {
    match e {
        EngineError::ChannelClosed => zbus::fdo::Error::Failed(e.to_string()),
        other => zbus::fdo::Error::InvalidArgs(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylist_core::NoMatch;

    fn measurements(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_fit_builtin_pants() {
        let report = fit(
            Catalog::builtin().unwrap(),
            "pants",
            &measurements(&[("waist", 84.0), ("hips", 95.0), ("height", 176.0)]),
        )
        .unwrap();
        match report {
            FitReport::Matched { garment_name, distance } => {
                assert_eq!(garment_name, "Slim Fit Pants 32");
                assert!((distance - 2f64.sqrt()).abs() < 1e-9);
            }
            other => panic!("expected a match, got {other:?}"),
        }
    }

    #[test]
    fn test_fit_no_scorable_match() {
        let report = fit(Catalog::builtin().unwrap(), "jacket", &measurements(&[("ankle", 20.0)])).unwrap();
        assert_eq!(
            report,
            FitReport::NoMatch {
                no_match: NoMatch::NoScorableMatch
            }
        );
    }

    #[test]
    fn test_fit_empty_catalog_has_no_candidates() {
        let report = fit(&Catalog::default(), "shirt", &measurements(&[("chest", 95.0)])).unwrap();
        assert_eq!(
            report,
            FitReport::NoMatch {
                no_match: NoMatch::NoCandidates
            }
        );
    }

    #[test]
    fn test_fit_rejects_bad_arguments() {
        assert!(fit(Catalog::builtin().unwrap(), "hat", &measurements(&[])).is_err());
        assert!(fit(Catalog::builtin().unwrap(), "shirt", &measurements(&[("elbow", 1.0)])).is_err());
    }

    #[test]
    fn test_fit_rejects_aliased_duplicates() {
        let err = fit(
            Catalog::builtin().unwrap(),
            "shirt",
            &measurements(&[("shoulder width", 44.0), ("shoulder_width", 47.0)]),
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::DuplicateMeasurement(_)));
        assert!(matches!(parse_error(err), zbus::fdo::Error::InvalidArgs(_)));
    }

    #[test]
    fn test_fit_rejects_non_finite_values() {
        let catalog = Catalog::builtin().unwrap();
        for bad in [f64::NAN, f64::INFINITY, -3.0] {
            let err = fit(catalog, "shirt", &measurements(&[("chest", 95.0), ("neck", bad)]))
                .unwrap_err();
            assert!(matches!(err, ParseError::InvalidValue { .. }), "{bad}");
        }
    }

    #[test]
    fn test_engine_error_mapping() {
        assert!(matches!(
            engine_error(EngineError::ChannelClosed),
            zbus::fdo::Error::Failed(_)
        ));
        assert!(matches!(
            engine_error(EngineError::Sampling(stylist_core::SamplingError::NoPixels)),
            zbus::fdo::Error::InvalidArgs(_)
        ));
    }
}
