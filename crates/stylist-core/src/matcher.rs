//! Garment fit matching against the catalog.

use crate::types::{Category, Garment, MeasurementSet};
use serde::Serialize;

/// Why a match request produced no garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoMatch {
    /// The catalog holds no garment of the requested category.
    NoCandidates,
    /// Candidates exist but none shares a measurement with the input.
    NoScorableMatch,
}

/// Result of matching a measurement set against a catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome<'a> {
    Matched { garment: &'a Garment, distance: f64 },
    Unmatched(NoMatch),
}

impl<'a> MatchOutcome<'a> {
    pub fn garment(&self) -> Option<&'a Garment> {
        match self {
            MatchOutcome::Matched { garment, .. } => Some(garment),
            MatchOutcome::Unmatched(_) => None,
        }
    }
}

/// Strategy for scoring catalog garments against body measurements.
pub trait GarmentMatcher {
    fn best_fit<'a>(
        &self,
        measurements: &MeasurementSet,
        category: Category,
        catalog: &'a [Garment],
    ) -> MatchOutcome<'a>;
}

/// Euclidean distance over the measurement keys shared by input and garment.
///
/// Single running-minimum pass; on equal distance the garment that appears
/// first in the catalog is kept. Garments scoring a non-finite distance are
/// never selected.
pub struct EuclideanMatcher;

impl EuclideanMatcher {
    /// Distance over the keys both sides declare, or `None` when they share none.
    pub fn distance(measurements: &MeasurementSet, garment: &Garment) -> Option<f64> {
        let mut shared = 0usize;
        let mut sum = 0.0f64;
        for (key, nominal) in &garment.measures {
            if let Some(measured) = measurements.get(key) {
                shared += 1;
                sum += (measured - nominal).powi(2);
            }
        }
        (shared > 0).then(|| sum.sqrt())
    }
}

impl GarmentMatcher for EuclideanMatcher {
    fn best_fit<'a>(
        &self,
        measurements: &MeasurementSet,
        category: Category,
        catalog: &'a [Garment],
    ) -> MatchOutcome<'a> {
        let mut candidates = 0usize;
        let mut best: Option<(&'a Garment, f64)> = None;

        for garment in catalog.iter().filter(|g| g.category == category) {
            candidates += 1;
            let Some(distance) = Self::distance(measurements, garment) else {
                tracing::debug!(garment = %garment.name, "no shared measurements; skipped");
                continue;
            };
            if !distance.is_finite() {
                tracing::warn!(garment = %garment.name, distance, "non-finite distance; skipped");
                continue;
            }
            if best.map_or(true, |(_, best_d)| distance < best_d) {
                best = Some((garment, distance));
            }
        }

        match best {
            Some((garment, distance)) => MatchOutcome::Matched { garment, distance },
            None if candidates == 0 => MatchOutcome::Unmatched(NoMatch::NoCandidates),
            None => MatchOutcome::Unmatched(NoMatch::NoScorableMatch),
        }
    }
}

/// Match with the default [`EuclideanMatcher`].
pub fn best_fit<'a>(
    measurements: &MeasurementSet,
    category: Category,
    catalog: &'a [Garment],
) -> MatchOutcome<'a> {
    EuclideanMatcher.best_fit(measurements, category, catalog)
}
