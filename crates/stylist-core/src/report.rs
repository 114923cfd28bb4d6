//! Serializable results handed to transports (D-Bus, CLI, batch files).

use crate::matcher::{MatchOutcome, NoMatch};
use crate::season::Season;
use crate::voter::{Classification, VoteCounts};
use serde::Serialize;

const MESSAGE_COMPLETE: &str = "complete";

/// Personal color result: `{result, season, message, ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct ColorReport {
    /// Season code, 1-4.
    pub result: u8,
    pub season: String,
    pub message: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<VoteCounts>,
}

impl ColorReport {
    /// Report for a single remapped skin-tone code.
    pub fn skin(season: Season) -> Self {
        Self {
            result: season.code(),
            season: season.name().to_string(),
            message: MESSAGE_COMPLETE.to_string(),
            description: season.skin_description().to_string(),
            analysis_type: None,
            distribution: None,
        }
    }

    /// Report for a voted lip-color classification.
    pub fn lip(classification: &Classification) -> Self {
        let season = classification.season;
        Self {
            result: season.code(),
            season: season.name().to_string(),
            message: MESSAGE_COMPLETE.to_string(),
            description: season.lip_description().to_string(),
            analysis_type: Some(season.short_key().to_string()),
            distribution: Some(classification.votes),
        }
    }
}

/// Garment fit result: `{garment_name, distance}` or `{no_match}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FitReport {
    Matched { garment_name: String, distance: f64 },
    NoMatch { no_match: NoMatch },
}

impl From<&MatchOutcome<'_>> for FitReport {
    fn from(outcome: &MatchOutcome<'_>) -> Self {
        match outcome {
            MatchOutcome::Matched { garment, distance } => FitReport::Matched {
                garment_name: garment.name.clone(),
                distance: *distance,
            },
            MatchOutcome::Unmatched(reason) => FitReport::NoMatch { no_match: *reason },
        }
    }
}
