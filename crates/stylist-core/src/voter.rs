//! Nearest-reference color voting.
//!
//! Each sample votes for the season whose palette holds its single nearest
//! reference color (squared RGB distance). The season with the most votes
//! wins; ties resolve in the fixed priority Spring > Summer > Autumn > Winter.

use crate::palette::{Palette, REFERENCE_PALETTES};
use crate::season::Season;
use crate::types::Rgb;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("invalid input: no color samples to classify")]
    EmptySamples,
    #[error("invalid input: palettes contain no reference colors")]
    NoReferenceColors,
}

/// Per-season sample counts for one classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteCounts {
    counts: [usize; 4],
}

impl VoteCounts {
    pub fn get(&self, season: Season) -> usize {
        self.counts[season.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    fn add(&mut self, season: Season) {
        self.counts[season.index()] += 1;
    }

    /// Seasons with their counts, in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Season, usize)> + '_ {
        Season::ALL.iter().map(move |&s| (s, self.get(s)))
    }

    /// Season with the highest count; the earliest in priority order wins a tie.
    pub fn winner(&self) -> Season {
        let mut best = Season::ALL[0];
        for season in Season::ALL {
            if self.get(season) > self.get(best) {
                best = season;
            }
        }
        best
    }
}

impl Serialize for VoteCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (season, count) in self.iter() {
            map.serialize_entry(season.name(), &count)?;
        }
        map.end()
    }
}

/// Outcome of a voted classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub season: Season,
    pub votes: VoteCounts,
}

/// Classifies color samples against a set of season palettes.
#[derive(Debug, Clone, Copy)]
pub struct ColorVoter<'a> {
    palettes: &'a [Palette],
}

impl Default for ColorVoter<'static> {
    fn default() -> Self {
        Self::new(&REFERENCE_PALETTES)
    }
}

impl<'a> ColorVoter<'a> {
    pub fn new(palettes: &'a [Palette]) -> Self {
        Self { palettes }
    }

    /// Season of the palette holding the reference color nearest to `sample`.
    ///
    /// Returns `None` only when the palettes hold no colors at all.
    pub fn nearest(&self, sample: &Rgb) -> Option<Season> {
        let mut best: Option<(u32, Season)> = None;
        for palette in self.palettes {
            for reference in palette.colors {
                let d = sample.distance_sq(reference);
                if best.map_or(true, |(best_d, _)| d < best_d) {
                    best = Some((d, palette.season));
                }
            }
        }
        best.map(|(_, season)| season)
    }

    pub fn classify(&self, samples: &[Rgb]) -> Result<Classification, ClassifyError> {
        if samples.is_empty() {
            return Err(ClassifyError::EmptySamples);
        }

        let mut votes = VoteCounts::default();
        for sample in samples {
            let season = self.nearest(sample).ok_or(ClassifyError::NoReferenceColors)?;
            votes.add(season);
        }

        let season = votes.winner();
        tracing::debug!(
            samples = samples.len(),
            winner = %season,
            votes = ?votes.counts,
            "color vote complete"
        );

        Ok(Classification { season, votes })
    }
}

/// Classify `samples` against the given palettes.
pub fn classify(samples: &[Rgb], palettes: &[Palette]) -> Result<Classification, ClassifyError> {
    ColorVoter::new(palettes).classify(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette_colors(season: Season) -> &'static [Rgb] {
        REFERENCE_PALETTES[season.index()].colors
    }

    #[test]
    fn test_exact_palette_colors_win_unanimously() {
        let voter = ColorVoter::default();
        for season in Season::ALL {
            let samples = palette_colors(season).to_vec();
            let result = voter.classify(&samples).unwrap();
            assert_eq!(result.season, season);
            assert_eq!(result.votes.get(season), samples.len());
            assert_eq!(result.votes.total(), samples.len());
        }
    }

    #[test]
    fn test_votes_sum_to_sample_count() {
        let samples: Vec<Rgb> = (0..40u8)
            .map(|i| Rgb::new(i.wrapping_mul(37), i.wrapping_mul(11), 255 - i * 3))
            .collect();
        let result = ColorVoter::default().classify(&samples).unwrap();
        assert_eq!(result.votes.total(), 40);
        assert!(Season::ALL.contains(&result.season));
    }

    #[test]
    fn test_majority_wins() {
        let mut samples = vec![palette_colors(Season::Winter)[0]; 3];
        samples.push(palette_colors(Season::Spring)[0]);
        let result = ColorVoter::default().classify(&samples).unwrap();
        assert_eq!(result.season, Season::Winter);
        assert_eq!(result.votes.get(Season::Winter), 3);
        assert_eq!(result.votes.get(Season::Spring), 1);
    }

    #[test]
    fn test_tie_resolves_by_priority() {
        let samples = vec![
            palette_colors(Season::Winter)[0],
            palette_colors(Season::Summer)[0],
        ];
        let result = ColorVoter::default().classify(&samples).unwrap();
        assert_eq!(result.season, Season::Summer);

        let samples = vec![
            palette_colors(Season::Autumn)[1],
            palette_colors(Season::Winter)[1],
        ];
        let result = ColorVoter::default().classify(&samples).unwrap();
        assert_eq!(result.season, Season::Autumn);
    }

    #[test]
    fn test_equidistant_reference_prefers_earlier_palette() {
        const A: [Rgb; 1] = [Rgb::new(0, 0, 0)];
        const B: [Rgb; 1] = [Rgb::new(20, 0, 0)];
        let palettes = [
            Palette { season: Season::Autumn, colors: &A },
            Palette { season: Season::Spring, colors: &B },
        ];
        let result = classify(&[Rgb::new(10, 0, 0)], &palettes).unwrap();
        assert_eq!(result.season, Season::Autumn);
    }

    #[test]
    fn test_empty_samples_rejected() {
        assert_eq!(
            ColorVoter::default().classify(&[]),
            Err(ClassifyError::EmptySamples)
        );
    }

    #[test]
    fn test_empty_palettes_rejected() {
        assert_eq!(
            classify(&[Rgb::new(1, 2, 3)], &[]),
            Err(ClassifyError::NoReferenceColors)
        );
    }

    #[test]
    fn test_vote_counts_serialize_by_season_name() {
        let samples = vec![palette_colors(Season::Summer)[2]; 2];
        let result = ColorVoter::default().classify(&samples).unwrap();
        let json = serde_json::to_value(result.votes).unwrap();
        assert_eq!(json["Summer"], 2);
        assert_eq!(json["Spring"], 0);
        assert_eq!(json.as_object().unwrap().len(), 4);
    }
}
