//! Reference lip-color palettes, one per season.

use crate::season::Season;
use crate::types::Rgb;

/// A fixed set of reference colors representing one season.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub season: Season,
    pub colors: &'static [Rgb],
}

const SPRING: [Rgb; 5] = [
    Rgb::new(255, 127, 80),  // coral
    Rgb::new(255, 160, 122), // light salmon
    Rgb::new(250, 128, 114), // salmon
    Rgb::new(238, 88, 62),   // orange red
    Rgb::new(247, 152, 138), // peach pink
];

const SUMMER: [Rgb; 5] = [
    Rgb::new(232, 145, 170), // rose pink
    Rgb::new(190, 120, 150), // mauve
    Rgb::new(200, 90, 130),  // soft raspberry
    Rgb::new(215, 160, 190), // lavender pink
    Rgb::new(199, 130, 140), // dusty rose
];

const AUTUMN: [Rgb; 5] = [
    Rgb::new(180, 80, 55),  // terracotta
    Rgb::new(150, 60, 45),  // brick
    Rgb::new(120, 45, 40),  // brown wine
    Rgb::new(170, 100, 80), // camel rose
    Rgb::new(160, 70, 40),  // rust
];

const WINTER: [Rgb; 5] = [
    Rgb::new(200, 20, 40),  // true red
    Rgb::new(210, 30, 120), // fuchsia
    Rgb::new(140, 20, 70),  // berry
    Rgb::new(100, 20, 60),  // plum
    Rgb::new(180, 10, 50),  // cherry
];

/// The four reference palettes, in tie-break priority order.
pub const REFERENCE_PALETTES: [Palette; 4] = [
    Palette { season: Season::Spring, colors: &SPRING },
    Palette { season: Season::Summer, colors: &SUMMER },
    Palette { season: Season::Autumn, colors: &AUTUMN },
    Palette { season: Season::Winter, colors: &WINTER },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_palettes_cover_every_season_in_order() {
        let seasons: Vec<_> = REFERENCE_PALETTES.iter().map(|p| p.season).collect();
        assert_eq!(seasons, Season::ALL);
        assert!(REFERENCE_PALETTES.iter().all(|p| !p.colors.is_empty()));
    }

    #[test]
    fn test_reference_colors_are_unique_across_palettes() {
        let all: Vec<Rgb> = REFERENCE_PALETTES
            .iter()
            .flat_map(|p| p.colors.iter().copied())
            .collect();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b, "duplicate reference color {a:?}");
            }
        }
    }
}
