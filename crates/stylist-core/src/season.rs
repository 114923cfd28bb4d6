//! Personal color seasons and the skin-tone code table.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeasonError {
    #[error("unknown skin classifier code: {0} (expected 0-3)")]
    UnknownRawCode(u8),
    #[error("unknown season code: {0} (expected 1-4)")]
    UnknownSeasonCode(u8),
}

/// One of the four personal-color categories.
///
/// Declaration order is the vote tie-break priority:
/// Spring > Summer > Autumn > Winter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// All seasons, in tie-break priority order.
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    /// Wire code, 1-4.
    pub fn code(&self) -> u8 {
        match self {
            Season::Spring => 1,
            Season::Summer => 2,
            Season::Autumn => 3,
            Season::Winter => 4,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, SeasonError> {
        match code {
            1 => Ok(Season::Spring),
            2 => Ok(Season::Summer),
            3 => Ok(Season::Autumn),
            4 => Ok(Season::Winter),
            other => Err(SeasonError::UnknownSeasonCode(other)),
        }
    }

    /// Position in [`Season::ALL`].
    pub fn index(&self) -> usize {
        self.code() as usize - 1
    }

    pub fn name(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }

    /// Short key reported as the lip analysis type.
    pub fn short_key(&self) -> &'static str {
        match self {
            Season::Spring => "sp",
            Season::Summer => "su",
            Season::Autumn => "au",
            Season::Winter => "win",
        }
    }

    pub fn skin_description(&self) -> &'static str {
        match self {
            Season::Spring => {
                "Warm and bright tones - light, vivid colors such as coral, peach and gold"
            }
            Season::Summer => {
                "Cool and soft tones - muted pastels such as lavender, pale pink and soft blue"
            }
            Season::Autumn => {
                "Warm and deep tones - rich earth colors such as terracotta, olive green and camel"
            }
            Season::Winter => {
                "Cool and intense tones - bright, contrasting colors such as black, pure white and deep red"
            }
        }
    }

    pub fn lip_description(&self) -> &'static str {
        match self {
            Season::Spring => "Warm lips - recommended: coral, peach, orange-red",
            Season::Summer => "Soft cool lips - recommended: rose, mauve, soft bluish red",
            Season::Autumn => "Deep warm lips - recommended: terracotta, wine, brown",
            Season::Winter => "Intense cool lips - recommended: true red, fuchsia, berry",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Map a raw skin-tone classifier output onto a season.
///
/// The upstream classifier's label space is shifted relative to the season
/// codes; this table is the fixed correction and must stay a literal table.
pub fn remap_skin_code(raw: u8) -> Result<Season, SeasonError> {
    match raw {
        0 => Ok(Season::Autumn),
        1 => Ok(Season::Spring),
        2 => Ok(Season::Summer),
        3 => Ok(Season::Winter),
        other => Err(SeasonError::UnknownRawCode(other)),
    }
}
