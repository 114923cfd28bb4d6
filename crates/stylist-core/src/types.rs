use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("unknown garment category: {0:?} (expected shirt, pants, jacket or t-shirt)")]
    UnknownCategory(String),
    #[error("unknown measurement: {0:?}")]
    UnknownMeasurement(String),
    #[error("invalid value for {key}: {value} (expected a finite, non-negative length in cm)")]
    InvalidValue { key: MeasurementKey, value: f64 },
    #[error("measurement given more than once: {0}")]
    DuplicateMeasurement(MeasurementKey),
}

/// An 8-bit RGB color sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance in RGB space.
    ///
    /// Monotonic in the true distance, so it is enough for nearest-color
    /// comparisons without taking a square root.
    pub fn distance_sq(&self, other: &Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// Garment category in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Shirt,
    Pants,
    Jacket,
    TShirt,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Shirt,
        Category::Pants,
        Category::Jacket,
        Category::TShirt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Shirt => "shirt",
            Category::Pants => "pants",
            Category::Jacket => "jacket",
            Category::TShirt => "t-shirt",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shirt" => Ok(Category::Shirt),
            "pants" => Ok(Category::Pants),
            "jacket" => Ok(Category::Jacket),
            "t-shirt" | "tshirt" | "t_shirt" => Ok(Category::TShirt),
            _ => Err(ParseError::UnknownCategory(s.to_string())),
        }
    }
}

/// Named body dimension shared between measured input and catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKey {
    Height,
    Waist,
    Belly,
    Chest,
    Wrist,
    Neck,
    ArmLength,
    Thigh,
    ShoulderWidth,
    Hips,
    Ankle,
}

impl MeasurementKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementKey::Height => "height",
            MeasurementKey::Waist => "waist",
            MeasurementKey::Belly => "belly",
            MeasurementKey::Chest => "chest",
            MeasurementKey::Wrist => "wrist",
            MeasurementKey::Neck => "neck",
            MeasurementKey::ArmLength => "arm_length",
            MeasurementKey::Thigh => "thigh",
            MeasurementKey::ShoulderWidth => "shoulder_width",
            MeasurementKey::Hips => "hips",
            MeasurementKey::Ankle => "ankle",
        }
    }
}

impl fmt::Display for MeasurementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementKey {
    type Err = ParseError;

    /// Accepts the canonical snake_case names as well as the space- or
    /// dash-separated labels emitted by the measurement pipeline
    /// (e.g. "shoulder width").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        let key = match normalized.as_str() {
            "height" => MeasurementKey::Height,
            "waist" => MeasurementKey::Waist,
            "belly" => MeasurementKey::Belly,
            "chest" => MeasurementKey::Chest,
            "wrist" => MeasurementKey::Wrist,
            "neck" => MeasurementKey::Neck,
            "arm_length" => MeasurementKey::ArmLength,
            "thigh" => MeasurementKey::Thigh,
            "shoulder_width" => MeasurementKey::ShoulderWidth,
            "hips" => MeasurementKey::Hips,
            "ankle" => MeasurementKey::Ankle,
            _ => return Err(ParseError::UnknownMeasurement(s.to_string())),
        };
        Ok(key)
    }
}

impl<'de> Deserialize<'de> for MeasurementKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// Body measurements in centimeters, keyed by dimension.
pub type MeasurementSet = BTreeMap<MeasurementKey, f64>;

/// Check that `value` is a usable length: finite and not negative.
pub fn check_measurement(key: MeasurementKey, value: f64) -> Result<f64, ParseError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ParseError::InvalidValue { key, value })
    }
}

/// Build a [`MeasurementSet`], rejecting bad values and repeated keys.
///
/// Aliases count as the same key, so `"shoulder width"` and
/// `"shoulder_width"` in one input is a duplicate.
pub fn measurement_set<I>(pairs: I) -> Result<MeasurementSet, ParseError>
where
    I: IntoIterator<Item = (MeasurementKey, f64)>,
{
    let mut set = MeasurementSet::new();
    for (key, value) in pairs {
        let value = check_measurement(key, value)?;
        if set.insert(key, value).is_some() {
            return Err(ParseError::DuplicateMeasurement(key));
        }
    }
    Ok(set)
}

/// Build a [`MeasurementSet`] from loosely named `(label, centimeters)` pairs.
pub fn parse_measurements<'a, I>(pairs: I) -> Result<MeasurementSet, ParseError>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let keyed = pairs
        .into_iter()
        .map(|(label, value)| Ok((label.parse::<MeasurementKey>()?, value)))
        .collect::<Result<Vec<_>, ParseError>>()?;
    measurement_set(keyed)
}

/// A catalog entry: a clothing item with its nominal body measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Garment {
    pub name: String,
    pub category: Category,
    pub measures: MeasurementSet,
}
