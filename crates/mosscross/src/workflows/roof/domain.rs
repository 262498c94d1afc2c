use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Errors raised when a roof field name or value falls outside its domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoofFieldError {
    #[error("unknown roof field '{0}'")]
    UnknownField(String),
    #[error("'{value}' is not a valid {field}")]
    InvalidValue { field: &'static str, value: String },
    #[error("roof levels must be between 1 and 3, found {0}")]
    LevelsOutOfRange(u8),
}

fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace([' ', '-'], "_")
}

/// Number of distinct roof tiers, always within 1..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RoofLevels(u8);

impl RoofLevels {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 3;

    pub fn new(value: u8) -> Result<Self, RoofFieldError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RoofFieldError::LevelsOutOfRange(value))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub const fn ordered() -> [Self; 3] {
        [Self(1), Self(2), Self(3)]
    }

    pub fn label(self) -> String {
        match self.0 {
            1 => "1 Level".to_string(),
            count => format!("{count} Levels"),
        }
    }
}

impl Default for RoofLevels {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for RoofLevels {
    type Error = RoofFieldError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoofLevels> for u8 {
    fn from(levels: RoofLevels) -> Self {
        levels.0
    }
}

impl FromStr for RoofLevels {
    type Err = RoofFieldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw
            .trim()
            .parse::<u8>()
            .map_err(|_| RoofFieldError::InvalidValue {
                field: "levels",
                value: raw.to_string(),
            })?;
        Self::new(value)
    }
}

impl fmt::Display for RoofLevels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Approximate total roof area bracket.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum RoofSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl RoofSize {
    pub const fn ordered() -> [Self; 3] {
        [Self::Small, Self::Medium, Self::Large]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "Small (under 1000 sq ft)",
            Self::Medium => "Medium (1000-2000 sq ft)",
            Self::Large => "Large (over 2000 sq ft)",
        }
    }
}

impl FromStr for RoofSize {
    type Err = RoofFieldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = normalize(raw);
        Self::ordered()
            .into_iter()
            .find(|size| size.as_str() == key)
            .ok_or_else(|| RoofFieldError::InvalidValue {
                field: "total size",
                value: raw.to_string(),
            })
    }
}

// Request bodies reuse the lenient `FromStr` parsing so display labels such as
// "Very Steep" are accepted alongside the snake_case keys.
macro_rules! deserialize_via_from_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl TryFrom<String> for $ty {
                type Error = RoofFieldError;

                fn try_from(raw: String) -> Result<Self, Self::Error> {
                    raw.parse()
                }
            }
        )+
    };
}

deserialize_via_from_str!(RoofSize, Steepness, MossCoverage, RoofMaterial, Accessibility);

/// Pitch of the roof, ordered from flat to very steep.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Steepness {
    Flat,
    Low,
    #[default]
    Moderate,
    Steep,
    VerySteep,
}

impl Steepness {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Flat,
            Self::Low,
            Self::Moderate,
            Self::Steep,
            Self::VerySteep,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::Steep => "steep",
            Self::VerySteep => "very_steep",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Flat => "Flat",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::Steep => "Steep",
            Self::VerySteep => "Very Steep",
        }
    }
}

impl FromStr for Steepness {
    type Err = RoofFieldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = normalize(raw);
        Self::ordered()
            .into_iter()
            .find(|steepness| steepness.as_str() == key)
            .ok_or_else(|| RoofFieldError::InvalidValue {
                field: "steepness",
                value: raw.to_string(),
            })
    }
}

/// Density of moss, algae, or other organic growth on the roof surface.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum MossCoverage {
    None,
    #[default]
    Light,
    Medium,
    Heavy,
}

impl MossCoverage {
    pub const fn ordered() -> [Self; 4] {
        [Self::None, Self::Light, Self::Medium, Self::Heavy]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Heavy => "heavy",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Light => "Light",
            Self::Medium => "Medium",
            Self::Heavy => "Heavy",
        }
    }
}

impl FromStr for MossCoverage {
    type Err = RoofFieldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = normalize(raw);
        Self::ordered()
            .into_iter()
            .find(|coverage| coverage.as_str() == key)
            .ok_or_else(|| RoofFieldError::InvalidValue {
                field: "moss coverage",
                value: raw.to_string(),
            })
    }
}

/// Primary roofing material.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum RoofMaterial {
    #[default]
    Shingle,
    Tile,
    Metal,
    Slate,
    Wood,
    Other,
}

impl RoofMaterial {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Shingle,
            Self::Tile,
            Self::Metal,
            Self::Slate,
            Self::Wood,
            Self::Other,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shingle => "shingle",
            Self::Tile => "tile",
            Self::Metal => "metal",
            Self::Slate => "slate",
            Self::Wood => "wood",
            Self::Other => "other",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Shingle => "Asphalt Shingle",
            Self::Tile => "Clay/Concrete Tile",
            Self::Metal => "Metal",
            Self::Slate => "Slate",
            Self::Wood => "Wood Shake",
            Self::Other => "Other",
        }
    }
}

impl FromStr for RoofMaterial {
    type Err = RoofFieldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = normalize(raw);
        Self::ordered()
            .into_iter()
            .find(|material| material.as_str() == key || normalize(material.label()) == key)
            .ok_or_else(|| RoofFieldError::InvalidValue {
                field: "material",
                value: raw.to_string(),
            })
    }
}

/// How hard it is for the crew to reach the roof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Accessibility {
    Easy,
    Moderate,
    Difficult,
}

impl Accessibility {
    pub const fn ordered() -> [Self; 3] {
        [Self::Easy, Self::Moderate, Self::Difficult]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Moderate => "moderate",
            Self::Difficult => "difficult",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Moderate => "Moderate",
            Self::Difficult => "Difficult",
        }
    }
}

impl FromStr for Accessibility {
    type Err = RoofFieldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = normalize(raw);
        Self::ordered()
            .into_iter()
            .find(|access| access.as_str() == key)
            .ok_or_else(|| RoofFieldError::InvalidValue {
                field: "accessibility",
                value: raw.to_string(),
            })
    }
}

/// The visitor's current roof description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoofConfiguration {
    pub levels: RoofLevels,
    #[serde(alias = "totalSize", alias = "sizePerLevel", alias = "size_per_level")]
    pub total_size: RoofSize,
    pub steepness: Steepness,
    #[serde(alias = "mossCoverage")]
    pub moss_coverage: MossCoverage,
    pub material: RoofMaterial,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<Accessibility>,
}

impl RoofConfiguration {
    /// Replace exactly one field.
    pub fn apply(&mut self, field: RoofField) {
        match field {
            RoofField::Levels(levels) => self.levels = levels,
            RoofField::TotalSize(size) => self.total_size = size,
            RoofField::Steepness(steepness) => self.steepness = steepness,
            RoofField::MossCoverage(coverage) => self.moss_coverage = coverage,
            RoofField::Material(material) => self.material = material,
            RoofField::Accessibility(access) => self.accessibility = access,
        }
    }

    pub fn field(&self, kind: RoofFieldKind) -> RoofField {
        match kind {
            RoofFieldKind::Levels => RoofField::Levels(self.levels),
            RoofFieldKind::TotalSize => RoofField::TotalSize(self.total_size),
            RoofFieldKind::Steepness => RoofField::Steepness(self.steepness),
            RoofFieldKind::MossCoverage => RoofField::MossCoverage(self.moss_coverage),
            RoofFieldKind::Material => RoofField::Material(self.material),
            RoofFieldKind::Accessibility => RoofField::Accessibility(self.accessibility),
        }
    }
}

/// Names of the configurable roof fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoofFieldKind {
    Levels,
    TotalSize,
    Steepness,
    MossCoverage,
    Material,
    Accessibility,
}

impl RoofFieldKind {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Levels,
            Self::TotalSize,
            Self::Steepness,
            Self::MossCoverage,
            Self::Material,
            Self::Accessibility,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Levels => "levels",
            Self::TotalSize => "total_size",
            Self::Steepness => "steepness",
            Self::MossCoverage => "moss_coverage",
            Self::Material => "material",
            Self::Accessibility => "accessibility",
        }
    }
}

impl FromStr for RoofFieldKind {
    type Err = RoofFieldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        // camelCase names from browser clients collapse onto the snake_case keys
        let key: String = raw
            .trim()
            .chars()
            .filter(|ch| *ch != '_' && *ch != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        match key.as_str() {
            "levels" => Ok(Self::Levels),
            "totalsize" | "sizeperlevel" | "size" => Ok(Self::TotalSize),
            "steepness" => Ok(Self::Steepness),
            "mosscoverage" | "moss" => Ok(Self::MossCoverage),
            "material" => Ok(Self::Material),
            "accessibility" => Ok(Self::Accessibility),
            _ => Err(RoofFieldError::UnknownField(raw.to_string())),
        }
    }
}

/// One field assignment carrying a value already inside its domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum RoofField {
    Levels(RoofLevels),
    TotalSize(RoofSize),
    Steepness(Steepness),
    MossCoverage(MossCoverage),
    Material(RoofMaterial),
    Accessibility(Option<Accessibility>),
}

impl RoofField {
    /// Parse a `(field, value)` pair coming from a form control or CLI flag.
    pub fn parse(name: &str, value: &str) -> Result<Self, RoofFieldError> {
        let kind = name.parse::<RoofFieldKind>()?;
        let field = match kind {
            RoofFieldKind::Levels => Self::Levels(value.parse()?),
            RoofFieldKind::TotalSize => Self::TotalSize(value.parse()?),
            RoofFieldKind::Steepness => Self::Steepness(value.parse()?),
            RoofFieldKind::MossCoverage => Self::MossCoverage(value.parse()?),
            RoofFieldKind::Material => Self::Material(value.parse()?),
            RoofFieldKind::Accessibility => {
                let trimmed = value.trim();
                if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
                    Self::Accessibility(None)
                } else {
                    Self::Accessibility(Some(trimmed.parse()?))
                }
            }
        };
        Ok(field)
    }

    pub const fn kind(&self) -> RoofFieldKind {
        match self {
            Self::Levels(_) => RoofFieldKind::Levels,
            Self::TotalSize(_) => RoofFieldKind::TotalSize,
            Self::Steepness(_) => RoofFieldKind::Steepness,
            Self::MossCoverage(_) => RoofFieldKind::MossCoverage,
            Self::Material(_) => RoofFieldKind::Material,
            Self::Accessibility(_) => RoofFieldKind::Accessibility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_reject_values_outside_one_to_three() {
        assert_eq!(RoofLevels::new(0), Err(RoofFieldError::LevelsOutOfRange(0)));
        assert_eq!(RoofLevels::new(4), Err(RoofFieldError::LevelsOutOfRange(4)));
        assert_eq!(RoofLevels::new(3).map(RoofLevels::get), Ok(3));
    }

    #[test]
    fn display_labels_parse_back_to_variants() {
        assert_eq!("Very Steep".parse::<Steepness>(), Ok(Steepness::VerySteep));
        assert_eq!("very-steep".parse::<Steepness>(), Ok(Steepness::VerySteep));
        assert_eq!("Heavy".parse::<MossCoverage>(), Ok(MossCoverage::Heavy));
        assert_eq!(
            "Clay/Concrete Tile".parse::<RoofMaterial>(),
            Ok(RoofMaterial::Tile)
        );
        assert!("granite".parse::<RoofMaterial>().is_err());
    }

    #[test]
    fn field_names_accept_camel_case() {
        assert_eq!(
            "mossCoverage".parse::<RoofFieldKind>(),
            Ok(RoofFieldKind::MossCoverage)
        );
        assert_eq!(
            "sizePerLevel".parse::<RoofFieldKind>(),
            Ok(RoofFieldKind::TotalSize)
        );
        assert_eq!(
            "colour".parse::<RoofFieldKind>(),
            Err(RoofFieldError::UnknownField("colour".to_string()))
        );
    }

    #[test]
    fn configuration_deserializes_browser_payloads() {
        let config: RoofConfiguration = serde_json::from_str(
            r#"{"levels":2,"totalSize":"large","steepness":"very_steep","mossCoverage":"heavy"}"#,
        )
        .expect("payload parses");

        assert_eq!(config.levels.get(), 2);
        assert_eq!(config.total_size, RoofSize::Large);
        assert_eq!(config.steepness, Steepness::VerySteep);
        assert_eq!(config.moss_coverage, MossCoverage::Heavy);
        assert_eq!(config.material, RoofMaterial::Shingle);
        assert_eq!(config.accessibility, None);
    }

    #[test]
    fn configuration_accepts_display_labels() {
        let config: RoofConfiguration = serde_json::from_str(
            r#"{"levels":1,"totalSize":"medium","steepness":"Very Steep","mossCoverage":"Light","material":"Wood Shake","accessibility":"Difficult"}"#,
        )
        .expect("payload parses");

        assert_eq!(config.steepness, Steepness::VerySteep);
        assert_eq!(config.moss_coverage, MossCoverage::Light);
        assert_eq!(config.material, RoofMaterial::Wood);
        assert_eq!(config.accessibility, Some(Accessibility::Difficult));

        let echoed = serde_json::to_value(config).expect("serialize");
        assert_eq!(echoed["steepness"], serde_json::json!("very_steep"));
    }

    #[test]
    fn configuration_rejects_unknown_enum_values() {
        let result = serde_json::from_str::<RoofConfiguration>(r#"{"steepness":"vertical"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn configuration_rejects_out_of_range_levels() {
        let result = serde_json::from_str::<RoofConfiguration>(r#"{"levels":5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn accessibility_none_clears_the_field() {
        assert_eq!(
            RoofField::parse("accessibility", "none"),
            Ok(RoofField::Accessibility(None))
        );
        assert_eq!(
            RoofField::parse("accessibility", "Difficult"),
            Ok(RoofField::Accessibility(Some(Accessibility::Difficult)))
        );
    }
}
