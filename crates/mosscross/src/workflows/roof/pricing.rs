use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{
    Accessibility, MossCoverage, RoofConfiguration, RoofMaterial, RoofSize, Steepness,
};

/// Schema version understood by [`PricingTable::from_reader`].
pub const PRICING_TABLE_VERSION: u32 = 1;

const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Multiplier configuration applied on top of the per-level base price.
///
/// The table is plain data so operators can tune it in a JSON file without a
/// rebuild. Missing entries price as a neutral multiplier instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTable {
    pub version: u32,
    pub base_price: f64,
    pub size: BTreeMap<RoofSize, f64>,
    pub steepness: BTreeMap<Steepness, f64>,
    pub moss: BTreeMap<MossCoverage, f64>,
    pub material: BTreeMap<RoofMaterial, f64>,
    #[serde(default)]
    pub accessibility: BTreeMap<Accessibility, f64>,
}

impl PricingTable {
    pub fn canonical() -> Self {
        Self {
            version: PRICING_TABLE_VERSION,
            base_price: 300.0,
            size: BTreeMap::from([
                (RoofSize::Small, 0.8),
                (RoofSize::Medium, 1.0),
                (RoofSize::Large, 1.4),
            ]),
            steepness: BTreeMap::from([
                (Steepness::Flat, 0.9),
                (Steepness::Low, 1.0),
                (Steepness::Moderate, 1.1),
                (Steepness::Steep, 1.3),
                (Steepness::VerySteep, 1.6),
            ]),
            moss: BTreeMap::from([
                (MossCoverage::None, 0.8),
                (MossCoverage::Light, 1.0),
                (MossCoverage::Medium, 1.3),
                (MossCoverage::Heavy, 1.8),
            ]),
            material: BTreeMap::from([
                (RoofMaterial::Shingle, 1.0),
                (RoofMaterial::Tile, 1.2),
                (RoofMaterial::Metal, 1.1),
                (RoofMaterial::Slate, 1.4),
                (RoofMaterial::Wood, 1.3),
                (RoofMaterial::Other, 1.1),
            ]),
            accessibility: BTreeMap::from([
                (Accessibility::Easy, 1.0),
                (Accessibility::Moderate, 1.15),
                (Accessibility::Difficult, 1.35),
            ]),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PricingTableError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PricingTableError> {
        let table: Self = serde_json::from_reader(reader)?;
        table.validate()?;
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), PricingTableError> {
        if self.version != PRICING_TABLE_VERSION {
            return Err(PricingTableError::UnsupportedVersion {
                found: self.version,
                expected: PRICING_TABLE_VERSION,
            });
        }

        if !(self.base_price.is_finite() && self.base_price > 0.0) {
            return Err(PricingTableError::InvalidBasePrice(self.base_price));
        }

        check_multipliers(PriceFactor::Size, &self.size, RoofSize::as_str)?;
        check_multipliers(PriceFactor::Steepness, &self.steepness, Steepness::as_str)?;
        check_multipliers(PriceFactor::Moss, &self.moss, MossCoverage::as_str)?;
        check_multipliers(PriceFactor::Material, &self.material, RoofMaterial::as_str)?;
        check_multipliers(
            PriceFactor::Accessibility,
            &self.accessibility,
            Accessibility::as_str,
        )?;

        Ok(())
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::canonical()
    }
}

fn check_multipliers<K: Copy>(
    factor: PriceFactor,
    entries: &BTreeMap<K, f64>,
    key_name: fn(K) -> &'static str,
) -> Result<(), PricingTableError> {
    for (key, value) in entries {
        if !(value.is_finite() && *value > 0.0) {
            return Err(PricingTableError::InvalidMultiplier {
                factor,
                key: key_name(*key).to_string(),
                value: *value,
            });
        }
    }
    Ok(())
}

/// Failure loading or validating a pricing table.
#[derive(Debug, thiserror::Error)]
pub enum PricingTableError {
    #[error("failed to read pricing table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid pricing table JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported pricing table version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("base price must be a positive amount, found {0}")]
    InvalidBasePrice(f64),
    #[error("{factor} multiplier for '{key}' must be positive, found {value}")]
    InvalidMultiplier {
        factor: PriceFactor,
        key: String,
        value: f64,
    },
}

/// Inputs that scale the base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceFactor {
    Levels,
    Size,
    Steepness,
    Moss,
    Material,
    Accessibility,
}

impl PriceFactor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Levels => "levels",
            Self::Size => "size",
            Self::Steepness => "steepness",
            Self::Moss => "moss",
            Self::Material => "material",
            Self::Accessibility => "accessibility",
        }
    }
}

impl fmt::Display for PriceFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Single multiplier applied while pricing, kept for transparent quotes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateFactor {
    pub factor: PriceFactor,
    pub multiplier: f64,
}

/// Rounded price quote derived from a configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub amount: u32,
    pub base_price: f64,
    pub table_version: u32,
    pub factors: Vec<EstimateFactor>,
}

impl PriceEstimate {
    /// Dollar amount with thousands separators, e.g. `$1,234`.
    pub fn display_amount(&self) -> String {
        let digits = self.amount.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (index, ch) in digits.chars().enumerate() {
            if index > 0 && (digits.len() - index) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("${grouped}")
    }
}

/// Stateless pricing engine bound to one multiplier table.
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    table: PricingTable,
}

impl Estimator {
    pub fn new(table: PricingTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PricingTable {
        &self.table
    }

    pub fn estimate(&self, config: &RoofConfiguration) -> PriceEstimate {
        compute_estimate(config, &self.table)
    }
}

/// Price a configuration against `table`.
pub fn compute_estimate(config: &RoofConfiguration, table: &PricingTable) -> PriceEstimate {
    let mut factors = vec![
        EstimateFactor {
            factor: PriceFactor::Levels,
            multiplier: f64::from(config.levels.get()),
        },
        EstimateFactor {
            factor: PriceFactor::Size,
            multiplier: lookup(&table.size, config.total_size, PriceFactor::Size),
        },
        EstimateFactor {
            factor: PriceFactor::Steepness,
            multiplier: lookup(&table.steepness, config.steepness, PriceFactor::Steepness),
        },
        EstimateFactor {
            factor: PriceFactor::Moss,
            multiplier: lookup(&table.moss, config.moss_coverage, PriceFactor::Moss),
        },
        EstimateFactor {
            factor: PriceFactor::Material,
            multiplier: lookup(&table.material, config.material, PriceFactor::Material),
        },
    ];

    if let Some(access) = config.accessibility {
        factors.push(EstimateFactor {
            factor: PriceFactor::Accessibility,
            multiplier: lookup(&table.accessibility, access, PriceFactor::Accessibility),
        });
    }

    let raw = factors
        .iter()
        .fold(table.base_price, |total, factor| total * factor.multiplier);
    let amount = raw.round().clamp(0.0, f64::from(u32::MAX)) as u32;

    PriceEstimate {
        amount,
        base_price: table.base_price,
        table_version: table.version,
        factors,
    }
}

fn lookup<K>(entries: &BTreeMap<K, f64>, key: K, factor: PriceFactor) -> f64
where
    K: Ord + fmt::Debug,
{
    match entries.get(&key) {
        Some(multiplier) => *multiplier,
        None => {
            warn!(%factor, ?key, "pricing table has no entry, using neutral multiplier");
            NEUTRAL_MULTIPLIER
        }
    }
}
