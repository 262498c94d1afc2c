//! Proportional roof diagram derived from the same configuration as the quote.
//!
//! Levels are emitted bottom-to-top: index 0 is the ground-most, widest tier and
//! each tier above it tapers by a fixed share of the base width. Geometry uses
//! its own steepness table (eave inset); the pricing multipliers are never
//! reused here.

mod svg;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{MossCoverage, RoofConfiguration, RoofSize, Steepness};

pub use svg::render_svg;

const DEFAULT_BASE_WIDTH: f64 = 180.0;
const DEFAULT_LEVEL_HEIGHT: f64 = 60.0;
const CANONICAL_MIN_RATIO: f64 = 0.4;
const CANONICAL_MAX_RATIO: f64 = 1.5;
const FULL_INTENSITY: f64 = 1.0;
const DEFAULT_BASE_HUE: Rgb = Rgb::new(144, 188, 143);

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `intensity` (clamped to `[0, 1]`), flooring the result.
    pub fn scaled(self, intensity: f64) -> Self {
        let intensity = if intensity.is_finite() {
            intensity.clamp(0.0, 1.0)
        } else {
            1.0
        };
        let scale = |channel: u8| (f64::from(channel) * intensity).floor() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Drawable tier of the roof diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelGeometry {
    /// 1-based tier number counted from the ground.
    pub level: u8,
    pub width: f64,
    pub height: f64,
    pub color: Rgb,
    /// Percent of the width inset on each side along the lower edge.
    pub eave_inset_pct: f64,
}

/// Geometry tables driving [`compute_levels`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramLayout {
    pub size_widths: BTreeMap<RoofSize, f64>,
    pub level_height: f64,
    pub taper_per_level: f64,
    pub min_width_ratio: f64,
    pub max_width_ratio: f64,
    pub palette: Vec<Rgb>,
    pub moss_intensity: BTreeMap<MossCoverage, f64>,
    pub eave_insets: BTreeMap<Steepness, f64>,
}

impl DiagramLayout {
    pub fn canonical() -> Self {
        Self {
            size_widths: BTreeMap::from([
                (RoofSize::Small, 140.0),
                (RoofSize::Medium, 180.0),
                (RoofSize::Large, 220.0),
            ]),
            level_height: DEFAULT_LEVEL_HEIGHT,
            taper_per_level: 0.15,
            min_width_ratio: CANONICAL_MIN_RATIO,
            max_width_ratio: CANONICAL_MAX_RATIO,
            palette: vec![
                DEFAULT_BASE_HUE,
                Rgb::new(144, 238, 144),
                Rgb::new(152, 251, 152),
            ],
            moss_intensity: BTreeMap::from([
                (MossCoverage::None, 0.3),
                (MossCoverage::Light, 0.5),
                (MossCoverage::Medium, 0.7),
                (MossCoverage::Heavy, 0.9),
            ]),
            eave_insets: BTreeMap::from([
                (Steepness::Flat, 10.0),
                (Steepness::Low, 15.0),
                (Steepness::Moderate, 20.0),
                (Steepness::Steep, 25.0),
                (Steepness::VerySteep, 30.0),
            ]),
        }
    }

    pub fn base_width(&self, size: RoofSize) -> f64 {
        match self.size_widths.get(&size) {
            Some(width) if width.is_finite() && *width > 0.0 => *width,
            _ => {
                warn!(?size, "diagram layout has no usable width, using default");
                DEFAULT_BASE_WIDTH
            }
        }
    }

    pub fn intensity(&self, coverage: MossCoverage) -> f64 {
        match self.moss_intensity.get(&coverage) {
            Some(intensity) => *intensity,
            None => {
                warn!(?coverage, "diagram layout has no moss intensity, using full color");
                FULL_INTENSITY
            }
        }
    }

    pub fn eave_inset(&self, steepness: Steepness) -> f64 {
        self.eave_insets
            .get(&steepness)
            .copied()
            .unwrap_or(0.0)
            .clamp(0.0, 45.0)
    }

    pub fn compute_levels(&self, config: &RoofConfiguration) -> Vec<LevelGeometry> {
        let base_width = self.base_width(config.total_size);
        let (min_ratio, max_ratio) = self.width_bounds();
        let height = if self.level_height.is_finite() && self.level_height > 0.0 {
            self.level_height
        } else {
            DEFAULT_LEVEL_HEIGHT
        };
        let intensity = self.intensity(config.moss_coverage);
        let inset = self.eave_inset(config.steepness);

        (0..config.levels.get())
            .map(|index| {
                let ratio = (1.0 - self.taper_per_level * f64::from(index))
                    .clamp(min_ratio, max_ratio);
                let hue = if self.palette.is_empty() {
                    DEFAULT_BASE_HUE
                } else {
                    self.palette[usize::from(index) % self.palette.len()]
                };

                LevelGeometry {
                    level: index + 1,
                    width: base_width * ratio,
                    height,
                    color: hue.scaled(intensity),
                    eave_inset_pct: inset,
                }
            })
            .collect()
    }

    fn width_bounds(&self) -> (f64, f64) {
        let min = if self.min_width_ratio.is_finite() && self.min_width_ratio > 0.0 {
            self.min_width_ratio
        } else {
            CANONICAL_MIN_RATIO
        };
        let max = if self.max_width_ratio.is_finite() && self.max_width_ratio >= min {
            self.max_width_ratio
        } else {
            CANONICAL_MAX_RATIO.max(min)
        };
        (min, max)
    }
}

impl Default for DiagramLayout {
    fn default() -> Self {
        Self::canonical()
    }
}

/// Lay out `config` with `layout`, bottom tier first.
pub fn compute_levels(config: &RoofConfiguration, layout: &DiagramLayout) -> Vec<LevelGeometry> {
    layout.compute_levels(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::roof::domain::RoofLevels;

    fn config(levels: u8, size: RoofSize) -> RoofConfiguration {
        RoofConfiguration {
            levels: RoofLevels::new(levels).expect("valid levels"),
            total_size: size,
            ..RoofConfiguration::default()
        }
    }

    #[test]
    fn emits_one_positive_entry_per_level() {
        let layout = DiagramLayout::canonical();
        for levels in RoofLevels::ordered() {
            for size in RoofSize::ordered() {
                let cfg = RoofConfiguration {
                    levels,
                    total_size: size,
                    ..RoofConfiguration::default()
                };
                let geometry = compute_levels(&cfg, &layout);
                assert_eq!(geometry.len(), usize::from(levels.get()));
                assert!(geometry.iter().all(|g| g.width > 0.0 && g.height > 0.0));
            }
        }
    }

    #[test]
    fn tiers_taper_from_bottom_to_top() {
        let geometry = compute_levels(&config(3, RoofSize::Medium), &DiagramLayout::canonical());
        let widths: Vec<f64> = geometry.iter().map(|g| g.width).collect();
        assert!((widths[0] - 180.0).abs() < 1e-9);
        assert!((widths[1] - 153.0).abs() < 1e-9);
        assert!((widths[2] - 126.0).abs() < 1e-9);
        assert_eq!(
            geometry.iter().map(|g| g.level).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn steep_taper_is_clamped_to_minimum_ratio() {
        let layout = DiagramLayout {
            taper_per_level: 0.5,
            ..DiagramLayout::canonical()
        };
        let geometry = layout.compute_levels(&config(3, RoofSize::Large));
        // 1.0 - 0.5 * 2 = 0.0, clamped to 0.4 of 220
        assert!((geometry[2].width - 88.0).abs() < 1e-9);
    }

    #[test]
    fn moss_intensity_darkens_palette() {
        let mut cfg = config(1, RoofSize::Medium);
        cfg.moss_coverage = MossCoverage::Heavy;
        let geometry = compute_levels(&cfg, &DiagramLayout::canonical());
        // floor(144 * 0.9), floor(188 * 0.9), floor(143 * 0.9)
        assert_eq!(geometry[0].color, Rgb::new(129, 169, 128));
        assert_eq!(geometry[0].color.css(), "rgb(129, 169, 128)");
    }

    #[test]
    fn eave_inset_follows_geometry_table() {
        let mut cfg = config(2, RoofSize::Small);
        cfg.steepness = Steepness::VerySteep;
        let geometry = compute_levels(&cfg, &DiagramLayout::canonical());
        assert!(geometry.iter().all(|g| (g.eave_inset_pct - 30.0).abs() < 1e-9));
    }

    #[test]
    fn missing_width_uses_default() {
        let mut layout = DiagramLayout::canonical();
        layout.size_widths.clear();
        let geometry = layout.compute_levels(&config(1, RoofSize::Large));
        assert!((geometry[0].width - DEFAULT_BASE_WIDTH).abs() < 1e-9);
    }

    #[test]
    fn invalid_width_bounds_fall_back_to_canonical_ratios() {
        let layout = DiagramLayout {
            taper_per_level: 0.5,
            min_width_ratio: f64::NAN,
            max_width_ratio: -1.0,
            ..DiagramLayout::canonical()
        };
        let geometry = layout.compute_levels(&config(3, RoofSize::Medium));
        // tier 3 ratio 0.0 clamps up to 0.4 of 180
        assert!((geometry[2].width - 72.0).abs() < 1e-9);
        assert!((geometry[0].width - 180.0).abs() < 1e-9);
    }

    #[test]
    fn missing_moss_intensity_keeps_full_color() {
        let mut layout = DiagramLayout::canonical();
        layout.moss_intensity.remove(&MossCoverage::Medium);
        let mut cfg = config(1, RoofSize::Medium);
        cfg.moss_coverage = MossCoverage::Medium;

        assert_eq!(layout.intensity(MossCoverage::Medium), FULL_INTENSITY);
        let geometry = layout.compute_levels(&cfg);
        assert_eq!(geometry[0].color, DEFAULT_BASE_HUE);
    }

    #[test]
    fn empty_palette_falls_back_to_base_hue() {
        let layout = DiagramLayout {
            palette: Vec::new(),
            ..DiagramLayout::canonical()
        };
        let geometry = layout.compute_levels(&config(2, RoofSize::Medium));
        assert_eq!(geometry[1].color, DEFAULT_BASE_HUE.scaled(0.5));
    }
}
