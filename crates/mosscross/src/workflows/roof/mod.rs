//! Roof configuration, pricing, and diagram derivation.

pub mod configurator;
pub mod diagram;
pub mod domain;
pub mod pricing;
pub mod router;

pub use configurator::{QuoteSnapshot, RoofConfigurator};
pub use diagram::{compute_levels, render_svg, DiagramLayout, LevelGeometry, Rgb};
pub use domain::{
    Accessibility, MossCoverage, RoofConfiguration, RoofField, RoofFieldError, RoofFieldKind,
    RoofLevels, RoofMaterial, RoofSize, Steepness,
};
pub use pricing::{
    compute_estimate, EstimateFactor, Estimator, PriceEstimate, PriceFactor, PricingTable,
    PricingTableError, PRICING_TABLE_VERSION,
};
pub use router::{roof_router, RoofQuoteState};
