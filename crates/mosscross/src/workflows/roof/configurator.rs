use serde::{Deserialize, Serialize};
use tracing::debug;

use super::diagram::{DiagramLayout, LevelGeometry};
use super::domain::{RoofConfiguration, RoofField, RoofFieldError};
use super::pricing::{Estimator, PriceEstimate};

/// Everything the presentation boundary needs after a configuration change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub configuration: RoofConfiguration,
    pub estimate: PriceEstimate,
    pub levels: Vec<LevelGeometry>,
}

/// Single-owner holder of the live roof configuration.
///
/// Every mutation re-derives the estimate and diagram before returning, so a
/// caller never observes a configuration paired with stale outputs.
#[derive(Debug, Clone, Default)]
pub struct RoofConfigurator {
    configuration: RoofConfiguration,
    estimator: Estimator,
    layout: DiagramLayout,
}

impl RoofConfigurator {
    pub fn new(estimator: Estimator, layout: DiagramLayout) -> Self {
        Self::with_configuration(RoofConfiguration::default(), estimator, layout)
    }

    pub fn with_configuration(
        configuration: RoofConfiguration,
        estimator: Estimator,
        layout: DiagramLayout,
    ) -> Self {
        Self {
            configuration,
            estimator,
            layout,
        }
    }

    pub fn configuration(&self) -> &RoofConfiguration {
        &self.configuration
    }

    pub fn estimator(&self) -> &Estimator {
        &self.estimator
    }

    pub fn layout(&self) -> &DiagramLayout {
        &self.layout
    }

    /// Replace one field and return the freshly derived quote.
    pub fn set_field(&mut self, field: RoofField) -> QuoteSnapshot {
        debug!(field = field.kind().as_str(), "roof configuration updated");
        self.configuration.apply(field);
        self.snapshot()
    }

    /// Parse a `(name, value)` pair from a form control and apply it.
    ///
    /// The configuration is left untouched when parsing fails.
    pub fn set_field_by_name(
        &mut self,
        name: &str,
        value: &str,
    ) -> Result<QuoteSnapshot, RoofFieldError> {
        let field = RoofField::parse(name, value)?;
        Ok(self.set_field(field))
    }

    pub fn snapshot(&self) -> QuoteSnapshot {
        QuoteSnapshot {
            configuration: self.configuration,
            estimate: self.estimator.estimate(&self.configuration),
            levels: self.layout.compute_levels(&self.configuration),
        }
    }
}
