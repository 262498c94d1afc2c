use crate::infra::InMemoryLeadOutbox;
use clap::Args;
use mosscross::error::AppError;
use mosscross::workflows::contact::{
    ContactField, ContactForm, ContactService, ContactServiceError, FormPhase,
};
use mosscross::workflows::roof::{
    render_svg, Accessibility, DiagramLayout, Estimator, LevelGeometry, MossCoverage,
    PricingTable, QuoteSnapshot, RoofConfiguration, RoofConfigurator, RoofLevels, RoofMaterial,
    RoofSize, Steepness,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Character cells per diagram unit when drawing tiers in the terminal.
const ASCII_UNITS_PER_CELL: f64 = 8.0;

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Number of roof tiers (1-3)
    #[arg(long, default_value = "1")]
    pub(crate) levels: RoofLevels,
    /// Total roof size: small, medium, large
    #[arg(long, default_value = "medium")]
    pub(crate) size: RoofSize,
    /// Pitch: flat, low, moderate, steep, very_steep
    #[arg(long, default_value = "moderate")]
    pub(crate) steepness: Steepness,
    /// Moss coverage: none, light, medium, heavy
    #[arg(long, default_value = "light")]
    pub(crate) moss: MossCoverage,
    /// Roofing material, by key or display label
    #[arg(long, default_value = "shingle")]
    pub(crate) material: RoofMaterial,
    /// Optional access difficulty: easy, moderate, difficult
    #[arg(long)]
    pub(crate) accessibility: Option<Accessibility>,
    /// Price against a JSON multiplier table instead of the built-in one
    #[arg(long)]
    pub(crate) pricing_table: Option<PathBuf>,
    /// Write the roof diagram as SVG to this path
    #[arg(long)]
    pub(crate) svg: Option<PathBuf>,
    /// Print the quote snapshot as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl QuoteArgs {
    fn configuration(&self) -> RoofConfiguration {
        RoofConfiguration {
            levels: self.levels,
            total_size: self.size,
            steepness: self.steepness,
            moss_coverage: self.moss,
            material: self.material,
            accessibility: self.accessibility,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Simulated lead delivery latency in milliseconds
    #[arg(long, default_value_t = 1500)]
    pub(crate) delay_ms: u64,
    /// Skip the contact form portion of the demo
    #[arg(long)]
    pub(crate) skip_contact: bool,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let table = match &args.pricing_table {
        Some(path) => PricingTable::from_path(path)?,
        None => PricingTable::canonical(),
    };
    let configurator = RoofConfigurator::with_configuration(
        args.configuration(),
        Estimator::new(table),
        DiagramLayout::canonical(),
    );
    let snapshot = configurator.snapshot();

    if args.json {
        let rendered = serde_json::to_string_pretty(&snapshot).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        render_quote(&snapshot);
    }

    if let Some(path) = &args.svg {
        std::fs::write(path, render_svg(&snapshot.levels))?;
        println!("Diagram written to {}", path.display());
    }

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        delay_ms,
        skip_contact,
    } = args;

    println!("MossCross configurator demo");
    let mut configurator = RoofConfigurator::default();
    println!("\nStarting configuration");
    render_quote(&configurator.snapshot());

    let edits = [
        ("levels", "2"),
        ("steepness", "steep"),
        ("mossCoverage", "heavy"),
        ("material", "Slate"),
        ("levels", "4"),
    ];
    for (field, value) in edits {
        match configurator.set_field_by_name(field, value) {
            Ok(snapshot) => println!(
                "- {field} -> {value}: estimate {} across {} tier(s)",
                snapshot.estimate.display_amount(),
                snapshot.levels.len()
            ),
            Err(err) => println!("- {field} -> {value}: rejected ({err})"),
        }
    }

    println!("\nFinal configuration");
    render_quote(&configurator.snapshot());

    if skip_contact {
        return Ok(());
    }

    println!("\nContact form demo");
    let outbox = Arc::new(InMemoryLeadOutbox::default());
    let service = ContactService::new(outbox.clone(), Duration::from_millis(delay_ms));
    let mut form = ContactForm::new();

    match service.submit(&mut form).await {
        Err(ContactServiceError::Form(_)) => {
            println!("- Empty submission blocked:");
            for field in form.errors().fields() {
                if let Some(message) = form.errors().get(field) {
                    println!("    {}: {}", field.label(), message);
                }
            }
        }
        Ok(lead) => println!("- Unexpectedly accepted lead {}", lead.lead_id.0),
        Err(err) => println!("- Submission failed: {err}"),
    }

    let configuration = *configurator.configuration();
    form.update_field(ContactField::Name, "Robin Alder")?;
    form.update_field(ContactField::Email, "robin@example.com")?;
    form.update_field(
        ContactField::Message,
        format!(
            "Quote request for a {} {} roof",
            configuration.levels.label().to_lowercase(),
            configuration.material.label()
        ),
    )?;
    form.update_field(ContactField::Notes, "Gate code 4412")?;

    println!("- Submitting (simulated delay {delay_ms} ms)...");
    match service.submit(&mut form).await {
        Ok(lead) => println!(
            "- Lead {} accepted at {}",
            lead.lead_id.0,
            lead.received_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        Err(err) => println!("- Submission failed: {err}"),
    }

    match form.phase() {
        FormPhase::Submitted => println!("  Thank you! We'll be in touch within 24 hours."),
        FormPhase::Failed { reason } => println!("  Delivery failed ({reason}); retry available"),
        other => println!("  Form is {}", other.label()),
    }
    println!("  Outbox holds {} lead(s)", outbox.leads().len());

    Ok(())
}

fn render_quote(snapshot: &QuoteSnapshot) {
    let configuration = &snapshot.configuration;
    println!(
        "Estimate: {} (pricing table v{})",
        snapshot.estimate.display_amount(),
        snapshot.estimate.table_version
    );
    println!(
        "  {} | {} | {} pitch | {} moss | {}",
        configuration.levels.label(),
        configuration.total_size.label(),
        configuration.steepness.label(),
        configuration.moss_coverage.label(),
        configuration.material.label()
    );
    if let Some(access) = configuration.accessibility {
        println!("  Access: {}", access.label());
    }
    println!("  Base price ${:.0}", snapshot.estimate.base_price);
    for factor in &snapshot.estimate.factors {
        println!("    x {:.2} {}", factor.multiplier, factor.factor);
    }
    for line in ascii_diagram(&snapshot.levels) {
        println!("  {line}");
    }
}

/// Terminal rendering of the tiers, top tier first.
fn ascii_diagram(levels: &[LevelGeometry]) -> Vec<String> {
    let cells = |level: &LevelGeometry| {
        ((level.width / ASCII_UNITS_PER_CELL).round() as usize).max(2)
    };
    let widest = levels.iter().map(cells).max().unwrap_or(0);

    levels
        .iter()
        .rev()
        .map(|level| {
            let inner = cells(level);
            let pad = (widest - inner) / 2;
            format!(
                "{}/{}\\  tier {}",
                " ".repeat(pad),
                "=".repeat(inner),
                level.level
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_diagram_lists_top_tier_first() {
        let configuration = RoofConfiguration {
            levels: RoofLevels::new(3).expect("valid levels"),
            ..RoofConfiguration::default()
        };
        let levels = DiagramLayout::canonical().compute_levels(&configuration);
        let lines = ascii_diagram(&levels);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("tier 3"));
        assert!(lines[2].ends_with("tier 1"));
        assert!(lines[0].starts_with(' '));
        assert!(lines[2].starts_with('/'));
    }

    #[test]
    fn quote_args_map_onto_configuration() {
        let args = QuoteArgs {
            levels: RoofLevels::new(2).expect("valid levels"),
            size: RoofSize::Large,
            steepness: Steepness::Steep,
            moss: MossCoverage::Heavy,
            material: RoofMaterial::Metal,
            accessibility: Some(Accessibility::Easy),
            pricing_table: None,
            svg: None,
            json: false,
        };
        let configuration = args.configuration();
        assert_eq!(configuration.levels.get(), 2);
        assert_eq!(configuration.total_size, RoofSize::Large);
        assert_eq!(configuration.accessibility, Some(Accessibility::Easy));
    }

    #[tokio::test(start_paused = true)]
    async fn demo_runs_to_completion() {
        let result = run_demo(DemoArgs {
            delay_ms: 1500,
            skip_contact: false,
        })
        .await;
        assert!(result.is_ok());
    }
}
