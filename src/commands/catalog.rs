use crate::catalog::{Catalog, rank};
use crate::config::ProvisionerConfig;
use crate::context::Context;
use crate::currency::format_currency;
use crate::error::ProvisionResult;
use crate::session::{CostSummary, ReplicaCount, listing_line};
use anyhow::{Context as AnyhowContext, Result};
use std::path::Path;

/// Handles the 'catalog' command - prints ranked node types with cost projections
pub struct CatalogCommand;

impl CatalogCommand {
    /// Read and parse the node type catalog
    pub fn load(ctx: &Context, path: &Path) -> Result<Catalog> {
        let contents = ctx
            .fs
            .read_to_string(path)
            .context("Failed to read node type catalog")?;
        let catalog = Catalog::from_json(&contents)
            .with_context(|| format!("Invalid node type catalog: {:?}", path))?;
        tracing::debug!(path = %path.display(), entries = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// Execute the catalog command
    pub fn execute(ctx: &Context, config: &ProvisionerConfig, replicas: ReplicaCount) -> Result<()> {
        let catalog = Self::load(ctx, &config.catalog)?;

        ctx.output.section("Cache Node Catalog");
        ctx.output
            .key_value("Catalog", &config.catalog.display().to_string());
        ctx.output.key_value(
            "Nodes per cluster",
            &format!("{} (1 primary + {} replicas)", replicas.instance_count(), replicas),
        );
        ctx.output.blank();

        let ranked = rank(&catalog);
        if ranked.is_empty() {
            ctx.output.warning("The catalog does not list any node types");
            return Ok(());
        }

        let summaries = ranked
            .iter()
            .map(|entry| CostSummary::compute(entry, replicas))
            .collect::<ProvisionResult<Vec<_>>>()
            .with_context(|| format!("Invalid price in node type catalog: {:?}", config.catalog))?;

        let mut unpriced = 0;
        for (index, (entry, summary)) in ranked.iter().zip(&summaries).enumerate() {
            ctx.output
                .list_item(&listing_line(index + 1, entry, replicas, &config.locale));
            match summary {
                Some(summary) => ctx.output.dimmed(&format!(
                    "     {} per node per month",
                    format_currency(summary.monthly_per_instance, &config.locale)
                )),
                None => unpriced += 1,
            }
        }

        if unpriced > 0 {
            ctx.output.blank();
            ctx.output.warning(&format!(
                "{} node type(s) have no hourly price and cannot be selected",
                unpriced
            ));
        }

        Ok(())
    }
}
