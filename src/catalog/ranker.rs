use super::node_type::{Catalog, NodeType, UNPRICED_LABEL};
use super::pricing::{parse_hourly_price, round2};
use crate::error::ProvisionResult;
use std::cmp::Ordering;

/// Multiplier from binary gibibytes to decimal gigabytes
pub const GIB_TO_GB: f64 = 1.073741824;

/// Convert a `"<number> <unit>"` size string to decimal GB, rounded to 2 places.
///
/// Only the leading numeric token is read. Empty, malformed or overflowing
/// input yields 0, and negative zero is normalized to 0.
pub fn parse_size(size: &str) -> f64 {
    size.split_whitespace()
        .next()
        .and_then(|token| token.parse::<f64>().ok())
        .map(|value| round2(value * GIB_TO_GB))
        .filter(|value| value.is_finite() && *value != 0.0)
        .unwrap_or(0.0)
}

/// A catalog entry with its derived display and ordering fields
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub node_type: NodeType,
    pub memory_gb: f64,
    pub ssd_gb: f64,
    pub rank_key: f64,
}

impl RankedEntry {
    pub fn from_node_type(node_type: &NodeType) -> Self {
        let memory_gb = parse_size(node_type.memory());
        let ssd_gb = parse_size(node_type.ssd());
        Self {
            node_type: node_type.clone(),
            memory_gb,
            ssd_gb,
            rank_key: memory_gb.max(ssd_gb),
        }
    }

    pub fn name(&self) -> &str {
        &self.node_type.name
    }

    pub fn price_label(&self) -> &str {
        self.node_type.price_label()
    }

    /// Entries without a price, or priced as `N/A`, are listed but not selectable
    pub fn is_unpriced(&self) -> bool {
        self.price_label().trim().eq_ignore_ascii_case(UNPRICED_LABEL)
    }

    /// Parsed hourly price, `None` when the entry is unpriced.
    ///
    /// Any other label that is not `$<number> hourly` is an error.
    pub fn hourly_price(&self) -> ProvisionResult<Option<f64>> {
        if self.is_unpriced() {
            return Ok(None);
        }
        parse_hourly_price(self.name(), self.price_label()).map(Some)
    }

    pub fn storage(&self) -> String {
        format_storage(self.memory_gb, self.ssd_gb)
    }
}

/// Render storage as `"<mem> GB RAM"` with an optional `", <ssd> GB SSD"` suffix
pub fn format_storage(memory_gb: f64, ssd_gb: f64) -> String {
    let mut storage = format!("{:.2} GB RAM", memory_gb);
    if ssd_gb > 0.0 {
        storage.push_str(&format!(", {:.2} GB SSD", ssd_gb));
    }
    storage
}

/// Format the storage of a catalog entry without ranking it
pub fn format_node_storage(node_type: &NodeType) -> String {
    format_storage(parse_size(node_type.memory()), parse_size(node_type.ssd()))
}

/// Order catalog entries by ascending capacity.
///
/// The sort is stable, so entries with equal rank keys keep catalog order.
pub fn rank(catalog: &Catalog) -> Vec<RankedEntry> {
    let mut ranked: Vec<RankedEntry> = catalog
        .entries()
        .iter()
        .map(RankedEntry::from_node_type)
        .collect();
    ranked.sort_by(|a, b| {
        a.rank_key
            .partial_cmp(&b.rank_key)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}
