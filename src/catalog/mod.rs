pub mod node_type;
pub mod pricing;
pub mod ranker;

pub use node_type::Catalog;
pub use pricing::monthly_cost;
pub use ranker::{RankedEntry, format_node_storage, rank};
