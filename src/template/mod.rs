pub mod filler;

pub use filler::{TemplateContext, fill, missing_placeholders, unresolved_placeholders};
