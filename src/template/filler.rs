use crate::catalog::{Catalog, format_node_storage};
use crate::session::{ReplicaCount, Selection};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

pub const AUTH_TOKEN_PLACEHOLDER: &str = "$DefaultAuthenticationToken";
pub const NODE_TYPE_PLACEHOLDER: &str = "$DefaultCacheNodeType";
pub const REPLICAS_PLACEHOLDER: &str = "$NumberOfReplicas";
pub const DESCRIPTION_PLACEHOLDER: &str = "$CacheNodeTypeDescription";
pub const ALLOWED_TYPES_PLACEHOLDER: &str = "$AllowedCacheNodeTypes";

/// Every token the filler substitutes
pub const PLACEHOLDERS: [&str; 5] = [
    AUTH_TOKEN_PLACEHOLDER,
    NODE_TYPE_PLACEHOLDER,
    REPLICAS_PLACEHOLDER,
    DESCRIPTION_PLACEHOLDER,
    ALLOWED_TYPES_PLACEHOLDER,
];

const DESCRIPTION_INDENT: &str = "  ";
const OPTION_INDENT: &str = "        ";
const DESCRIPTION_INTRO: &str =
    "- The compute and memory capacity of the nodes in the node group. Available options:";

lazy_static! {
    static ref PLACEHOLDER_PATTERN: Regex = Regex::new(
        r"\$(DefaultAuthenticationToken|DefaultCacheNodeType|NumberOfReplicas|CacheNodeTypeDescription|AllowedCacheNodeTypes)"
    )
    .unwrap();
}

/// Resolved values for every template placeholder
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateContext {
    pub auth_token: String,
    pub chosen_type_name: String,
    pub replica_count: ReplicaCount,
    pub catalog_description_block: String,
    pub allowed_type_names: Vec<String>,
}

impl TemplateContext {
    /// Build the substitution set from the session outcome and the full catalog
    pub fn from_catalog(catalog: &Catalog, selection: &Selection, auth_token: &str) -> Self {
        Self {
            auth_token: auth_token.to_string(),
            chosen_type_name: selection.node_type.clone(),
            replica_count: selection.replica_count,
            catalog_description_block: describe_catalog(catalog),
            allowed_type_names: catalog.names(),
        }
    }

    fn value_for(&self, placeholder: &str) -> String {
        match placeholder {
            AUTH_TOKEN_PLACEHOLDER => self.auth_token.clone(),
            NODE_TYPE_PLACEHOLDER => self.chosen_type_name.clone(),
            REPLICAS_PLACEHOLDER => self.replica_count.to_string(),
            DESCRIPTION_PLACEHOLDER => self.catalog_description_block.clone(),
            ALLOWED_TYPES_PLACEHOLDER => render_sequence(&self.allowed_type_names),
            other => other.to_string(),
        }
    }
}

/// Multi-line description of every node type, in catalog order
pub fn describe_catalog(catalog: &Catalog) -> String {
    let mut description = format!("{}{}\n", DESCRIPTION_INDENT, DESCRIPTION_INTRO);
    for node_type in catalog.entries() {
        description.push_str(&format!(
            "{}- {}: {} - {}\n",
            OPTION_INDENT,
            node_type.name,
            format_node_storage(node_type),
            node_type.price_label()
        ));
    }
    description
}

/// Render names as a single-quoted flow sequence, e.g. `['a', 'b']`
pub fn render_sequence(names: &[String]) -> String {
    let quoted: Vec<String> = names
        .iter()
        .map(|name| format!("'{}'", name.replace('\'', "''")))
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// Replace every placeholder in one pass; substituted text is never rescanned
pub fn fill(template: &str, context: &TemplateContext) -> String {
    PLACEHOLDER_PATTERN
        .replace_all(template, |caps: &Captures| context.value_for(&caps[0]))
        .into_owned()
}

/// Placeholders the template does not contain
pub fn missing_placeholders(template: &str) -> Vec<&'static str> {
    PLACEHOLDERS
        .iter()
        .copied()
        .filter(|placeholder| !template.contains(placeholder))
        .collect()
}

/// Placeholders still present in the text
pub fn unresolved_placeholders(text: &str) -> Vec<&'static str> {
    PLACEHOLDERS
        .iter()
        .copied()
        .filter(|placeholder| text.contains(placeholder))
        .collect()
}
