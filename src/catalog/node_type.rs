use crate::error::{ProvisionError, ProvisionResult};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

/// Label shown for node types without a published price
pub const UNPRICED_LABEL: &str = "N/A";

/// Attributes of a single node type as stored in the catalog file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NodeTypeAttributes {
    #[serde(rename = "Memory", default)]
    pub memory: Option<String>,
    #[serde(rename = "SSD", default)]
    pub ssd: Option<String>,
    #[serde(rename = "Price", default)]
    pub price: Option<String>,
}

/// A named catalog entry describing a provisionable node type
#[derive(Debug, Clone, PartialEq)]
pub struct NodeType {
    pub name: String,
    pub attributes: NodeTypeAttributes,
}

impl NodeType {
    pub fn new(name: impl Into<String>, attributes: NodeTypeAttributes) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// Memory size string, "0 GiB" when absent
    pub fn memory(&self) -> &str {
        self.attributes.memory.as_deref().unwrap_or("0 GiB")
    }

    /// Secondary storage size string, "0 GiB" when absent
    pub fn ssd(&self) -> &str {
        self.attributes.ssd.as_deref().unwrap_or("0 GiB")
    }

    /// Price label as displayed to the operator
    pub fn price_label(&self) -> &str {
        self.attributes.price.as_deref().unwrap_or(UNPRICED_LABEL)
    }
}

/// Node type catalog, kept in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<NodeType>,
}

impl Catalog {
    /// Build a catalog from entries, rejecting duplicate names
    pub fn from_entries(entries: Vec<NodeType>) -> ProvisionResult<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(ProvisionError::DuplicateNodeType(entry.name.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Parse a catalog from its JSON representation
    pub fn from_json(json: &str) -> ProvisionResult<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        Ok(catalog)
    }

    pub fn entries(&self) -> &[NodeType] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&NodeType> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Node type names in catalog order
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.name.clone()).collect()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Catalog;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of node type names to their attributes")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, attributes)) =
                    map.next_entry::<String, NodeTypeAttributes>()?
                {
                    entries.push(NodeType::new(name, attributes));
                }
                Catalog::from_entries(entries).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}
