use std::fmt;

/// Broad classification of provisioning errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input text could not be interpreted
    Parse,
    /// A value was well-formed but outside its allowed bounds
    Range,
}

/// Error types for catalog, selection and template operations
#[derive(Debug, Clone, PartialEq)]
pub enum ProvisionError {
    /// Price string is not of the form `$<number> hourly`
    InvalidPrice { node_type: String, value: String },

    /// Operator typed something that is not an integer
    InvalidNumber { field: String, value: String },

    /// Replica count outside 0..=5
    ReplicaCountOutOfRange(i64),

    /// Selection index outside the ranked list
    SelectionOutOfRange { index: i64, count: usize },

    /// Catalog file could not be decoded
    CatalogParse(String),

    /// Same node type appears twice in the catalog
    DuplicateNodeType(String),

    /// Project name cannot be used as an output file name
    InvalidProjectName(String),
}

impl ProvisionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProvisionError::InvalidPrice { .. }
            | ProvisionError::InvalidNumber { .. }
            | ProvisionError::CatalogParse(_)
            | ProvisionError::DuplicateNodeType(_)
            | ProvisionError::InvalidProjectName(_) => ErrorKind::Parse,
            ProvisionError::ReplicaCountOutOfRange(_)
            | ProvisionError::SelectionOutOfRange { .. } => ErrorKind::Range,
        }
    }
}

impl fmt::Display for ProvisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvisionError::InvalidPrice { node_type, value } => {
                write!(
                    f,
                    "Cannot parse price '{}' for node type '{}' (expected '$<number> hourly')",
                    value, node_type
                )
            }
            ProvisionError::InvalidNumber { field, value } => {
                write!(f, "Invalid {}: '{}' is not a whole number", field, value)
            }
            ProvisionError::ReplicaCountOutOfRange(value) => {
                write!(
                    f,
                    "Number of replicas must be between 0 and 5 (got {})",
                    value
                )
            }
            ProvisionError::SelectionOutOfRange { index, count } => {
                write!(
                    f,
                    "Choice {} is out of range: pick a number between 1 and {}",
                    index, count
                )
            }
            ProvisionError::CatalogParse(msg) => {
                write!(f, "Failed to parse node type catalog: {}", msg)
            }
            ProvisionError::DuplicateNodeType(name) => {
                write!(f, "Node type '{}' is listed more than once in the catalog", name)
            }
            ProvisionError::InvalidProjectName(name) => {
                write!(
                    f,
                    "Invalid project name '{}': it must be non-empty and must not contain path separators",
                    name
                )
            }
        }
    }
}

impl std::error::Error for ProvisionError {}

impl From<serde_json::Error> for ProvisionError {
    fn from(err: serde_json::Error) -> Self {
        ProvisionError::CatalogParse(err.to_string())
    }
}

/// Result type for provisioning operations
pub type ProvisionResult<T> = Result<T, ProvisionError>;
