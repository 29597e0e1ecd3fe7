use crate::error::{ProvisionError, ProvisionResult};
use std::fmt;

pub const MIN_REPLICAS: i64 = 0;
pub const MAX_REPLICAS: i64 = 5;
pub const DEFAULT_REPLICAS: u8 = 1;

/// Number of read replicas provisioned next to the primary node, always within 0..=5
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplicaCount(u8);

impl ReplicaCount {
    pub fn new(value: i64) -> ProvisionResult<Self> {
        if (MIN_REPLICAS..=MAX_REPLICAS).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ProvisionError::ReplicaCountOutOfRange(value))
        }
    }

    /// Parse operator input; blank input selects the default of 1
    pub fn parse(input: &str) -> ProvisionResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let value = trimmed
            .parse::<i64>()
            .map_err(|_| ProvisionError::InvalidNumber {
                field: "number of replicas".to_string(),
                value: trimmed.to_string(),
            })?;
        Self::new(value)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Nodes billed: the primary plus its replicas
    pub fn instance_count(self) -> u32 {
        u32::from(self.get()) + 1
    }
}

impl Default for ReplicaCount {
    fn default() -> Self {
        Self(DEFAULT_REPLICAS)
    }
}

impl fmt::Display for ReplicaCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
