//! Shared fixtures for catalog, template and context setup in tests

#![cfg(test)]

use crate::catalog::Catalog;
use crate::context::Context;
use crate::token::FixedTokenGenerator;
use crate::traits::{MockFileSystem, MockOutput, MockUserInput};
use std::sync::Arc;

/// Token handed out by the fixed generator in test contexts
pub const TEST_TOKEN: &str = "4f0c9e1a7d3b52e8C61";

/// Two-entry catalog used throughout the selection tests
pub const SCENARIO_CATALOG_JSON: &str = r#"{
    "cache.small": {"Memory": "13.16 GiB", "Price": "$0.10 hourly"},
    "cache.large": {"Memory": "26.32 GiB", "Price": "$0.20 hourly"}
}"#;

/// Minimal CloudFormation template containing every placeholder once
pub const SAMPLE_TEMPLATE: &str = r#"AWSTemplateFormatVersion: '2010-09-09'
Description: ElastiCache replication group
Parameters:
  AuthToken:
    Type: String
    NoEcho: true
    Default: $DefaultAuthenticationToken
  CacheNodeType:
    Type: String
    Description: |
$CacheNodeTypeDescription
    Default: $DefaultCacheNodeType
    AllowedValues: $AllowedCacheNodeTypes
  NumReplicas:
    Type: Number
    Default: $NumberOfReplicas
Resources:
  ReplicationGroup:
    Type: AWS::ElastiCache::ReplicationGroup
    Properties:
      AuthToken: !Ref AuthToken
      CacheNodeType: !Ref CacheNodeType
      ReplicasPerNodeGroup: !Ref NumReplicas
"#;

pub fn scenario_catalog() -> Catalog {
    Catalog::from_json(SCENARIO_CATALOG_JSON).unwrap()
}

/// Context with an empty mock filesystem and the given prompt/output mocks
pub fn test_context(input: Arc<MockUserInput>, output: Arc<MockOutput>) -> Context {
    test_context_with_fs(Arc::new(MockFileSystem::new()), input, output)
}

/// Context with every collaborator mocked
pub fn test_context_with_fs(
    fs: Arc<MockFileSystem>,
    input: Arc<MockUserInput>,
    output: Arc<MockOutput>,
) -> Context {
    Context::test_with(
        fs,
        input,
        output,
        Arc::new(FixedTokenGenerator(TEST_TOKEN.to_string())),
    )
}

/// Mock filesystem seeded with the scenario catalog and sample template
pub fn seeded_filesystem() -> Arc<MockFileSystem> {
    let fs = Arc::new(MockFileSystem::new());
    fs.add_file("instances.json", SCENARIO_CATALOG_JSON);
    fs.add_file("elasticache.cf", SAMPLE_TEMPLATE);
    fs
}
