use crate::catalog::Catalog;
use crate::commands::CatalogCommand;
use crate::config::ProvisionerConfig;
use crate::context::Context;
use crate::error::ProvisionError;
use crate::session::{REPLICA_PROMPT, ReplicaCount, Selection, SelectionSession};
use crate::template::{TemplateContext, fill, missing_placeholders, unresolved_placeholders};
use anyhow::{Context as AnyhowContext, Result};
use std::path::Path;

pub const PROJECT_PROMPT: &str = "Enter the project name:";

/// Handles the 'generate' command - builds a CloudFormation template interactively
pub struct GenerateCommand;

impl GenerateCommand {
    /// Execute the generate command
    pub fn execute(ctx: &Context, config: &ProvisionerConfig) -> Result<()> {
        let catalog = CatalogCommand::load(ctx, &config.catalog)?;
        if catalog.is_empty() {
            anyhow::bail!(
                "The node type catalog {:?} is empty. Add at least one node type.",
                config.catalog
            );
        }

        Self::show_banner(ctx, &config.banner);
        ctx.output.section("ElastiCache Template Generator");

        let project_name = Self::validate_project_name(&ctx.input.text(PROJECT_PROMPT, None)?)?;

        let template = ctx
            .fs
            .read_to_string(&config.template)
            .context("Failed to read CloudFormation template")?;
        for placeholder in missing_placeholders(&template) {
            ctx.output.warning(&format!(
                "Template {:?} does not contain {}; it will be left as is",
                config.template, placeholder
            ));
        }

        let auth_token = Self::prompt_auth_token(ctx)?;

        let default_replicas = ReplicaCount::default().to_string();
        let replicas =
            ReplicaCount::parse(&ctx.input.text(REPLICA_PROMPT, Some(&default_replicas))?)?;

        let selection = SelectionSession::new(ctx, &catalog, &config.locale, replicas).run()?;
        tracing::info!(
            node_type = %selection.node_type,
            replicas = %selection.replica_count,
            "Node type confirmed"
        );

        let document = Self::render(&catalog, &template, &selection, &auth_token);
        let leftover = unresolved_placeholders(&document);
        if !leftover.is_empty() {
            tracing::warn!(placeholders = ?leftover, "Generated document still contains placeholders");
        }

        let output_path = config.output_path(&project_name);
        ctx.fs.write(&output_path, &document)?;

        ctx.output.blank();
        ctx.output.success(&format!(
            "CloudFormation template '{}' has been generated.",
            output_path.display()
        ));
        ctx.output.key_value_highlight("Node type", &selection.node_type);
        ctx.output
            .key_value("Replicas", &selection.replica_count.to_string());

        Ok(())
    }

    fn render(
        catalog: &Catalog,
        template: &str,
        selection: &Selection,
        auth_token: &str,
    ) -> String {
        let context = TemplateContext::from_catalog(catalog, selection, auth_token);
        fill(template, &context)
    }

    /// Print the banner file if there is one
    fn show_banner(ctx: &Context, path: &Path) {
        if !ctx.fs.is_file(path) {
            tracing::debug!(path = %path.display(), "No banner file, skipping");
            return;
        }

        match ctx.fs.read_to_string(path) {
            Ok(banner) => ctx.output.plain(banner.trim_end()),
            Err(err) => tracing::debug!(error = %err, "Failed to read banner"),
        }
    }

    /// Ask for a token, offering a freshly generated one as the default
    fn prompt_auth_token(ctx: &Context) -> Result<String> {
        let generated = ctx.tokens.generate();
        let answer = ctx.input.text(
            &format!(
                "Enter an Authentication Token (or press Enter to use {}):",
                generated
            ),
            Some(&generated),
        )?;

        let token = answer.trim();
        if token.is_empty() {
            Ok(generated)
        } else {
            Ok(token.to_string())
        }
    }

    /// Project names become file names, so they must be non-empty and free of separators
    pub fn validate_project_name(name: &str) -> Result<String, ProvisionError> {
        let trimmed = name.trim();
        if trimmed.is_empty()
            || trimmed == "."
            || trimmed == ".."
            || trimmed.contains(['/', '\\'])
        {
            return Err(ProvisionError::InvalidProjectName(name.to_string()));
        }
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigFile, ConfigOverrides};
    use crate::error::ErrorKind;
    use crate::test_helpers::{TEST_TOKEN, seeded_filesystem, test_context_with_fs};
    use crate::traits::{MockFileSystem, MockOutput, MockUserInput, OutputMessage};
    use std::path::PathBuf;
    use std::sync::Arc;

    fn config() -> ProvisionerConfig {
        ProvisionerConfig::resolve(
            ConfigFile::default(),
            ConfigOverrides {
                output_dir: Some(PathBuf::from("out")),
                locale: Some("en_US".to_string()),
                ..Default::default()
            },
        )
    }

    fn run(
        fs: Arc<MockFileSystem>,
        responses: &[&str],
    ) -> (Result<()>, Arc<MockFileSystem>, Arc<MockOutput>) {
        let input = Arc::new(MockUserInput::with_responses(responses));
        let output = Arc::new(MockOutput::new());
        let ctx = test_context_with_fs(Arc::clone(&fs), input, Arc::clone(&output));
        let result = GenerateCommand::execute(&ctx, &config());
        (result, fs, output)
    }

    fn output_file() -> PathBuf {
        PathBuf::from("out/demo.cf.yaml")
    }

    #[test]
    fn test_generate_writes_filled_template() {
        let (result, fs, output) = run(seeded_filesystem(), &["demo", "s3cr3t-token", "1", "2", "y"]);

        assert!(result.is_ok(), "Generate should succeed: {:?}", result);
        let document = fs.get_file_contents(&output_file()).unwrap();

        assert!(document.contains("Default: s3cr3t-token"));
        assert!(document.contains("Default: cache.large"));
        assert!(document.contains("Default: 1"));
        assert!(document.contains("AllowedValues: ['cache.small', 'cache.large']"));
        assert!(document.contains(
            "        - cache.small: 14.13 GB RAM - $0.10 hourly\n        - cache.large: 28.26 GB RAM - $0.20 hourly\n"
        ));
        assert!(unresolved_placeholders(&document).is_empty());
        assert!(output.has_success());
    }

    #[test]
    fn test_blank_token_uses_generated_default() {
        let (result, fs, _) = run(seeded_filesystem(), &["demo", "", "", "1", "y"]);

        assert!(result.is_ok(), "Generate should succeed: {:?}", result);
        let document = fs.get_file_contents(&output_file()).unwrap();
        assert!(document.contains(&format!("Default: {}", TEST_TOKEN)));
        assert!(document.contains("Default: 1\n"));
    }

    #[test]
    fn test_revised_replica_count_is_written() {
        let (result, fs, _) = run(
            seeded_filesystem(),
            &["demo", "tok", "1", "2", "n", "0", "1", "y"],
        );

        assert!(result.is_ok(), "Generate should succeed: {:?}", result);
        let document = fs.get_file_contents(&output_file()).unwrap();
        assert!(document.contains("Default: cache.small"));
        assert!(document.contains("    Default: 0\n"));
    }

    #[test]
    fn test_out_of_range_choice_writes_nothing() {
        for choice in ["0", "3"] {
            let (result, fs, _) = run(seeded_filesystem(), &["demo", "tok", "1", choice]);

            let err = result.unwrap_err();
            assert_eq!(
                err.downcast_ref::<ProvisionError>().map(ProvisionError::kind),
                Some(ErrorKind::Range)
            );
            assert!(!fs.has_file(&output_file()));
        }
    }

    #[test]
    fn test_invalid_initial_replicas_writes_nothing() {
        for replicas in ["-1", "6"] {
            let (result, fs, _) = run(seeded_filesystem(), &["demo", "tok", replicas]);

            let err = result.unwrap_err();
            assert_eq!(
                err.downcast_ref::<ProvisionError>(),
                Some(&ProvisionError::ReplicaCountOutOfRange(replicas.parse().unwrap()))
            );
            assert_eq!(fs.list_files().len(), 2);
        }
    }

    #[test]
    fn test_boundary_replicas_are_accepted() {
        for replicas in ["0", "5"] {
            let (result, fs, _) = run(seeded_filesystem(), &["demo", "tok", replicas, "1", "y"]);
            assert!(result.is_ok(), "replicas {}: {:?}", replicas, result);
            let document = fs.get_file_contents(&output_file()).unwrap();
            assert!(document.contains(&format!("    Default: {}\n", replicas)));
        }
    }

    #[test]
    fn test_missing_catalog_fails_before_prompting() {
        let fs = Arc::new(MockFileSystem::new());
        fs.add_file("elasticache.cf", "template");
        let (result, fs, _) = run(fs, &[]);

        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("instances.json"));
        assert_eq!(fs.list_files().len(), 1);
    }

    #[test]
    fn test_missing_template_fails() {
        let fs = Arc::new(MockFileSystem::new());
        fs.add_file("instances.json", crate::test_helpers::SCENARIO_CATALOG_JSON);
        let (result, fs, _) = run(fs, &["demo"]);

        assert!(result.is_err());
        assert_eq!(fs.list_files().len(), 1);
    }

    #[test]
    fn test_banner_is_printed_when_present() {
        let fs = seeded_filesystem();
        fs.add_file("banner.txt", "== cachecraft ==\n");
        let (result, _, output) = run(fs, &["demo", "tok", "1", "1", "y"]);

        assert!(result.is_ok());
        assert_eq!(
            output.get_messages().first(),
            Some(&OutputMessage::Plain("== cachecraft ==".to_string()))
        );
    }

    #[test]
    fn test_template_without_placeholders_warns() {
        let fs = seeded_filesystem();
        fs.add_file("elasticache.cf", "Default: $DefaultCacheNodeType\n");
        let (result, fs, output) = run(fs, &["demo", "tok", "1", "1", "y"]);

        assert!(result.is_ok());
        assert_eq!(output.get_warnings().len(), 4);
        assert_eq!(
            fs.get_file_contents(&output_file()).unwrap(),
            "Default: cache.small\n"
        );
    }

    #[test]
    fn test_validate_project_name() {
        assert_eq!(GenerateCommand::validate_project_name(" demo ").unwrap(), "demo");
        for name in ["", "  ", "..", "a/b", "a\\b"] {
            assert!(
                GenerateCommand::validate_project_name(name).is_err(),
                "name: {:?}",
                name
            );
        }
    }

    #[test]
    fn test_invalid_project_name_writes_nothing() {
        let (result, fs, _) = run(seeded_filesystem(), &["../escape"]);
        assert!(result.is_err());
        assert_eq!(fs.list_files().len(), 2);
    }
}
