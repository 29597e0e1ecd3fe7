use crate::currency::LocaleConfig;
use crate::traits::FileSystem;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional per-directory configuration file
pub const CONFIG_FILE: &str = ".cachecraft.yaml";

pub const DEFAULT_CATALOG: &str = "instances.json";
pub const DEFAULT_TEMPLATE: &str = "elasticache.cf";
pub const DEFAULT_BANNER: &str = "banner.txt";

/// Generated documents are named `<project>.cf.yaml`
pub const OUTPUT_EXTENSION: &str = "cf.yaml";

/// Contents of `.cachecraft.yaml`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub catalog: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub banner: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub locale: Option<String>,
}

/// Values supplied on the command line (or through their environment variables)
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub catalog: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub banner: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub locale: Option<String>,
}

/// Fully resolved settings for a run
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionerConfig {
    pub catalog: PathBuf,
    pub template: PathBuf,
    pub banner: PathBuf,
    pub output_dir: PathBuf,
    pub locale: LocaleConfig,
}

impl ProvisionerConfig {
    /// Load `.cachecraft.yaml` from the working directory if present and apply overrides
    pub fn load(fs: &dyn FileSystem, overrides: ConfigOverrides) -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        let file = if fs.is_file(path) {
            let contents = fs.read_to_string(path)?;
            let parsed: ConfigFile = serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse configuration file: {:?}", path))?;
            tracing::debug!(path = %path.display(), "Loaded configuration file");
            parsed
        } else {
            ConfigFile::default()
        };

        let config = Self::resolve(file, overrides);
        tracing::debug!(locale = %config.locale.name, "Using currency locale");
        Ok(config)
    }

    /// Merge file settings with overrides; overrides win, then the file, then defaults
    pub fn resolve(file: ConfigFile, overrides: ConfigOverrides) -> Self {
        let locale = overrides.locale.or(file.locale);
        Self {
            catalog: overrides
                .catalog
                .or(file.catalog)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG)),
            template: overrides
                .template
                .or(file.template)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE)),
            banner: overrides
                .banner
                .or(file.banner)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BANNER)),
            output_dir: overrides
                .output_dir
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            locale: LocaleConfig::detect(locale.as_deref()),
        }
    }

    /// Path of the generated document for a project
    pub fn output_path(&self, project_name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", project_name, OUTPUT_EXTENSION))
    }
}
