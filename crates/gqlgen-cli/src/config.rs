use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

static GO_PACKAGE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Valid regex pattern for Go package names")
});

const CONFIG_FILES: [&str; 2] = [".gqlgenrc.toml", ".gqlgenrc"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Go package name written at the top of generated files.
    #[serde(default)]
    pub package: Option<String>,

    /// Sort `list` output by name.
    #[serde(default)]
    pub sort: bool,

    /// Directive that marks a field as resolver-backed.
    #[serde(default = "default_resolve_directive")]
    pub resolve_directive: String,

    /// Root operation types, left out of the generated structs.
    #[serde(default = "default_root_types")]
    pub root_types: Vec<String>,
}

fn default_resolve_directive() -> String {
    "resolve".to_string()
}

fn default_root_types() -> Vec<String> {
    vec!["Query".to_string(), "Mutation".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package: None,
            sort: false,
            resolve_directive: default_resolve_directive(),
            root_types: default_root_types(),
        }
    }
}

impl Config {
    /// Load config from .gqlgenrc.toml or .gqlgenrc in the working directory
    pub fn load() -> Result<Self> {
        Self::load_in(Path::new("."))
    }

    pub fn load_in(dir: &Path) -> Result<Self> {
        match find_config(dir) {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!(dir = %dir.display(), "no config file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Load config from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Config file {} is not valid TOML", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Merge CLI arguments into config
    pub fn merge_cli_args(&mut self, sort: bool, resolve_directive: Option<String>) {
        if sort {
            self.sort = true;
        }

        if let Some(directive) = resolve_directive {
            self.resolve_directive = directive;
        }
    }

    /// The package to generate into: an explicit `--package` wins over the
    /// `GOPACKAGE` environment variable, which wins over the config file.
    pub fn resolve_package(&self, flag: Option<&str>, env: Option<String>) -> Result<String> {
        let package = match (flag, env, &self.package) {
            (Some(flag), _, _) => flag.to_string(),
            (None, Some(env), _) => env,
            (None, None, Some(configured)) => configured.clone(),
            (None, None, None) => bail!(
                "either the GOPACKAGE environment variable, the --package flag or `package` in {} must be set",
                CONFIG_FILES[0]
            ),
        };

        if !GO_PACKAGE_NAME.is_match(&package) {
            bail!("'{}' is not a valid Go package name", package);
        }
        Ok(package)
    }
}

/// Path of the config file that [`Config::load_in`] would read, if any.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}
