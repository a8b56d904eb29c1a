//! Finding `sitelint.toml` and deciding which site it audits.
//!
//! Lookup order:
//!
//! 1. `--config`
//! 2. `sitelint.toml` or `.sitelint.toml` in the working directory
//! 3. the same names beside the site given by `--root` (in its parent)
//! 4. `$SITELINT_CONFIG_DIR/config.toml` or `~/.sitelint/config.toml`
//! 5. built-in defaults
//!
//! A config picked up through (1) or (3) lives next to its site, so a
//! relative `analyzer.root` in it is taken from the config's directory:
//! `-c ../blog/sitelint.toml` audits `../blog/HTML_TEMPLATE`.

use anyhow::{Context, Result};
use sitelint_core::declarative::load_rules_from_toml;
use sitelint_core::{Config, RuleBox, DEFAULT_ROOT};
use std::fmt;
use std::path::{Path, PathBuf};

/// Config file names looked for beside a project or a site.
const CONFIG_NAMES: &[&str] = &["sitelint.toml", ".sitelint.toml"];

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Environment variable overriding the global config directory.
pub const CONFIG_DIR_ENV: &str = "SITELINT_CONFIG_DIR";

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// Named with `--config`.
    Explicit(PathBuf),
    /// Found in the working directory.
    WorkingDir(PathBuf),
    /// Found in the directory holding the `--root` site.
    BesideSite(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// No file; defaults apply.
    Builtin,
}

impl ConfigOrigin {
    /// The config file, if there is one.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::WorkingDir(p) | Self::BesideSite(p) | Self::Global(p) => {
                Some(p)
            }
            Self::Builtin => None,
        }
    }

    /// Directory a relative site root in this config is joined onto.
    fn root_base(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::BesideSite(p) => {
                p.parent().filter(|dir| !dir.as_os_str().is_empty())
            }
            _ => None,
        }
    }
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "{} (--config)", p.display()),
            Self::WorkingDir(p) => write!(f, "{}", p.display()),
            Self::BesideSite(p) => write!(f, "{} (beside the site root)", p.display()),
            Self::Global(p) => write!(f, "{} (global)", p.display()),
            Self::Builtin => f.write_str("built-in defaults"),
        }
    }
}

/// What chose the site root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootOrigin {
    /// `--root` on the command line.
    Flag,
    /// `analyzer.root` in the config file.
    Config,
    /// Neither; `HTML_TEMPLATE`.
    Default,
}

impl fmt::Display for RootOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Flag => "--root",
            Self::Config => "analyzer.root",
            Self::Default => "default",
        })
    }
}

/// Loaded configuration plus the site it applies to.
pub struct Settings {
    /// Base configuration.
    pub config: Config,
    /// `[[pattern-rule]]` entries from the same file.
    pub pattern_rules: Vec<RuleBox>,
    /// Where the file was found.
    pub origin: ConfigOrigin,
    /// Site root to audit.
    pub root: PathBuf,
    /// What chose `root`.
    pub root_origin: RootOrigin,
}

impl Settings {
    /// Reads the config named by `origin` once and settles the site root.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or if either the base
    /// config or its pattern rules are invalid.
    pub fn load(origin: ConfigOrigin, root_flag: Option<&Path>) -> Result<Self> {
        let (config, pattern_rules) = match origin.path() {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config: {}", path.display()))?;
                let config = Config::parse(&content)
                    .with_context(|| format!("Failed to load config: {}", path.display()))?;
                let rules = load_rules_from_toml(&content).with_context(|| {
                    format!("Failed to load pattern rules: {}", path.display())
                })?;
                (config, rules)
            }
            None => (Config::default(), Vec::new()),
        };

        let (root, root_origin) = match (root_flag, &config.analyzer.root) {
            (Some(flag), _) => (flag.to_path_buf(), RootOrigin::Flag),
            (None, Some(configured)) => (rebase(&origin, configured), RootOrigin::Config),
            (None, None) => (rebase(&origin, Path::new(DEFAULT_ROOT)), RootOrigin::Default),
        };

        tracing::info!(
            config = %origin,
            root = %root.display(),
            root_from = %root_origin,
            "settings loaded"
        );

        Ok(Self {
            config,
            pattern_rules,
            origin,
            root,
            root_origin,
        })
    }
}

fn rebase(origin: &ConfigOrigin, root: &Path) -> PathBuf {
    match origin.root_base() {
        Some(base) if root.is_relative() => base.join(root),
        _ => root.to_path_buf(),
    }
}

/// Finds the config for a run from the working directory.
#[must_use]
pub fn locate(explicit: Option<&Path>, site_root: Option<&Path>) -> ConfigOrigin {
    locate_in(Path::new("."), explicit, site_root, global_config_dir())
}

/// Takes the working and global directories as parameters so tests need no
/// env vars or `chdir`.
fn locate_in(
    working_dir: &Path,
    explicit: Option<&Path>,
    site_root: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigOrigin {
    if let Some(path) = explicit {
        return ConfigOrigin::Explicit(path.to_path_buf());
    }
    if let Some(path) = find_config(working_dir) {
        return ConfigOrigin::WorkingDir(path);
    }

    let site_dir = site_root
        .and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty());
    if let Some(path) = site_dir.and_then(find_config) {
        return ConfigOrigin::BesideSite(path);
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.is_file() {
            return ConfigOrigin::Global(candidate);
        }
    }

    ConfigOrigin::Builtin
}

fn find_config(dir: &Path) -> Option<PathBuf> {
    let found = CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())?;
    tracing::debug!("Found config: {}", found.display());
    Some(found)
}

/// `$SITELINT_CONFIG_DIR`, else `~/.sitelint`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".sitelint"))
}
