//! Server configuration.
//!
//! Values come from a TOML file, then environment overrides, then CLI flags
//! (applied by the binary).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level labquiz configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuizConfig {
    /// Interface to listen on.
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding one `<course>.yaml` per course.
    #[serde(default = "default_questions_dir")]
    pub questions_dir: PathBuf,
    /// Directory where completion markers are written.
    #[serde(default = "default_marker_dir")]
    pub marker_dir: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8010
}
fn default_questions_dir() -> PathBuf {
    PathBuf::from("./questions")
}
fn default_marker_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            questions_dir: default_questions_dir(),
            marker_dir: default_marker_dir(),
        }
    }
}

impl QuizConfig {
    /// `host:port` for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// `PORT`, `LABQUIZ_HOST`, `LABQUIZ_QUESTIONS_DIR`, `LABQUIZ_MARKER_DIR`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("invalid PORT value: {port:?}"))?;
        }
        if let Some(host) = lookup("LABQUIZ_HOST") {
            self.host = host;
        }
        if let Some(dir) = lookup("LABQUIZ_QUESTIONS_DIR") {
            self.questions_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("LABQUIZ_MARKER_DIR") {
            self.marker_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    /// Expand `${VAR}` references in the path settings.
    fn resolve_paths<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        self.questions_dir = resolve_path(&self.questions_dir, &lookup);
        self.marker_dir = resolve_path(&self.marker_dir, &lookup);
    }
}

fn resolve_path<F>(path: &Path, lookup: &F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    match path.to_str() {
        Some(s) if s.contains("${") => PathBuf::from(resolve_env_vars(s, lookup)),
        _ => path.to_path_buf(),
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars<F>(s: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = lookup(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `labquiz.toml` in the current directory
/// 2. `~/.config/labquiz/config.toml`
///
/// Environment overrides are applied on top.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let env = |name: &str| std::env::var(name).ok();

    let mut config = match find_config_file(path)? {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    config.apply_env_overrides(env)?;
    config.resolve_paths(env);
    Ok(config)
}

/// Parse a TOML config string (useful for testing).
pub fn parse_config_str(content: &str) -> Result<QuizConfig> {
    Ok(toml::from_str::<QuizConfig>(content)?)
}

fn find_config_file(path: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(p) = path {
        if p.exists() {
            return Ok(Some(p.to_path_buf()));
        }
        anyhow::bail!("config file not found: {}", p.display());
    }

    let local = PathBuf::from("labquiz.toml");
    if local.exists() {
        return Ok(Some(local));
    }

    Ok(dirs_path()
        .map(|home| home.join("config.toml"))
        .filter(|global| global.exists()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("labquiz"))
}
