//! Detector configuration
//!
//! Category conventions are an ordered list of glob rules; the first rule
//! with a matching pattern names the category. The configuration can be
//! loaded from TOML, JSON or YAML, picked by file extension.

use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::format::Category;

/// A named category and the path globs that select it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    pub patterns: Vec<String>,
}

impl CategoryRule {
    pub fn new(name: impl Into<String>, patterns: &[&str]) -> Self {
        Self {
            name: name.into(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Configuration for [`crate::FormatDetector`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Rules in priority order
    pub categories: Vec<CategoryRule>,
    /// Category for paths no rule matches
    pub default_category: String,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            categories: vec![
                CategoryRule::new("skill", &["**/skills/*/SKILL.md"]),
                CategoryRule::new("agent", &["**/agents/*.md"]),
                CategoryRule::new("command", &["**/commands/**/*.md"]),
                CategoryRule::new("rule", &["**/rules/**/*.md", "**/rules/**/*.mdc"]),
                CategoryRule::new(
                    "instructions",
                    &[
                        "**/CLAUDE.md",
                        "**/AGENTS.md",
                        "**/GEMINI.md",
                        "**/.github/copilot-instructions.md",
                    ],
                ),
                CategoryRule::new("readme", &["**/README.md"]),
            ],
            default_category: Category::GENERIC.to_string(),
        }
    }
}

impl DetectorConfig {
    /// Parse configuration text in the format named by `extension`
    /// (`toml`, `json`, `yaml` or `yml`)
    pub fn from_str_with_extension(content: &str, extension: &str) -> Result<Self> {
        Self::parse(content, extension, Path::new("<string>"))
    }

    /// Load configuration from a file; the format comes from its extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::parse(&content, extension, path)
    }

    fn parse(content: &str, extension: &str, path: &Path) -> Result<Self> {
        let parse_error = |format: &str, message: String| Error::ConfigParse {
            path: path.to_path_buf(),
            format: format.into(),
            message,
        };

        match extension.to_lowercase().as_str() {
            "toml" => toml::from_str(content).map_err(|e| parse_error("TOML", e.to_string())),
            "json" => {
                serde_json::from_str(content).map_err(|e| parse_error("JSON", e.to_string()))
            }
            "yaml" | "yml" => {
                serde_yaml::from_str(content).map_err(|e| parse_error("YAML", e.to_string()))
            }
            _ => Err(Error::UnsupportedConfigFormat {
                extension: extension.to_string(),
            }),
        }
    }
}

/// Compile a path glob into an anchored regex
///
/// `**/` matches zero or more directories, `**` anything, `*` anything within
/// one path segment and `?` a single non-separator character.
pub(crate) fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let mut expr = String::from("^");
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    expr.push_str("(?:.*/)?");
                } else {
                    expr.push_str(".*");
                }
            }
            '*' => expr.push_str("[^/]*"),
            '?' => expr.push_str("[^/]"),
            other => expr.push_str(&regex::escape(&other.to_string())),
        }
    }
    expr.push('$');

    Regex::new(&expr).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("**/CLAUDE.md", "CLAUDE.md", true)]
    #[case("**/CLAUDE.md", "/home/me/project/CLAUDE.md", true)]
    #[case("**/CLAUDE.md", "docs/NOT_CLAUDE.md", false)]
    #[case("**/skills/*/SKILL.md", ".claude/skills/pdf/SKILL.md", true)]
    #[case("**/skills/*/SKILL.md", "skills/a/b/SKILL.md", false)]
    #[case("**/commands/**/*.md", "commands/git/commit.md", true)]
    #[case("**/commands/**/*.md", "commands/commit.md", true)]
    #[case("notes/?.md", "notes/a.md", true)]
    #[case("notes/?.md", "notes/ab.md", false)]
    #[case("a+b.md", "a+b.md", true)]
    fn glob_matching(#[case] pattern: &str, #[case] path: &str, #[case] expected: bool) {
        let re = glob_to_regex(pattern).unwrap();
        assert_eq!(re.is_match(path), expected, "{pattern} vs {path}");
    }

    #[test]
    fn default_config_has_generic_fallback() {
        let config = DetectorConfig::default();
        assert_eq!(config.default_category, "document");
        assert_eq!(config.categories[0].name, "skill");
    }

    #[test]
    fn parses_toml() {
        let config = DetectorConfig::from_str_with_extension(
            r#"
default_category = "misc"

[[categories]]
name = "design"
patterns = ["designs/*.md"]
"#,
            "toml",
        )
        .unwrap();
        assert_eq!(config.default_category, "misc");
        assert_eq!(config.categories, vec![CategoryRule::new("design", &["designs/*.md"])]);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = DetectorConfig::from_str_with_extension("{}", "json").unwrap();
        assert_eq!(config, DetectorConfig::default());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = DetectorConfig::from_str_with_extension("", "ini").unwrap_err();
        assert!(matches!(err, Error::UnsupportedConfigFormat { .. }));
    }

    #[test]
    fn malformed_yaml_reports_format() {
        let err = DetectorConfig::from_str_with_extension("categories: [", "yaml").unwrap_err();
        assert!(err.to_string().contains("YAML"));
    }
}
