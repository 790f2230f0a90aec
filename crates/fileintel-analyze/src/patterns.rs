//! Ordered rule table for recognizing disposable files.
//!
//! Rules are evaluated in order and the first match wins, so more specific
//! rules must come before broader ones.

use std::path::Path;

use globset::{Glob, GlobMatcher};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// How a rule compares against a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchKind {
    /// Base name equals the pattern exactly.
    Exact,
    /// Base name ends with the pattern, ignoring ASCII case.
    Suffix,
    /// Some path component equals the pattern.
    Contains,
    /// Base name matches a glob.
    Glob,
}

/// A single pattern rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRule {
    /// Identifier recorded in `FileAnalysis::pattern_match`.
    pub id: String,
    pub kind: MatchKind,
    pub pattern: String,
    /// Base disposability score (0-100) for files matching this rule.
    pub score: f64,
}

impl PatternRule {
    /// Create a new rule.
    pub fn new(id: impl Into<String>, kind: MatchKind, pattern: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            kind,
            pattern: pattern.into(),
            score,
        }
    }
}

/// Built-in rules as `(id, kind, pattern, score)`.
const DEFAULT_RULES: &[(&str, MatchKind, &str, f64)] = &[
    ("ds_store", MatchKind::Exact, ".DS_Store", 95.0),
    ("thumbs_db", MatchKind::Exact, "Thumbs.db", 95.0),
    ("desktop_ini", MatchKind::Exact, "desktop.ini", 90.0),
    ("node_modules", MatchKind::Contains, "node_modules", 90.0),
    ("pycache", MatchKind::Contains, "__pycache__", 90.0),
    ("derived_data", MatchKind::Contains, "DerivedData", 90.0),
    ("office_lock", MatchKind::Glob, "~$*", 90.0),
    ("vim_swap", MatchKind::Glob, "*.sw[op]", 85.0),
    ("rotated_log", MatchKind::Glob, "*.log.[0-9]*", 90.0),
    ("log", MatchKind::Suffix, ".log", 85.0),
    ("tmp", MatchKind::Suffix, ".tmp", 95.0),
    ("temp", MatchKind::Suffix, ".temp", 95.0),
    ("cache", MatchKind::Suffix, ".cache", 90.0),
    ("partial_download", MatchKind::Suffix, ".crdownload", 90.0),
    ("partial", MatchKind::Suffix, ".part", 85.0),
    ("pyc", MatchKind::Suffix, ".pyc", 90.0),
    ("object_file", MatchKind::Suffix, ".o", 85.0),
    ("crash_dump", MatchKind::Suffix, ".dmp", 85.0),
    ("backup", MatchKind::Suffix, ".bak", 75.0),
    ("old_copy", MatchKind::Suffix, ".old", 75.0),
    ("editor_backup", MatchKind::Suffix, "~", 75.0),
];

/// Compiled, ordered rule table.
#[derive(Debug, Clone)]
pub struct PatternTable {
    rules: Vec<PatternRule>,
    /// Compiled matcher for each rule; only set for glob rules.
    globs: Vec<Option<GlobMatcher>>,
}

impl PatternTable {
    /// Compile a rule table, preserving rule order.
    pub fn new(rules: Vec<PatternRule>) -> Result<Self, EngineError> {
        let globs = rules
            .iter()
            .map(|rule| match rule.kind {
                MatchKind::Glob => Glob::new(&rule.pattern)
                    .map(|g| Some(g.compile_matcher()))
                    .map_err(|source| EngineError::Pattern {
                        id: rule.id.clone(),
                        source,
                    }),
                _ => Ok(None),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules, globs })
    }

    /// The built-in rule table.
    pub fn default_rules() -> Vec<PatternRule> {
        DEFAULT_RULES
            .iter()
            .map(|&(id, kind, pattern, score)| PatternRule::new(id, kind, pattern, score))
            .collect()
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// First rule matching the path, if any.
    pub fn first_match(&self, path: &Path) -> Option<&PatternRule> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        self.rules
            .iter()
            .zip(&self.globs)
            .find(|(rule, glob)| match rule.kind {
                MatchKind::Exact => name == rule.pattern.as_str(),
                MatchKind::Suffix => ends_with_ignore_case(&name, &rule.pattern),
                MatchKind::Contains => path
                    .components()
                    .any(|part| part.as_os_str() == rule.pattern.as_str()),
                MatchKind::Glob => matches!(glob, Some(g) if g.is_match(&*name)),
            })
            .map(|(rule, _)| rule)
    }
}

fn ends_with_ignore_case(name: &str, suffix: &str) -> bool {
    name.len() >= suffix.len()
        && name.is_char_boundary(name.len() - suffix.len())
        && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}
