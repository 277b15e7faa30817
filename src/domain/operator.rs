//! Operator rule table and phone classification.
//!
//! The table is an immutable value built once (either the built-in rules or
//! a JSON rules file) and passed by reference to everything that classifies.
//! Patterns are compiled at construction and tested against the
//! national-significant number.

use crate::error::{NumsiftError, NumsiftResult};
use log::debug;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Pattern used by the catch-all rule.
pub const CATCH_ALL_PATTERN: &str = ".*";

/// One operator: id, display name and ordered patterns.
#[derive(Debug, Clone)]
pub struct OperatorRule {
    id: String,
    display_name: String,
    patterns: Vec<Regex>,
    catch_all: bool,
}

impl OperatorRule {
    /// Builds a regular rule, compiling each pattern.
    pub fn new(id: &str, display_name: &str, patterns: &[&str]) -> NumsiftResult<Self> {
        let patterns = patterns
            .iter()
            .map(|p| Self::compile(p))
            .collect::<NumsiftResult<Vec<_>>>()?;

        Ok(Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            patterns,
            catch_all: false,
        })
    }

    /// Builds the fallback rule matching any digit string.
    pub fn catch_all(id: &str, display_name: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            patterns: vec![Regex::new(CATCH_ALL_PATTERN).expect("Valid catch-all regex")],
            catch_all: true,
        }
    }

    fn compile(pattern: &str) -> NumsiftResult<Regex> {
        Regex::new(pattern).map_err(|e| NumsiftError::PatternError {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_catch_all(&self) -> bool {
        self.catch_all
    }

    /// Pattern sources in declaration order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|r| r.as_str())
    }

    /// Returns the first pattern (in declaration order) matching `digits`.
    pub fn first_match(&self, digits: &str) -> Option<&Regex> {
        self.patterns.iter().find(|r| r.is_match(digits))
    }
}

/// Which rules a classification considers.
#[derive(Debug, Clone, Copy)]
pub enum OperatorScope<'a> {
    /// Every rule in table order; first match wins
    All,
    /// A single caller-selected rule
    Only(&'a OperatorRule),
}

/// Outcome of classifying one digit string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub operator_id: String,
    pub operator_name: String,
    /// True only when a non-catch-all pattern matched
    pub is_valid: bool,
    pub matched_pattern: Option<String>,
}

impl Classification {
    fn from_match(rule: &OperatorRule, pattern: Option<&Regex>) -> Self {
        Self {
            operator_id: rule.id.clone(),
            operator_name: rule.display_name.clone(),
            is_valid: pattern.is_some() && !rule.catch_all,
            matched_pattern: pattern.map(|r| r.as_str().to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RulesFile {
    operators: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
struct RuleEntry {
    id: String,
    name: String,
    #[serde(default)]
    patterns: Vec<String>,
    #[serde(default)]
    catch_all: bool,
}

/// Ordered, immutable set of operator rules ending in a catch-all.
#[derive(Debug, Clone)]
pub struct OperatorTable {
    rules: Vec<OperatorRule>,
}

impl OperatorTable {
    /// Validates and wraps `rules`.
    ///
    /// Exactly one catch-all rule must exist and it must come last; ids
    /// must be unique.
    pub fn new(rules: Vec<OperatorRule>) -> NumsiftResult<Self> {
        match rules.last() {
            None => {
                return Err(NumsiftError::InvalidRuleTable(
                    "table has no rules".to_string(),
                ))
            }
            Some(last) if !last.catch_all => {
                return Err(NumsiftError::InvalidRuleTable(format!(
                    "last rule '{}' is not a catch-all",
                    last.id
                )))
            }
            Some(_) => {}
        }

        if let Some(misplaced) = rules[..rules.len() - 1].iter().find(|r| r.catch_all) {
            return Err(NumsiftError::InvalidRuleTable(format!(
                "catch-all rule '{}' must be the last rule",
                misplaced.id
            )));
        }

        for (i, rule) in rules.iter().enumerate() {
            if rules[..i].iter().any(|r| r.id == rule.id) {
                return Err(NumsiftError::InvalidRuleTable(format!(
                    "duplicate operator id '{}'",
                    rule.id
                )));
            }
        }

        Ok(Self { rules })
    }

    /// The built-in Russian mobile operator rules.
    pub fn builtin() -> Self {
        let mut rules = vec![
            OperatorRule::new(
                "megafon",
                "MegaFon",
                &["^9[0-9]{9}$", "^92[0-9]{7}$", "^93[0-9]{7}$"],
            ),
            OperatorRule::new("mts", "MTS", &["^91[0-9]{7}$", "^98[0-9]{7}$"]),
            OperatorRule::new("beeline", "Beeline", &["^90[0-9]{7}$", "^96[0-9]{7}$"]),
            OperatorRule::new("tele2", "Tele2", &["^95[0-9]{7}$", "^99[0-9]{7}$"]),
        ]
        .into_iter()
        .collect::<NumsiftResult<Vec<_>>>()
        .expect("Valid built-in operator patterns");
        rules.push(OperatorRule::catch_all("other", "Other operator"));
        Self::new(rules).expect("Valid built-in operator table")
    }

    /// Parses a JSON rules document.
    ///
    /// ```json
    /// { "operators": [
    ///     { "id": "mts", "name": "MTS", "patterns": ["^91[0-9]{7}$"] },
    ///     { "id": "other", "name": "Other operator", "catch_all": true }
    /// ] }
    /// ```
    pub fn from_json(json: &str) -> NumsiftResult<Self> {
        let file: RulesFile = serde_json::from_str(json)?;
        let rules = file
            .operators
            .into_iter()
            .map(|entry| {
                if entry.catch_all {
                    Ok(OperatorRule::catch_all(&entry.id, &entry.name))
                } else {
                    let patterns: Vec<&str> = entry.patterns.iter().map(String::as_str).collect();
                    OperatorRule::new(&entry.id, &entry.name, &patterns)
                }
            })
            .collect::<NumsiftResult<Vec<_>>>()?;
        Self::new(rules)
    }

    /// Loads a JSON rules file from disk.
    pub fn from_path(path: &Path) -> NumsiftResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| NumsiftError::io(path, e))?;
        Self::from_json(&json).map_err(|e| match e {
            NumsiftError::Config { reason, .. } => NumsiftError::Config {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }

    pub fn rules(&self) -> &[OperatorRule] {
        &self.rules
    }

    /// Looks up a rule by id.
    pub fn get(&self, id: &str) -> Option<&OperatorRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// The fallback rule (always last).
    pub fn catch_all(&self) -> &OperatorRule {
        // Non-empty with a trailing catch-all, checked in `new`.
        &self.rules[self.rules.len() - 1]
    }

    /// Classifies `digits` against the rules in `scope`.
    ///
    /// First match wins: rules in table order, then patterns in declaration
    /// order. Landing on the catch-all is reported as invalid.
    pub fn classify(&self, digits: &str, scope: OperatorScope<'_>) -> Classification {
        let classification = match scope {
            OperatorScope::All => self
                .rules
                .iter()
                .find_map(|rule| {
                    rule.first_match(digits)
                        .map(|pattern| Classification::from_match(rule, Some(pattern)))
                })
                .unwrap_or_else(|| Classification::from_match(self.catch_all(), None)),
            OperatorScope::Only(rule) => Classification::from_match(rule, rule.first_match(digits)),
        };

        debug!(
            "classified '{}' as {} (valid: {})",
            digits, classification.operator_id, classification.is_valid
        );
        classification
    }

    /// Classifies a normalized number across the whole table after
    /// stripping one leading country digit `7`.
    pub fn classify_national(&self, normalized: &str) -> Classification {
        let national = normalized.strip_prefix('7').unwrap_or(normalized);
        self.classify(national, OperatorScope::All)
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::builtin()
    }
}
