//! Pattern library for PHI detection
//!
//! A [`PatternRegistry`] is an ordered, immutable list of compiled
//! [`PhiPattern`]s. Registries are built once and shared behind an `Arc`.
//!
//! Pattern files group entries under snake-case category keys:
//!
//! ```toml
//! [[patterns.ssn]]
//! name = "ssn_dashed"
//! pattern = '\b\d{3}-\d{2}-\d{4}\b'
//! description = "US Social Security Number"
//! risk_level = "high"
//! ```

mod builtin;

use crate::detection::models::{PhiCategory, RiskLevel};
use crate::domain::{PhiGuardError, Result as PhiResult};
use anyhow::{Context, Result};
use fancy_regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use builtin::BUILTIN_PATTERNS;

static GLOBAL_REGISTRY: OnceLock<Arc<PatternRegistry>> = OnceLock::new();

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternDefinition {
    /// Unique pattern name
    pub name: String,
    /// Regular expression source
    pub pattern: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Optional risk level (category default otherwise)
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    #[serde(default)]
    patterns: BTreeMap<String, Vec<PatternDefinition>>,
}

/// Compiled PHI pattern
#[derive(Debug, Clone)]
pub struct PhiPattern {
    /// Unique name within the registry
    pub name: String,
    /// PHI category reported for matches
    pub category: PhiCategory,
    /// Risk level reported for matches
    pub risk_level: RiskLevel,
    /// Compiled matcher
    pub matcher: Regex,
    /// Human-readable description
    pub description: String,
}

/// Where a registry's patterns came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSource {
    BuiltIn,
    File(PathBuf),
    Inline,
}

/// Pattern counts for observability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternStatistics {
    pub total_patterns: usize,
    pub counts_by_category: BTreeMap<PhiCategory, usize>,
    pub counts_by_risk_level: BTreeMap<RiskLevel, usize>,
}

/// Pattern registry for PHI detection
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    patterns: Vec<PhiPattern>,
    source: PatternSource,
}

impl PatternRegistry {
    /// Load patterns from `path`, falling back to the built-in set
    ///
    /// Any read, parse or compile failure is logged and the built-in
    /// patterns are used instead, so detection stays available.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };

        match Self::from_file(path) {
            Ok(registry) => {
                tracing::info!(
                    path = %path.display(),
                    patterns = registry.len(),
                    "Loaded PHI pattern library"
                );
                registry
            }
            Err(e) => {
                let reason = format!("{e:#}");
                crate::log_pattern_fallback!(path.display(), reason);
                Self::builtin()
            }
        }
    }

    /// Create a new pattern registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read pattern library: {}",
                path.as_ref().display()
            )
        })?;

        let mut registry = Self::from_toml(&content)?;
        registry.source = PatternSource::File(path.as_ref().to_path_buf());
        Ok(registry)
    }

    /// Create a pattern registry from TOML content
    ///
    /// Fails on an unknown category, an invalid regex, a duplicate pattern
    /// name or a library without patterns.
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary =
            toml::from_str(content).context("Failed to parse pattern library TOML")?;

        let mut patterns = Vec::new();
        let mut names = HashSet::new();

        for (key, definitions) in library.patterns {
            let category = key
                .parse::<PhiCategory>()
                .map_err(|e| anyhow::anyhow!("Invalid category key '{key}': {e}"))?;

            for def in definitions {
                if !names.insert(def.name.clone()) {
                    anyhow::bail!("Duplicate pattern name '{}'", def.name);
                }

                let matcher = Regex::new(&def.pattern)
                    .with_context(|| format!("Invalid regex in pattern '{}'", def.name))?;

                patterns.push(PhiPattern {
                    risk_level: def
                        .risk_level
                        .unwrap_or_else(|| category.default_risk_level()),
                    name: def.name,
                    category,
                    matcher,
                    description: def.description,
                });
            }
        }

        if patterns.is_empty() {
            anyhow::bail!("Pattern library defines no patterns");
        }

        // Stable sort keeps file order within a category
        patterns.sort_by_key(|p| p.category.precedence());

        Ok(Self {
            patterns,
            source: PatternSource::Inline,
        })
    }

    /// Create a registry with the built-in patterns
    pub fn builtin() -> Self {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .filter_map(|def| match Regex::new(def.pattern) {
                Ok(matcher) => Some(PhiPattern {
                    name: def.name.to_string(),
                    category: def.category,
                    risk_level: def.category.default_risk_level(),
                    matcher,
                    description: def.description.to_string(),
                }),
                Err(e) => {
                    tracing::error!(pattern = def.name, error = %e, "Built-in pattern failed to compile");
                    None
                }
            })
            .collect();

        Self {
            patterns,
            source: PatternSource::BuiltIn,
        }
    }

    /// Process-wide registry, built from the built-in patterns on first use
    /// unless [`init_global`](Self::init_global) installed one earlier
    pub fn global() -> Arc<PatternRegistry> {
        GLOBAL_REGISTRY
            .get_or_init(|| Arc::new(Self::builtin()))
            .clone()
    }

    /// Install the process-wide registry
    ///
    /// # Errors
    ///
    /// Returns [`PhiGuardError::Configuration`] if the global registry was
    /// already installed or already used.
    pub fn init_global(registry: PatternRegistry) -> PhiResult<Arc<PatternRegistry>> {
        let registry = Arc::new(registry);
        GLOBAL_REGISTRY.set(Arc::clone(&registry)).map_err(|_| {
            PhiGuardError::Configuration(
                "Global pattern registry is already initialized".to_string(),
            )
        })?;
        Ok(registry)
    }

    /// All patterns in matching order
    pub fn patterns(&self) -> &[PhiPattern] {
        &self.patterns
    }

    /// Patterns for a specific category, in matching order
    pub fn patterns_for_category(
        &self,
        category: PhiCategory,
    ) -> impl Iterator<Item = &PhiPattern> + '_ {
        self.patterns.iter().filter(move |p| p.category == category)
    }

    /// Categories with at least one pattern
    pub fn categories(&self) -> BTreeSet<PhiCategory> {
        self.patterns.iter().map(|p| p.category).collect()
    }

    pub fn statistics(&self) -> PatternStatistics {
        let mut counts_by_category = BTreeMap::new();
        let mut counts_by_risk_level = BTreeMap::new();

        for pattern in &self.patterns {
            *counts_by_category.entry(pattern.category).or_insert(0) += 1;
            *counts_by_risk_level.entry(pattern.risk_level).or_insert(0) += 1;
        }

        PatternStatistics {
            total_patterns: self.patterns.len(),
            counts_by_category,
            counts_by_risk_level,
        }
    }

    pub fn source(&self) -> &PatternSource {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
