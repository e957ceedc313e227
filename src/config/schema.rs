use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Criterion, Rubric, Stage};

/// Top-level configuration.
///
/// Everything is optional: the built-in catalog is complete on its own, so a
/// missing config file just means defaults.
///
/// Example YAML:
/// ```yaml
/// event:
///   name: "Feira de Ciências Estadual"
///   edition: "2025"
/// rubrics:
///   - category: Relato
///     stage: virtual
///     criteria:
///       - { name: "Relato da Prática", weight: 60, description: "Consistência do relato" }
///       - { name: "Argumentação", weight: 40 }
/// ```
#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Event metadata shown on report headers.
    #[serde(default)]
    pub event: Option<EventConfig>,

    /// Additional rubrics merged into the built-in catalog. Validated
    /// exactly like built-ins; a pair already covered is a duplicate.
    #[serde(default)]
    pub rubrics: Option<Vec<RubricConfig>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EventConfig {
    pub name: String,
    #[serde(default)]
    pub edition: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RubricConfig {
    pub category: Category,
    pub stage: Stage,
    pub criteria: Vec<CriterionConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CriterionConfig {
    pub name: String,
    /// Percentage weight, 0-100.
    pub weight: f64,
    #[serde(default)]
    pub description: String,
}

impl RubricConfig {
    pub fn into_rubric(self) -> Rubric {
        Rubric {
            category: self.category,
            stage: self.stage,
            criteria: self
                .criteria
                .into_iter()
                .map(|c| Criterion {
                    name: c.name,
                    weight: c.weight,
                    description: c.description,
                })
                .collect(),
        }
    }
}

impl Config {
    /// Rubric additions as catalog rubrics, empty when none configured.
    pub fn extra_rubrics(&self) -> Vec<Rubric> {
        self.rubrics
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(RubricConfig::into_rubric)
            .collect()
    }
}
