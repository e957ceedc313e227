mod awards;
mod limits;
mod rubrics;
mod types;

pub use awards::builtin_awards;
pub use rubrics::builtin_rubrics;
pub use types::{
    Award, AwardKind, Category, CategoryLimits, Criterion, InstitutionKind, KnowledgeArea, Region,
    Rubric, Stage,
};

use std::collections::{HashMap, HashSet};

use thiserror::Error;

/// Allowed drift of a rubric's weight sum from 100, to absorb
/// floating-point representation of the percentages.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// A rubric that cannot be admitted into the catalog.
///
/// Raised at construction, never at lookup: a catalog that fails to build
/// leaves the engine unusable instead of letting it compute wrong grades.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("rubric {category}/{stage}: criteria weights sum to {sum:.2}, expected 100")]
    WeightSum {
        category: Category,
        stage: Stage,
        sum: f64,
    },

    #[error("rubric {category}/{stage}: criterion '{name}' has non-positive weight {weight}")]
    NonPositiveWeight {
        category: Category,
        stage: Stage,
        name: String,
        weight: f64,
    },

    #[error("rubric {category}/{stage}: duplicate criterion '{name}'")]
    DuplicateCriterion {
        category: Category,
        stage: Stage,
        name: String,
    },

    #[error("rubric {category}/{stage}: defined more than once")]
    DuplicateRubric { category: Category, stage: Stage },

    #[error("rubric {category}/{stage}: has no criteria")]
    EmptyRubric { category: Category, stage: Stage },
}

/// Authoritative (category, stage) -> weighted criteria mapping.
///
/// Built once at startup and immutable afterwards; every lookup during
/// scoring is a plain read.
#[derive(Debug, Clone)]
pub struct RubricCatalog {
    rubrics: HashMap<(Category, Stage), Rubric>,
}

impl RubricCatalog {
    /// Build a catalog from the built-in tables.
    pub fn builtin() -> Result<Self, Vec<CatalogError>> {
        Self::build(builtin_rubrics())
    }

    /// Build a catalog from the built-in tables plus additional rubrics
    /// (e.g. supplied through the config file). Additions are validated
    /// exactly like built-ins.
    pub fn builtin_with(additions: Vec<Rubric>) -> Result<Self, Vec<CatalogError>> {
        let mut all = builtin_rubrics();
        all.extend(additions);
        Self::build(all)
    }

    /// Validate and index a rubric set.
    ///
    /// Collects every violation instead of stopping at the first, so a
    /// misconfigured catalog is fixed in one pass.
    pub fn build(rubrics: Vec<Rubric>) -> Result<Self, Vec<CatalogError>> {
        let mut errors = Vec::new();
        let mut indexed: HashMap<(Category, Stage), Rubric> = HashMap::new();

        for rubric in rubrics {
            let key = (rubric.category, rubric.stage);

            if indexed.contains_key(&key) {
                errors.push(CatalogError::DuplicateRubric {
                    category: rubric.category,
                    stage: rubric.stage,
                });
                continue;
            }

            if rubric.criteria.is_empty() {
                errors.push(CatalogError::EmptyRubric {
                    category: rubric.category,
                    stage: rubric.stage,
                });
                continue;
            }

            let mut seen = HashSet::new();
            for criterion in &rubric.criteria {
                if !seen.insert(criterion.name.as_str()) {
                    errors.push(CatalogError::DuplicateCriterion {
                        category: rubric.category,
                        stage: rubric.stage,
                        name: criterion.name.clone(),
                    });
                }
                if criterion.weight <= 0.0 {
                    errors.push(CatalogError::NonPositiveWeight {
                        category: rubric.category,
                        stage: rubric.stage,
                        name: criterion.name.clone(),
                        weight: criterion.weight,
                    });
                }
            }

            let sum = rubric.weight_sum();
            if (sum - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
                errors.push(CatalogError::WeightSum {
                    category: rubric.category,
                    stage: rubric.stage,
                    sum,
                });
            }

            indexed.insert(key, rubric);
        }

        if errors.is_empty() {
            Ok(RubricCatalog { rubrics: indexed })
        } else {
            Err(errors)
        }
    }

    /// Look up the rubric for a (category, stage) pair.
    pub fn get(&self, category: Category, stage: Stage) -> Option<&Rubric> {
        self.rubrics.get(&(category, stage))
    }

    /// Categories that have a rubric defined for a stage, in category order.
    pub fn categories_for_stage(&self, stage: Stage) -> Vec<Category> {
        let mut categories: Vec<Category> = self
            .rubrics
            .keys()
            .filter(|(_, s)| *s == stage)
            .map(|(c, _)| *c)
            .collect();
        categories.sort();
        categories
    }

    /// All rubrics, ordered by (category, stage) for stable listings.
    pub fn iter(&self) -> impl Iterator<Item = &Rubric> {
        let mut keys: Vec<&(Category, Stage)> = self.rubrics.keys().collect();
        keys.sort();
        keys.into_iter().map(move |k| &self.rubrics[k])
    }

    pub fn len(&self) -> usize {
        self.rubrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rubrics.is_empty()
    }
}
