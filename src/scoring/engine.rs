use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Category, RubricCatalog, Stage};
use crate::store::EvaluationRecord;

/// Why a score sheet could not be graded.
///
/// Every variant is caller-correctable: fix the input and re-invoke. A
/// missing score is never defaulted to zero, because an omission must stay
/// distinguishable from an intentional worst score.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("no rubric defined for category {category} at stage {stage}")]
    NoRubric { category: Category, stage: Stage },

    #[error("score for '{0}' is missing")]
    MissingCriterion(String),

    #[error("score {value} for '{name}' is outside the 0-10 range")]
    OutOfRange { name: String, value: f64 },
}

/// One line of the score breakdown: a rubric criterion, the raw score it
/// received and its weighted contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub name: String,
    pub weight: f64,
    pub raw: f64,
    pub weighted: f64,
}

/// The graded result of one evaluation. Immutable once produced; re-scoring
/// builds a new value instead of mutating history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEvaluation {
    pub project_id: String,
    pub category: Category,
    pub stage: Stage,
    #[serde(default)]
    pub evaluator: Option<String>,
    /// The validated raw scores as submitted.
    pub raw_scores: HashMap<String, f64>,
    /// Weighted sum, rounded half-up to 2 decimal places.
    pub final_score: f64,
    /// Audit trail: one entry per rubric criterion, in rubric order.
    pub criteria_used: Vec<CriterionScore>,
}

impl ScoredEvaluation {
    /// Short reference for table output, e.g. "III@virtual".
    pub fn stage_ref(&self) -> String {
        format!("{}@{}", self.category, self.stage)
    }
}

/// Round to 2 decimal places, half away from zero. Raw scores are validated
/// non-negative, so this is the round-half-up rule evaluators expect from
/// grade arithmetic (8.125 -> 8.13, never banker's 8.12).
pub fn round_half_up2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn in_range(value: f64) -> bool {
    (0.0..=10.0).contains(&value)
}

/// Grade one evaluator's score sheet against the catalog.
///
/// Checks run in a fixed order so the reported error is deterministic:
/// rubric lookup, completeness over the rubric's criteria, range of every
/// provided score (rubric criteria first, then extras by name). Scores for
/// criteria outside the rubric are range-checked but do not contribute to
/// the sum.
pub fn score_evaluation(
    record: &EvaluationRecord,
    catalog: &RubricCatalog,
) -> Result<ScoredEvaluation, ScoringError> {
    let rubric = catalog
        .get(record.category, record.stage)
        .ok_or(ScoringError::NoRubric {
            category: record.category,
            stage: record.stage,
        })?;

    for criterion in &rubric.criteria {
        if !record.scores.contains_key(&criterion.name) {
            return Err(ScoringError::MissingCriterion(criterion.name.clone()));
        }
    }

    for criterion in &rubric.criteria {
        let raw = record.scores[&criterion.name];
        if !in_range(raw) {
            return Err(ScoringError::OutOfRange {
                name: criterion.name.clone(),
                value: raw,
            });
        }
    }

    let mut extras: Vec<&String> = record
        .scores
        .keys()
        .filter(|name| !rubric.criteria.iter().any(|c| &c.name == *name))
        .collect();
    extras.sort();
    for name in extras {
        let raw = record.scores[name];
        if !in_range(raw) {
            return Err(ScoringError::OutOfRange {
                name: name.clone(),
                value: raw,
            });
        }
    }

    let mut total = 0.0;
    let mut criteria_used = Vec::with_capacity(rubric.criteria.len());
    for criterion in &rubric.criteria {
        let raw = record.scores[&criterion.name];
        let weighted = raw * criterion.weight / 100.0;
        total += weighted;
        criteria_used.push(CriterionScore {
            name: criterion.name.clone(),
            weight: criterion.weight,
            raw,
            weighted,
        });
    }

    Ok(ScoredEvaluation {
        project_id: record.project_id.clone(),
        category: record.category,
        stage: record.stage,
        evaluator: record.evaluator.clone(),
        raw_scores: record.scores.clone(),
        final_score: round_half_up2(total),
        criteria_used,
    })
}
