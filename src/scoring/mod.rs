pub mod engine;
pub mod team;

pub use engine::{round_half_up2, score_evaluation, CriterionScore, ScoredEvaluation, ScoringError};
pub use team::{validate_team, TeamViolation};
