use thiserror::Error;

use crate::catalog::{Category, CategoryLimits};

/// A team composition rule broken at submission time.
///
/// Each variant leads with the constraint name so callers can render
/// actionable feedback (and scripts can match on it).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TeamViolation {
    #[error("max_members: team has {actual} members, category {category} allows at most {limit}")]
    MaxMembers {
        category: Category,
        limit: u32,
        actual: u32,
    },

    #[error("advisor_required: category {category} requires an advisor")]
    AdvisorRequired { category: Category },

    #[error("co_advisor_not_allowed: category {category} does not allow a co-advisor")]
    CoAdvisorNotAllowed { category: Category },
}

impl TeamViolation {
    /// The constraint identifier, stable for machine consumption.
    pub fn constraint(&self) -> &'static str {
        match self {
            TeamViolation::MaxMembers { .. } => "max_members",
            TeamViolation::AdvisorRequired { .. } => "advisor_required",
            TeamViolation::CoAdvisorNotAllowed { .. } => "co_advisor_not_allowed",
        }
    }
}

/// Check a team composition against its category's limits.
/// Returns all violated rules at once (not just the first).
pub fn validate_team(
    category: Category,
    member_count: u32,
    has_advisor: bool,
    has_co_advisor: bool,
) -> Result<(), Vec<TeamViolation>> {
    let limits = CategoryLimits::for_category(category);
    let mut violations = Vec::new();

    if member_count > limits.max_members {
        violations.push(TeamViolation::MaxMembers {
            category,
            limit: limits.max_members,
            actual: member_count,
        });
    }

    if limits.requires_advisor && !has_advisor {
        violations.push(TeamViolation::AdvisorRequired { category });
    }

    if has_co_advisor && !limits.allows_co_advisor {
        violations.push(TeamViolation::CoAdvisorNotAllowed { category });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
