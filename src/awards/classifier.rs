use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::catalog::Award;
use crate::scoring::{round_half_up2, ScoredEvaluation};
use crate::store::ProjectRecord;

/// A project's consolidated grade for one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectGrade {
    pub project_id: String,
    /// Mean of the evaluators' final scores, rounded half-up to 2 decimals.
    pub final_score: f64,
    pub evaluations: u32,
}

/// One award resolved to its winning project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardAssignment {
    pub award_id: String,
    pub award_name: String,
    pub project_id: String,
    pub final_score: f64,
}

/// Consolidate per-evaluator results into one grade per project.
///
/// Several evaluators score the same project at a stage; the project grade
/// is the arithmetic mean of their final scores. Output is ordered by
/// project id.
pub fn aggregate(evaluations: &[ScoredEvaluation]) -> Vec<ProjectGrade> {
    let mut by_project: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for evaluation in evaluations {
        by_project
            .entry(evaluation.project_id.as_str())
            .or_default()
            .push(evaluation.final_score);
    }

    by_project
        .into_iter()
        .map(|(project_id, scores)| ProjectGrade {
            project_id: project_id.to_string(),
            final_score: round_half_up2(scores.iter().sum::<f64>() / scores.len() as f64),
            evaluations: scores.len() as u32,
        })
        .collect()
}

/// Whether a project falls inside an award's eligibility scope.
/// Every `Some` filter on the award must match; `None` filters don't restrict.
fn eligible(award: &Award, project: &ProjectRecord) -> bool {
    if let Some(category) = award.category {
        if project.category != category {
            return false;
        }
    }
    if let Some(area) = award.knowledge_area {
        if project.knowledge_area != Some(area) {
            return false;
        }
    }
    if let Some(region) = award.region {
        if project.region != Some(region) {
            return false;
        }
    }
    if let Some(institution) = award.institution {
        if project.institution != Some(institution) {
            return false;
        }
    }
    true
}

/// Assign each award to its best eligible project.
///
/// Ranking is grade descending; ties go to the earliest submission date,
/// then to the smaller project id, so classification is a total order.
/// Awards with no eligible scored project produce no assignment. Graded
/// projects without a metadata record cannot be matched against scopes and
/// are skipped.
pub fn classify(
    awards: &[Award],
    grades: &[ProjectGrade],
    projects: &[ProjectRecord],
) -> Vec<AwardAssignment> {
    let by_id: HashMap<&str, &ProjectRecord> =
        projects.iter().map(|p| (p.id.as_str(), p)).collect();

    let mut candidates: Vec<(&ProjectGrade, &ProjectRecord)> = grades
        .iter()
        .filter_map(|grade| {
            by_id
                .get(grade.project_id.as_str())
                .map(|project| (grade, *project))
        })
        .collect();

    // Grade descending, then earliest submission, then project id.
    candidates.sort_by(|a, b| {
        b.0.final_score
            .partial_cmp(&a.0.final_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.submitted_at.cmp(&b.1.submitted_at))
            .then_with(|| a.0.project_id.cmp(&b.0.project_id))
    });

    awards
        .iter()
        .filter_map(|award| {
            candidates
                .iter()
                .find(|(_, project)| eligible(award, project))
                .map(|(grade, _)| AwardAssignment {
                    award_id: award.id.clone(),
                    award_name: award.name.clone(),
                    project_id: grade.project_id.clone(),
                    final_score: grade.final_score,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AwardKind, Category, InstitutionKind, KnowledgeArea, Region, Stage};
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap as StdHashMap;

    fn scored(project_id: &str, evaluator: &str, final_score: f64) -> ScoredEvaluation {
        ScoredEvaluation {
            project_id: project_id.to_string(),
            category: Category::III,
            stage: Stage::Presential,
            evaluator: Some(evaluator.to_string()),
            raw_scores: StdHashMap::new(),
            final_score,
            criteria_used: vec![],
        }
    }

    fn grade(project_id: &str, final_score: f64) -> ProjectGrade {
        ProjectGrade {
            project_id: project_id.to_string(),
            final_score,
            evaluations: 1,
        }
    }

    fn project(id: &str, category: Category, day: u32) -> ProjectRecord {
        ProjectRecord {
            id: id.to_string(),
            title: format!("Projeto {}", id),
            category,
            knowledge_area: Some(KnowledgeArea::ExactSciences),
            institution: Some(InstitutionKind::Public),
            state: Some("SP".to_string()),
            region: Some(Region::Sudeste),
            submitted_at: Utc.with_ymd_and_hms(2025, 4, day, 12, 0, 0).unwrap(),
        }
    }

    fn category_award(category: Category) -> Award {
        Award {
            id: "cat".to_string(),
            name: "Destaque da Categoria".to_string(),
            kind: AwardKind::CategoryWinner,
            category: Some(category),
            knowledge_area: None,
            region: None,
            institution: None,
            criteria: String::new(),
        }
    }

    #[test]
    fn test_aggregate_means_per_project() {
        let grades = aggregate(&[
            scored("p1", "a", 8.0),
            scored("p1", "b", 9.0),
            scored("p2", "a", 7.0),
        ]);
        assert_eq!(grades.len(), 2);
        assert_eq!(grades[0].project_id, "p1");
        assert_eq!(grades[0].final_score, 8.5);
        assert_eq!(grades[0].evaluations, 2);
        assert_eq!(grades[1].project_id, "p2");
        assert_eq!(grades[1].final_score, 7.0);
    }

    #[test]
    fn test_aggregate_rounds_half_up() {
        // (8.0 + 8.25) / 2 = 8.125 -> 8.13
        let grades = aggregate(&[scored("p1", "a", 8.0), scored("p1", "b", 8.25)]);
        assert_eq!(grades[0].final_score, 8.13);
    }

    #[test]
    fn test_highest_grade_wins() {
        let projects = vec![
            project("p1", Category::III, 1),
            project("p2", Category::III, 2),
        ];
        let grades = vec![grade("p1", 7.5), grade("p2", 9.0)];
        let assignments = classify(&[category_award(Category::III)], &grades, &projects);
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].project_id, "p2");
        assert_eq!(assignments[0].final_score, 9.0);
    }

    #[test]
    fn test_tie_breaks_on_earliest_submission() {
        let projects = vec![
            project("late", Category::III, 20),
            project("early", Category::III, 5),
        ];
        let grades = vec![grade("late", 9.0), grade("early", 9.0)];
        let assignments = classify(&[category_award(Category::III)], &grades, &projects);
        assert_eq!(assignments[0].project_id, "early");
    }

    #[test]
    fn test_tie_breaks_on_project_id_when_dates_equal() {
        let projects = vec![
            project("p-b", Category::III, 5),
            project("p-a", Category::III, 5),
        ];
        let grades = vec![grade("p-b", 9.0), grade("p-a", 9.0)];
        let assignments = classify(&[category_award(Category::III)], &grades, &projects);
        assert_eq!(assignments[0].project_id, "p-a");
    }

    #[test]
    fn test_category_filter_excludes_other_categories() {
        let projects = vec![
            project("p1", Category::III, 1),
            project("p2", Category::IV, 2),
        ];
        let grades = vec![grade("p1", 6.0), grade("p2", 10.0)];
        let assignments = classify(&[category_award(Category::III)], &grades, &projects);
        assert_eq!(assignments[0].project_id, "p1");
    }

    #[test]
    fn test_award_with_no_eligible_project_is_skipped() {
        let projects = vec![project("p1", Category::III, 1)];
        let grades = vec![grade("p1", 6.0)];
        let assignments = classify(&[category_award(Category::VIII)], &grades, &projects);
        assert!(assignments.is_empty());
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let mut northern = project("p1", Category::III, 1);
        northern.region = Some(Region::Norte);
        northern.knowledge_area = Some(KnowledgeArea::Engineering);
        let projects = vec![northern, project("p2", Category::III, 2)];
        let grades = vec![grade("p1", 5.0), grade("p2", 10.0)];

        let award = Award {
            id: "norte-eng".to_string(),
            name: "Destaque".to_string(),
            kind: AwardKind::Special,
            category: None,
            knowledge_area: Some(KnowledgeArea::Engineering),
            region: Some(Region::Norte),
            institution: None,
            criteria: String::new(),
        };

        let assignments = classify(&[award], &grades, &projects);
        // p2 has the higher grade but is Sudeste/ExactSciences.
        assert_eq!(assignments[0].project_id, "p1");
    }

    #[test]
    fn test_graded_project_without_metadata_is_skipped() {
        let projects = vec![project("p1", Category::III, 1)];
        let grades = vec![grade("p1", 6.0), grade("ghost", 10.0)];
        let assignments = classify(&[category_award(Category::III)], &grades, &projects);
        assert_eq!(assignments[0].project_id, "p1");
    }

    #[test]
    fn test_unscoped_award_matches_any_project() {
        let projects = vec![project("p1", Category::III, 1)];
        let grades = vec![grade("p1", 6.0)];
        let award = Award {
            id: "geral".to_string(),
            name: "Melhor do Evento".to_string(),
            kind: AwardKind::Special,
            category: None,
            knowledge_area: None,
            region: None,
            institution: None,
            criteria: String::new(),
        };
        let assignments = classify(&[award], &grades, &projects);
        assert_eq!(assignments.len(), 1);
    }
}
