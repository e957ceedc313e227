use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::awards::AwardAssignment;
use crate::catalog::{Category, CategoryLimits, Rubric, Stage};
use crate::scoring::{ScoredEvaluation, TeamViolation};
use crate::store::ProjectRecord;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a final score with the two decimals evaluators expect ("7.00")
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format scored evaluations as a ranked table.
/// Columns: index, score, project id, category@stage, evaluator.
/// Index column: 3 chars (fits "99."), right-aligned; score column 6 chars
/// wide (fits "10.00"), right-aligned.
pub fn format_scored_table(results: &[&ScoredEvaluation], use_colors: bool) -> String {
    if results.is_empty() {
        return "No evaluations scored.".to_string();
    }

    let term_width = get_terminal_width();

    let index_width = 3;
    let score_width = 6;
    let separator = "  ";

    results
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_padded = format!("{:>width$}", format_score(scored.final_score), width = score_width);
            let stage_ref = scored.stage_ref();
            let evaluator = scored.evaluator.as_deref().unwrap_or("-");

            let fixed_width = index_width
                + 1
                + score_width
                + separator.len() * 3
                + scored.project_id.chars().count()
                + stage_ref.len();

            let evaluator = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate_text(evaluator, width - fixed_width)
                } else {
                    truncate_text(evaluator, 12)
                }
            } else {
                // No terminal (pipe), don't truncate
                evaluator.to_string()
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    scored.project_id.yellow(),
                    separator,
                    stage_ref.cyan(),
                    separator,
                    evaluator.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str,
                    score_padded,
                    separator,
                    scored.project_id,
                    separator,
                    stage_ref,
                    separator,
                    evaluator
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one scored evaluation with its full criterion breakdown
/// (for verbose mode)
pub fn format_breakdown(scored: &ScoredEvaluation, use_colors: bool) -> String {
    let mut lines = Vec::with_capacity(scored.criteria_used.len() + 2);

    if use_colors {
        lines.push(format!(
            "{} {}",
            scored.project_id.bold(),
            scored.stage_ref().cyan()
        ));
    } else {
        lines.push(format!("{} {}", scored.project_id, scored.stage_ref()));
    }

    for entry in &scored.criteria_used {
        lines.push(format!(
            "  {:>5.1}%  {}: {:.1} -> {:.2}",
            entry.weight, entry.name, entry.raw, entry.weighted
        ));
    }

    let final_line = format!("  Final: {}", format_score(scored.final_score));
    if use_colors {
        lines.push(final_line.bold().to_string());
    } else {
        lines.push(final_line);
    }

    lines.join("\n")
}

/// Format a rubric's criteria with weights, in rubric order
pub fn format_rubric(rubric: &Rubric, use_colors: bool) -> String {
    let header = format!("Category {} — {} stage", rubric.category, rubric.stage);
    let mut lines = vec![if use_colors {
        header.bold().to_string()
    } else {
        header
    }];

    for criterion in &rubric.criteria {
        let line = format!("  {:>5.1}%  {}", criterion.weight, criterion.name);
        if criterion.description.is_empty() {
            lines.push(line);
        } else if use_colors {
            lines.push(format!(
                "{} {}",
                line,
                format!("({})", criterion.description).dimmed()
            ));
        } else {
            lines.push(format!("{} ({})", line, criterion.description));
        }
    }

    lines.join("\n")
}

/// Format the categories covered by a stage, one per line
pub fn format_stage_coverage(stage: Stage, categories: &[Category]) -> String {
    if categories.is_empty() {
        return format!("No rubrics defined for the {} stage.", stage);
    }

    let list = categories
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("Categories with a {} rubric: {}", stage, list)
}

/// Format a team validation outcome against the category's limits
pub fn format_team_report(
    limits: &CategoryLimits,
    outcome: &Result<(), Vec<TeamViolation>>,
    use_colors: bool,
) -> String {
    let mut lines = vec![format!(
        "Category {}: up to {} members, advisor {}, co-advisor {}",
        limits.category,
        limits.max_members,
        if limits.requires_advisor {
            "required"
        } else {
            "optional"
        },
        if limits.allows_co_advisor {
            "allowed"
        } else {
            "not allowed"
        },
    )];

    match outcome {
        Ok(()) => {
            let line = "Team composition is valid.".to_string();
            lines.push(if use_colors {
                line.green().to_string()
            } else {
                line
            });
        }
        Err(violations) => {
            for violation in violations {
                let line = format!("  - {}", violation);
                lines.push(if use_colors {
                    line.red().to_string()
                } else {
                    line
                });
            }
        }
    }

    lines.join("\n")
}

/// Format award assignments, joining project titles from metadata
pub fn format_award_report(
    assignments: &[AwardAssignment],
    projects: &[ProjectRecord],
    use_colors: bool,
) -> String {
    if assignments.is_empty() {
        return "No awards could be assigned.".to_string();
    }

    assignments
        .iter()
        .map(|assignment| {
            let title = projects
                .iter()
                .find(|p| p.id == assignment.project_id)
                .map(|p| p.title.as_str())
                .unwrap_or("(unknown project)");

            if use_colors {
                format!(
                    "{}: {} {} {}",
                    assignment.award_name.bold(),
                    format_score(assignment.final_score).bold(),
                    title,
                    format!("({})", assignment.project_id).dimmed()
                )
            } else {
                format!(
                    "{}: {} {} ({})",
                    assignment.award_name,
                    format_score(assignment.final_score),
                    title,
                    assignment.project_id
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format scored evaluations as tab-separated values for scripting
/// Columns: final_score, project_id, category, stage, evaluator (no headers,
/// no colors)
pub fn format_tsv_scored(results: &[&ScoredEvaluation]) -> String {
    if results.is_empty() {
        return String::new();
    }

    results
        .iter()
        .map(|scored| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                format_score(scored.final_score),
                scored.project_id,
                scored.category,
                scored.stage,
                scored.evaluator.as_deref().unwrap_or("-")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format award assignments as tab-separated values
/// Columns: award_id, project_id, final_score
pub fn format_tsv_awards(assignments: &[AwardAssignment]) -> String {
    if assignments.is_empty() {
        return String::new();
    }

    assignments
        .iter()
        .map(|assignment| {
            format!(
                "{}\t{}\t{}",
                assignment.award_id,
                assignment.project_id,
                format_score(assignment.final_score)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Criterion};
    use crate::scoring::CriterionScore;
    use std::collections::HashMap;

    fn sample_scored(project_id: &str, final_score: f64) -> ScoredEvaluation {
        ScoredEvaluation {
            project_id: project_id.to_string(),
            category: Category::III,
            stage: Stage::Virtual,
            evaluator: Some("aval-01".to_string()),
            raw_scores: HashMap::from([("Método Científico".to_string(), 7.0)]),
            final_score,
            criteria_used: vec![CriterionScore {
                name: "Método Científico".to_string(),
                weight: 100.0,
                raw: 7.0,
                weighted: 7.0,
            }],
        }
    }

    #[test]
    fn test_format_score_two_decimals() {
        assert_eq!(format_score(10.0), "10.00");
        assert_eq!(format_score(7.5), "7.50");
        assert_eq!(format_score(8.13), "8.13");
    }

    #[test]
    fn test_empty_table() {
        let results: Vec<&ScoredEvaluation> = vec![];
        assert_eq!(format_scored_table(&results, false), "No evaluations scored.");
    }

    #[test]
    fn test_scored_table_contains_fields() {
        let scored = sample_scored("proj-1", 7.0);
        let table = format_scored_table(&[&scored], false);
        assert!(table.contains("7.00"));
        assert!(table.contains("proj-1"));
        assert!(table.contains("III@virtual"));
        assert!(table.contains("aval-01"));
        assert!(table.starts_with(" 1."));
    }

    #[test]
    fn test_breakdown_lists_criteria_and_final() {
        let scored = sample_scored("proj-1", 7.0);
        let detail = format_breakdown(&scored, false);
        assert!(detail.contains("Método Científico"));
        assert!(detail.contains("100.0%"));
        assert!(detail.contains("Final: 7.00"));
    }

    #[test]
    fn test_format_rubric() {
        let rubric = Rubric {
            category: Category::I,
            stage: Stage::Presential,
            criteria: vec![Criterion {
                name: "Trabalho em Equipe".to_string(),
                weight: 8.0,
                description: "Participação equilibrada dos integrantes".to_string(),
            }],
        };
        let text = format_rubric(&rubric, false);
        assert!(text.contains("Category I — presential stage"));
        assert!(text.contains("8.0%"));
        assert!(text.contains("Trabalho em Equipe"));
        assert!(text.contains("(Participação equilibrada dos integrantes)"));
    }

    #[test]
    fn test_stage_coverage_empty() {
        let text = format_stage_coverage(Stage::Virtual, &[]);
        assert!(text.contains("No rubrics defined"));
    }

    #[test]
    fn test_team_report_violations() {
        let limits = CategoryLimits::for_category(Category::III);
        let outcome = Err(vec![TeamViolation::MaxMembers {
            category: Category::III,
            limit: 3,
            actual: 4,
        }]);
        let report = format_team_report(&limits, &outcome, false);
        assert!(report.contains("Category III: up to 3 members"));
        assert!(report.contains("max_members"));
    }

    #[test]
    fn test_tsv_scored() {
        let a = sample_scored("proj-1", 7.0);
        let b = sample_scored("proj-2", 9.25);
        let tsv = format_tsv_scored(&[&a, &b]);
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "7.00\tproj-1\tIII\tvirtual\taval-01");
        assert_eq!(lines[1], "9.25\tproj-2\tIII\tvirtual\taval-01");
    }

    #[test]
    fn test_truncate_text_unicode() {
        assert_eq!(truncate_text("Método", 10), "Método");
        assert_eq!(truncate_text("Método Científico", 9), "Método...");
    }
}
