pub mod formatter;

pub use formatter::{
    format_award_report, format_breakdown, format_rubric, format_score, format_scored_table,
    format_stage_coverage, format_team_report, format_tsv_awards, format_tsv_scored,
    should_use_colors,
};
