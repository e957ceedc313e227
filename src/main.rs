use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use fairgrade::catalog::{Category, CategoryLimits, RubricCatalog, Stage};
use fairgrade::scoring::ScoredEvaluation;

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score evaluator sheets and print a ranked table
    Score {
        /// JSON file with the raw evaluation sheets
        input: PathBuf,

        /// Write the scored results to a JSON file (atomic)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },

    /// Inspect the rubric catalog
    Rubrics {
        /// Stage to inspect (submission, virtual, presential)
        #[arg(short, long)]
        stage: Option<String>,

        /// Category to inspect (I-VIII or Relato)
        #[arg(short = 'C', long)]
        category: Option<String>,
    },

    /// Check a team composition against its category's limits
    Team {
        /// Category the project competes in (I-VIII or Relato)
        category: String,

        /// Number of student members
        #[arg(short, long)]
        members: u32,

        /// Team has an advisor
        #[arg(long)]
        advisor: bool,

        /// Team has a co-advisor
        #[arg(long)]
        co_advisor: bool,
    },

    /// Assign category winners and special awards from scored results
    Awards {
        /// JSON file with scored evaluations (from `score --output`)
        scored: PathBuf,

        /// JSON file with project metadata
        projects: PathBuf,

        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "fairgrade")]
#[command(about = "Science-fair evaluation scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/fairgrade/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match fairgrade::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        if let Some(ref event) = config.event {
            eprintln!(
                "Event: {}{}",
                event.name,
                event
                    .edition
                    .as_deref()
                    .map(|e| format!(" ({})", e))
                    .unwrap_or_default()
            );
        }
    }

    // Build the rubric catalog at startup; a malformed catalog must never
    // reach the scoring engine.
    let catalog = match RubricCatalog::builtin_with(config.extra_rubrics()) {
        Ok(c) => c,
        Err(errors) => {
            eprintln!("Rubric catalog errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        eprintln!("Catalog holds {} rubrics", catalog.len());
    }

    let use_colors = fairgrade::output::should_use_colors();

    match cli.command {
        Commands::Score { input, output, tsv } => {
            let evaluations = match fairgrade::store::load_evaluations(&input) {
                Ok(e) => e,
                Err(e) => {
                    eprintln!("Data error: {}", e);
                    std::process::exit(EXIT_DATA);
                }
            };

            if cli.verbose {
                eprintln!(
                    "Loaded {} evaluation sheets from {}",
                    evaluations.len(),
                    input.display()
                );
            }

            let mut scored: Vec<ScoredEvaluation> = Vec::new();
            let mut failures = 0usize;

            for record in &evaluations {
                match fairgrade::scoring::score_evaluation(record, &catalog) {
                    Ok(result) => scored.push(result),
                    Err(e) => {
                        failures += 1;
                        eprintln!(
                            "Skipping {} ({}): {}",
                            record.project_id,
                            record.evaluator.as_deref().unwrap_or("-"),
                            e
                        );
                        // Continue with the remaining sheets; each error is
                        // correctable on its own.
                    }
                }
            }

            // Rank by score descending; ties by project id, then evaluator,
            // so output is reproducible.
            scored.sort_by(|a, b| {
                b.final_score
                    .partial_cmp(&a.final_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.project_id.cmp(&b.project_id))
                    .then_with(|| a.evaluator.cmp(&b.evaluator))
            });

            let refs: Vec<&ScoredEvaluation> = scored.iter().collect();

            if tsv {
                let out = fairgrade::output::format_tsv_scored(&refs);
                if !out.is_empty() {
                    println!("{}", out);
                }
            } else if cli.verbose && !refs.is_empty() {
                for result in &refs {
                    println!("{}", fairgrade::output::format_breakdown(result, use_colors));
                    println!();
                }
            } else {
                println!(
                    "{}",
                    fairgrade::output::format_scored_table(&refs, use_colors)
                );
            }

            if let Some(output_path) = output {
                if let Err(e) = fairgrade::store::save_scored(&output_path, &scored) {
                    eprintln!("Data error: {}", e);
                    std::process::exit(EXIT_DATA);
                }
                if cli.verbose {
                    eprintln!(
                        "Wrote {} scored results to {}",
                        scored.len(),
                        output_path.display()
                    );
                }
            }

            if cli.verbose {
                eprintln!();
                eprintln!(
                    "Scored {} of {} sheets in {:?}",
                    scored.len(),
                    evaluations.len(),
                    start_time.elapsed()
                );
            }

            // All sheets failing means the input file is bad as a whole.
            if !evaluations.is_empty() && failures == evaluations.len() {
                std::process::exit(EXIT_DATA);
            }
        }

        Commands::Rubrics { stage, category } => {
            let stage = stage.map(|s| parse_or_exit::<Stage>(&s));
            let category = category.map(|c| parse_or_exit::<Category>(&c));

            match (category, stage) {
                (Some(category), Some(stage)) => match catalog.get(category, stage) {
                    Some(rubric) => {
                        println!("{}", fairgrade::output::format_rubric(rubric, use_colors))
                    }
                    None => {
                        eprintln!(
                            "No rubric defined for category {} at stage {}",
                            category, stage
                        );
                        std::process::exit(EXIT_DATA);
                    }
                },
                (None, Some(stage)) => {
                    let categories = catalog.categories_for_stage(stage);
                    println!(
                        "{}",
                        fairgrade::output::format_stage_coverage(stage, &categories)
                    );
                }
                (Some(category), None) => {
                    for stage in Stage::ALL {
                        if let Some(rubric) = catalog.get(category, stage) {
                            println!("{}", fairgrade::output::format_rubric(rubric, use_colors));
                            println!();
                        }
                    }
                }
                (None, None) => {
                    for rubric in catalog.iter() {
                        println!("{}", fairgrade::output::format_rubric(rubric, use_colors));
                        println!();
                    }
                }
            }
        }

        Commands::Team {
            category,
            members,
            advisor,
            co_advisor,
        } => {
            let category = parse_or_exit::<Category>(&category);
            let limits = CategoryLimits::for_category(category);
            let outcome = fairgrade::scoring::validate_team(category, members, advisor, co_advisor);
            let valid = outcome.is_ok();

            println!(
                "{}",
                fairgrade::output::format_team_report(&limits, &outcome, use_colors)
            );

            if !valid {
                std::process::exit(EXIT_DATA);
            }
        }

        Commands::Awards {
            scored,
            projects,
            tsv,
        } => {
            let scored_results = match fairgrade::store::load_scored(&scored) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Data error: {}", e);
                    std::process::exit(EXIT_DATA);
                }
            };
            let project_records = match fairgrade::store::load_projects(&projects) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Data error: {}", e);
                    std::process::exit(EXIT_DATA);
                }
            };

            let grades = fairgrade::awards::aggregate(&scored_results);

            if cli.verbose {
                eprintln!(
                    "Aggregated {} evaluations into {} project grades",
                    scored_results.len(),
                    grades.len()
                );
            }

            let awards = fairgrade::catalog::builtin_awards();
            let assignments = fairgrade::awards::classify(&awards, &grades, &project_records);

            if tsv {
                let out = fairgrade::output::format_tsv_awards(&assignments);
                if !out.is_empty() {
                    println!("{}", out);
                }
            } else {
                println!(
                    "{}",
                    fairgrade::output::format_award_report(
                        &assignments,
                        &project_records,
                        use_colors
                    )
                );
            }

            if cli.verbose {
                eprintln!();
                eprintln!(
                    "Assigned {} of {} awards in {:?}",
                    assignments.len(),
                    awards.len(),
                    start_time.elapsed()
                );
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

fn parse_or_exit<T: std::str::FromStr<Err = String>>(value: &str) -> T {
    match value.parse::<T>() {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}
