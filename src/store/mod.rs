use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, InstitutionKind, KnowledgeArea, Region, Stage};
use crate::scoring::ScoredEvaluation;

/// On-disk envelope version shared by all data files.
pub const DATA_VERSION: u32 = 1;

/// One evaluator's raw score sheet for one project at one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub project_id: String,
    pub category: Category,
    pub stage: Stage,
    #[serde(default)]
    pub evaluator: Option<String>,
    #[serde(default)]
    pub evaluated_at: Option<DateTime<Utc>>,
    /// Raw scores keyed by exact criterion name, each expected in [0, 10].
    pub scores: HashMap<String, f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluationFile {
    pub version: u32,
    #[serde(default)]
    pub evaluations: Vec<EvaluationRecord>,
}

/// Project metadata used for reporting and award eligibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,
    pub title: String,
    pub category: Category,
    #[serde(default)]
    pub knowledge_area: Option<KnowledgeArea>,
    #[serde(default)]
    pub institution: Option<InstitutionKind>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub region: Option<Region>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectsFile {
    pub version: u32,
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoredFile {
    pub version: u32,
    #[serde(default)]
    pub results: Vec<ScoredEvaluation>,
}

fn open_data_file(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("Failed to open data file at {}", path.display()))
}

fn check_version(version: u32, path: &Path) -> Result<()> {
    if version != DATA_VERSION {
        anyhow::bail!(
            "Unsupported data file version {} in {} (expected {})",
            version,
            path.display(),
            DATA_VERSION
        );
    }
    Ok(())
}

/// Load evaluator score sheets from a JSON file.
pub fn load_evaluations(path: &Path) -> Result<Vec<EvaluationRecord>> {
    let file = open_data_file(path)?;
    let parsed: EvaluationFile = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse evaluations from {}", path.display()))?;
    check_version(parsed.version, path)?;
    Ok(parsed.evaluations)
}

/// Load project metadata from a JSON file.
pub fn load_projects(path: &Path) -> Result<Vec<ProjectRecord>> {
    let file = open_data_file(path)?;
    let parsed: ProjectsFile = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse projects from {}", path.display()))?;
    check_version(parsed.version, path)?;
    Ok(parsed.projects)
}

/// Load previously scored evaluations from a JSON file.
pub fn load_scored(path: &Path) -> Result<Vec<ScoredEvaluation>> {
    let file = open_data_file(path)?;
    let parsed: ScoredFile = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse scored results from {}", path.display()))?;
    check_version(parsed.version, path)?;
    Ok(parsed.results)
}

/// Save scored evaluations to a JSON file atomically.
///
/// Uses atomic-write-file so a crash mid-write never leaves a truncated
/// results file behind.
pub fn save_scored(path: &Path, results: &[ScoredEvaluation]) -> Result<()> {
    let envelope = ScoredFile {
        version: DATA_VERSION,
        results: results.to_vec(),
    };

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, &envelope).context("Failed to serialize scored results")?;

    file.commit().context("Failed to save scored results")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::CriterionScore;
    use chrono::TimeZone;

    fn sample_scored(project_id: &str) -> ScoredEvaluation {
        ScoredEvaluation {
            project_id: project_id.to_string(),
            category: Category::III,
            stage: Stage::Virtual,
            evaluator: Some("aval-01".to_string()),
            raw_scores: HashMap::from([("Método Científico".to_string(), 8.0)]),
            final_score: 8.0,
            criteria_used: vec![CriterionScore {
                name: "Método Científico".to_string(),
                weight: 100.0,
                raw: 8.0,
                weighted: 8.0,
            }],
        }
    }

    #[test]
    fn test_save_and_load_scored_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scored.json");

        let results = vec![sample_scored("proj-1"), sample_scored("proj-2")];
        save_scored(&path, &results).unwrap();

        let loaded = load_scored(&path).unwrap();
        assert_eq!(loaded, results);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(load_evaluations(&path).is_err());
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scored.json");
        std::fs::write(&path, r#"{"version": 99, "results": []}"#).unwrap();
        let err = load_scored(&path).unwrap_err();
        assert!(err.to_string().contains("version 99"));
    }

    #[test]
    fn test_load_evaluations_with_optional_fields_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evals.json");
        std::fs::write(
            &path,
            r#"{
                "version": 1,
                "evaluations": [
                    {
                        "project_id": "proj-9",
                        "category": "VII",
                        "stage": "presential",
                        "scores": {"Método Científico": 7.5}
                    }
                ]
            }"#,
        )
        .unwrap();

        let evaluations = load_evaluations(&path).unwrap();
        assert_eq!(evaluations.len(), 1);
        assert_eq!(evaluations[0].category, Category::VII);
        assert_eq!(evaluations[0].stage, Stage::Presential);
        assert!(evaluations[0].evaluator.is_none());
        assert!(evaluations[0].evaluated_at.is_none());
        assert_eq!(evaluations[0].scores["Método Científico"], 7.5);
    }

    #[test]
    fn test_load_projects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.json");
        std::fs::write(
            &path,
            r#"{
                "version": 1,
                "projects": [
                    {
                        "id": "proj-1",
                        "title": "Horta automatizada",
                        "category": "V",
                        "knowledge_area": "engineering",
                        "institution": "public",
                        "state": "CE",
                        "region": "nordeste",
                        "submitted_at": "2025-04-10T12:00:00Z"
                    }
                ]
            }"#,
        )
        .unwrap();

        let projects = load_projects(&path).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].region, Some(Region::Nordeste));
        assert_eq!(projects[0].institution, Some(InstitutionKind::Public));
        assert_eq!(
            projects[0].submitted_at,
            Utc.with_ymd_and_hms(2025, 4, 10, 12, 0, 0).unwrap()
        );
    }
}
