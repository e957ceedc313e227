use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Age/education bracket a project competes within.
///
/// Closed set, fixed at design time. `Relato` is the non-competitive
/// experience-report track: it is scored like any other category but never
/// receives a category-winner award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
    VIII,
    Relato,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::I,
        Category::II,
        Category::III,
        Category::IV,
        Category::V,
        Category::VI,
        Category::VII,
        Category::VIII,
        Category::Relato,
    ];

    /// Whether the category competes for placement awards.
    pub fn is_competitive(&self) -> bool {
        !matches!(self, Category::Relato)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::I => "I",
            Category::II => "II",
            Category::III => "III",
            Category::IV => "IV",
            Category::V => "V",
            Category::VI => "VI",
            Category::VII => "VII",
            Category::VIII => "VIII",
            Category::Relato => "Relato",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "I" => Ok(Category::I),
            "II" => Ok(Category::II),
            "III" => Ok(Category::III),
            "IV" => Ok(Category::IV),
            "V" => Ok(Category::V),
            "VI" => Ok(Category::VI),
            "VII" => Ok(Category::VII),
            "VIII" => Ok(Category::VIII),
            "RELATO" => Ok(Category::Relato),
            other => Err(format!(
                "unknown category '{}' (expected I-VIII or Relato)",
                other
            )),
        }
    }
}

/// Phase of evaluation. Determines which rubric applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Submission,
    Virtual,
    Presential,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Submission, Stage::Virtual, Stage::Presential];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Submission => "submission",
            Stage::Virtual => "virtual",
            Stage::Presential => "presential",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "submission" => Ok(Stage::Submission),
            "virtual" => Ok(Stage::Virtual),
            "presential" => Ok(Stage::Presential),
            other => Err(format!(
                "unknown stage '{}' (expected submission, virtual or presential)",
                other
            )),
        }
    }
}

/// Knowledge area a project belongs to, used by special awards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeArea {
    ExactSciences,
    LifeSciences,
    Humanities,
    Engineering,
}

impl fmt::Display for KnowledgeArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KnowledgeArea::ExactSciences => "Ciências Exatas",
            KnowledgeArea::LifeSciences => "Ciências da Vida",
            KnowledgeArea::Humanities => "Ciências Humanas",
            KnowledgeArea::Engineering => "Engenharias",
        };
        write!(f, "{}", name)
    }
}

/// Brazilian macro-region, used by regional awards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Norte,
    Nordeste,
    CentroOeste,
    Sudeste,
    Sul,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::Norte => "Norte",
            Region::Nordeste => "Nordeste",
            Region::CentroOeste => "Centro-Oeste",
            Region::Sudeste => "Sudeste",
            Region::Sul => "Sul",
        };
        write!(f, "{}", name)
    }
}

/// School network a project comes from, used by institutional awards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstitutionKind {
    Public,
    Private,
}

impl fmt::Display for InstitutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstitutionKind::Public => "rede pública",
            InstitutionKind::Private => "rede privada",
        };
        write!(f, "{}", name)
    }
}

/// One named, weighted scoring dimension within a rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    /// Display name evaluators see; raw scores are keyed by this exact string.
    pub name: String,
    /// Percentage weight, 0-100. Weights of a rubric must sum to 100.
    pub weight: f64,
    pub description: String,
}

/// The weighted criteria set for one (category, stage) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rubric {
    pub category: Category,
    pub stage: Stage,
    /// Declared order is preserved in score breakdowns.
    pub criteria: Vec<Criterion>,
}

impl Rubric {
    pub fn weight_sum(&self) -> f64 {
        self.criteria.iter().map(|c| c.weight).sum()
    }
}

/// Per-category team composition constraints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryLimits {
    pub category: Category,
    pub max_members: u32,
    pub requires_advisor: bool,
    pub allows_co_advisor: bool,
}

/// Kind of prize in the award catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardKind {
    CategoryWinner,
    Special,
    Regional,
    Institutional,
}

impl fmt::Display for AwardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AwardKind::CategoryWinner => "category winner",
            AwardKind::Special => "special",
            AwardKind::Regional => "regional",
            AwardKind::Institutional => "institutional",
        };
        write!(f, "{}", name)
    }
}

/// Catalog entry describing a prize and its eligibility scope.
///
/// Every `Some` filter must match a project for it to be eligible; filters
/// left as `None` do not restrict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Award {
    pub id: String,
    pub name: String,
    pub kind: AwardKind,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub knowledge_area: Option<KnowledgeArea>,
    #[serde(default)]
    pub region: Option<Region>,
    #[serde(default)]
    pub institution: Option<InstitutionKind>,
    /// Free-text eligibility description shown on reports.
    pub criteria: String,
}
