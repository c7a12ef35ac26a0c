use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::scoring::domain::Dimension;

/// Career family used for interest and work-style lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerCategory {
    Technology,
    Healthcare,
    Business,
    Creative,
    Education,
    Science,
    Trades,
    SocialServices,
    General,
}

impl CareerCategory {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Technology => "technology",
            Self::Healthcare => "healthcare",
            Self::Business => "business",
            Self::Creative => "creative",
            Self::Education => "education",
            Self::Science => "science",
            Self::Trades => "trades",
            Self::SocialServices => "social_services",
            Self::General => "general",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::Healthcare => "Healthcare",
            Self::Business => "Business",
            Self::Creative => "Creative Arts",
            Self::Education => "Education",
            Self::Science => "Science",
            Self::Trades => "Skilled Trades",
            Self::SocialServices => "Social Services",
            Self::General => "General",
        }
    }

    /// Lenient parse; anything unrecognised lands in [`CareerCategory::General`].
    pub fn parse(raw: &str) -> Self {
        match raw
            .trim()
            .to_ascii_lowercase()
            .replace(['-', ' '], "_")
            .as_str()
        {
            "technology" | "tech" => Self::Technology,
            "healthcare" | "health" => Self::Healthcare,
            "business" => Self::Business,
            "creative" | "creative_arts" | "arts" => Self::Creative,
            "education" => Self::Education,
            "science" => Self::Science,
            "trades" | "skilled_trades" => Self::Trades,
            "social_services" | "social" => Self::SocialServices,
            _ => Self::General,
        }
    }

    /// Whether a swipe card category refers to this family.
    pub fn matches(self, swipe_category: &str) -> bool {
        self != Self::General && Self::parse(swipe_category) == self
    }
}

/// Target career with its competency weighting and base salary band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerProfile {
    pub title: String,
    pub category: CareerCategory,
    #[serde(default)]
    pub complex: bool,
    pub salary_range: String,
    /// Empty means the generic weighting applies.
    #[serde(default)]
    pub competencies: BTreeMap<Dimension, f64>,
}

impl CareerProfile {
    fn new(
        title: &str,
        category: CareerCategory,
        complex: bool,
        salary_range: &str,
        competencies: &[(Dimension, f64)],
    ) -> Self {
        Self {
            title: title.to_string(),
            category,
            complex,
            salary_range: salary_range.to_string(),
            competencies: competencies.iter().copied().collect(),
        }
    }
}

/// Weighting used for careers without their own competency table.
pub const GENERIC_COMPETENCIES: [(Dimension, f64); 5] = [
    (Dimension::SkillReadiness, 0.30),
    (Dimension::ProblemSolving, 0.20),
    (Dimension::Communication, 0.20),
    (Dimension::Teamwork, 0.15),
    (Dimension::WorkEthic, 0.15),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerCatalog {
    careers: Vec<CareerProfile>,
}

impl CareerCatalog {
    pub fn new(careers: Vec<CareerProfile>) -> Self {
        Self { careers }
    }

    pub fn careers(&self) -> &[CareerProfile] {
        &self.careers
    }

    pub fn len(&self) -> usize {
        self.careers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.careers.is_empty()
    }

    pub fn find(&self, title: &str) -> Option<&CareerProfile> {
        self.careers
            .iter()
            .find(|career| career.title.eq_ignore_ascii_case(title.trim()))
    }

    /// Built-in catalog used when no CSV catalog is configured.
    pub fn standard() -> Self {
        use CareerCategory::*;
        use Dimension::*;

        Self::new(vec![
            CareerProfile::new(
                "Software Engineer",
                Technology,
                true,
                "$85,000 - $140,000",
                &[
                    (ProblemSolving, 0.35),
                    (SkillReadiness, 0.25),
                    (Adaptability, 0.20),
                    (Teamwork, 0.20),
                ],
            ),
            CareerProfile::new(
                "Data Analyst",
                Technology,
                false,
                "$60,000 - $95,000",
                &[
                    (ProblemSolving, 0.40),
                    (SkillReadiness, 0.30),
                    (Communication, 0.15),
                    (WorkEthic, 0.15),
                ],
            ),
            CareerProfile::new(
                "Registered Nurse",
                Healthcare,
                true,
                "$65,000 - $105,000",
                &[
                    (Teamwork, 0.30),
                    (Communication, 0.25),
                    (WorkEthic, 0.25),
                    (Adaptability, 0.20),
                ],
            ),
            CareerProfile::new(
                "Medical Assistant",
                Healthcare,
                false,
                "$35,000 - $48,000",
                &[(WorkEthic, 0.35), (Communication, 0.35), (Teamwork, 0.30)],
            ),
            CareerProfile::new(
                "Project Manager",
                Business,
                false,
                "$70,000 - $115,000",
                &[
                    (Leadership, 0.35),
                    (Communication, 0.25),
                    (ProblemSolving, 0.20),
                    (Teamwork, 0.20),
                ],
            ),
            CareerProfile::new(
                "Sales Representative",
                Business,
                false,
                "$45,000 - $85,000",
                &[(Communication, 0.40), (Adaptability, 0.30), (WorkEthic, 0.30)],
            ),
            CareerProfile::new(
                "Graphic Designer",
                Creative,
                false,
                "$45,000 - $75,000",
                &[
                    (Adaptability, 0.35),
                    (SkillReadiness, 0.35),
                    (Communication, 0.30),
                ],
            ),
            CareerProfile::new(
                "Content Strategist",
                Creative,
                false,
                "$55,000 - $90,000",
                &[],
            ),
            CareerProfile::new(
                "Teacher",
                Education,
                false,
                "$45,000 - $70,000",
                &[
                    (Communication, 0.35),
                    (Leadership, 0.25),
                    (Adaptability, 0.20),
                    (WorkEthic, 0.20),
                ],
            ),
            CareerProfile::new(
                "Corporate Trainer",
                Education,
                false,
                "$55,000 - $85,000",
                &[],
            ),
            CareerProfile::new(
                "Research Scientist",
                Science,
                true,
                "$75,000 - $130,000",
                &[
                    (ProblemSolving, 0.40),
                    (SkillReadiness, 0.30),
                    (WorkEthic, 0.30),
                ],
            ),
            CareerProfile::new(
                "Lab Technician",
                Science,
                false,
                "$40,000 - $60,000",
                &[
                    (WorkEthic, 0.40),
                    (ProblemSolving, 0.30),
                    (SkillReadiness, 0.30),
                ],
            ),
            CareerProfile::new(
                "Electrician",
                Trades,
                false,
                "$50,000 - $90,000",
                &[
                    (SkillReadiness, 0.40),
                    (ProblemSolving, 0.30),
                    (WorkEthic, 0.30),
                ],
            ),
            CareerProfile::new(
                "Construction Manager",
                Trades,
                true,
                "$75,000 - $125,000",
                &[(Leadership, 0.40), (ProblemSolving, 0.30), (Teamwork, 0.30)],
            ),
            CareerProfile::new(
                "Social Worker",
                SocialServices,
                false,
                "$45,000 - $70,000",
                &[
                    (Communication, 0.35),
                    (Teamwork, 0.25),
                    (Adaptability, 0.20),
                    (WorkEthic, 0.20),
                ],
            ),
            CareerProfile::new(
                "Counselor",
                SocialServices,
                true,
                "$48,000 - $80,000",
                &[(Communication, 0.40), (Adaptability, 0.30), (Teamwork, 0.30)],
            ),
        ])
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads a `title,category,complex,salary_range,competencies` CSV export.
    ///
    /// Competencies are `dimension:weight` pairs separated by `;`. Unknown
    /// dimensions and malformed weights are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut careers = Vec::new();
        for row in csv_reader.deserialize::<CatalogRow>() {
            let row = row?;
            if row.title.is_empty() {
                continue;
            }
            careers.push(row.into_profile());
        }

        if careers.is_empty() {
            return Err(CatalogImportError::Empty);
        }

        Ok(Self::new(careers))
    }
}

impl Default for CareerCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    title: String,
    category: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    complex: Option<String>,
    #[serde(default)]
    salary_range: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    competencies: Option<String>,
}

impl CatalogRow {
    fn into_profile(self) -> CareerProfile {
        let complex = self
            .complex
            .map(|raw| matches!(raw.to_ascii_lowercase().as_str(), "true" | "yes" | "y" | "1"))
            .unwrap_or(false);

        CareerProfile {
            title: self.title,
            category: CareerCategory::parse(&self.category),
            complex,
            salary_range: self.salary_range,
            competencies: self
                .competencies
                .as_deref()
                .map(parse_competencies)
                .unwrap_or_default(),
        }
    }
}

fn parse_competencies(raw: &str) -> BTreeMap<Dimension, f64> {
    raw.split(';')
        .filter_map(|pair| {
            let (key, weight) = pair.split_once(':')?;
            let dimension = Dimension::from_key(key)?;
            let weight = weight.trim().parse::<f64>().ok()?;
            (weight.is_finite() && weight > 0.0).then_some((dimension, weight))
        })
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read career catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid career catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("career catalog contains no careers")]
    Empty,
}
