//! Career and team matching over scored assessments.

pub mod career;
pub mod catalog;
pub mod compatibility;

pub use career::{
    adjust_salary, calculate_career_matches, calculate_readiness_level, match_careers,
    CareerMatch, MatchBreakdown, QualificationLevel, WorkStyleAxis, WorkStyleTag, MATCH_LIMIT,
};
pub use catalog::{CareerCatalog, CareerCategory, CareerProfile, CatalogImportError};
pub use compatibility::{
    calculate_compatibility, team_compatibility, CommunicationProfile, CompatibilityMatrix,
    PairCompatibility, TeamCompatibilityReport, TeamMember,
};
