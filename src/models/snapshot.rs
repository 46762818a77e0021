//! Boundary snapshot types
//!
//! The retrieval collaborator exposes the same associations through two
//! equivalent views: per student ("get all users") and per company ("get
//! one company"). Both are plain data; the store produces them and the
//! aggregator consumes the cohort form. `ToggleCommit` is the outbound
//! write: a full replacement of one pair's tag set, never a delta.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::round::RoundTag;

/// One company entry inside a student view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CompanyRounds {
    /// Company identifier
    pub company_id: String,
    /// Company display name
    pub company_name: String,
    /// Tags cleared by the student at this company
    pub rounds: Vec<RoundTag>,
}

/// Per-student view of the associations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StudentView {
    /// Student identifier
    pub student_id: String,
    /// Student display name
    pub student_name: String,
    /// Companies the student has applied to, with cleared tags
    pub companies: Vec<CompanyRounds>,
}

impl StudentView {
    /// Number of companies at which this student holds an offer
    pub fn offer_count(&self) -> u32 {
        self.companies
            .iter()
            .filter(|entry| entry.rounds.contains(&RoundTag::Selected))
            .count() as u32
    }
}

/// One student entry inside a company view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StudentRounds {
    /// Student identifier
    pub student_id: String,
    /// Student display name
    pub student_name: String,
    /// Tags cleared by the student at this company
    pub rounds: Vec<RoundTag>,
}

/// Per-company view of the associations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CompanyView {
    /// Company identifier
    pub company_id: String,
    /// Company display name
    pub company_name: String,
    /// Number of rounds in the company pipeline
    pub total_rounds: u32,
    /// Students associated with the company, with cleared tags
    pub students: Vec<StudentRounds>,
}

/// Company identity and pipeline length carried alongside a cohort
/// snapshot so records can be resolved against the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CompanyMeta {
    /// Company identifier
    pub company_id: String,
    /// Company display name
    pub company_name: String,
    /// Number of rounds in the company pipeline
    pub total_rounds: u32,
}

/// Full cohort snapshot: aggregation input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CohortSnapshot {
    /// Every student under analysis, with or without associations
    pub students: Vec<StudentView>,
    /// The company registry the records should resolve against
    pub companies: Vec<CompanyMeta>,
}

impl CohortSnapshot {
    /// Index the company registry by id for record resolution
    pub fn company_index(&self) -> HashMap<&str, &CompanyMeta> {
        self.companies
            .iter()
            .map(|meta| (meta.company_id.as_str(), meta))
            .collect()
    }
}

/// Full replacement write for one pair, handed to the persistence
/// collaborator after a toggle commits ("set rounds to exactly this
/// collection"). Idempotent on the receiving side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ToggleCommit {
    /// Company identifier
    pub company_id: String,
    /// Student identifier
    pub student_id: String,
    /// The complete post-toggle tag set
    pub rounds: Vec<RoundTag>,
}
