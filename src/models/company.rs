//! Company data models
//!
//! Defines the Company structure, its interview pipeline length, and the
//! eligibility thresholds applied to student academic profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::round::RoundTag;
use super::student::AcademicProfile;

/// Minimum academic metrics a student must meet to sit for a company.
///
/// Thresholds default to zero (no restriction) when a company does not
/// declare them, matching how they are entered on the company form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EligibilityCriteria {
    /// Minimum Class X percentage
    pub min_xth: f64,
    /// Minimum Class XII percentage
    pub min_xiith: f64,
    /// Minimum aggregate undergraduate percentage
    pub min_aggregate_ug: f64,
}

/// A recruiting company with a fixed-length interview pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Company {
    /// Company unique ID (UUID)
    pub id: String,
    /// Display name
    pub name: String,
    /// Number of interview rounds in the pipeline (>= 1)
    pub total_rounds: u32,
    /// Eligibility thresholds consumed, not computed, by the core
    #[serde(default)]
    pub eligibility: EligibilityCriteria,
    /// Registration time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Create a new company with a generated ID and no eligibility bars
    pub fn new(name: impl Into<String>, total_rounds: u32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            total_rounds,
            eligibility: EligibilityCriteria::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new company with eligibility thresholds
    pub fn with_eligibility(
        name: impl Into<String>,
        total_rounds: u32,
        eligibility: EligibilityCriteria,
    ) -> Self {
        let mut company = Self::new(name, total_rounds);
        company.eligibility = eligibility;
        company
    }

    /// Threshold check over a student profile; all minimums are inclusive
    pub fn is_eligible(&self, profile: &AcademicProfile) -> bool {
        profile.xth_percent >= self.eligibility.min_xth
            && profile.xiith_percent >= self.eligibility.min_xiith
            && profile.aggregate_ug >= self.eligibility.min_aggregate_ug
    }

    /// Labels of the numbered rounds in pipeline order
    /// ("Round 1" .. "Round {total_rounds}")
    pub fn round_labels(&self) -> Vec<String> {
        (0..self.total_rounds)
            .map(|index| RoundTag::from_index(index).label())
            .collect()
    }

    /// Refresh the last-update timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
