//! Student data models
//!
//! Defines the Student structure and the academic profile consumed by
//! company eligibility thresholds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Academic metrics consumed by company eligibility thresholds.
///
/// The core stores and compares these values; computing them (marks
/// ingestion, grade conversion) is a collaborator concern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AcademicProfile {
    /// Class X percentage
    pub xth_percent: f64,
    /// Class XII percentage
    pub xiith_percent: f64,
    /// Aggregate undergraduate percentage
    pub aggregate_ug: f64,
}

/// A student tracked by the placement cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Student {
    /// Student unique ID (UUID)
    pub id: String,
    /// Display name
    pub name: String,
    /// Graduation degree, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    /// Academic metrics for eligibility checks
    #[serde(default)]
    pub profile: AcademicProfile,
    /// Registration time
    pub created_at: DateTime<Utc>,
    /// Last profile update time
    pub updated_at: DateTime<Utc>,
}

impl Student {
    /// Create a new student with a generated ID and empty profile
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            degree: None,
            profile: AcademicProfile::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new student with academic metrics
    pub fn with_profile(name: impl Into<String>, profile: AcademicProfile) -> Self {
        let mut student = Self::new(name);
        student.profile = profile;
        student
    }

    /// Refresh the last-update timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
