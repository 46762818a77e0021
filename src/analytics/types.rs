//! Analytics type definitions
//!
//! Contains the data structures for company-level, round-level, and
//! cohort-level placement statistics.

use serde::{Deserialize, Serialize};

/// Per-company participation and selection statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CompanyStats {
    /// Company identifier
    pub company_id: String,

    /// Company display name
    pub company_name: String,

    /// Recorded associations, including ones with no cleared tags yet
    pub applied_count: u32,

    /// Students with at least one tag (appeared in the pipeline)
    pub total_students: u32,

    /// Students whose record contains `Selected`
    pub selected_count: u32,

    /// Sum of cleared round counts across the company's records
    pub total_rounds_cleared: u32,

    /// Largest cleared round count among the company's records
    pub max_rounds_cleared: u32,
}

impl Default for CompanyStats {
    fn default() -> Self {
        Self {
            company_id: String::new(),
            company_name: String::new(),
            applied_count: 0,
            total_students: 0,
            selected_count: 0,
            total_rounds_cleared: 0,
            max_rounds_cleared: 0,
        }
    }
}

/// Per-company rejection statistics.
///
/// A student counts as rejected iff they hold at least one tag for the
/// company but not `Selected`; zero-tag associations are "never engaged",
/// not rejections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RejectionStats {
    /// Company identifier
    pub company_id: String,

    /// Company display name
    pub company_name: String,

    /// Students who appeared but were not selected
    pub rejected_count: u32,

    /// `rejected_count / total_students * 100` (0 with no participants)
    pub rejection_rate: f64,
}

/// One entry of the cohort round participation series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RoundParticipation {
    /// Tag label ("Round 1", ..., "Selected")
    pub round: String,

    /// Number of records carrying the tag across the cohort
    pub count: u32,
}

/// Offer count distribution buckets.
///
/// Zero-offer students fall into no bucket; they are tracked by the
/// cohort summary as "yet to be placed".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OfferDistribution {
    /// Students holding exactly one offer
    pub single: u32,

    /// Students holding exactly two offers
    pub double: u32,

    /// Students holding exactly three offers
    pub triple: u32,

    /// Students holding four or more offers
    pub quad: u32,
}

impl OfferDistribution {
    /// Bucket one student's offer count
    pub fn record(&mut self, offer_count: u32) {
        match offer_count {
            0 => {}
            1 => self.single += 1,
            2 => self.double += 1,
            3 => self.triple += 1,
            _ => self.quad += 1,
        }
    }

    /// Students in any bucket (placed students)
    pub fn total_bucketed(&self) -> u32 {
        self.single + self.double + self.triple + self.quad
    }
}

/// Cohort-level placement summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CohortSummary {
    /// Total distinct students in the snapshot, engaged or not
    pub total_students: u32,

    /// Students holding at least one offer
    pub students_placed: u32,

    /// Sum of offer counts across the cohort
    pub total_offers: u32,

    /// `students_placed / total_students * 100`; 0 for an empty cohort,
    /// never a division fault
    pub placement_percentage: f64,

    /// `total_students - students_placed`
    pub yet_to_be_placed: u32,
}

impl Default for CohortSummary {
    fn default() -> Self {
        Self {
            total_students: 0,
            students_placed: 0,
            total_offers: 0,
            placement_percentage: 0.0,
            yet_to_be_placed: 0,
        }
    }
}

/// One round group of a per-company round summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RoundGroup {
    /// Round label ("Round 1" ... "Round {total_rounds}")
    pub round: String,

    /// Names of students who cleared the round
    pub students: Vec<String>,
}

/// Per-company round summary: one group per numbered pipeline round, with
/// selected students listed separately. Unlike the cohort histogram, the
/// numbered groups never contain `Selected`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CompanyRoundSummary {
    /// Company identifier
    pub company_id: String,

    /// Company display name
    pub company_name: String,

    /// One entry per pipeline round, in pipeline order
    pub round_groups: Vec<RoundGroup>,

    /// Names of students whose record contains `Selected`
    pub selected: Vec<String>,
}

/// Full derived report over one cohort snapshot.
///
/// Rebuilt on demand from the authoritative records; consumers must not
/// mutate it, and staleness is resolved by recomputation, never by
/// incremental patching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AggregateReport {
    /// Per-company statistics, name-ordered
    pub company_stats: Vec<CompanyStats>,

    /// Per-company rejection statistics, aligned with `company_stats`
    pub rejection_stats: Vec<RejectionStats>,

    /// Cohort tag histogram; `Selected` appears as its own series entry
    pub round_participation: Vec<RoundParticipation>,

    /// Offer count distribution over the cohort
    pub offer_distribution: OfferDistribution,

    /// Cohort-level placement summary
    pub summary: CohortSummary,

    /// Data-quality warnings for entries skipped during aggregation
    #[serde(default)]
    pub warnings: Vec<String>,
}
