//! Round state store
//!
//! The authoritative in-memory mapping of (company, student) pairs to
//! participation records, plus the company and student registries the
//! records resolve against.
//!
//! ## Concurrency
//!
//! Each pair owns its record behind an `Arc<RwLock<_>>`; a toggle resolves
//! the pair under the outer map's read lock and then write-locks only that
//! record. Toggles on the same pair are strictly serialized (read-modify-
//! write atomic, last writer observed by the store wins); toggles on
//! different pairs proceed concurrently without contending.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::models::{
    AcademicProfile, CohortSnapshot, Company, CompanyMeta, CompanyRounds, CompanyView,
    EligibilityCriteria, ParticipationRecord, Student, StudentRounds, StudentView, ToggleCommit,
};

use super::error::StoreError;
use super::sink::RoundWriteSink;

/// (company_id, student_id)
type PairKey = (String, String);

/// A single toggle request against one pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToggleMutation {
    /// Flip membership of `Round {round_index + 1}`
    ToggleRound {
        /// 0-based round index
        round_index: u32,
    },
    /// Flip the `Selected` sentinel
    ToggleSelected,
}

/// Authoritative store for companies, students, and round-clearance state.
///
/// The store is the single source of truth consumed by the analytics
/// aggregator; once a toggle commits, no other component holds a divergent
/// copy of that record.
pub struct RoundStateStore {
    // Lock order when taking more than one: companies, students, records.
    companies: RwLock<HashMap<String, Company>>,
    students: RwLock<HashMap<String, Student>>,
    records: RwLock<HashMap<PairKey, Arc<RwLock<ParticipationRecord>>>>,
    sink: Option<Arc<dyn RoundWriteSink>>,
}

impl RoundStateStore {
    /// Create an empty store with no write sink attached
    pub fn new() -> Self {
        Self {
            companies: RwLock::new(HashMap::new()),
            students: RwLock::new(HashMap::new()),
            records: RwLock::new(HashMap::new()),
            sink: None,
        }
    }

    /// Create an empty store that forwards committed toggles to `sink`
    pub fn with_sink(sink: Arc<dyn RoundWriteSink>) -> Self {
        Self {
            sink: Some(sink),
            ..Self::new()
        }
    }

    // ===== Company registry =====

    /// Register a new company.
    ///
    /// The name must be non-blank and the pipeline must have at least one
    /// round.
    pub async fn register_company(
        &self,
        name: &str,
        total_rounds: u32,
        eligibility: EligibilityCriteria,
    ) -> Result<Company, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidInput("company name is blank".to_string()));
        }
        if total_rounds == 0 {
            return Err(StoreError::InvalidInput(
                "company must define at least one round".to_string(),
            ));
        }
        let company = Company::with_eligibility(name, total_rounds, eligibility);
        let mut companies = self.companies.write().await;
        companies.insert(company.id.clone(), company.clone());
        Ok(company)
    }

    /// Update a company's name, pipeline length, and eligibility bars.
    ///
    /// Tags above a reduced pipeline length stay on existing records;
    /// callers treat them as out of range.
    pub async fn update_company(
        &self,
        company_id: &str,
        name: &str,
        total_rounds: u32,
        eligibility: EligibilityCriteria,
    ) -> Result<Company, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidInput("company name is blank".to_string()));
        }
        if total_rounds == 0 {
            return Err(StoreError::InvalidInput(
                "company must define at least one round".to_string(),
            ));
        }
        let mut companies = self.companies.write().await;
        let company = companies
            .get_mut(company_id)
            .ok_or_else(|| StoreError::CompanyNotFound(company_id.to_string()))?;
        company.name = name.to_string();
        company.total_rounds = total_rounds;
        company.eligibility = eligibility;
        company.touch();
        Ok(company.clone())
    }

    /// Remove a company and every association recorded against it
    pub async fn remove_company(&self, company_id: &str) -> Result<Company, StoreError> {
        let mut companies = self.companies.write().await;
        let company = companies
            .remove(company_id)
            .ok_or_else(|| StoreError::CompanyNotFound(company_id.to_string()))?;
        drop(companies);

        let mut records = self.records.write().await;
        records.retain(|(cid, _), _| cid.as_str() != company_id);
        Ok(company)
    }

    /// Fetch one company
    pub async fn company(&self, company_id: &str) -> Result<Company, StoreError> {
        let companies = self.companies.read().await;
        companies
            .get(company_id)
            .cloned()
            .ok_or_else(|| StoreError::CompanyNotFound(company_id.to_string()))
    }

    /// All companies, name-ordered
    pub async fn list_companies(&self) -> Vec<Company> {
        let companies = self.companies.read().await;
        let mut all: Vec<Company> = companies.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        all
    }

    // ===== Student registry =====

    /// Register a new student with their academic profile
    pub async fn register_student(
        &self,
        name: &str,
        profile: AcademicProfile,
    ) -> Result<Student, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidInput("student name is blank".to_string()));
        }
        let student = Student::with_profile(name, profile);
        let mut students = self.students.write().await;
        students.insert(student.id.clone(), student.clone());
        Ok(student)
    }

    /// Remove a student and every association they hold
    pub async fn remove_student(&self, student_id: &str) -> Result<Student, StoreError> {
        let mut students = self.students.write().await;
        let student = students
            .remove(student_id)
            .ok_or_else(|| StoreError::StudentNotFound(student_id.to_string()))?;
        drop(students);

        let mut records = self.records.write().await;
        records.retain(|(_, sid), _| sid.as_str() != student_id);
        Ok(student)
    }

    /// Fetch one student
    pub async fn student(&self, student_id: &str) -> Result<Student, StoreError> {
        let students = self.students.read().await;
        students
            .get(student_id)
            .cloned()
            .ok_or_else(|| StoreError::StudentNotFound(student_id.to_string()))
    }

    /// All students, name-ordered
    pub async fn list_students(&self) -> Vec<Student> {
        let students = self.students.read().await;
        let mut all: Vec<Student> = students.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        all
    }

    /// Number of registered students meeting a company's eligibility bars
    pub async fn eligible_student_count(&self, company_id: &str) -> Result<usize, StoreError> {
        let companies = self.companies.read().await;
        let company = companies
            .get(company_id)
            .ok_or_else(|| StoreError::CompanyNotFound(company_id.to_string()))?;
        let students = self.students.read().await;
        Ok(students
            .values()
            .filter(|student| company.is_eligible(&student.profile))
            .count())
    }

    // ===== Associations and toggles =====

    /// Associate a student with a company (the student applies).
    ///
    /// Creates an empty record for the pair; calling again for an existing
    /// pair is a no-op returning the current record.
    pub async fn register_application(
        &self,
        company_id: &str,
        student_id: &str,
    ) -> Result<ParticipationRecord, StoreError> {
        let companies = self.companies.read().await;
        if !companies.contains_key(company_id) {
            return Err(StoreError::CompanyNotFound(company_id.to_string()));
        }
        drop(companies);
        let students = self.students.read().await;
        if !students.contains_key(student_id) {
            return Err(StoreError::StudentNotFound(student_id.to_string()));
        }
        drop(students);

        let key = (company_id.to_string(), student_id.to_string());
        let mut records = self.records.write().await;
        let record = records
            .entry(key)
            .or_insert_with(|| Arc::new(RwLock::new(ParticipationRecord::new())))
            .clone();
        drop(records);

        let snapshot = record.read().await.clone();
        Ok(snapshot)
    }

    /// Snapshot of one pair's record, or `NotFound` when the student never
    /// applied to that company
    pub async fn get_record(
        &self,
        company_id: &str,
        student_id: &str,
    ) -> Result<ParticipationRecord, StoreError> {
        let record = self.resolve_pair(company_id, student_id).await?;
        let snapshot = record.read().await.clone();
        Ok(snapshot)
    }

    /// Apply one toggle to a pair's record.
    ///
    /// Read-modify-write atomic per pair: the record lock is held across
    /// the flip, the snapshot clone, and the sink commit, so the sink
    /// observes per-pair commits in store order. `ToggleRound` indices are
    /// validated against the company pipeline (`InvalidIndex`).
    pub async fn apply_toggle(
        &self,
        company_id: &str,
        student_id: &str,
        mutation: ToggleMutation,
    ) -> Result<ParticipationRecord, StoreError> {
        if let ToggleMutation::ToggleRound { round_index } = mutation {
            let companies = self.companies.read().await;
            let company = companies
                .get(company_id)
                .ok_or_else(|| StoreError::CompanyNotFound(company_id.to_string()))?;
            if round_index >= company.total_rounds {
                return Err(StoreError::InvalidIndex {
                    company_id: company_id.to_string(),
                    round_index,
                    total_rounds: company.total_rounds,
                });
            }
        }

        let record = self.resolve_pair(company_id, student_id).await?;

        let mut guard = record.write().await;
        match mutation {
            ToggleMutation::ToggleRound { round_index } => {
                guard.toggle_round(round_index);
            }
            ToggleMutation::ToggleSelected => {
                guard.toggle_selected();
            }
        }
        let snapshot = guard.clone();
        if let Some(sink) = &self.sink {
            sink.commit(ToggleCommit {
                company_id: company_id.to_string(),
                student_id: student_id.to_string(),
                rounds: snapshot.tags_sorted(),
            })
            .await;
        }
        drop(guard);

        Ok(snapshot)
    }

    async fn resolve_pair(
        &self,
        company_id: &str,
        student_id: &str,
    ) -> Result<Arc<RwLock<ParticipationRecord>>, StoreError> {
        let records = self.records.read().await;
        records
            .get(&(company_id.to_string(), student_id.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                company_id: company_id.to_string(),
                student_id: student_id.to_string(),
            })
    }

    // ===== Boundary views =====

    /// Per-student view of the associations ("get one user")
    pub async fn student_view(&self, student_id: &str) -> Result<StudentView, StoreError> {
        let companies = self.companies.read().await;
        let students = self.students.read().await;
        let student = students
            .get(student_id)
            .ok_or_else(|| StoreError::StudentNotFound(student_id.to_string()))?;
        let records = self.records.read().await;

        let mut entries = Vec::new();
        for ((company_id, sid), record) in records.iter() {
            if sid.as_str() != student_id {
                continue;
            }
            let Some(company) = companies.get(company_id) else {
                continue;
            };
            let rounds = record.read().await.tags_sorted();
            entries.push(CompanyRounds {
                company_id: company_id.clone(),
                company_name: company.name.clone(),
                rounds,
            });
        }
        entries.sort_by(|a, b| {
            a.company_name
                .cmp(&b.company_name)
                .then_with(|| a.company_id.cmp(&b.company_id))
        });

        Ok(StudentView {
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            companies: entries,
        })
    }

    /// Per-company view of the associations ("get one company")
    pub async fn company_view(&self, company_id: &str) -> Result<CompanyView, StoreError> {
        let companies = self.companies.read().await;
        let company = companies
            .get(company_id)
            .ok_or_else(|| StoreError::CompanyNotFound(company_id.to_string()))?;
        let students = self.students.read().await;
        let records = self.records.read().await;

        let mut entries = Vec::new();
        for ((cid, student_id), record) in records.iter() {
            if cid.as_str() != company_id {
                continue;
            }
            let Some(student) = students.get(student_id) else {
                continue;
            };
            let rounds = record.read().await.tags_sorted();
            entries.push(StudentRounds {
                student_id: student_id.clone(),
                student_name: student.name.clone(),
                rounds,
            });
        }
        entries.sort_by(|a, b| {
            a.student_name
                .cmp(&b.student_name)
                .then_with(|| a.student_id.cmp(&b.student_id))
        });

        Ok(CompanyView {
            company_id: company.id.clone(),
            company_name: company.name.clone(),
            total_rounds: company.total_rounds,
            students: entries,
        })
    }

    /// Full cohort snapshot for the analytics aggregator ("get all users").
    ///
    /// Every registered student appears, with or without associations, so
    /// the cohort summary counts unengaged students too.
    pub async fn cohort_snapshot(&self) -> CohortSnapshot {
        let companies = self.companies.read().await;
        let students = self.students.read().await;
        let records = self.records.read().await;

        let mut per_student: HashMap<&str, Vec<CompanyRounds>> = HashMap::new();
        for ((company_id, student_id), record) in records.iter() {
            let Some(company) = companies.get(company_id) else {
                continue;
            };
            let rounds = record.read().await.tags_sorted();
            per_student
                .entry(student_id.as_str())
                .or_default()
                .push(CompanyRounds {
                    company_id: company_id.clone(),
                    company_name: company.name.clone(),
                    rounds,
                });
        }

        let mut student_views: Vec<StudentView> = students
            .values()
            .map(|student| {
                let mut entries = per_student.remove(student.id.as_str()).unwrap_or_default();
                entries.sort_by(|a, b| {
                    a.company_name
                        .cmp(&b.company_name)
                        .then_with(|| a.company_id.cmp(&b.company_id))
                });
                StudentView {
                    student_id: student.id.clone(),
                    student_name: student.name.clone(),
                    companies: entries,
                }
            })
            .collect();
        student_views.sort_by(|a, b| {
            a.student_name
                .cmp(&b.student_name)
                .then_with(|| a.student_id.cmp(&b.student_id))
        });

        let mut metas: Vec<CompanyMeta> = companies
            .values()
            .map(|company| CompanyMeta {
                company_id: company.id.clone(),
                company_name: company.name.clone(),
                total_rounds: company.total_rounds,
            })
            .collect();
        metas.sort_by(|a, b| {
            a.company_name
                .cmp(&b.company_name)
                .then_with(|| a.company_id.cmp(&b.company_id))
        });

        CohortSnapshot {
            students: student_views,
            companies: metas,
        }
    }
}

impl Default for RoundStateStore {
    fn default() -> Self {
        Self::new()
    }
}
