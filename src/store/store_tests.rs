//! Unit tests for the round state store
//!
//! Covers toggle semantics, error taxonomy, cascade removal, boundary
//! views, sink commits, and the per-pair serialization guarantee.

use std::sync::Arc;

use crate::models::{AcademicProfile, EligibilityCriteria, RoundTag};

use super::sink::InMemorySink;
use super::*;

async fn store_with_pair() -> (RoundStateStore, String, String) {
    let store = RoundStateStore::new();
    let company = store
        .register_company("Acme", 3, EligibilityCriteria::default())
        .await
        .unwrap();
    let student = store
        .register_student("Asha", AcademicProfile::default())
        .await
        .unwrap();
    store
        .register_application(&company.id, &student.id)
        .await
        .unwrap();
    (store, company.id, student.id)
}

#[tokio::test]
async fn test_get_record_unknown_pair_is_not_found() {
    let store = RoundStateStore::new();
    let err = store.get_record("no-company", "no-student").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
    assert_eq!(err.code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_register_application_is_idempotent() {
    let (store, company_id, student_id) = store_with_pair().await;
    store
        .apply_toggle(&company_id, &student_id, ToggleMutation::ToggleRound { round_index: 0 })
        .await
        .unwrap();

    // Re-applying must not reset the existing record.
    let record = store
        .register_application(&company_id, &student_id)
        .await
        .unwrap();
    assert!(record.has(RoundTag::Round(1)));
}

#[tokio::test]
async fn test_toggle_round_on_then_off_restores_empty_record() {
    let (store, company_id, student_id) = store_with_pair().await;
    let mutation = ToggleMutation::ToggleRound { round_index: 1 };

    let after_on = store
        .apply_toggle(&company_id, &student_id, mutation)
        .await
        .unwrap();
    assert!(after_on.has(RoundTag::Round(2)));

    let after_off = store
        .apply_toggle(&company_id, &student_id, mutation)
        .await
        .unwrap();
    assert!(after_off.is_empty());
}

#[tokio::test]
async fn test_toggle_selected_is_independent_of_rounds() {
    let (store, company_id, student_id) = store_with_pair().await;
    store
        .apply_toggle(&company_id, &student_id, ToggleMutation::ToggleRound { round_index: 0 })
        .await
        .unwrap();

    let record = store
        .apply_toggle(&company_id, &student_id, ToggleMutation::ToggleSelected)
        .await
        .unwrap();
    assert!(record.has(RoundTag::Selected));
    assert!(record.has(RoundTag::Round(1)));

    let record = store
        .apply_toggle(&company_id, &student_id, ToggleMutation::ToggleSelected)
        .await
        .unwrap();
    assert!(!record.has(RoundTag::Selected));
    assert!(record.has(RoundTag::Round(1)));
}

#[tokio::test]
async fn test_toggle_round_outside_pipeline_is_invalid_index() {
    let (store, company_id, student_id) = store_with_pair().await;
    let err = store
        .apply_toggle(&company_id, &student_id, ToggleMutation::ToggleRound { round_index: 3 })
        .await
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::InvalidIndex {
            company_id: company_id.clone(),
            round_index: 3,
            total_rounds: 3,
        }
    );
}

#[tokio::test]
async fn test_toggle_against_unknown_company_or_pair() {
    let (store, company_id, _student_id) = store_with_pair().await;

    let err = store
        .apply_toggle("ghost", "anyone", ToggleMutation::ToggleRound { round_index: 0 })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::CompanyNotFound(_)));

    // Known company, but the student never applied.
    let err = store
        .apply_toggle(&company_id, "anyone", ToggleMutation::ToggleSelected)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test]
async fn test_register_company_validation() {
    let store = RoundStateStore::new();
    let err = store
        .register_company("  ", 3, EligibilityCriteria::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput(_)));

    let err = store
        .register_company("Acme", 0, EligibilityCriteria::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput(_)));
}

#[tokio::test]
async fn test_update_company_touches_and_replaces_fields() {
    let (store, company_id, _) = store_with_pair().await;
    let updated = store
        .update_company(
            &company_id,
            "Acme Corp",
            5,
            EligibilityCriteria {
                min_xth: 60.0,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Acme Corp");
    assert_eq!(updated.total_rounds, 5);
    assert_eq!(updated.eligibility.min_xth, 60.0);

    let err = store
        .update_company("ghost", "X", 1, EligibilityCriteria::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::CompanyNotFound(_)));
}

#[tokio::test]
async fn test_sink_receives_full_replacement_commits() {
    let sink = Arc::new(InMemorySink::new());
    let store = RoundStateStore::with_sink(sink.clone());
    let company = store
        .register_company("Acme", 3, EligibilityCriteria::default())
        .await
        .unwrap();
    let student = store
        .register_student("Asha", AcademicProfile::default())
        .await
        .unwrap();
    store
        .register_application(&company.id, &student.id)
        .await
        .unwrap();

    store
        .apply_toggle(&company.id, &student.id, ToggleMutation::ToggleRound { round_index: 0 })
        .await
        .unwrap();
    store
        .apply_toggle(&company.id, &student.id, ToggleMutation::ToggleSelected)
        .await
        .unwrap();
    store
        .apply_toggle(&company.id, &student.id, ToggleMutation::ToggleRound { round_index: 0 })
        .await
        .unwrap();

    let commits = sink.commits().await;
    assert_eq!(commits.len(), 3);
    // Every commit carries the complete tag set, not a delta.
    assert_eq!(commits[0].rounds, vec![RoundTag::Round(1)]);
    assert_eq!(commits[1].rounds, vec![RoundTag::Round(1), RoundTag::Selected]);
    assert_eq!(commits[2].rounds, vec![RoundTag::Selected]);

    let latest = sink.latest_for(&company.id, &student.id).await.unwrap();
    let record = store.get_record(&company.id, &student.id).await.unwrap();
    assert_eq!(latest, record.tags_sorted());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_pair_toggles_are_serialized() {
    let sink = Arc::new(InMemorySink::new());
    let store = Arc::new(RoundStateStore::with_sink(sink.clone()));
    let company = store
        .register_company("Acme", 3, EligibilityCriteria::default())
        .await
        .unwrap();
    let student = store
        .register_student("Asha", AcademicProfile::default())
        .await
        .unwrap();
    store
        .register_application(&company.id, &student.id)
        .await
        .unwrap();

    // 4 tasks x 25 toggles = 100 flips of the same round. Any lost update
    // breaks the parity and leaves the tag set.
    let mut handles = Vec::new();
    for _ in 0..4 {
        let store = store.clone();
        let company_id = company.id.clone();
        let student_id = student.id.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..25 {
                store
                    .apply_toggle(
                        &company_id,
                        &student_id,
                        ToggleMutation::ToggleRound { round_index: 0 },
                    )
                    .await
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let record = store.get_record(&company.id, &student.id).await.unwrap();
    assert!(record.is_empty(), "even flip count must restore the record");

    // The sink saw every commit, and its last word matches the store.
    let commits = sink.commits().await;
    assert_eq!(commits.len(), 100);
    let latest = sink.latest_for(&company.id, &student.id).await.unwrap();
    assert_eq!(latest, record.tags_sorted());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_different_pairs_do_not_interfere() {
    let store = Arc::new(RoundStateStore::new());
    let company = store
        .register_company("Acme", 3, EligibilityCriteria::default())
        .await
        .unwrap();
    let mut student_ids = Vec::new();
    for index in 0..8 {
        let student = store
            .register_student(&format!("Student {}", index), AcademicProfile::default())
            .await
            .unwrap();
        store
            .register_application(&company.id, &student.id)
            .await
            .unwrap();
        student_ids.push(student.id);
    }

    // Each pair gets an odd number of flips concurrently; every record
    // must end with its own round set and nothing else.
    let mut handles = Vec::new();
    for student_id in &student_ids {
        let store = store.clone();
        let company_id = company.id.clone();
        let student_id = student_id.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..5 {
                store
                    .apply_toggle(
                        &company_id,
                        &student_id,
                        ToggleMutation::ToggleRound { round_index: 1 },
                    )
                    .await
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    for student_id in &student_ids {
        let record = store.get_record(&company.id, student_id).await.unwrap();
        assert_eq!(record.tags_sorted(), vec![RoundTag::Round(2)]);
    }
}

#[tokio::test]
async fn test_remove_company_cascades_associations() {
    let (store, company_id, student_id) = store_with_pair().await;
    store.remove_company(&company_id).await.unwrap();

    let err = store.get_record(&company_id, &student_id).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
    assert!(store.list_companies().await.is_empty());
    // The student registry is untouched.
    assert_eq!(store.list_students().await.len(), 1);
}

#[tokio::test]
async fn test_remove_student_cascades_associations() {
    let (store, company_id, student_id) = store_with_pair().await;
    store.remove_student(&student_id).await.unwrap();

    let err = store.get_record(&company_id, &student_id).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
    assert_eq!(store.list_companies().await.len(), 1);
}

#[tokio::test]
async fn test_eligible_student_count_applies_thresholds() {
    let store = RoundStateStore::new();
    let company = store
        .register_company(
            "Acme",
            2,
            EligibilityCriteria {
                min_xth: 60.0,
                min_xiith: 60.0,
                min_aggregate_ug: 7.0,
            },
        )
        .await
        .unwrap();
    store
        .register_student(
            "Above",
            AcademicProfile {
                xth_percent: 80.0,
                xiith_percent: 75.0,
                aggregate_ug: 8.1,
            },
        )
        .await
        .unwrap();
    store
        .register_student(
            "Below",
            AcademicProfile {
                xth_percent: 55.0,
                xiith_percent: 75.0,
                aggregate_ug: 8.1,
            },
        )
        .await
        .unwrap();

    assert_eq!(store.eligible_student_count(&company.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_views_are_name_ordered_and_complete() {
    let store = RoundStateStore::new();
    let zeta = store
        .register_company("Zeta", 2, EligibilityCriteria::default())
        .await
        .unwrap();
    let acme = store
        .register_company("Acme", 3, EligibilityCriteria::default())
        .await
        .unwrap();
    let student = store
        .register_student("Asha", AcademicProfile::default())
        .await
        .unwrap();
    let idle = store
        .register_student("Noor", AcademicProfile::default())
        .await
        .unwrap();
    store.register_application(&zeta.id, &student.id).await.unwrap();
    store.register_application(&acme.id, &student.id).await.unwrap();
    store
        .apply_toggle(&acme.id, &student.id, ToggleMutation::ToggleRound { round_index: 0 })
        .await
        .unwrap();

    let view = store.student_view(&student.id).await.unwrap();
    let names: Vec<&str> = view.companies.iter().map(|c| c.company_name.as_str()).collect();
    assert_eq!(names, vec!["Acme", "Zeta"]);
    assert_eq!(view.companies[0].rounds, vec![RoundTag::Round(1)]);

    let company_view = store.company_view(&acme.id).await.unwrap();
    assert_eq!(company_view.total_rounds, 3);
    assert_eq!(company_view.students.len(), 1);

    // Students with no associations still appear in the cohort snapshot.
    let snapshot = store.cohort_snapshot().await;
    assert_eq!(snapshot.students.len(), 2);
    assert_eq!(snapshot.companies.len(), 2);
    let idle_view = snapshot
        .students
        .iter()
        .find(|s| s.student_id == idle.id)
        .unwrap();
    assert!(idle_view.companies.is_empty());
}
