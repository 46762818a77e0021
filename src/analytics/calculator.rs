//! Analytics calculation logic
//!
//! Pure folds over a cohort snapshot. One traversal feeds every grouping
//! (per-company, per-round, per-student offers), observably equivalent to
//! running the folds independently. Re-running on an unchanged snapshot
//! yields an identical report: every emitted series has a fixed order and
//! no hidden state survives between runs.

use std::collections::HashMap;

use crate::models::{CohortSnapshot, CompanyView, ParticipationRecord, RoundTag};

use super::{
    AggregateReport, CohortSummary, CompanyRoundSummary, CompanyStats, OfferDistribution,
    RejectionStats, RoundGroup, RoundParticipation,
};

/// Aggregate a full cohort snapshot into an [`AggregateReport`].
///
/// Associations referencing a company absent from the snapshot's registry
/// are skipped with a warning on the report; the rest of the fold
/// continues. Nothing here mutates the snapshot.
pub fn aggregate(snapshot: &CohortSnapshot) -> AggregateReport {
    let registry = snapshot.company_index();

    let mut company_stats: HashMap<String, CompanyStats> = HashMap::new();
    let mut rejected_counts: HashMap<String, u32> = HashMap::new();
    let mut round_counts: HashMap<String, u32> = HashMap::new();
    let mut offer_counts: Vec<u32> = Vec::with_capacity(snapshot.students.len());
    let mut total_offers: u32 = 0;
    let mut warnings: Vec<String> = Vec::new();

    for student in &snapshot.students {
        let mut student_offers: u32 = 0;

        for entry in &student.companies {
            let Some(meta) = registry.get(entry.company_id.as_str()) else {
                let message = format!(
                    "skipping record for student {}: company {} not in snapshot",
                    student.student_id, entry.company_id
                );
                eprintln!("[analytics] {}", message);
                warnings.push(message);
                continue;
            };

            let record = ParticipationRecord::from_tags(entry.rounds.iter().copied());
            let cleared = record.cleared_round_count() as u32;
            let participated = !record.is_empty();

            let stats = company_stats
                .entry(entry.company_id.clone())
                .or_insert_with(|| CompanyStats {
                    company_id: meta.company_id.clone(),
                    company_name: meta.company_name.clone(),
                    ..Default::default()
                });

            stats.applied_count += 1;
            if participated {
                stats.total_students += 1;
            }
            stats.total_rounds_cleared += cleared;
            stats.max_rounds_cleared = stats.max_rounds_cleared.max(cleared);

            if record.has(RoundTag::Selected) {
                stats.selected_count += 1;
                total_offers += 1;
                student_offers += 1;
            } else if participated {
                // Appeared in the pipeline, not selected: rejected. A
                // zero-tag association never counts here.
                *rejected_counts.entry(entry.company_id.clone()).or_insert(0) += 1;
            }

            for tag in record.iter() {
                *round_counts.entry(tag.label()).or_insert(0) += 1;
            }
        }

        offer_counts.push(student_offers);
    }

    let mut offer_distribution = OfferDistribution::default();
    for &count in &offer_counts {
        offer_distribution.record(count);
    }

    let mut company_stats: Vec<CompanyStats> = company_stats.into_values().collect();
    company_stats.sort_by(|a, b| {
        a.company_name
            .cmp(&b.company_name)
            .then_with(|| a.company_id.cmp(&b.company_id))
    });

    let rejection_stats: Vec<RejectionStats> = company_stats
        .iter()
        .map(|stats| {
            let rejected_count = rejected_counts
                .get(&stats.company_id)
                .copied()
                .unwrap_or(0);
            let rejection_rate = if stats.total_students > 0 {
                rejected_count as f64 / stats.total_students as f64 * 100.0
            } else {
                0.0
            };
            RejectionStats {
                company_id: stats.company_id.clone(),
                company_name: stats.company_name.clone(),
                rejected_count,
                rejection_rate,
            }
        })
        .collect();

    let mut round_participation: Vec<RoundParticipation> = round_counts
        .into_iter()
        .map(|(round, count)| RoundParticipation { round, count })
        .collect();
    round_participation.sort_by(|a, b| RoundTag::series_cmp(&a.round, &b.round));

    let total_students = snapshot.students.len() as u32;
    let students_placed = offer_counts.iter().filter(|&&count| count > 0).count() as u32;
    let placement_percentage = if total_students > 0 {
        students_placed as f64 / total_students as f64 * 100.0
    } else {
        0.0
    };

    AggregateReport {
        company_stats,
        rejection_stats,
        round_participation,
        offer_distribution,
        summary: CohortSummary {
            total_students,
            students_placed,
            total_offers,
            placement_percentage,
            yet_to_be_placed: total_students - students_placed,
        },
        warnings,
    }
}

/// Group one company's students by cleared round.
///
/// Produces one group per numbered pipeline round plus the selected list.
/// This is the view that excludes `Selected` from the numbered series;
/// the cohort histogram in [`aggregate`] folds it in instead.
pub fn company_round_summary(view: &CompanyView) -> CompanyRoundSummary {
    let round_groups: Vec<RoundGroup> = (0..view.total_rounds)
        .map(|index| {
            let tag = RoundTag::from_index(index);
            let students: Vec<String> = view
                .students
                .iter()
                .filter(|student| student.rounds.contains(&tag))
                .map(|student| student.student_name.clone())
                .collect();
            RoundGroup {
                round: tag.label(),
                students,
            }
        })
        .collect();

    let selected: Vec<String> = view
        .students
        .iter()
        .filter(|student| student.rounds.contains(&RoundTag::Selected))
        .map(|student| student.student_name.clone())
        .collect();

    CompanyRoundSummary {
        company_id: view.company_id.clone(),
        company_name: view.company_name.clone(),
        round_groups,
        selected,
    }
}
