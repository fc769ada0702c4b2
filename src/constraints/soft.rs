//! Soft-constraint scoring.
//!
//! Each soft constraint is scored independently on a 0–100 scale by a
//! piecewise-linear penalty on one measured statistic. The sub-scores are
//! combined by [`weighted_score`] using catalog weights, so adding a soft
//! constraint means adding a catalog entry and one scoring function.
//!
//! | Constraint | Statistic | Score |
//! |------------|-----------|-------|
//! | Workload balance | variance of slots taught per faculty | `100 - var/25·100` |
//! | No long runs | runs of ≥3 consecutive slots per (day, faculty) | `100 - 20·runs` |
//! | Lunch break | classes starting in the lunch slot | `100 - 10·count` |
//! | Room changes | extra rooms per (course, session type) | `100 - 15·changes` |
//! | Daily balance | variance of slots per working day | `100 - var/10·100` |
//! | Single gaps | one-slot holes between classes per day | `100 - 10·gaps` |
//!
//! All scores are floored at zero.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{ConstraintCatalog, SoftConstraintId, SoftConstraintInfo, TimetableDomain};
use crate::chromosome::SlotOccurrence;
use crate::models::{Faculty, SessionType, Weekday};

/// Combined soft score with per-constraint breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftScore {
    /// Weighted average of the sub-scores, rounded to an integer.
    pub total_score: f64,
    /// Sub-score per soft constraint in the catalog.
    pub breakdown: BTreeMap<SoftConstraintId, f64>,
}

/// Scores every soft constraint listed in `catalog` and combines them.
pub fn calculate_soft_constraint_score(
    slots: &[SlotOccurrence],
    faculty: &[Faculty],
    catalog: &ConstraintCatalog,
) -> SoftScore {
    let breakdown: BTreeMap<SoftConstraintId, f64> = catalog
        .soft
        .iter()
        .map(|info| {
            let score = score_constraint(info.id, slots, faculty, &catalog.domain);
            (info.id, score.clamp(0.0, info.max_score))
        })
        .collect();

    SoftScore {
        total_score: weighted_score(&breakdown, &catalog.soft).round(),
        breakdown,
    }
}

/// Computes one soft constraint's sub-score.
pub fn score_constraint(
    id: SoftConstraintId,
    slots: &[SlotOccurrence],
    faculty: &[Faculty],
    domain: &TimetableDomain,
) -> f64 {
    match id {
        SoftConstraintId::WorkloadBalance => workload_balance(slots, faculty),
        SoftConstraintId::NoLongRuns => no_long_runs(slots),
        SoftConstraintId::LunchBreak => lunch_break(slots, domain.lunch_slot),
        SoftConstraintId::RoomChanges => room_changes(slots),
        SoftConstraintId::DailyBalance => daily_balance(slots, &domain.working_days),
        SoftConstraintId::SingleGaps => single_gaps(slots),
    }
}

/// Weighted average of sub-scores.
///
/// Divides by the sum of *all* weights in `weights`; a constraint missing
/// from `breakdown` contributes zero. With no weight at all there is
/// nothing to penalize and the result is 100.
pub fn weighted_score(
    breakdown: &BTreeMap<SoftConstraintId, f64>,
    weights: &[SoftConstraintInfo],
) -> f64 {
    let total_weight: f64 = weights.iter().map(|c| c.weight).sum();
    if total_weight <= 0.0 {
        return 100.0;
    }
    let weighted: f64 = weights
        .iter()
        .map(|c| breakdown.get(&c.id).copied().unwrap_or(0.0) * c.weight)
        .sum();
    weighted / total_weight
}

/// Workload balance across faculty.
///
/// Every faculty member in `faculty` starts at zero load; names found only
/// in the timetable are added as they appear.
pub fn workload_balance(slots: &[SlotOccurrence], faculty: &[Faculty]) -> f64 {
    let mut load: BTreeMap<&str, f64> = faculty.iter().map(|f| (f.name.as_str(), 0.0)).collect();
    for occ in primaries(slots) {
        *load.entry(occ.gene.faculty_name.as_str()).or_insert(0.0) +=
            occ.gene.span_slots.max(1) as f64;
    }
    if load.is_empty() {
        return 100.0;
    }
    let values: Vec<f64> = load.into_values().collect();
    penalty(variance(&values) / 25.0 * 100.0)
}

/// Penalizes each run of three or more consecutive teaching slots.
pub fn no_long_runs(slots: &[SlotOccurrence]) -> f64 {
    let mut taught: BTreeMap<(Weekday, &str), BTreeSet<u8>> = BTreeMap::new();
    for occ in slots {
        taught
            .entry((occ.gene.day, occ.gene.faculty_name.as_str()))
            .or_default()
            .insert(occ.gene.slot_number);
    }
    let runs: u32 = taught.values().map(count_long_runs).sum();
    penalty(20.0 * runs as f64)
}

fn count_long_runs(slots: &BTreeSet<u8>) -> u32 {
    let mut runs = 0;
    let mut len = 0;
    let mut prev: Option<u8> = None;
    for &slot in slots {
        len = match prev {
            Some(p) if p.checked_add(1) == Some(slot) => len + 1,
            _ => 1,
        };
        if len == 3 {
            runs += 1;
        }
        prev = Some(slot);
    }
    runs
}

/// Penalizes classes that start in the lunch slot.
pub fn lunch_break(slots: &[SlotOccurrence], lunch_slot: u8) -> f64 {
    let count = primaries(slots)
        .filter(|o| o.gene.slot_number == lunch_slot)
        .count();
    penalty(10.0 * count as f64)
}

/// Penalizes a course component moving between rooms during the week.
pub fn room_changes(slots: &[SlotOccurrence]) -> f64 {
    let mut rooms: BTreeMap<(&str, SessionType), BTreeSet<&str>> = BTreeMap::new();
    for occ in slots {
        rooms
            .entry((occ.gene.course_code.as_str(), occ.gene.session_type))
            .or_default()
            .insert(occ.gene.venue.as_str());
    }
    let changes: usize = rooms.values().map(|r| r.len().saturating_sub(1)).sum();
    penalty(15.0 * changes as f64)
}

/// Penalizes uneven teaching load across the working days.
pub fn daily_balance(slots: &[SlotOccurrence], working_days: &[Weekday]) -> f64 {
    let mut per_day: BTreeMap<Weekday, f64> = working_days.iter().map(|&d| (d, 0.0)).collect();
    if per_day.is_empty() {
        return 100.0;
    }
    for occ in primaries(slots) {
        if let Some(total) = per_day.get_mut(&occ.gene.day) {
            *total += occ.gene.span_slots.max(1) as f64;
        }
    }
    let values: Vec<f64> = per_day.into_values().collect();
    penalty(variance(&values) / 10.0 * 100.0)
}

/// Penalizes single empty slots sandwiched between two classes.
pub fn single_gaps(slots: &[SlotOccurrence]) -> f64 {
    let mut occupied: BTreeMap<Weekday, BTreeSet<u8>> = BTreeMap::new();
    for occ in slots {
        occupied
            .entry(occ.gene.day)
            .or_default()
            .insert(occ.gene.slot_number);
    }
    let gaps: usize = occupied
        .values()
        .map(|day| {
            day.iter()
                .zip(day.iter().skip(1))
                .filter(|(a, b)| **b - **a == 2)
                .count()
        })
        .sum();
    penalty(10.0 * gaps as f64)
}

fn primaries(slots: &[SlotOccurrence]) -> impl Iterator<Item = &SlotOccurrence> {
    slots.iter().filter(|o| !o.is_continuation)
}

fn penalty(amount: f64) -> f64 {
    (100.0 - amount).max(0.0)
}

/// Population variance; zero for an empty slice.
fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}
