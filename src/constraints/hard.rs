//! Hard-constraint scan.
//!
//! Checks run in a fixed order and never short-circuit:
//!
//! 1. Faculty double-booking
//! 2. Room double-booking
//! 3. Section self-overlap
//! 4. Course hours
//! 5. Lab room requirement
//! 6. Span continuity
//! 7. Slot bounds (opt-in)
//!
//! Within a check, violations follow the order in which the offending
//! group was first seen. The order is stable but is not a priority.
//!
//! Checks 1–3 only look at primary occurrences, so a spanning session
//! overlapping a later one-slot session in its continuation slots is not
//! reported.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use super::violation::Violation;
use crate::catalog::{HardConstraintId, TimetableDomain};
use crate::chromosome::SlotOccurrence;
use crate::models::{mentions_lab, Course, SessionType, Weekday};

/// Optional hard-constraint behaviour.
///
/// Both switches default to off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HardConstraintConfig {
    /// Report courses whose scheduled slot count differs from their
    /// requirement. When off the counts are still computed but nothing is
    /// reported.
    pub enforce_course_hours: bool,
    /// Report occurrences outside the working days or `1..=max_slot`.
    pub check_slot_bounds: bool,
}

impl HardConstraintConfig {
    /// Enables course-hours reporting.
    pub fn with_course_hours(mut self, enabled: bool) -> Self {
        self.enforce_course_hours = enabled;
        self
    }

    /// Enables slot-bound checking.
    pub fn with_slot_bounds(mut self, enabled: bool) -> Self {
        self.check_slot_bounds = enabled;
        self
    }
}

/// Everything the hard scan needs besides the timetable itself.
#[derive(Debug, Clone, Default)]
pub struct HardRules {
    pub config: HardConstraintConfig,
    pub domain: TimetableDomain,
    /// Required slot count per (course code, session type).
    pub required_slots: BTreeMap<(String, SessionType), u32>,
}

impl HardRules {
    /// Rules for `domain` with no course requirements.
    pub fn new(domain: TimetableDomain) -> Self {
        Self {
            config: HardConstraintConfig::default(),
            domain,
            required_slots: BTreeMap::new(),
        }
    }

    /// Sets the optional behaviour.
    pub fn with_config(mut self, config: HardConstraintConfig) -> Self {
        self.config = config;
        self
    }

    /// Derives required slot counts from `courses`.
    pub fn with_courses(mut self, courses: &[Course]) -> Self {
        for course in courses {
            for session in course.required_sessions(self.domain.lab_span) {
                *self
                    .required_slots
                    .entry((course.course_code.clone(), session.session_type))
                    .or_insert(0) += session.duration as u32;
            }
        }
        self
    }
}

/// Scans an expanded timetable for hard-constraint violations.
///
/// An empty result means the timetable is feasible.
pub fn validate_hard_constraints(slots: &[SlotOccurrence], rules: &HardRules) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_double_booking(slots, BookingKind::Faculty, &mut violations);
    check_double_booking(slots, BookingKind::Room, &mut violations);
    check_section_overlap(slots, &mut violations);
    check_course_hours(slots, rules, &mut violations);
    check_lab_rooms(slots, &mut violations);
    check_span_continuity(slots, &mut violations);
    if rules.config.check_slot_bounds {
        check_slot_bounds(slots, &rules.domain, &mut violations);
    }

    violations
}

#[derive(Clone, Copy)]
enum BookingKind {
    Faculty,
    Room,
}

impl BookingKind {
    fn key(self, occ: &SlotOccurrence) -> &str {
        match self {
            BookingKind::Faculty => occ.gene.faculty_name.as_str(),
            BookingKind::Room => occ.gene.venue.as_str(),
        }
    }
}

/// Groups primary occurrences per faculty (or room) and reports every
/// occurrence that lands on an already taken (day, slot) of its group.
fn check_double_booking(slots: &[SlotOccurrence], kind: BookingKind, out: &mut Vec<Violation>) {
    let mut groups: Vec<(&str, Vec<&SlotOccurrence>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for occ in slots.iter().filter(|o| !o.is_continuation) {
        let key = kind.key(occ);
        let i = *index.entry(key).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[i].1.push(occ);
    }

    for (key, occurrences) in groups {
        let mut taken: HashMap<(Weekday, u8), &SlotOccurrence> = HashMap::new();
        for occ in occurrences {
            let at = (occ.gene.day, occ.gene.slot_number);
            match taken.get(&at) {
                Some(first) => out.push(booking_violation(kind, key, first, occ)),
                None => {
                    taken.insert(at, occ);
                }
            }
        }
    }
}

fn booking_violation(
    kind: BookingKind,
    key: &str,
    first: &SlotOccurrence,
    second: &SlotOccurrence,
) -> Violation {
    let (id, label, detail) = match kind {
        BookingKind::Faculty => (HardConstraintId::FacultyConflict, "Faculty", "faculty"),
        BookingKind::Room => (HardConstraintId::RoomConflict, "Room", "room"),
    };
    Violation::new(
        id,
        format!(
            "{label} {key} is double-booked on {} slot {}: {} and {}",
            second.gene.day,
            second.gene.slot_number,
            first.gene.course_name,
            second.gene.course_name
        ),
    )
    .with_detail(detail, key)
    .with_detail("day", second.gene.day)
    .with_detail("slot", second.gene.slot_number)
    .with_detail("course", &first.gene.course_name)
    .with_detail("conflictingCourse", &second.gene.course_name)
}

fn check_section_overlap(slots: &[SlotOccurrence], out: &mut Vec<Violation>) {
    let mut taken: HashMap<(Weekday, u8), &SlotOccurrence> = HashMap::new();
    for occ in slots.iter().filter(|o| !o.is_continuation) {
        let at = (occ.gene.day, occ.gene.slot_number);
        match taken.get(&at) {
            Some(first) => out.push(
                Violation::new(
                    HardConstraintId::SectionOverlap,
                    format!(
                        "Section has two classes on {} slot {}: {} and {}",
                        occ.gene.day,
                        occ.gene.slot_number,
                        first.gene.course_name,
                        occ.gene.course_name
                    ),
                )
                .with_detail("day", occ.gene.day)
                .with_detail("slot", occ.gene.slot_number)
                .with_detail("course", &first.gene.course_name)
                .with_detail("conflictingCourse", &occ.gene.course_name),
            ),
            None => {
                taken.insert(at, occ);
            }
        }
    }
}

/// Scheduled slot count per (course code, session type), continuations
/// included.
fn scheduled_slots(slots: &[SlotOccurrence]) -> BTreeMap<(String, SessionType), u32> {
    let mut counts = BTreeMap::new();
    for occ in slots {
        *counts
            .entry((occ.gene.course_code.clone(), occ.gene.session_type))
            .or_insert(0) += 1;
    }
    counts
}

fn check_course_hours(slots: &[SlotOccurrence], rules: &HardRules, out: &mut Vec<Violation>) {
    let scheduled = scheduled_slots(slots);
    if !rules.config.enforce_course_hours {
        return;
    }

    for ((code, session_type), &required) in &rules.required_slots {
        let actual = scheduled
            .get(&(code.clone(), *session_type))
            .copied()
            .unwrap_or(0);
        if actual != required {
            out.push(
                Violation::new(
                    HardConstraintId::CourseHours,
                    format!(
                        "{code} {session_type} has {actual} scheduled slot(s), requires {required}"
                    ),
                )
                .with_detail("course", code)
                .with_detail("sessionType", session_type)
                .with_detail("scheduled", actual)
                .with_detail("required", required),
            );
        }
    }
}

fn check_lab_rooms(slots: &[SlotOccurrence], out: &mut Vec<Violation>) {
    for occ in slots.iter().filter(|o| !o.is_continuation) {
        let gene = &occ.gene;
        if gene.session_type != SessionType::Lab || gene.lab_room || mentions_lab(&gene.venue) {
            continue;
        }
        out.push(
            Violation::new(
                HardConstraintId::LabRoom,
                format!(
                    "Lab session {} is held in non-lab room {}",
                    gene.course_name, gene.venue
                ),
            )
            .with_detail("course", &gene.course_name)
            .with_detail("room", &gene.venue)
            .with_detail("day", gene.day)
            .with_detail("slot", gene.slot_number),
        );
    }
}

fn check_span_continuity(slots: &[SlotOccurrence], out: &mut Vec<Violation>) {
    let continuations: HashSet<(&str, Weekday, u8, u8)> = slots
        .iter()
        .filter(|o| o.is_continuation)
        .filter_map(|o| {
            o.span_start
                .map(|start| (o.gene.course_code.as_str(), o.gene.day, o.gene.slot_number, start))
        })
        .collect();

    for occ in slots.iter().filter(|o| !o.is_continuation && o.gene.span_slots > 1) {
        let gene = &occ.gene;
        for offset in 1..gene.span_slots {
            let expected = gene.slot_number.saturating_add(offset);
            let key = (gene.course_code.as_str(), gene.day, expected, gene.slot_number);
            if continuations.contains(&key) {
                continue;
            }
            out.push(
                Violation::new(
                    HardConstraintId::SpanContinuity,
                    format!(
                        "{} starting {} slot {} is missing continuation slot {}",
                        gene.course_name, gene.day, gene.slot_number, expected
                    ),
                )
                .with_detail("course", &gene.course_name)
                .with_detail("day", gene.day)
                .with_detail("slot", gene.slot_number)
                .with_detail("missingSlot", expected),
            );
        }
    }
}

fn check_slot_bounds(slots: &[SlotOccurrence], domain: &TimetableDomain, out: &mut Vec<Violation>) {
    for occ in slots {
        let gene = &occ.gene;
        if domain.contains_slot(gene.slot_number) && domain.working_days.contains(&gene.day) {
            continue;
        }
        out.push(
            Violation::new(
                HardConstraintId::SlotBounds,
                format!(
                    "{} on {} slot {} is outside valid hours",
                    gene.course_name, gene.day, gene.slot_number
                ),
            )
            .with_detail("course", &gene.course_name)
            .with_detail("day", gene.day)
            .with_detail("slot", gene.slot_number),
        );
    }
}
