//! Constraint catalog.
//!
//! Static metadata describing the hard and soft constraints the evaluator
//! knows about, plus the slot domain (working days, slots per day) raw slot
//! numbers are interpreted against.
//!
//! The catalog is consumed, never mutated, by the generator. Callers that
//! need different weights or a different week build their own
//! [`ConstraintCatalog`] and pass it in; [`ConstraintCatalog::default`] is
//! only the fallback used when none is supplied.

mod domain;

pub use domain::TimetableDomain;

use serde::{Deserialize, Serialize};

/// Identifier of a hard (feasibility) constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HardConstraintId {
    /// A faculty member teaches two classes at once.
    #[serde(rename = "HC01")]
    FacultyConflict,
    /// A room hosts two classes at once.
    #[serde(rename = "HC02")]
    RoomConflict,
    /// The section attends two classes at once.
    #[serde(rename = "HC03")]
    SectionOverlap,
    /// Scheduled hours differ from the course requirement.
    #[serde(rename = "HC04")]
    CourseHours,
    /// A lab session is held outside a lab room.
    #[serde(rename = "HC05")]
    LabRoom,
    /// A spanning session is missing one of its continuation slots.
    #[serde(rename = "HC06")]
    SpanContinuity,
    /// An occurrence falls outside the working days or slot range.
    #[serde(rename = "HC07")]
    SlotBounds,
}

impl HardConstraintId {
    /// Catalog identifier string.
    pub fn as_str(self) -> &'static str {
        match self {
            HardConstraintId::FacultyConflict => "HC01",
            HardConstraintId::RoomConflict => "HC02",
            HardConstraintId::SectionOverlap => "HC03",
            HardConstraintId::CourseHours => "HC04",
            HardConstraintId::LabRoom => "HC05",
            HardConstraintId::SpanContinuity => "HC06",
            HardConstraintId::SlotBounds => "HC07",
        }
    }
}

/// Identifier of a soft (quality) constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SoftConstraintId {
    #[serde(rename = "SC01")]
    WorkloadBalance,
    #[serde(rename = "SC02")]
    NoLongRuns,
    #[serde(rename = "SC03")]
    LunchBreak,
    #[serde(rename = "SC04")]
    RoomChanges,
    #[serde(rename = "SC05")]
    DailyBalance,
    #[serde(rename = "SC06")]
    SingleGaps,
}

impl SoftConstraintId {
    /// Every soft constraint the evaluator can score.
    pub const ALL: [SoftConstraintId; 6] = [
        SoftConstraintId::WorkloadBalance,
        SoftConstraintId::NoLongRuns,
        SoftConstraintId::LunchBreak,
        SoftConstraintId::RoomChanges,
        SoftConstraintId::DailyBalance,
        SoftConstraintId::SingleGaps,
    ];

    /// Catalog identifier string.
    pub fn as_str(self) -> &'static str {
        match self {
            SoftConstraintId::WorkloadBalance => "SC01",
            SoftConstraintId::NoLongRuns => "SC02",
            SoftConstraintId::LunchBreak => "SC03",
            SoftConstraintId::RoomChanges => "SC04",
            SoftConstraintId::DailyBalance => "SC05",
            SoftConstraintId::SingleGaps => "SC06",
        }
    }
}

/// Display metadata for a hard constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardConstraintInfo {
    pub id: HardConstraintId,
    pub name: String,
    pub description: String,
    /// Display priority (1 = highest). Not used for evaluation.
    pub priority: u8,
}

/// Metadata and weight for a soft constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftConstraintInfo {
    pub id: SoftConstraintId,
    pub name: String,
    /// Relative weight in the combined score.
    pub weight: f64,
    /// Upper bound of the sub-score.
    pub max_score: f64,
}

/// Hard and soft constraint metadata plus the slot domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintCatalog {
    pub hard: Vec<HardConstraintInfo>,
    pub soft: Vec<SoftConstraintInfo>,
    pub domain: TimetableDomain,
}

impl Default for ConstraintCatalog {
    fn default() -> Self {
        let hard = [
            (
                HardConstraintId::FacultyConflict,
                "No faculty double-booking",
                "A faculty member cannot teach two classes in the same slot",
                1,
            ),
            (
                HardConstraintId::RoomConflict,
                "No room double-booking",
                "A room cannot host two classes in the same slot",
                1,
            ),
            (
                HardConstraintId::SectionOverlap,
                "No section overlap",
                "A section cannot attend two classes in the same slot",
                1,
            ),
            (
                HardConstraintId::CourseHours,
                "Course hours",
                "Each course receives its required weekly slots",
                2,
            ),
            (
                HardConstraintId::LabRoom,
                "Lab room requirement",
                "Lab sessions must be held in lab rooms",
                2,
            ),
            (
                HardConstraintId::SpanContinuity,
                "Span continuity",
                "Multi-slot sessions occupy consecutive slots",
                2,
            ),
            (
                HardConstraintId::SlotBounds,
                "Valid hours",
                "Sessions fall on working days within the slot range",
                3,
            ),
        ]
        .into_iter()
        .map(|(id, name, description, priority)| HardConstraintInfo {
            id,
            name: name.into(),
            description: description.into(),
            priority,
        })
        .collect();

        let soft = [
            (SoftConstraintId::WorkloadBalance, "Faculty workload balance", 8.0),
            (SoftConstraintId::NoLongRuns, "No long back-to-back runs", 6.0),
            (SoftConstraintId::LunchBreak, "Preserve lunch break", 7.0),
            (SoftConstraintId::RoomChanges, "Minimize room changes", 5.0),
            (SoftConstraintId::DailyBalance, "Balanced daily load", 6.0),
            (SoftConstraintId::SingleGaps, "Avoid single-slot gaps", 4.0),
        ]
        .into_iter()
        .map(|(id, name, weight)| SoftConstraintInfo {
            id,
            name: name.into(),
            weight,
            max_score: 100.0,
        })
        .collect();

        Self {
            hard,
            soft,
            domain: TimetableDomain::default(),
        }
    }
}

impl ConstraintCatalog {
    /// Looks up a hard constraint's metadata.
    pub fn hard_info(&self, id: HardConstraintId) -> Option<&HardConstraintInfo> {
        self.hard.iter().find(|c| c.id == id)
    }

    /// Looks up a soft constraint's metadata.
    pub fn soft_info(&self, id: SoftConstraintId) -> Option<&SoftConstraintInfo> {
        self.soft.iter().find(|c| c.id == id)
    }

    /// Sum of all soft constraint weights.
    pub fn total_soft_weight(&self) -> f64 {
        self.soft.iter().map(|c| c.weight).sum()
    }

    /// Replaces the slot domain.
    pub fn with_domain(mut self, domain: TimetableDomain) -> Self {
        self.domain = domain;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_covers_every_soft_constraint() {
        let catalog = ConstraintCatalog::default();
        for id in SoftConstraintId::ALL {
            assert!(catalog.soft_info(id).is_some(), "missing {id:?}");
        }
        assert!((catalog.total_soft_weight() - 36.0).abs() < 1e-10);
    }

    #[test]
    fn test_hard_lookup() {
        let catalog = ConstraintCatalog::default();
        let info = catalog.hard_info(HardConstraintId::LabRoom).unwrap();
        assert_eq!(info.id.as_str(), "HC05");
    }

    #[test]
    fn test_ids_serialize_as_catalog_strings() {
        let json = serde_json::to_string(&HardConstraintId::FacultyConflict).unwrap();
        assert_eq!(json, "\"HC01\"");
        let json = serde_json::to_string(&SoftConstraintId::SingleGaps).unwrap();
        assert_eq!(json, "\"SC06\"");
    }
}
