//! Timetable GA problem definition.
//!
//! Implements [`GaProblem`] for one section: random chromosome
//! construction from the course list, fitness from the constraint
//! evaluator, and the timetable-specific operators.

use log::trace;
use rand::prelude::IndexedRandom;
use rand::Rng;

use super::operators::{mutate, single_point_crossover, SlotPicker};
use crate::catalog::ConstraintCatalog;
use crate::chromosome::{Chromosome, Gene, SlotOccurrence};
use crate::constraints::{
    calculate_soft_constraint_score, validate_hard_constraints, HardConstraintConfig, HardRules,
    SoftScore, Violation,
};
use crate::error::GenerateError;
use crate::ga::GaProblem;
use crate::models::{Course, Faculty, Room, SessionType};
use crate::validation::{validate_input, InputError, InputErrorKind};

/// Fitness penalty per hard violation.
pub const HARD_VIOLATION_PENALTY: f64 = -100.0;

/// Faculty name used when a course has no resolvable binding.
pub const UNKNOWN_FACULTY: &str = "Unknown";

/// One session to place, with course and faculty details resolved.
#[derive(Debug, Clone)]
pub struct PlannedSession {
    pub course_id: String,
    pub course_code: String,
    pub course_name: String,
    pub faculty_id: Option<String>,
    pub faculty_name: String,
    pub session_type: SessionType,
    pub duration: u8,
}

/// Full evaluation of one chromosome.
#[derive(Debug, Clone)]
pub struct Assessment {
    /// Expanded timetable.
    pub slots: Vec<SlotOccurrence>,
    pub violations: Vec<Violation>,
    /// Present only when there are no hard violations.
    pub soft: Option<SoftScore>,
    pub fitness: f64,
}

/// GA problem for generating one section's timetable.
///
/// Borrows the caller's faculty, rooms and catalog; never mutates them.
#[derive(Debug)]
pub struct TimetableProblem<'a> {
    faculty: &'a [Faculty],
    rooms: &'a [Room],
    catalog: &'a ConstraintCatalog,
    rules: HardRules,
    plan: Vec<PlannedSession>,
    picker: SlotPicker<'a>,
}

impl<'a> TimetableProblem<'a> {
    /// Validates the input and resolves every required session.
    pub fn new(
        courses: &[Course],
        faculty: &'a [Faculty],
        rooms: &'a [Room],
        catalog: &'a ConstraintCatalog,
        hard_config: HardConstraintConfig,
    ) -> Result<Self, GenerateError> {
        let domain = &catalog.domain;
        validate_input(courses, rooms, domain).map_err(GenerateError::InvalidInput)?;

        let picker = SlotPicker::new(domain).ok_or_else(|| {
            GenerateError::InvalidInput(vec![InputError::new(
                InputErrorKind::InvalidDomain,
                "Slot domain has no working days or slots",
            )])
        })?;

        let plan = plan_sessions(courses, faculty, domain.lab_span);
        let rules = HardRules::new(domain.clone())
            .with_config(hard_config)
            .with_courses(courses);

        Ok(Self {
            faculty,
            rooms,
            catalog,
            rules,
            plan,
            picker,
        })
    }

    /// Sessions placed by every chromosome, in gene order.
    pub fn plan(&self) -> &[PlannedSession] {
        &self.plan
    }

    /// Expands and scores a chromosome.
    ///
    /// Any hard violation gives fitness `-100 × count` and skips soft
    /// scoring; otherwise fitness is the soft total.
    pub fn assess(&self, chromosome: &Chromosome) -> Assessment {
        let slots = chromosome.to_timetable();
        let violations = validate_hard_constraints(&slots, &self.rules);

        if !violations.is_empty() {
            return Assessment {
                fitness: HARD_VIOLATION_PENALTY * violations.len() as f64,
                slots,
                violations,
                soft: None,
            };
        }

        let soft = calculate_soft_constraint_score(&slots, self.faculty, self.catalog);
        Assessment {
            fitness: soft.total_score,
            slots,
            violations,
            soft: Some(soft),
        }
    }
}

impl GaProblem for TimetableProblem<'_> {
    type Individual = Chromosome;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Chromosome {
        let genes = self
            .plan
            .iter()
            .map(|session| {
                let (day, slot_number) = self.picker.pick(session.duration, rng);
                let mut gene = Gene {
                    course_id: session.course_id.clone(),
                    course_code: session.course_code.clone(),
                    course_name: session.course_name.clone(),
                    faculty_id: session.faculty_id.clone(),
                    faculty_name: session.faculty_name.clone(),
                    room_id: String::new(),
                    venue: String::new(),
                    lab_room: false,
                    day,
                    slot_number,
                    span_slots: session.duration,
                    session_type: session.session_type,
                };
                if let Some(room) = self.rooms.choose(rng) {
                    gene.assign_room(room);
                }
                gene
            })
            .collect();
        Chromosome::new(genes)
    }

    fn evaluate(&self, chromosome: &Chromosome) -> f64 {
        self.assess(chromosome).fitness
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> Chromosome {
        single_point_crossover(parent1, parent2, rng)
    }

    fn mutate<R: Rng>(&self, chromosome: &mut Chromosome, rng: &mut R) {
        mutate(chromosome, &self.picker, self.rooms, rng);
    }

    fn on_generation(&self, generation: usize, best_fitness: f64) {
        trace!("timetable generation {generation}: best fitness {best_fitness:.1}");
    }
}

/// Resolves each course's required sessions and primary faculty.
fn plan_sessions(courses: &[Course], faculty: &[Faculty], lab_span: u8) -> Vec<PlannedSession> {
    let mut plan = Vec::new();
    for course in courses {
        let primary = course.primary_faculty();
        let faculty_id = primary.map(|b| b.faculty.id().to_string());
        let faculty_name = primary
            .and_then(|b| b.resolve_name(faculty))
            .unwrap_or(UNKNOWN_FACULTY)
            .to_string();

        for session in course.required_sessions(lab_span) {
            plan.push(PlannedSession {
                course_id: course.id.clone(),
                course_code: course.course_code.clone(),
                course_name: course.course_name.clone(),
                faculty_id: faculty_id.clone(),
                faculty_name: faculty_name.clone(),
                session_type: session.session_type,
                duration: session.duration,
            });
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::HardConstraintId;
    use crate::models::{FacultyBinding, FacultyRole, Weekday};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn build<'a>(
        courses: &[Course],
        faculty: &'a [Faculty],
        rooms: &'a [Room],
        catalog: &'a ConstraintCatalog,
    ) -> Result<TimetableProblem<'a>, GenerateError> {
        TimetableProblem::new(courses, faculty, rooms, catalog, HardConstraintConfig::default())
    }

    fn faculty() -> Vec<Faculty> {
        vec![
            Faculty::new("f1", "Dr. Rao").with_department("CSE"),
            Faculty::new("f2", "Dr. Iyer").with_department("CSE"),
        ]
    }

    fn rooms() -> Vec<Room> {
        vec![
            Room::new("101").with_full_id("A-1-101"),
            Room::new("201").with_full_id("CS-LAB-201"),
        ]
    }

    fn courses() -> Vec<Course> {
        vec![
            Course::new("c1", "CS101", "Programming")
                .with_credits(3)
                .with_faculty(FacultyBinding::unresolved("f2", FacultyRole::Assisting))
                .with_faculty(FacultyBinding::unresolved("f1", FacultyRole::Incharge)),
            Course::new("c2", "CS101L", "Programming Lab")
                .with_session_type(SessionType::Lab)
                .with_faculty(FacultyBinding::resolved("f9", "Dr. Guest", FacultyRole::Assisting)),
            Course::new("c3", "MA101", "Calculus").with_credits(2),
        ]
    }

    #[test]
    fn test_plan_resolves_sessions_and_faculty() {
        let (courses, faculty, rooms) = (courses(), faculty(), rooms());
        let catalog = ConstraintCatalog::default();
        let problem = build(&courses, &faculty, &rooms, &catalog).unwrap();
        let plan = problem.plan();

        assert_eq!(plan.len(), 6);
        assert!(plan[..3].iter().all(|s| s.faculty_name == "Dr. Rao"
            && s.faculty_id.as_deref() == Some("f1")
            && s.duration == 1));
        assert_eq!(plan[3].faculty_name, "Dr. Guest");
        assert_eq!(plan[3].session_type, SessionType::Lab);
        assert_eq!(plan[3].duration, 3);
        assert_eq!(plan[4].faculty_name, UNKNOWN_FACULTY);
        assert_eq!(plan[4].faculty_id, None);
    }

    #[test]
    fn test_unresolvable_binding_falls_back_to_unknown() {
        let courses = vec![Course::new("c1", "CS101", "Programming")
            .with_credits(1)
            .with_faculty(FacultyBinding::unresolved("nobody", FacultyRole::Incharge))];
        let (faculty, rooms) = (faculty(), rooms());
        let catalog = ConstraintCatalog::default();
        let problem = build(&courses, &faculty, &rooms, &catalog).unwrap();

        assert_eq!(problem.plan()[0].faculty_name, UNKNOWN_FACULTY);
        assert_eq!(problem.plan()[0].faculty_id.as_deref(), Some("nobody"));
    }

    #[test]
    fn test_invalid_input_rejected() {
        let courses = vec![Course::new("c1", "CS101", "Programming")];
        let (faculty, rooms) = (faculty(), rooms());
        let catalog = ConstraintCatalog::default();
        let err = build(&courses, &faculty, &rooms, &catalog).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidInput(_)));
    }

    #[test]
    fn test_random_chromosome_shape() {
        let (courses, faculty, rooms) = (courses(), faculty(), rooms());
        let catalog = ConstraintCatalog::default();
        let problem = build(&courses, &faculty, &rooms, &catalog).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..200 {
            let ch = problem.create_individual(&mut rng);
            assert_eq!(ch.fitness, 0.0);
            assert_eq!(ch.genes.len(), 6);
            for gene in &ch.genes {
                assert!(gene.slot_number >= 1 && gene.last_slot() <= 8);
                assert!(!gene.venue.is_empty());
            }
            let lab = &ch.genes[3];
            assert_eq!(lab.session_type, SessionType::Lab);
            assert_eq!(lab.span_slots, 3);
            assert!(lab.slot_number <= 6);
        }
    }

    #[test]
    fn test_hard_violations_drive_negative_fitness() {
        let (faculty, rooms) = (faculty(), rooms());
        let courses = vec![Course::new("c1", "CS101", "Programming")
            .with_credits(2)
            .with_faculty(FacultyBinding::unresolved("f1", FacultyRole::Incharge))];
        let catalog = ConstraintCatalog::default();
        let problem = build(&courses, &faculty, &rooms, &catalog).unwrap();

        let gene = Gene::new("CS101", SessionType::Theory, Weekday::Monday, 1)
            .with_course("c1", "Programming")
            .with_faculty(Some("f1".into()), "Dr. Rao")
            .with_venue("A-1-101");
        let clash = Chromosome::new(vec![gene.clone(), gene]);

        let assessment = problem.assess(&clash);
        // Faculty, room and section all collide
        assert_eq!(assessment.violations.len(), 3);
        assert_eq!(assessment.fitness, -300.0);
        assert!(assessment.soft.is_none());
        assert_eq!(problem.evaluate(&clash), -300.0);
        assert_eq!(
            assessment.violations[0].constraint_id,
            HardConstraintId::FacultyConflict
        );
    }

    #[test]
    fn test_feasible_fitness_is_soft_score() {
        let (faculty, rooms) = (faculty(), rooms());
        let courses = vec![Course::new("c1", "CS101", "Programming")
            .with_credits(2)
            .with_faculty(FacultyBinding::unresolved("f1", FacultyRole::Incharge))];
        let catalog = ConstraintCatalog::default();
        let problem = build(&courses, &faculty, &rooms, &catalog).unwrap();

        let gene = Gene::new("CS101", SessionType::Theory, Weekday::Monday, 1)
            .with_course("c1", "Programming")
            .with_faculty(Some("f1".into()), "Dr. Rao")
            .with_venue("A-1-101");
        let mut second = gene.clone();
        second.day = Weekday::Wednesday;
        let ch = Chromosome::new(vec![gene, second]);

        let assessment = problem.assess(&ch);
        assert!(assessment.violations.is_empty());
        let soft = assessment.soft.unwrap();
        assert_eq!(assessment.fitness, soft.total_score);
        assert!(assessment.fitness > 0.0 && assessment.fitness <= 100.0);
    }

    #[test]
    fn test_assess_does_not_mutate_chromosome() {
        let (courses, faculty, rooms) = (courses(), faculty(), rooms());
        let catalog = ConstraintCatalog::default();
        let problem = build(&courses, &faculty, &rooms, &catalog).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        let ch = problem.create_individual(&mut rng);
        let before = ch.clone();
        problem.assess(&ch);
        assert_eq!(ch, before);
    }
}
