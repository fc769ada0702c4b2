//! Genetic operators for timetable chromosomes.
//!
//! - [`SlotPicker`]: duration-aware random (day, start slot) choice
//! - [`single_point_crossover`]: index-based recombination
//! - [`mutate`]: re-roll one gene's time or room
//!
//! Single-point crossover splits by gene index, not by course. Chromosomes
//! built by the generator list sessions in the same order, so children keep
//! every session exactly once; parents whose genes are ordered or sized
//! differently can yield a child with a session duplicated or dropped.

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::catalog::TimetableDomain;
use crate::chromosome::Chromosome;
use crate::models::{Room, Weekday};

/// Picks uniformly random placements that always fit inside a day.
#[derive(Debug, Clone)]
pub struct SlotPicker<'a> {
    days: &'a [Weekday],
    max_slot: u8,
}

impl<'a> SlotPicker<'a> {
    /// Returns `None` if the domain has no working days or no slots.
    pub fn new(domain: &'a TimetableDomain) -> Option<Self> {
        if domain.working_days.is_empty() || domain.max_slot == 0 {
            return None;
        }
        Some(Self {
            days: &domain.working_days,
            max_slot: domain.max_slot,
        })
    }

    /// Picks a day and a start slot for a session of `duration` slots.
    ///
    /// The start slot is drawn from `1..=max_slot - duration + 1`, so
    /// `start + duration - 1 <= max_slot` whenever the session fits in a
    /// day at all.
    pub fn pick<R: Rng>(&self, duration: u8, rng: &mut R) -> (Weekday, u8) {
        let day = self.days[rng.random_range(0..self.days.len())];
        let last_start = self
            .max_slot
            .saturating_sub(duration.max(1))
            .saturating_add(1);
        (day, rng.random_range(1..=last_start))
    }
}

/// Picks a random placement for a session of `duration` slots.
///
/// Returns `None` when the domain is empty or the session is longer than a
/// day.
pub fn random_slot<R: Rng>(
    domain: &TimetableDomain,
    duration: u8,
    rng: &mut R,
) -> Option<(Weekday, u8)> {
    domain.last_start_slot(duration)?;
    SlotPicker::new(domain).map(|picker| picker.pick(duration, rng))
}

/// Single-point crossover by gene index.
///
/// The child takes parent 1's genes before a uniformly random split index
/// and parent 2's genes from that index on. Its fitness is reset.
pub fn single_point_crossover<R: Rng>(
    parent1: &Chromosome,
    parent2: &Chromosome,
    rng: &mut R,
) -> Chromosome {
    let len = parent1.genes.len();
    if len == 0 {
        return Chromosome::new(Vec::new());
    }
    let split = rng.random_range(0..len);

    let mut genes = parent1.genes[..split].to_vec();
    if let Some(tail) = parent2.genes.get(split..) {
        genes.extend_from_slice(tail);
    }
    Chromosome::new(genes)
}

/// Mutates one random gene in place.
///
/// With equal probability the gene is moved to a new (day, slot) sized for
/// its span, or to a new random room.
pub fn mutate<R: Rng>(
    chromosome: &mut Chromosome,
    picker: &SlotPicker<'_>,
    rooms: &[Room],
    rng: &mut R,
) {
    if chromosome.genes.is_empty() {
        return;
    }
    let idx = rng.random_range(0..chromosome.genes.len());
    let gene = &mut chromosome.genes[idx];

    if rng.random_bool(0.5) {
        let (day, slot) = picker.pick(gene.span_slots, rng);
        gene.day = day;
        gene.slot_number = slot;
    } else if let Some(room) = rooms.choose(rng) {
        gene.assign_room(room);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chromosome::Gene;
    use crate::models::SessionType;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn genes(code: &str, n: u8) -> Vec<Gene> {
        (1..=n)
            .map(|s| Gene::new(code, SessionType::Theory, Weekday::Monday, s))
            .collect()
    }

    #[test]
    fn test_random_slot_ranges() {
        let domain = TimetableDomain::default();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut seen_one = [false; 9];
        let mut seen_three = [false; 9];

        for _ in 0..2000 {
            let (day, slot) = random_slot(&domain, 1, &mut rng).unwrap();
            assert!(domain.working_days.contains(&day));
            assert!((1..=8).contains(&slot));
            seen_one[slot as usize] = true;

            let (_, slot) = random_slot(&domain, 3, &mut rng).unwrap();
            assert!((1..=6).contains(&slot));
            seen_three[slot as usize] = true;
        }
        // Every legal start is reachable
        assert!(seen_one[1..=8].iter().all(|&s| s));
        assert!(seen_three[1..=6].iter().all(|&s| s));
    }

    #[test]
    fn test_random_slot_rejects_impossible_duration() {
        let domain = TimetableDomain::default();
        let mut rng = SmallRng::seed_from_u64(42);
        assert!(random_slot(&domain, 9, &mut rng).is_none());
        assert_eq!(random_slot(&domain, 8, &mut rng).map(|(_, s)| s), Some(1));

        let no_days = TimetableDomain::default().with_working_days(Vec::new());
        assert!(random_slot(&no_days, 1, &mut rng).is_none());
    }

    #[test]
    fn test_crossover_takes_head_and_tail() {
        let mut rng = SmallRng::seed_from_u64(42);
        let p1 = Chromosome::new(genes("P1", 6));
        let p2 = Chromosome::new(genes("P2", 6));

        for _ in 0..100 {
            let child = single_point_crossover(&p1, &p2, &mut rng);
            assert_eq!(child.genes.len(), 6);
            assert_eq!(child.fitness, 0.0);

            let split = child
                .genes
                .iter()
                .position(|g| g.course_code == "P2")
                .unwrap_or(6);
            assert!(child.genes[..split].iter().all(|g| g.course_code == "P1"));
            assert!(child.genes[split..].iter().all(|g| g.course_code == "P2"));
            // Positions are preserved
            for (i, gene) in child.genes.iter().enumerate() {
                assert_eq!(gene.slot_number, i as u8 + 1);
            }
        }
    }

    #[test]
    fn test_crossover_with_shorter_second_parent() {
        let mut rng = SmallRng::seed_from_u64(7);
        let p1 = Chromosome::new(genes("P1", 6));
        let p2 = Chromosome::new(genes("P2", 2));

        for _ in 0..100 {
            let child = single_point_crossover(&p1, &p2, &mut rng);
            assert!(child.genes.len() <= 6);
        }
    }

    #[test]
    fn test_crossover_empty_parent() {
        let mut rng = SmallRng::seed_from_u64(42);
        let empty = Chromosome::new(Vec::new());
        let other = Chromosome::new(genes("P2", 3));
        assert!(single_point_crossover(&empty, &other, &mut rng).genes.is_empty());
    }

    #[test]
    fn test_crossover_does_not_alias_parents() {
        let mut rng = SmallRng::seed_from_u64(42);
        let p1 = Chromosome::new(genes("P1", 4));
        let p2 = Chromosome::new(genes("P2", 4));
        let mut child = single_point_crossover(&p1, &p2, &mut rng);
        for gene in &mut child.genes {
            gene.venue = "CHANGED".into();
        }
        assert!(p1.genes.iter().chain(&p2.genes).all(|g| g.venue.is_empty()));
    }

    #[test]
    fn test_mutation_changes_one_gene_and_keeps_bounds() {
        let domain = TimetableDomain::default();
        let picker = SlotPicker::new(&domain).unwrap();
        let rooms = vec![Room::new("A-101"), Room::new("CS-LAB-1")];
        let mut rng = SmallRng::seed_from_u64(42);

        let lab = Gene::new("L", SessionType::Lab, Weekday::Monday, 6).with_span(3);
        let original = Chromosome::new(vec![lab.clone(), lab.clone(), lab]);

        for _ in 0..500 {
            let mut ch = original.clone();
            mutate(&mut ch, &picker, &rooms, &mut rng);

            let changed = ch
                .genes
                .iter()
                .zip(&original.genes)
                .filter(|(a, b)| a != b)
                .count();
            assert!(changed <= 1);
            for gene in &ch.genes {
                assert!(gene.last_slot() <= 8);
                assert_eq!(gene.span_slots, 3);
            }
        }
    }

    #[test]
    fn test_mutation_room_reroll_updates_lab_flag() {
        let domain = TimetableDomain::default();
        let picker = SlotPicker::new(&domain).unwrap();
        let rooms = vec![Room::new("CS-LAB-1")];
        let mut rng = SmallRng::seed_from_u64(1);

        let mut ch = Chromosome::new(vec![
            Gene::new("L", SessionType::Lab, Weekday::Monday, 1).with_venue("A-101")
        ]);
        for _ in 0..50 {
            mutate(&mut ch, &picker, &rooms, &mut rng);
        }
        assert_eq!(ch.genes[0].venue, "CS-LAB-1");
        assert!(ch.genes[0].lab_room);
    }

    #[test]
    fn test_mutation_on_empty_chromosome() {
        let domain = TimetableDomain::default();
        let picker = SlotPicker::new(&domain).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ch = Chromosome::new(Vec::new());
        mutate(&mut ch, &picker, &[], &mut rng);
        assert!(ch.genes.is_empty());
    }
}
