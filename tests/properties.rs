//! Property tests for placement bounds and chromosome value semantics.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use u_timetable::catalog::TimetableDomain;
use u_timetable::chromosome::{Chromosome, Gene};
use u_timetable::generator::{mutate, random_slot, single_point_crossover, SlotPicker};
use u_timetable::models::{Room, SessionType, Weekday};

fn chromosome(n: usize) -> Chromosome {
    let genes = (0..n)
        .map(|i| {
            Gene::new(format!("C{i}"), SessionType::Theory, Weekday::Monday, 1)
                .with_venue("A-1-101")
        })
        .collect();
    Chromosome::new(genes)
}

proptest! {
    #[test]
    fn random_slot_respects_span_bound(
        max_slot in 1u8..=12,
        duration in 1u8..=12,
        seed in any::<u64>(),
    ) {
        let domain = TimetableDomain::default()
            .with_max_slot(max_slot)
            .with_lunch_slot(1);
        let mut rng = SmallRng::seed_from_u64(seed);

        match random_slot(&domain, duration, &mut rng) {
            Some((day, slot)) => {
                prop_assert!(duration <= max_slot);
                prop_assert!(domain.working_days.contains(&day));
                prop_assert!(slot >= 1);
                prop_assert!(slot + duration - 1 <= max_slot);
            }
            None => prop_assert!(duration > max_slot),
        }
    }

    #[test]
    fn mutation_keeps_genes_in_bounds(
        spans in prop::collection::vec(1u8..=3, 1..12),
        seed in any::<u64>(),
        rounds in 1usize..50,
    ) {
        let domain = TimetableDomain::default();
        let picker = SlotPicker::new(&domain).unwrap();
        let rooms = vec![Room::new("101"), Room::new("201").with_full_id("CS-LAB-201")];
        let mut rng = SmallRng::seed_from_u64(seed);

        let genes = spans
            .iter()
            .enumerate()
            .map(|(i, &span)| {
                Gene::new(format!("C{i}"), SessionType::Theory, Weekday::Monday, 1).with_span(span)
            })
            .collect();
        let mut ch = Chromosome::new(genes);

        for _ in 0..rounds {
            mutate(&mut ch, &picker, &rooms, &mut rng);
        }
        for (gene, &span) in ch.genes.iter().zip(&spans) {
            prop_assert_eq!(gene.span_slots, span);
            prop_assert!(gene.slot_number >= 1);
            prop_assert!(gene.last_slot() <= domain.max_slot);
        }
    }

    #[test]
    fn clone_is_independent(n in 1usize..10, idx in any::<prop::sample::Index>()) {
        let original = chromosome(n);
        let mut copy = original.clone();
        let i = idx.index(n);

        copy.genes[i].slot_number = 7;
        copy.genes[i].venue.push_str("-X");
        copy.genes[i].faculty_name = "Someone Else".into();

        prop_assert_eq!(original.genes[i].slot_number, 1);
        prop_assert_eq!(&original.genes[i].venue, "A-1-101");
        prop_assert_eq!(&original.genes[i].faculty_name, "");
    }

    #[test]
    fn crossover_child_has_parent_length(
        n in 0usize..15,
        seed in any::<u64>(),
    ) {
        let p1 = chromosome(n);
        let p2 = chromosome(n);
        let mut rng = SmallRng::seed_from_u64(seed);

        let child = single_point_crossover(&p1, &p2, &mut rng);
        prop_assert_eq!(child.genes.len(), n);
        prop_assert_eq!(child.fitness, 0.0);
    }

    #[test]
    fn expansion_is_deterministic(spans in prop::collection::vec(1u8..=3, 0..10)) {
        let genes = spans
            .iter()
            .enumerate()
            .map(|(i, &span)| {
                Gene::new(format!("C{i}"), SessionType::Lab, Weekday::Tuesday, 1).with_span(span)
            })
            .collect();
        let ch = Chromosome::new(genes);

        let first = ch.to_timetable();
        prop_assert_eq!(first.len(), spans.iter().map(|&s| s as usize).sum::<usize>());
        prop_assert_eq!(first, ch.to_timetable());
    }
}
