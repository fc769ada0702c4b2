//! Timetable chromosome.
//!
//! A [`Chromosome`] is one complete candidate timetable for a section: an
//! ordered list of [`Gene`]s plus the fitness the GA last assigned it.
//! Genes are owned values, so `clone()` is a deep copy and a mutated child
//! never aliases its parent.

mod gene;

pub use gene::{Gene, SlotOccurrence};

use crate::ga::Individual;

/// Candidate timetable.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    pub genes: Vec<Gene>,
    /// Set only by evaluation; zero until then.
    pub fitness: f64,
}

impl Individual for Chromosome {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl Chromosome {
    /// Creates an unevaluated chromosome.
    pub fn new(genes: Vec<Gene>) -> Self {
        Self {
            genes,
            fitness: 0.0,
        }
    }

    /// Expands spanning genes into per-slot occurrences.
    ///
    /// Each gene is emitted as-is, immediately followed by its continuations
    /// at `slot_number + 1 ..= slot_number + span_slots - 1`. Gene order is
    /// preserved.
    pub fn to_timetable(&self) -> Vec<SlotOccurrence> {
        let total = self.genes.iter().map(|g| g.span_slots.max(1) as usize).sum();
        let mut slots = Vec::with_capacity(total);
        for gene in &self.genes {
            slots.push(SlotOccurrence::primary(gene.clone()));
            for offset in 1..gene.span_slots {
                let mut cont = gene.clone();
                cont.slot_number = gene.slot_number.saturating_add(offset);
                slots.push(SlotOccurrence::continuation(cont, gene.slot_number));
            }
        }
        slots
    }
}
