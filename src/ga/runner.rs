//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → termination check → elitism → selection →
//! crossover → mutation → repeat.

use super::config::GaConfig;
use super::selection::tournament;
use super::types::{GaProblem, Individual};
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult<I: Individual> {
    /// The best individual found during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// The configured generation budget.
    ///
    /// Reported even when the run stopped early; see
    /// [`generations_evaluated`](Self::generations_evaluated) for the
    /// number actually run.
    pub generations: usize,

    /// Number of generations whose population was evaluated.
    pub generations_evaluated: usize,

    /// Whether the run stopped because the fitness threshold was exceeded.
    pub converged: bool,

    /// Best fitness seen so far, after each evaluated generation.
    pub fitness_history: Vec<f64>,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config);
/// println!("Best fitness: {}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// Every generation the whole population is re-evaluated; the best
    /// individual ever seen is kept (replaced only by a strictly fitter
    /// one). The loop stops when the best fitness exceeds
    /// [`GaConfig::fitness_threshold`] or the generation budget runs out.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`GaConfig::validate`] first
    /// to get a descriptive error).
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> GaResult<P::Individual> {
        config.validate().expect("invalid GaConfig");

        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::seed_from_u64(rand::random()),
        };

        let mut population: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();

        let mut best: Option<P::Individual> = None;
        let mut fitness_history = Vec::with_capacity(config.max_generations);
        let mut converged = false;

        for gen in 0..config.max_generations {
            evaluate_population(problem, &mut population, config.parallel);

            let gen_best = find_best(&population);
            let improved = match &best {
                Some(b) => gen_best.fitness() > b.fitness(),
                None => true,
            };
            if improved {
                best = Some(gen_best.clone());
            }
            let best_fitness = best.as_ref().map_or(f64::NEG_INFINITY, |b| b.fitness());
            fitness_history.push(best_fitness);

            debug!(
                "generation {}: generation best {:.2}, overall best {:.2}",
                gen + 1,
                gen_best.fitness(),
                best_fitness
            );
            problem.on_generation(gen + 1, best_fitness);

            if config
                .fitness_threshold
                .is_some_and(|threshold| best_fitness > threshold)
            {
                converged = true;
                break;
            }
            if gen + 1 == config.max_generations {
                break;
            }

            population = next_generation(problem, population, config, &mut rng);
        }

        // population_size >= 2 and max_generations >= 1, so at least one
        // generation has been evaluated.
        let best = best.expect("at least one generation evaluated");
        info!(
            "GA finished after {} of {} generations, best fitness {:.2}{}",
            fitness_history.len(),
            config.max_generations,
            best.fitness(),
            if converged { " (threshold reached)" } else { "" }
        );

        GaResult {
            best_fitness: best.fitness(),
            best,
            generations: config.max_generations,
            generations_evaluated: fitness_history.len(),
            converged,
            fitness_history,
        }
    }
}

/// Builds the next generation: elites first, then bred offspring.
fn next_generation<P: GaProblem, R: Rng>(
    problem: &P,
    mut population: Vec<P::Individual>,
    config: &GaConfig,
    rng: &mut R,
) -> Vec<P::Individual> {
    // Descending: fittest first
    population.sort_by(|a, b| {
        b.fitness()
            .partial_cmp(&a.fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut next_gen: Vec<P::Individual> = population[..config.elite_count].to_vec();

    while next_gen.len() < config.population_size {
        let p1 = tournament(&population, config.tournament_size, rng);
        let p2 = tournament(&population, config.tournament_size, rng);

        let mut child = if rng.random_bool(config.crossover_rate) {
            problem.crossover(&population[p1], &population[p2], rng)
        } else {
            population[p1].clone()
        };

        if rng.random_bool(config.mutation_rate) {
            problem.mutate(&mut child, rng);
        }

        next_gen.push(child);
    }

    next_gen
}

/// Evaluate all individuals in the population.
fn evaluate_population<P: GaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    parallel: bool,
) {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;
            population.par_iter_mut().for_each(|ind| {
                let f = problem.evaluate(ind);
                ind.set_fitness(f);
            });
            return;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for ind in population.iter_mut() {
        let f = problem.evaluate(ind);
        ind.set_fitness(f);
    }
}

/// Find the individual with the best (highest) fitness.
///
/// Ties resolve to the earliest individual.
fn find_best<I: Individual>(population: &[I]) -> &I {
    let mut best = &population[0];
    for ind in &population[1..] {
        if ind.fitness() > best.fitness() {
            best = ind;
        }
    }
    best
}

// ============================================================================
// Tests
// ============================================================================
