use std::fmt;

use afarust_rewriting::check_all_paths;
use afarust_rewriting::check_all_rules;
use afarust_rewriting::Invariant;
use afarust_rewriting::InvariantViolation;
use afarust_rewriting::RewritingSystem;
use afarust_utilities::random_word;
use log::debug;
use log::info;
use log::warn;
use rand::Rng;

/// Determines the random rewrite walks that are generated.
#[derive(Clone, Debug)]
pub struct WalkConfig {
    /// The number of walks that should be checked.
    pub count: usize,
    pub min_len: usize,
    pub max_len: usize,
    pub min_steps: usize,
    pub max_steps: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        WalkConfig {
            count: 5,
            min_len: 15,
            max_len: 20,
            min_steps: 4,
            max_steps: 7,
        }
    }
}

impl WalkConfig {
    /// Gives up after this many walks that did not produce a usable result.
    fn max_attempts(&self) -> usize {
        self.count.saturating_mul(1000).max(1000)
    }

    /// Returns a random walk in the given system from a random start word.
    fn walk<R: Rng>(&self, system: &RewritingSystem, rng: &mut R) -> Vec<String> {
        let start = random_word(rng, system.alphabet(), self.min_len, self.max_len);
        let steps = rng.random_range(self.min_steps..=self.max_steps.max(self.min_steps));
        system.random_walk(rng, &start, steps)
    }
}

/// Whether two words are reachable from each other in the completed system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReachabilityResult {
    pub start: String,
    pub target: String,
    pub forward: Option<Vec<String>>,
    pub backward: Option<Vec<String>>,
}

impl ReachabilityResult {
    /// Returns `<->`, `->`, `<-` or `-` depending on the directions in which a
    /// path was found.
    pub fn relation(&self) -> &'static str {
        match (self.backward.is_some(), self.forward.is_some()) {
            (true, true) => "<->",
            (false, true) => "->",
            (true, false) => "<-",
            (false, false) => "-",
        }
    }
}

/// Writes the path as `'w0' -> 'w1' -> ...`.
fn write_path(f: &mut fmt::Formatter<'_>, path: &[String]) -> fmt::Result {
    for (index, word) in path.iter().enumerate() {
        if index > 0 {
            write!(f, " -> ")?;
        }
        write!(f, "'{word}'")?;
    }

    Ok(())
}

impl fmt::Display for ReachabilityResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.forward {
            write!(f, "The word forward is achievable w -> w': ")?;
            write_path(f, path)?;
            writeln!(f)?;
        }

        if let Some(path) = &self.backward {
            write!(f, "The word backward is achievable w' -> w: ")?;
            write_path(f, path)?;
            writeln!(f)?;
        }

        write!(f, "'{}' {} '{}'", self.start, self.relation(), self.target)
    }
}

/// Derives target words by random walks in the original system and searches
/// for rewrite paths between start and target in both directions in the
/// completed system.
pub fn reachability<R: Rng>(
    original: &RewritingSystem,
    completed: &RewritingSystem,
    config: &WalkConfig,
    max_visited: Option<usize>,
    rng: &mut R,
) -> Vec<ReachabilityResult> {
    let mut results = Vec::new();
    let mut attempts = 0;

    while results.len() < config.count {
        attempts += 1;
        if attempts > config.max_attempts() {
            warn!("Stopped after {attempts} walks, found only {} usable ones", results.len());
            break;
        }

        let path = config.walk(original, rng);
        let (Some(start), Some(target)) = (path.first(), path.last()) else {
            continue;
        };

        if start == target {
            debug!("Walk from {start} did not change the word");
            continue;
        }

        let result = ReachabilityResult {
            start: start.clone(),
            target: target.clone(),
            forward: completed.find_path(start, target, max_visited),
            backward: completed.find_path(target, start, max_visited),
        };

        info!("Test {}: {}", results.len() + 1, result.relation());
        results.push(result);
    }

    results
}

/// The outcome of checking invariants on rules and on random rewrite chains.
#[derive(Debug, Default)]
pub struct InvariantReport {
    /// The name of every checked system with the outcome of the rule check.
    pub systems: Vec<(String, Result<(), InvariantViolation>)>,

    /// Every checked rewrite chain with its outcome.
    pub chains: Vec<(Vec<String>, Result<(), InvariantViolation>)>,
}

impl InvariantReport {
    /// Returns true iff all rewrite chains preserve all invariants.
    pub fn chains_passed(&self) -> bool {
        self.chains.iter().all(|(_, result)| result.is_ok())
    }

    /// Returns true iff all rules of all systems preserve all invariants.
    pub fn systems_passed(&self) -> bool {
        self.systems.iter().all(|(_, result)| result.is_ok())
    }
}

impl fmt::Display for InvariantReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, result) in &self.systems {
            match result {
                Ok(()) => writeln!(f, "In system {name} all invariants are satisfied.")?,
                Err(violation) => writeln!(f, "In system {name}: {violation}")?,
            }
        }

        for (index, (path, result)) in self.chains.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{}) ", index + 1)?;
            writeln!(f, "{}", path.join(" -> "))?;

            match result {
                Ok(()) => writeln!(f, "In the rewrite chain all invariants are satisfied.")?,
                Err(violation) => writeln!(f, "In the rewrite chain: {violation}")?,
            }
        }

        writeln!(f)?;
        if self.chains_passed() {
            write!(f, "All chains passed the test.")
        } else {
            write!(f, "Not all chains passed the test!")
        }
    }
}

/// Checks the invariants on the rules of the given systems, and on random
/// rewrite chains of the last system.
pub fn invariant_test<R: Rng>(
    systems: &[(&str, &RewritingSystem)],
    invariants: &[Invariant],
    config: &WalkConfig,
    rng: &mut R,
) -> InvariantReport {
    let mut report = InvariantReport::default();

    for (name, system) in systems {
        report.systems.push((name.to_string(), check_all_rules(invariants, system)));
    }

    let Some((_, walk_system)) = systems.last() else {
        return report;
    };

    let mut attempts = 0;
    while report.chains.len() < config.count {
        attempts += 1;
        if attempts > config.max_attempts() {
            warn!("Stopped after {attempts} walks, found only {} chains", report.chains.len());
            break;
        }

        let path = config.walk(walk_system, rng);
        if path.len() > 1 {
            let result = check_all_paths(invariants, &path);
            if let Err(violation) = &result {
                warn!("{violation}");
            }

            report.chains.push((path, result));
        }
    }

    report
}
