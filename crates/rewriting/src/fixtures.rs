//! The rewriting system over `abcdpq` studied by the fuzzing tool, its
//! completion and the invariants that both of them preserve.

use crate::Invariant;
use crate::InvariantKind;
use crate::RewritingSystem;
use crate::Rule;

pub const ALPHABET: [char; 6] = ['a', 'b', 'c', 'd', 'p', 'q'];

pub fn original_system() -> RewritingSystem {
    RewritingSystem::new(
        ALPHABET.to_vec(),
        vec![
            Rule::new("apbc", "caqdbapbap"),
            Rule::new("paqd", "daqdbapbap"),
            Rule::new("ccpp", "adaqdqa"),
            Rule::new("dpd", "pdp"),
        ],
    )
}

/// The original rules oriented towards shorter words, extended with the
/// rules `p d^(n+1) p d -> d p d d p^n` for `n` in `1..=max_n`.
pub fn completed_system(max_n: usize) -> RewritingSystem {
    let mut rules: Vec<Rule> = original_system().rules().iter().map(Rule::reversed).collect();

    for n in 1..=max_n {
        let lhs = format!("p{}pd", "d".repeat(n + 1));
        let rhs = format!("dpdd{}", "p".repeat(n));
        rules.push(Rule::new(&lhs, &rhs));
    }

    RewritingSystem::new(ALPHABET.to_vec(), rules)
}

/// The invariants I1 to I4.
pub fn invariants() -> Vec<Invariant> {
    let linear = |name: &str, weights: [i64; 6]| {
        Invariant::new(
            name,
            InvariantKind::LinearCombination {
                weights: ALPHABET.iter().copied().zip(weights).collect(),
            },
        )
    };

    vec![
        linear("I1", [2, 0, 3, -2, -2, 0]),
        linear("I2", [2, -2, 1, 0, 0, -2]),
        Invariant::parity("I3", 'c'),
        Invariant::matrix_trace("I4"),
    ]
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_completed_system() {
        let system = completed_system(2);

        assert_eq!(system.rules().len(), 6);
        assert_eq!(system.rules()[0], Rule::new("caqdbapbap", "apbc"));
        assert_eq!(system.rules()[4], Rule::new("pddpd", "dpddp"));
        assert_eq!(system.rules()[5], Rule::new("pdddpd", "dpddpp"));
    }

    #[test]
    fn test_completed_system_reaches_original_steps() {
        let original = original_system();
        let completed = completed_system(10);

        // Every single step of the original system can be undone.
        for rule in original.rules() {
            let path = completed.find_path(&rule.rhs, &rule.lhs, Some(10_000));
            assert_eq!(path.map(|path| path.len()), Some(2), "Rule {rule} cannot be reversed");
        }
    }
}
