use afarust_rewriting::fixtures;
use afarust_rewriting::Invariant;
use afarust_rewriting::RewritingSystem;
use afarust_rewriting::Rule;
use afarust_utilities::random_generator;
use rewritefuzz::invariant_test;
use rewritefuzz::reachability;
use rewritefuzz::WalkConfig;
use test_case::test_case;

fn assert_path(system: &RewritingSystem, path: &[String], from: &str, to: &str) {
    assert_eq!(path.first().map(String::as_str), Some(from));
    assert_eq!(path.last().map(String::as_str), Some(to));

    for step in path.windows(2) {
        assert!(
            system.neighbours(&step[0]).contains(&step[1]),
            "{} is not a single rewrite step away from {}",
            step[1],
            step[0]
        );
    }
}

#[test_case(0 ; "seed 0")]
#[test_case(1 ; "seed 1")]
fn test_walks_can_be_undone(seed: u64) {
    let _ = env_logger::builder().is_test(true).try_init();

    let original = fixtures::original_system();
    let completed = fixtures::completed_system(10);
    let config = WalkConfig {
        count: 3,
        ..WalkConfig::default()
    };

    let mut rng = random_generator(Some(seed));
    let results = reachability(&original, &completed, &config, Some(50_000), &mut rng);
    assert_eq!(results.len(), 3);

    for result in &results {
        assert_ne!(result.start, result.target);

        // The completed system contains every original rule in reverse.
        let backward = result.backward.as_ref().expect("The walk should be reversible");
        assert_path(&completed, backward, &result.target, &result.start);
        assert!(backward.len() <= config.max_steps + 1);
        assert!(result.relation().starts_with('<'));

        if let Some(forward) = &result.forward {
            assert_path(&completed, forward, &result.start, &result.target);
        }
    }
}

#[test]
fn test_invariants_hold_on_random_chains() {
    let _ = env_logger::builder().is_test(true).try_init();

    let original = fixtures::original_system();
    let completed = fixtures::completed_system(10);
    let config = WalkConfig {
        count: 10,
        ..WalkConfig::default()
    };

    let mut rng = random_generator(Some(7));
    let report = invariant_test(
        &[("original", &original), ("completed", &completed)],
        &fixtures::invariants(),
        &config,
        &mut rng,
    );

    assert!(report.systems_passed());
    assert!(report.chains_passed());
    assert_eq!(report.chains.len(), 10);
    assert!(report.chains.iter().all(|(path, _)| path.len() > 1));
    assert!(report.to_string().ends_with("All chains passed the test."));
}

#[test]
fn test_invariant_test_reports_violation() {
    let _ = env_logger::builder().is_test(true).try_init();

    // Every rewrite changes the number of a's.
    let system = RewritingSystem::new(vec!['a', 'b'], vec![Rule::new("a", "b")]);
    let invariant = Invariant::parity("a", 'a');
    let config = WalkConfig {
        count: 2,
        min_len: 4,
        max_len: 8,
        min_steps: 1,
        max_steps: 1,
    };

    let mut rng = random_generator(Some(3));
    let report = invariant_test(&[("decreasing", &system)], &[invariant], &config, &mut rng);

    assert!(!report.systems_passed());
    assert!(!report.chains_passed());
    assert!(report.to_string().ends_with("Not all chains passed the test!"));
}
