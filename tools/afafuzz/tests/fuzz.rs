use afafuzz::fixture_harness;
use afafuzz::AutomatonAcceptor;
use afafuzz::FuzzConfig;
use afafuzz::Harness;
use afafuzz::RegexAcceptor;
use afarust_automata::AutomatonBuilder;
use afarust_automata::StateKind;
use afarust_automata::Symbol;
use afarust_utilities::random_generator;
use test_case::test_case;

#[test_case(0 ; "seed 0")]
#[test_case(1 ; "seed 1")]
#[test_case(2 ; "seed 2")]
fn test_fixtures_agree(seed: u64) {
    let _ = env_logger::builder().is_test(true).try_init();

    let harness = fixture_harness().unwrap();
    let config = FuzzConfig {
        word_count: 200,
        ..FuzzConfig::default()
    };

    let mut observed_agree = true;
    let report = harness.run(&config, &mut random_generator(Some(seed)), |verdicts| {
        // The alternative expression describes the same language.
        observed_agree &= verdicts.observed.iter().all(|(_, verdict)| *verdict == verdicts.expected());
    });

    assert_eq!(report.words_checked, 400);
    assert!(report.is_success(), "Found discrepancies {:?}", report.discrepancies);
    assert!(observed_agree);
}

#[test]
fn test_detects_discrepancy() {
    let _ = env_logger::builder().is_test(true).try_init();

    // Accepts (aa)* only, which differs from the reference on "ba".
    let mut builder = AutomatonBuilder::new("even");
    builder
        .state("even")
        .state("odd")
        .accepting("even")
        .transition("even", Symbol::Char('a'), "odd")
        .transition("odd", Symbol::Char('a'), "even");

    let harness = Harness::new(Box::new(RegexAcceptor::new("reg0", "((aa|ba)(ab)*(bb)*)*").unwrap()))
        .compare(Box::new(AutomatonAcceptor::new("even a", builder.build())));

    assert!(harness.check_word("aa").agree());
    assert!(!harness.check_word("ba").agree());

    let config = FuzzConfig {
        word_count: 100,
        min_len: 2,
        max_len: 2,
        alphabets: vec![vec!['b']],
    };

    // Every word is "bb", rejected by both.
    let report = harness.run(&config, &mut random_generator(Some(3)), |_| {});
    assert!(report.is_success());

    let config = FuzzConfig {
        alphabets: vec![vec!['a', 'b']],
        ..config
    };
    let report = harness.run(&config, &mut random_generator(Some(3)), |_| {});
    assert!(!report.is_success(), "Words ba should be reported");
    assert!(report.discrepancies.iter().all(|verdicts| verdicts.word == "ba"));
}

#[test]
fn test_universal_acceptor() {
    // Words that contain an a and a b, as the intersection of two languages.
    let mut builder = AutomatonBuilder::new("both");
    builder
        .state("both")
        .state("find_a")
        .state("find_b")
        .state("done")
        .accepting("done")
        .kind("both", StateKind::And)
        .transition("both", Symbol::Epsilon, "find_a")
        .transition("both", Symbol::Epsilon, "find_b")
        .transition("find_a", Symbol::Wildcard, "find_a")
        .transition("find_a", Symbol::Char('a'), "done")
        .transition("find_b", Symbol::Wildcard, "find_b")
        .transition("find_b", Symbol::Char('b'), "done")
        .transition("done", Symbol::Wildcard, "done");

    let acceptor = AutomatonAcceptor::new("both", builder.build());
    let oracle = RegexAcceptor::new("oracle", "[ab]*(a[ab]*b|b[ab]*a)[ab]*").unwrap();

    let harness = Harness::new(Box::new(oracle)).compare(Box::new(acceptor));
    let config = FuzzConfig {
        word_count: 200,
        min_len: 0,
        max_len: 8,
        alphabets: vec![vec!['a', 'b']],
    };

    let report = harness.run(&config, &mut random_generator(Some(9)), |_| {});
    assert!(report.is_success(), "Found discrepancies {:?}", report.discrepancies);
}
