use std::fmt;

use afarust_automata::accepts;
use afarust_automata::fixtures;
use afarust_automata::Automaton;
use afarust_utilities::lowercase_alphabet;
use afarust_utilities::random_word;
use log::debug;
use log::info;
use log::warn;
use rand::Rng;
use regex::Regex;

/// Anything that decides membership of words in a language.
pub trait Acceptor {
    /// The name used when reporting verdicts.
    fn name(&self) -> &str;

    /// Returns true iff the word is in the language.
    fn accepts(&self, word: &str) -> bool;
}

/// Decides membership with the acceptance evaluator of an automaton.
pub struct AutomatonAcceptor {
    name: String,
    automaton: Automaton,
}

impl AutomatonAcceptor {
    pub fn new(name: &str, automaton: Automaton) -> AutomatonAcceptor {
        AutomatonAcceptor {
            name: name.to_string(),
            automaton,
        }
    }
}

impl Acceptor for AutomatonAcceptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn accepts(&self, word: &str) -> bool {
        accepts(&self.automaton, word)
    }
}

/// Decides membership by matching a regular expression against the whole word.
pub struct RegexAcceptor {
    name: String,
    regex: Regex,
}

impl RegexAcceptor {
    /// The pattern is anchored at both ends of the word.
    pub fn new(name: &str, pattern: &str) -> Result<RegexAcceptor, regex::Error> {
        Ok(RegexAcceptor {
            name: name.to_string(),
            regex: Regex::new(&format!("^(?:{pattern})$"))?,
        })
    }
}

impl Acceptor for RegexAcceptor {
    fn name(&self) -> &str {
        &self.name
    }

    fn accepts(&self, word: &str) -> bool {
        self.regex.is_match(word)
    }
}

/// Determines how many words are generated and how they look.
#[derive(Clone, Debug)]
pub struct FuzzConfig {
    /// The number of iterations, every iteration draws one word per alphabet.
    pub word_count: usize,
    pub min_len: usize,
    pub max_len: usize,
    pub alphabets: Vec<Vec<char>>,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        FuzzConfig {
            word_count: 10,
            min_len: 0,
            max_len: 12,
            alphabets: vec![vec!['a', 'b'], lowercase_alphabet()],
        }
    }
}

/// The verdicts of all acceptors for a single word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdicts {
    pub word: String,

    /// The verdicts that must agree, the first one is the reference.
    pub compared: Vec<(String, bool)>,

    /// Verdicts that are only reported.
    pub observed: Vec<(String, bool)>,
}

impl Verdicts {
    /// The verdict of the reference acceptor.
    pub fn expected(&self) -> bool {
        self.compared.first().is_some_and(|(_, verdict)| *verdict)
    }

    /// Returns true iff all compared acceptors gave the same verdict.
    pub fn agree(&self) -> bool {
        let expected = self.expected();
        self.compared.iter().all(|(_, verdict)| *verdict == expected)
    }
}

impl fmt::Display for Verdicts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.agree() {
            return write!(f, "The result matched. Word: {} - {}", self.word, u8::from(self.expected()));
        }

        writeln!(f, "Discrepancy on the word {}:", self.word)?;

        let width = self
            .compared
            .iter()
            .chain(&self.observed)
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or_default();

        for (name, verdict) in self.compared.iter().chain(&self.observed) {
            writeln!(f, "  {name:width$} : {}", u8::from(*verdict))?;
        }

        Ok(())
    }
}

/// The outcome of a fuzzing run.
#[derive(Debug, Default)]
pub struct FuzzReport {
    pub words_checked: usize,
    pub discrepancies: Vec<Verdicts>,
}

impl FuzzReport {
    pub fn is_success(&self) -> bool {
        self.discrepancies.is_empty()
    }
}

impl fmt::Display for FuzzReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Checked {} words, found {} discrepancies",
            self.words_checked,
            self.discrepancies.len()
        )
    }
}

/// Compares the verdicts of several acceptors against a reference acceptor.
pub struct Harness {
    compared: Vec<Box<dyn Acceptor>>,
    observed: Vec<Box<dyn Acceptor>>,
}

impl Harness {
    pub fn new(reference: Box<dyn Acceptor>) -> Harness {
        Harness {
            compared: vec![reference],
            observed: Vec::new(),
        }
    }

    /// Adds an acceptor that must agree with the reference.
    pub fn compare(mut self, acceptor: Box<dyn Acceptor>) -> Harness {
        self.compared.push(acceptor);
        self
    }

    /// Adds an acceptor whose verdict is only reported.
    pub fn observe(mut self, acceptor: Box<dyn Acceptor>) -> Harness {
        self.observed.push(acceptor);
        self
    }

    /// Collects the verdict of every acceptor for the given word.
    pub fn check_word(&self, word: &str) -> Verdicts {
        let verdicts = |acceptors: &[Box<dyn Acceptor>]| -> Vec<(String, bool)> {
            acceptors
                .iter()
                .map(|acceptor| (acceptor.name().to_string(), acceptor.accepts(word)))
                .collect()
        };

        Verdicts {
            word: word.to_string(),
            compared: verdicts(&self.compared),
            observed: verdicts(&self.observed),
        }
    }

    /// Checks random words as described by the configuration, `on_word` is
    /// called with the verdicts of every word.
    pub fn run<R: Rng>(&self, config: &FuzzConfig, rng: &mut R, mut on_word: impl FnMut(&Verdicts)) -> FuzzReport {
        let mut report = FuzzReport::default();

        for iteration in 0..config.word_count {
            debug!("Iteration {iteration}");

            for alphabet in &config.alphabets {
                let word = random_word(rng, alphabet, config.min_len, config.max_len);
                let verdicts = self.check_word(&word);

                if !verdicts.agree() {
                    warn!("Verdicts disagree on {word:?}");
                    report.discrepancies.push(verdicts.clone());
                }

                on_word(&verdicts);
                report.words_checked += 1;
            }
        }

        info!("{report}");
        report
    }
}

/// The harness that compares the fixture automata with the reference
/// expression, and reports the alternative expression.
pub fn fixture_harness() -> Result<Harness, regex::Error> {
    Ok(
        Harness::new(Box::new(RegexAcceptor::new("reg0", fixtures::REFERENCE_PATTERN)?))
            .compare(Box::new(AutomatonAcceptor::new("DFA", fixtures::dfa())))
            .compare(Box::new(AutomatonAcceptor::new("NFA", fixtures::nfa())))
            .compare(Box::new(AutomatonAcceptor::new("AFA", fixtures::afa())))
            .observe(Box::new(RegexAcceptor::new("reg1", fixtures::ALTERNATIVE_PATTERN)?)),
    )
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    /// Accepts every word.
    struct Everything;

    impl Acceptor for Everything {
        fn name(&self) -> &str {
            "everything"
        }

        fn accepts(&self, _word: &str) -> bool {
            true
        }
    }

    #[test]
    fn test_regex_is_anchored() {
        let acceptor = RegexAcceptor::new("reg", "aa|ba").unwrap();

        assert!(acceptor.accepts("aa"));
        assert!(acceptor.accepts("ba"));
        assert!(!acceptor.accepts("aab"));
        assert!(!acceptor.accepts("baa"));
    }

    #[test]
    fn test_check_word() {
        let harness = fixture_harness().unwrap();

        let verdicts = harness.check_word("ba");
        assert!(verdicts.agree());
        assert!(verdicts.expected());
        assert_eq!(verdicts.compared.len(), 4);
        assert_eq!(verdicts.observed, vec![("reg1".to_string(), true)]);
        assert_eq!(verdicts.to_string(), "The result matched. Word: ba - 1");
    }

    #[test]
    fn test_discrepancy_display() {
        let harness = fixture_harness().unwrap().compare(Box::new(Everything));

        let verdicts = harness.check_word("ab");
        assert!(!verdicts.agree());

        let output = verdicts.to_string();
        assert!(output.starts_with("Discrepancy on the word ab:"));
        assert!(output.contains("  everything : 1"));
        assert!(output.contains("  reg0       : 0"));
    }
}
