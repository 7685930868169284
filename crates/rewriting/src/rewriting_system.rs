use std::collections::VecDeque;
use std::fmt;

use log::debug;
use log::trace;
use rand::seq::IndexedRandom;
use rand::Rng;
use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;

/// A rewrite rule that replaces an occurrence of `lhs` by `rhs`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    pub lhs: String,
    pub rhs: String,
}

impl Rule {
    pub fn new(lhs: &str, rhs: &str) -> Rule {
        Rule {
            lhs: lhs.to_string(),
            rhs: rhs.to_string(),
        }
    }

    /// Returns the rule with both sides swapped.
    pub fn reversed(&self) -> Rule {
        Rule {
            lhs: self.rhs.clone(),
            rhs: self.lhs.clone(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.lhs, self.rhs)
    }
}

/// A string rewriting system over a finite alphabet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewritingSystem {
    alphabet: Vec<char>,
    rules: Vec<Rule>,
}

impl RewritingSystem {
    pub fn new(alphabet: Vec<char>, rules: Vec<Rule>) -> RewritingSystem {
        RewritingSystem { alphabet, rules }
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the system in which every rule is applied in the opposite direction.
    pub fn reversed(&self) -> RewritingSystem {
        RewritingSystem {
            alphabet: self.alphabet.clone(),
            rules: self.rules.iter().map(Rule::reversed).collect(),
        }
    }

    /// Returns all words obtained by a single rule application at any
    /// position, overlapping occurrences of a left-hand side included.
    pub fn neighbours(&self, word: &str) -> FxHashSet<String> {
        let mut result = FxHashSet::default();

        for rule in &self.rules {
            let mut start = 0;
            while let Some(offset) = word.get(start..).and_then(|rest| rest.find(rule.lhs.as_str())) {
                let position = start + offset;

                let mut neighbour = String::with_capacity(word.len() + rule.rhs.len());
                neighbour.push_str(&word[..position]);
                neighbour.push_str(&rule.rhs);
                neighbour.push_str(&word[position + rule.lhs.len()..]);
                result.insert(neighbour);

                // Continue at the next character so that overlapping occurrences are found.
                start = position + word[position..].chars().next().map_or(1, char::len_utf8);
            }
        }

        result
    }

    /// Returns a shortest rewrite path from `start` to `target`, both
    /// included, using a breadth first search.
    ///
    /// Returns None when the target is unreachable, or when more than
    /// `max_visited` words were visited before finding it.
    pub fn find_path(&self, start: &str, target: &str, max_visited: Option<usize>) -> Option<Vec<String>> {
        if start == target {
            return Some(vec![start.to_string()]);
        }

        let mut queue: VecDeque<String> = VecDeque::new();
        let mut parent: FxHashMap<String, String> = FxHashMap::default();
        let mut visited: FxHashSet<String> = FxHashSet::default();

        queue.push_back(start.to_string());
        visited.insert(start.to_string());

        while let Some(current) = queue.pop_front() {
            // Sorted so that the search does not depend on the hash order.
            let mut neighbours: Vec<String> = self.neighbours(&current).into_iter().collect();
            neighbours.sort_unstable();

            for neighbour in neighbours {
                if !visited.insert(neighbour.clone()) {
                    continue;
                }

                parent.insert(neighbour.clone(), current.clone());

                if neighbour == target {
                    let path = reconstruct_path(&parent, neighbour);
                    debug!("Found path of length {} after visiting {} words", path.len(), visited.len());
                    return Some(path);
                }

                if max_visited.is_some_and(|max| visited.len() > max) {
                    debug!("Search from {start} to {target} exceeded {} visited words", visited.len() - 1);
                    return None;
                }

                queue.push_back(neighbour);
            }
        }

        trace!("Visited {} words, {target} is unreachable from {start}", visited.len());
        None
    }

    /// Applies up to `steps` randomly chosen rewrites starting from `start`,
    /// stopping early at a word without neighbours. The resulting path
    /// includes the start word.
    pub fn random_walk<R: Rng>(&self, rng: &mut R, start: &str, steps: usize) -> Vec<String> {
        let mut path = vec![start.to_string()];

        for _ in 0..steps {
            let Some(current) = path.last() else { break };

            let mut neighbours: Vec<String> = self.neighbours(current).into_iter().collect();
            neighbours.sort_unstable();

            match neighbours.choose(rng) {
                Some(next) => {
                    let next = next.clone();
                    path.push(next);
                }
                None => break,
            }
        }

        path
    }
}

/// Follows the parent pointers from `end` back to the start of the search.
fn reconstruct_path(parent: &FxHashMap<String, String>, end: String) -> Vec<String> {
    let mut path = vec![end];
    while let Some(previous) = path.last().and_then(|word| parent.get(word)) {
        path.push(previous.clone());
    }

    path.reverse();
    path
}

impl fmt::Display for RewritingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{rule}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_log::test;

    use super::*;

    fn sorting_system() -> RewritingSystem {
        RewritingSystem::new(vec!['a', 'b'], vec![Rule::new("ab", "ba")])
    }

    #[test]
    fn test_neighbours_overlapping() {
        let system = RewritingSystem::new(vec!['d', 'p'], vec![Rule::new("pdp", "dpd")]);

        let mut neighbours: Vec<String> = system.neighbours("pdpdp").into_iter().collect();
        neighbours.sort();
        assert_eq!(neighbours, vec!["dpddp", "pddpd"]);

        assert!(system.neighbours("dddd").is_empty());
    }

    #[test]
    fn test_neighbours_multiple_rules() {
        let system = RewritingSystem::new(
            vec!['a', 'b'],
            vec![Rule::new("a", "b"), Rule::new("ab", "")],
        );

        let mut neighbours: Vec<String> = system.neighbours("aab").into_iter().collect();
        neighbours.sort();
        assert_eq!(neighbours, vec!["a", "abb", "bab"]);
    }

    #[test]
    fn test_empty_lhs() {
        let system = RewritingSystem::new(vec!['a', 'b'], vec![Rule::new("", "b")]);

        let mut neighbours: Vec<String> = system.neighbours("aa").into_iter().collect();
        neighbours.sort();
        assert_eq!(neighbours, vec!["aab", "aba", "baa"]);
    }

    #[test]
    fn test_find_path() {
        let system = sorting_system();

        assert_eq!(
            system.find_path("aab", "baa", None),
            Some(vec!["aab".to_string(), "aba".to_string(), "baa".to_string()])
        );
        assert_eq!(system.find_path("ab", "ab", None), Some(vec!["ab".to_string()]));
        assert_eq!(system.find_path("ba", "ab", None), None);
    }

    #[test]
    fn test_find_path_reversed() {
        let system = sorting_system().reversed();

        let path = system.find_path("baa", "aab", None).unwrap();
        assert_eq!(path.first().map(String::as_str), Some("baa"));
        assert_eq!(path.last().map(String::as_str), Some("aab"));
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_find_path_limit() {
        let system = sorting_system();

        assert_eq!(system.find_path("aaab", "baaa", Some(1)), None);
        assert_eq!(system.find_path("aaab", "baaa", None).map(|path| path.len()), Some(4));
    }

    #[test]
    fn test_random_walk() {
        let system = sorting_system();
        let mut rng = StdRng::seed_from_u64(3);

        let path = system.random_walk(&mut rng, "aabb", 10);

        // Every step moves one b to the left, which is only possible four times.
        assert_eq!(path.len(), 5);
        assert_eq!(path.last().map(String::as_str), Some("bbaa"));
        for window in path.windows(2) {
            assert!(system.neighbours(&window[0]).contains(&window[1]));
        }
    }
}
