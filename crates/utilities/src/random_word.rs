use log::trace;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use rand::SeedableRng;

/// Returns the lower case letters `a..=z`.
pub fn lowercase_alphabet() -> Vec<char> {
    ('a'..='z').collect()
}

/// Returns a random number generator, seeded with the given value when
/// present so that a run can be reproduced.
pub fn random_generator(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Returns a word over the given alphabet with a length picked uniformly from
/// `min_len..=max_len`.
///
/// An empty alphabet can only produce the empty word.
pub fn random_word<R: Rng>(rng: &mut R, alphabet: &[char], min_len: usize, max_len: usize) -> String {
    let length = rng.random_range(min_len..=max_len.max(min_len));

    let word: String = (0..length)
        .filter_map(|_| alphabet.choose(&mut *rng))
        .collect();

    trace!("Generated word {word:?} of length {length}");
    word
}
