use include_dir::{include_dir, Dir};
use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::Deserialize;
use serde_json::from_str;
use std::collections::VecDeque;
use thiserror::Error;

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

const BUILTIN_FILE: &str = "words.json";

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("word list file not found: {0}")]
    NotFound(String),

    #[error("word list file {0} is not valid UTF-8")]
    NotUtf8(String),

    #[error("unable to deserialize word list: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("word list {name} declares {declared} words but contains {actual}")]
    SizeMismatch {
        name: String,
        declared: usize,
        actual: usize,
    },

    #[error("word list {0} has no words")]
    Empty(String),
}

#[derive(Deserialize)]
struct WordListFile {
    name: String,
    size: usize,
    words: Vec<String>,
}

/// Immutable, non-empty source of prompt words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordList {
    name: String,
    words: Vec<String>,
}

impl WordList {
    pub fn new(name: impl Into<String>, words: Vec<String>) -> Result<Self, WordListError> {
        let name = name.into();
        if words.is_empty() {
            return Err(WordListError::Empty(name));
        }
        Ok(Self { name, words })
    }

    /// The 21 words bundled with the game.
    pub fn builtin() -> Result<Self, WordListError> {
        read_word_list_from_file(BUILTIN_FILE)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}

fn read_word_list_from_file(file_name: &str) -> Result<WordList, WordListError> {
    let file = LANG_DIR
        .get_file(file_name)
        .ok_or_else(|| WordListError::NotFound(file_name.to_string()))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or_else(|| WordListError::NotUtf8(file_name.to_string()))?;

    let raw: WordListFile = from_str(file_as_str)?;
    if raw.size != raw.words.len() {
        return Err(WordListError::SizeMismatch {
            name: raw.name,
            declared: raw.size,
            actual: raw.words.len(),
        });
    }

    WordList::new(raw.name, raw.words)
}

/// Shuffled queue of prompts. The front of the queue is the next word to guess;
/// once a word is handed out it is no longer in the queue.
#[derive(Debug)]
pub struct WordQueue {
    source: WordList,
    queue: VecDeque<String>,
    rng: StdRng,
}

impl WordQueue {
    pub fn new(source: WordList) -> Self {
        Self::with_rng(source, StdRng::from_entropy())
    }

    pub fn with_seed(source: WordList, seed: u64) -> Self {
        Self::with_rng(source, StdRng::seed_from_u64(seed))
    }

    fn with_rng(source: WordList, rng: StdRng) -> Self {
        Self {
            source,
            queue: VecDeque::new(),
            rng,
        }
    }

    /// Replace the queue with every word of the source list in a fresh random order.
    pub fn reset(&mut self) {
        let mut words = self.source.words().to_vec();
        words.shuffle(&mut self.rng);
        self.queue = words.into();
    }

    /// Remove and return the front word, reshuffling the full list first if the queue ran dry.
    pub fn next_word(&mut self) -> String {
        if self.queue.is_empty() {
            debug!("word queue exhausted, reshuffling {}", self.source.name());
            self.reset();
        }
        self.queue.pop_front().expect("word list is never empty")
    }

    /// Words still waiting in the queue.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_queued(&self, word: &str) -> bool {
        self.queue.iter().any(|w| w == word)
    }

    pub fn source(&self) -> &WordList {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn small_list() -> WordList {
        WordList::new(
            "test",
            vec!["alpha".to_string(), "beta".to_string(), "gamma".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_builtin_word_list() {
        let list = WordList::builtin().unwrap();

        assert_eq!(list.name(), "guess_the_word");
        assert_eq!(list.len(), 21);
        assert!(list.contains("queen"));
        assert!(list.contains("bubble"));
        assert!(!list.contains("dragon"));
    }

    #[test]
    fn test_builtin_words_are_unique() {
        let list = WordList::builtin().unwrap();
        let unique: HashSet<&String> = list.words().iter().collect();
        assert_eq!(unique.len(), list.len());
    }

    #[test]
    fn test_empty_word_list_rejected() {
        let result = WordList::new("nothing", Vec::new());
        assert!(matches!(result, Err(WordListError::Empty(name)) if name == "nothing"));
    }

    #[test]
    fn test_missing_word_list_file() {
        let result = read_word_list_from_file("nonexistent.json");
        assert!(matches!(result, Err(WordListError::NotFound(_))));
    }

    #[test]
    fn test_word_list_deserialization() {
        let json_data = r#"
        {
            "name": "test",
            "size": 3,
            "words": ["hello", "world", "test"]
        }
        "#;

        let raw: WordListFile = from_str(json_data).expect("Failed to deserialize test list");

        assert_eq!(raw.name, "test");
        assert_eq!(raw.size, 3);
        assert_eq!(raw.words.len(), 3);
    }

    #[test]
    fn test_reset_fills_queue_with_every_word() {
        let mut queue = WordQueue::with_seed(small_list(), 7);
        assert_eq!(queue.remaining(), 0);

        queue.reset();

        assert_eq!(queue.remaining(), 3);
        for word in ["alpha", "beta", "gamma"] {
            assert!(queue.is_queued(word));
        }
    }

    #[test]
    fn test_next_word_removes_from_queue() {
        let mut queue = WordQueue::with_seed(small_list(), 7);
        queue.reset();

        let word = queue.next_word();

        assert!(!queue.is_queued(&word));
        assert_eq!(queue.remaining(), 2);
    }

    #[test]
    fn test_next_word_on_empty_queue_reshuffles() {
        let mut queue = WordQueue::with_seed(small_list(), 3);

        let word = queue.next_word();

        assert!(queue.source().contains(&word));
        assert_eq!(queue.remaining(), 2);
    }

    #[test]
    fn test_every_word_once_per_cycle() {
        let mut queue = WordQueue::with_seed(WordList::builtin().unwrap(), 42);
        queue.reset();

        for _cycle in 0..3 {
            let drawn: HashSet<String> = (0..21).map(|_| queue.next_word()).collect();
            assert_eq!(drawn.len(), 21);
            assert_eq!(queue.remaining(), 0);
        }
    }

    #[test]
    fn test_partial_cycle_then_fresh_cycle() {
        let mut queue = WordQueue::with_seed(WordList::builtin().unwrap(), 9);
        queue.reset();
        let _ = queue.next_word();
        let _ = queue.next_word();

        let rest: HashSet<String> = (0..19).map(|_| queue.next_word()).collect();
        assert_eq!(rest.len(), 19);

        // the queue is empty now, so the next draw starts a new full cycle
        let next_cycle: HashSet<String> = (0..21).map(|_| queue.next_word()).collect();
        assert_eq!(next_cycle.len(), 21);
    }

    #[test]
    fn test_seeded_queues_are_reproducible() {
        let mut a = WordQueue::with_seed(WordList::builtin().unwrap(), 1234);
        let mut b = WordQueue::with_seed(WordList::builtin().unwrap(), 1234);

        let from_a: Vec<String> = (0..30).map(|_| a.next_word()).collect();
        let from_b: Vec<String> = (0..30).map(|_| b.next_word()).collect();

        assert_eq!(from_a, from_b);
    }
}
