use std::collections::HashMap;

use itertools::Itertools;

/// Index of a word in its [`WordBank`].
pub type WordId = u32;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Word {
  text: String,
  letters: Vec<char>,
}

impl Word {
  fn new(text: String) -> Self {
    let letters = text.chars().collect();
    Self { text, letters }
  }

  pub fn as_str(&self) -> &str {
    &self.text
  }

  /// Length in letters, not bytes.
  pub fn len(&self) -> usize {
    self.letters.len()
  }

  pub fn is_empty(&self) -> bool {
    self.letters.is_empty()
  }

  pub fn letter(&self, idx: usize) -> Option<char> {
    self.letters.get(idx).copied()
  }

  pub fn letters(&self) -> &[char] {
    &self.letters
  }
}

/// Interned vocabulary. Ids are assigned densely in first-seen order, and repeated
/// words keep the id of their first occurrence.
#[derive(Clone, Debug, Default)]
pub struct WordBank {
  words: Vec<Word>,
  ids: HashMap<String, WordId>,
}

impl WordBank {
  /// Empty strings fill no slot and are skipped.
  pub fn from_words(words: impl IntoIterator<Item = String>) -> Self {
    let words: Vec<_> = words
      .into_iter()
      .unique()
      .map(Word::new)
      .filter(|word| !word.is_empty())
      .collect();
    let ids = words
      .iter()
      .enumerate()
      .map(|(idx, word)| (word.text.clone(), idx as WordId))
      .collect();
    Self { words, ids }
  }

  pub fn id(&self, word: &str) -> Option<WordId> {
    self.ids.get(word).copied()
  }

  pub fn get(&self, id: WordId) -> Option<&Word> {
    self.words.get(id as usize)
  }

  /// Letter `idx` of word `id`, or `None` if either is out of range.
  pub fn letter(&self, id: WordId, idx: usize) -> Option<char> {
    self.get(id).and_then(|word| word.letter(idx))
  }

  pub fn word_len(&self, id: WordId) -> Option<usize> {
    self.get(id).map(Word::len)
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }

  pub fn all_ids(&self) -> impl Iterator<Item = WordId> {
    0..self.words.len() as WordId
  }
}
