use std::{borrow::Borrow, fs, path::Path};

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use util::error::{XWordError, XWordResult};

#[allow(clippy::unwrap_used)]
static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{Alphabetic}+$").unwrap());

/// The candidate words a puzzle may be filled with.
///
/// Words are upper-cased, deduplicated and kept sorted, so two vocabularies built
/// from the same words iterate identically regardless of input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vocabulary {
  words: Vec<String>,
}

impl Vocabulary {
  fn canonicalize_word(word: &str) -> String {
    word.to_uppercase()
  }

  fn parse_line(line: &str) -> Option<String> {
    let word = line.trim();
    if word.is_empty() {
      return None;
    }
    if !WORD_PATTERN.is_match(word) {
      log::debug!("Skipping non-alphabetic vocabulary entry \"{word}\"");
      return None;
    }
    Some(Self::canonicalize_word(word))
  }

  /// Parses a word list with one word per line. Blank lines and entries containing
  /// anything other than letters are skipped.
  pub fn parse_words<S>(lines: impl IntoIterator<Item = S>) -> Self
  where
    S: Borrow<str>,
  {
    let words = lines
      .into_iter()
      .filter_map(|line| Self::parse_line(line.borrow()))
      .sorted()
      .dedup()
      .collect();
    Self { words }
  }

  pub fn from_file(path: impl AsRef<Path>) -> XWordResult<Self> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|err| {
      XWordError::Parse(format!("Failed to read word list {}: {err}", path.display()))
    })?;
    let vocabulary = Self::parse_words(contents.lines());
    log::debug!(
      "Loaded {} words from {}",
      vocabulary.len(),
      path.display()
    );
    Ok(vocabulary)
  }

  pub fn words(&self) -> impl Iterator<Item = &str> {
    self.words.iter().map(|word| word.as_str())
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }
}

impl IntoIterator for Vocabulary {
  type Item = String;
  type IntoIter = std::vec::IntoIter<String>;

  fn into_iter(self) -> Self::IntoIter {
    self.words.into_iter()
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;

  use super::Vocabulary;

  #[gtest]
  fn test_normalizes_and_sorts() {
    let vocabulary = Vocabulary::parse_words(["dog", "  Cat ", "", "bird"]);
    expect_that!(
      vocabulary.words().collect::<Vec<_>>(),
      container_eq(["BIRD", "CAT", "DOG"])
    );
  }

  #[gtest]
  fn test_removes_duplicates() {
    let vocabulary = Vocabulary::parse_words(["tide", "TIDE", "Tide"]);
    expect_that!(vocabulary.len(), eq(1));
  }

  #[gtest]
  fn test_skips_non_alphabetic() {
    let vocabulary = Vocabulary::parse_words(["it's", "r2d2", "two words", "ok"]);
    expect_that!(vocabulary.words().collect::<Vec<_>>(), container_eq(["OK"]));
  }

  #[gtest]
  fn test_empty() {
    let vocabulary = Vocabulary::parse_words(Vec::<String>::new());
    expect_true!(vocabulary.is_empty());
  }

  #[gtest]
  fn test_missing_file() {
    expect_that!(
      Vocabulary::from_file("/nonexistent/words.txt"),
      err(displays_as(contains_substring("Failed to read word list")))
    );
  }
}
