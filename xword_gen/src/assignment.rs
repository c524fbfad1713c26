use std::collections::{BTreeMap, HashSet};

use crate::{puzzle::Puzzle, slot::SlotId, word_bank::WordId};

/// A partial mapping from slots to chosen words.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
  words: BTreeMap<SlotId, WordId>,
}

impl Assignment {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, slot: SlotId, word: WordId) -> Option<WordId> {
    self.words.insert(slot, word)
  }

  pub fn remove(&mut self, slot: SlotId) -> Option<WordId> {
    self.words.remove(&slot)
  }

  pub fn get(&self, slot: SlotId) -> Option<WordId> {
    self.words.get(&slot).copied()
  }

  pub fn contains(&self, slot: SlotId) -> bool {
    self.words.contains_key(&slot)
  }

  pub fn len(&self) -> usize {
    self.words.len()
  }

  pub fn is_empty(&self) -> bool {
    self.words.is_empty()
  }

  /// Assigned `(slot, word)` pairs in slot order.
  pub fn iter(&self) -> impl Iterator<Item = (SlotId, WordId)> + '_ {
    self.words.iter().map(|(&slot, &word)| (slot, word))
  }

  /// Whether every slot of `puzzle` has a word.
  pub fn is_complete(&self, puzzle: &Puzzle) -> bool {
    puzzle.slot_ids().all(|slot| self.contains(slot))
  }

  /// Whether no constraint is violated so far: assigned words are distinct, each fits
  /// its slot's length, and every pair of assigned crossing slots agrees on the shared
  /// letter. Unassigned neighbors are not considered.
  pub fn is_consistent(&self, puzzle: &Puzzle) -> bool {
    let bank = puzzle.bank();
    let mut seen = HashSet::new();

    self.iter().all(|(slot, word)| {
      if !seen.insert(word) {
        return false;
      }
      if bank.word_len(word) != Some(puzzle.slot_len(slot)) {
        return false;
      }
      puzzle.neighbors(slot).iter().all(|&neighbor| {
        let (Some(other), Some(overlap)) = (self.get(neighbor), puzzle.overlap(slot, neighbor))
        else {
          return true;
        };
        bank.letter(word, overlap.first) == bank.letter(other, overlap.second)
      })
    })
  }

  /// The assignment spelled out as `(slot, word)` strings, in slot order.
  pub fn words<'a>(&'a self, puzzle: &'a Puzzle) -> impl Iterator<Item = (SlotId, &'a str)> + 'a {
    self
      .iter()
      .filter_map(move |(slot, word)| puzzle.bank().get(word).map(|word| (slot, word.as_str())))
  }
}
