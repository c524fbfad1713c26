use crate::{puzzle::Puzzle, slot::SlotId, word_bank::WordId};

/// Candidate words still possible for each slot, indexed by [`SlotId`].
///
/// Each domain keeps vocabulary order. Domains only ever shrink in place; the search
/// undoes pruning by restoring a whole snapshot, never by re-adding words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domains {
  candidates: Vec<Vec<WordId>>,
}

impl Domains {
  /// Every slot starts with the full vocabulary.
  pub fn seeded(puzzle: &Puzzle) -> Self {
    let all: Vec<_> = puzzle.bank().all_ids().collect();
    Self { candidates: vec![all; puzzle.num_slots()] }
  }

  /// Drops every candidate whose length differs from its slot's length.
  pub fn enforce_node_consistency(&mut self, puzzle: &Puzzle) {
    let bank = puzzle.bank();
    for (slot, candidates) in self.candidates.iter_mut().enumerate() {
      let length = puzzle.slot_len(slot);
      candidates.retain(|&word| bank.word_len(word) == Some(length));
    }
  }

  pub fn get(&self, slot: SlotId) -> &[WordId] {
    self.candidates.get(slot).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn len(&self, slot: SlotId) -> usize {
    self.get(slot).len()
  }

  pub fn is_empty(&self, slot: SlotId) -> bool {
    self.get(slot).is_empty()
  }

  pub fn contains(&self, slot: SlotId, word: WordId) -> bool {
    self.get(slot).contains(&word)
  }

  /// Keeps only the candidates of `slot` matching `keep`. Returns whether anything was
  /// removed.
  pub fn retain(&mut self, slot: SlotId, keep: impl FnMut(&WordId) -> bool) -> bool {
    match self.candidates.get_mut(slot) {
      Some(candidates) => {
        let before = candidates.len();
        candidates.retain(keep);
        candidates.len() != before
      }
      None => false,
    }
  }

  /// Narrows `slot` to the single candidate `word`.
  pub fn assign(&mut self, slot: SlotId, word: WordId) {
    if let Some(candidates) = self.candidates.get_mut(slot) {
      candidates.clear();
      candidates.push(word);
    }
  }

  pub fn total_candidates(&self) -> usize {
    self.candidates.iter().map(Vec::len).sum()
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;

  use super::Domains;
  use crate::{puzzle::Puzzle, slot::Slot};

  fn puzzle() -> Puzzle {
    Puzzle::from_slots(
      [Slot::across(0, 0, 3), Slot::down(0, 2, 4)],
      ["CAT", "DOG", "TIDE", "COG", "TO"].map(|s| s.to_owned()),
    )
    .unwrap()
  }

  #[gtest]
  fn test_seeded_with_full_vocabulary() {
    let puzzle = puzzle();
    let domains = Domains::seeded(&puzzle);
    expect_that!(domains.len(0), eq(5));
    expect_that!(domains.len(1), eq(5));
    expect_true!(domains.get(7).is_empty());
  }

  #[gtest]
  fn test_node_consistency_matches_lengths() {
    let puzzle = puzzle();
    let mut domains = Domains::seeded(&puzzle);
    domains.enforce_node_consistency(&puzzle);

    for slot in puzzle.slot_ids() {
      for &word in domains.get(slot) {
        expect_that!(puzzle.bank().word_len(word), some(eq(puzzle.slot_len(slot))));
      }
    }
    let bank = puzzle.bank();
    expect_that!(
      domains.get(0).to_vec(),
      container_eq([bank.id("CAT").unwrap(), bank.id("DOG").unwrap(), bank.id("COG").unwrap()])
    );
    expect_that!(domains.get(1).to_vec(), container_eq([bank.id("TIDE").unwrap()]));
  }

  #[gtest]
  fn test_node_consistency_is_idempotent() {
    let puzzle = puzzle();
    let mut domains = Domains::seeded(&puzzle);
    domains.enforce_node_consistency(&puzzle);
    let once = domains.clone();
    domains.enforce_node_consistency(&puzzle);
    expect_true!(domains == once);
  }

  #[gtest]
  fn test_retain_reports_change() {
    let puzzle = puzzle();
    let mut domains = Domains::seeded(&puzzle);
    expect_false!(domains.retain(0, |_| true));
    expect_true!(domains.retain(0, |&word| word != 0));
    expect_false!(domains.contains(0, 0));
    expect_that!(domains.total_candidates(), eq(9));
  }

  #[gtest]
  fn test_assign_narrows() {
    let puzzle = puzzle();
    let mut domains = Domains::seeded(&puzzle);
    domains.assign(1, 2);
    expect_that!(domains.get(1).to_vec(), container_eq([2]));
  }
}
