use std::{cmp::Reverse, collections::HashMap};

use itertools::Itertools;
use util::error::{XWordError, XWordResult};

use crate::{
  assignment::Assignment, domains::Domains, puzzle::Puzzle, slot::SlotId, word_bank::WordId,
};

/// Orders the candidates of `slot` least-constraining first: ascending by how many
/// candidates they would rule out across the domains of unassigned neighbors. Ties keep
/// vocabulary order. No candidate is dropped.
pub fn order_domain_values(
  puzzle: &Puzzle,
  domains: &Domains,
  slot: SlotId,
  assignment: &Assignment,
) -> Vec<WordId> {
  let bank = puzzle.bank();

  // For each open neighbor: our offset, and how often each letter appears at the
  // neighbor's offset across its domain.
  let open_neighbors = puzzle
    .neighbors(slot)
    .iter()
    .filter(|&&neighbor| !assignment.contains(neighbor))
    .filter_map(|&neighbor| {
      let overlap = puzzle.overlap(slot, neighbor)?;
      let candidates = domains.get(neighbor);
      let letter_counts: HashMap<char, usize> = candidates
        .iter()
        .filter_map(|&word| bank.letter(word, overlap.second))
        .counts();
      Some((overlap.first, candidates.len(), letter_counts))
    })
    .collect_vec();

  domains
    .get(slot)
    .iter()
    .copied()
    .sorted_by_cached_key(|&word| {
      let ruled_out: usize = open_neighbors
        .iter()
        .map(|(offset, total, letter_counts)| {
          let agreeing = bank
            .letter(word, *offset)
            .and_then(|letter| letter_counts.get(&letter))
            .copied()
            .unwrap_or(0);
          total - agreeing
        })
        .sum();
      (ruled_out, word)
    })
    .collect()
}

/// Picks the unassigned slot with the fewest remaining candidates, breaking ties by
/// the most neighbors and then by the lowest slot id.
///
/// Calling this on a complete assignment is a caller bug and reported as an internal
/// error.
pub fn select_unassigned_slot(
  puzzle: &Puzzle,
  domains: &Domains,
  assignment: &Assignment,
) -> XWordResult<SlotId> {
  puzzle
    .slot_ids()
    .filter(|&slot| !assignment.contains(slot))
    .min_by_key(|&slot| (domains.len(slot), Reverse(puzzle.degree(slot)), slot))
    .ok_or_else(|| {
      XWordError::Internal("Asked to select a slot, but every slot is assigned".to_owned()).into()
    })
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

  use googletest::prelude::*;
  use rand::{rngs::StdRng, Rng, SeedableRng};

  use super::{order_domain_values, select_unassigned_slot};
  use crate::{assignment::Assignment, domains::Domains, puzzle::Puzzle, slot::Slot};

  fn words(words: &[&str]) -> Vec<String> {
    words.iter().map(|&word| word.to_owned()).collect()
  }

  fn node_consistent(puzzle: &Puzzle) -> Domains {
    let mut domains = Domains::seeded(puzzle);
    domains.enforce_node_consistency(puzzle);
    domains
  }

  #[gtest]
  fn test_least_constraining_first() {
    // Slot 0 ends where slot 1 begins.
    let puzzle = Puzzle::from_slots(
      [Slot::across(0, 0, 3), Slot::down(0, 2, 3)],
      words(&["ABX", "ABY", "XAA", "XBB", "XCC", "YAA"]),
    )
    .unwrap();
    let domains = node_consistent(&puzzle);
    let bank = puzzle.bank();

    let order = order_domain_values(&puzzle, &domains, 0, &Assignment::new());
    let order: Vec<_> = order.iter().map(|&id| bank.get(id).unwrap().as_str()).collect();
    // Slot 1 keeps three words starting with X, two with A, one with Y and none
    // with B or C.
    expect_that!(
      order,
      container_eq(["ABX", "XAA", "YAA", "ABY", "XBB", "XCC"])
    );
  }

  #[gtest]
  fn test_assigned_neighbors_are_ignored() {
    let puzzle = Puzzle::from_slots(
      [Slot::across(0, 0, 3), Slot::down(0, 2, 3)],
      words(&["ABX", "ABY", "XAA", "XBB", "XCC", "YAA"]),
    )
    .unwrap();
    let domains = node_consistent(&puzzle);
    let mut assignment = Assignment::new();
    assignment.insert(1, puzzle.bank().id("YAA").unwrap());

    // Nothing left to constrain, so vocabulary order is kept.
    let order = order_domain_values(&puzzle, &domains, 0, &assignment);
    expect_that!(order, container_eq(domains.get(0).to_vec()));
  }

  #[gtest]
  fn test_select_minimum_remaining_values() {
    let puzzle = Puzzle::from_slots(
      [Slot::across(0, 0, 3), Slot::down(0, 2, 4)],
      words(&["CAT", "DOG", "COG", "TIDE"]),
    )
    .unwrap();
    let domains = node_consistent(&puzzle);
    expect_that!(
      select_unassigned_slot(&puzzle, &domains, &Assignment::new()).unwrap(),
      eq(1)
    );
  }

  #[gtest]
  fn test_select_breaks_ties_by_degree() {
    // The down slot crosses the first two across slots; every domain has two words.
    let puzzle = Puzzle::from_slots(
      [
        Slot::across(0, 0, 3),
        Slot::across(2, 0, 3),
        Slot::across(4, 0, 3),
        Slot::down(0, 1, 3),
      ],
      words(&["ABC", "DEF"]),
    )
    .unwrap();
    let domains = node_consistent(&puzzle);
    expect_that!(
      select_unassigned_slot(&puzzle, &domains, &Assignment::new()).unwrap(),
      eq(3)
    );
  }

  #[gtest]
  fn test_select_skips_assigned() {
    let puzzle = Puzzle::from_slots(
      [Slot::across(0, 0, 3), Slot::down(0, 2, 4)],
      words(&["CAT", "DOG", "COG", "TIDE"]),
    )
    .unwrap();
    let domains = node_consistent(&puzzle);
    let mut assignment = Assignment::new();
    assignment.insert(1, puzzle.bank().id("TIDE").unwrap());
    expect_that!(
      select_unassigned_slot(&puzzle, &domains, &assignment).unwrap(),
      eq(0)
    );
  }

  #[gtest]
  fn test_select_on_complete_assignment_is_an_error() {
    let puzzle = Puzzle::from_slots([Slot::across(0, 0, 3)], words(&["CAT"])).unwrap();
    let domains = node_consistent(&puzzle);
    let mut assignment = Assignment::new();
    assignment.insert(0, 0);
    expect_that!(
      select_unassigned_slot(&puzzle, &domains, &assignment),
      err(displays_as(contains_substring("Internal error")))
    );
  }

  #[gtest]
  fn test_selected_slot_has_minimum_domain() {
    let mut rng = StdRng::seed_from_u64(7);
    let layout = "____\n\
                  _##_\n\
                  ____";
    for _ in 0..30 {
      let vocabulary: Vec<String> = (0..25)
        .map(|_| {
          let len = rng.random_range(3..=4);
          (0..len)
            .map(|_| (b'A' + rng.random_range(0..5u8)) as char)
            .collect()
        })
        .collect();
      let puzzle = Puzzle::from_layout(layout, vocabulary).unwrap();
      let domains = node_consistent(&puzzle);
      let mut assignment = Assignment::new();
      if rng.random_bool(0.5) {
        assignment.insert(0, 0);
      }

      let selected = select_unassigned_slot(&puzzle, &domains, &assignment).unwrap();
      expect_false!(assignment.contains(selected));
      for slot in puzzle.slot_ids().filter(|&slot| !assignment.contains(slot)) {
        expect_that!(domains.len(selected), le(domains.len(slot)));
      }
    }
  }
}
