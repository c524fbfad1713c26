use std::collections::{HashSet, VecDeque};

use crate::{domains::Domains, puzzle::Puzzle, slot::SlotId};

/// Result of running arc-consistency propagation.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
  /// Every revised domain still has at least one candidate.
  Consistent,
  /// The domain of this slot lost its last candidate.
  Wipeout(SlotId),
}

impl Propagation {
  pub fn is_consistent(self) -> bool {
    matches!(self, Propagation::Consistent)
  }
}

/// Makes `x` arc consistent with `y`: removes every candidate of `x` that no candidate
/// of `y` agrees with at their overlap. Returns whether `x`'s domain changed. `y`'s
/// domain is never touched, and slots that don't overlap are left alone.
pub fn revise(puzzle: &Puzzle, domains: &mut Domains, x: SlotId, y: SlotId) -> bool {
  let Some(overlap) = puzzle.overlap(x, y) else {
    return false;
  };
  let bank = puzzle.bank();

  let supported: HashSet<char> = domains
    .get(y)
    .iter()
    .filter_map(|&word| bank.letter(word, overlap.second))
    .collect();

  domains.retain(x, |&word| {
    bank
      .letter(word, overlap.first)
      .is_some_and(|letter| supported.contains(&letter))
  })
}

/// AC-3 over every arc of the puzzle.
pub fn ac3(puzzle: &Puzzle, domains: &mut Domains) -> Propagation {
  ac3_from(puzzle, domains, puzzle.arcs())
}

/// AC-3 starting from the given arcs. Whenever revising `(x, y)` shrinks `x`, every arc
/// `(z, x)` with `z != y` is queued again. Stops at the first emptied domain.
pub fn ac3_from(
  puzzle: &Puzzle,
  domains: &mut Domains,
  arcs: impl IntoIterator<Item = (SlotId, SlotId)>,
) -> Propagation {
  let mut queue: VecDeque<_> = arcs.into_iter().collect();

  while let Some((x, y)) = queue.pop_front() {
    if !revise(puzzle, domains, x, y) {
      continue;
    }
    if domains.is_empty(x) {
      log::trace!("Domain of {x} wiped out while revising against {y}");
      return Propagation::Wipeout(x);
    }
    queue.extend(
      puzzle
        .neighbors(x)
        .iter()
        .filter(|&&z| z != y)
        .map(|&z| (z, x)),
    );
  }

  Propagation::Consistent
}
