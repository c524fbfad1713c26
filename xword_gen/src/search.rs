use std::time::{Duration, Instant};

use util::error::XWordResult;

use crate::{
  arc_consistency::{ac3, ac3_from, Propagation},
  assignment::Assignment,
  domains::Domains,
  heuristics::{order_domain_values, select_unassigned_slot},
  puzzle::Puzzle,
  stats::SearchStats,
};

/// Optional budgets for a search. The default is unlimited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
  pub node_limit: Option<u64>,
  pub time_limit: Option<Duration>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
  /// A complete assignment satisfying every constraint.
  Solved(Assignment),
  /// No assignment satisfies every constraint.
  Unsatisfiable,
  /// The search stopped early for the given reason, before reaching either answer.
  LimitReached(String),
}

#[derive(Clone, Debug)]
pub struct Solution {
  pub outcome: Outcome,
  pub stats: SearchStats,
}

/// How a subtree of the search ended.
#[derive(Debug)]
enum Search {
  Solved,
  Exhausted,
  Aborted(String),
}

/// Backtracking search maintaining arc consistency. Owns the domain store for a
/// single solve; each search node snapshots the domains once and restores that
/// snapshot after every failed candidate.
pub struct Solver<'a> {
  puzzle: &'a Puzzle,
  domains: Domains,
  limits: SearchLimits,
  stats: SearchStats,
  started: Instant,
}

impl<'a> Solver<'a> {
  pub fn new(puzzle: &'a Puzzle) -> Self {
    Self::with_limits(puzzle, SearchLimits::default())
  }

  pub fn with_limits(puzzle: &'a Puzzle, limits: SearchLimits) -> Self {
    Self {
      puzzle,
      domains: Domains::seeded(puzzle),
      limits,
      stats: SearchStats::default(),
      started: Instant::now(),
    }
  }

  pub fn domains(&self) -> &Domains {
    &self.domains
  }

  /// Enforces node and arc consistency, then searches. Unsatisfiable puzzles are an
  /// [`Outcome`], not an error; `Err` means an internal invariant broke.
  pub fn solve(mut self) -> XWordResult<Solution> {
    self.started = Instant::now();
    log::info!(
      "Solving {} slots with {} candidate words",
      self.puzzle.num_slots(),
      self.puzzle.bank().len()
    );

    let outcome = match self.prepare() {
      Propagation::Wipeout(slot) => {
        log::info!("Arc consistency emptied the domain of slot {slot}; no fill exists");
        Outcome::Unsatisfiable
      }
      Propagation::Consistent => {
        let mut assignment = Assignment::new();
        match self.backtrack(&mut assignment, 0)? {
          Search::Solved => Outcome::Solved(assignment),
          Search::Exhausted => Outcome::Unsatisfiable,
          Search::Aborted(reason) => Outcome::LimitReached(reason),
        }
      }
    };

    self.stats.set_total_time(self.started.elapsed());
    log::info!(
      "Search finished after {} nodes in {:.3}s",
      self.stats.nodes_explored,
      self.stats.time_total.as_secs_f64()
    );
    Ok(Solution { outcome, stats: self.stats })
  }

  fn prepare(&mut self) -> Propagation {
    self.domains.enforce_node_consistency(self.puzzle);
    log::debug!(
      "{} candidates remain after node consistency",
      self.domains.total_candidates()
    );
    let propagation = ac3(self.puzzle, &mut self.domains);
    log::debug!(
      "{} candidates remain after arc consistency",
      self.domains.total_candidates()
    );
    propagation
  }

  fn exceeded_limit(&self) -> Option<String> {
    if let Some(limit) = self.limits.node_limit {
      if self.stats.nodes_explored > limit {
        return Some(format!("Node limit of {limit} exceeded"));
      }
    }
    if let Some(limit) = self.limits.time_limit {
      if self.started.elapsed() > limit {
        return Some(format!(
          "Time limit of {:.3} seconds exceeded",
          limit.as_secs_f64()
        ));
      }
    }
    None
  }

  fn backtrack(&mut self, assignment: &mut Assignment, depth: u64) -> XWordResult<Search> {
    let puzzle = self.puzzle;
    self.stats.on_node_explored(depth);

    if assignment.is_complete(puzzle) {
      return Ok(Search::Solved);
    }
    if let Some(reason) = self.exceeded_limit() {
      return Ok(Search::Aborted(reason));
    }

    let slot = select_unassigned_slot(puzzle, &self.domains, assignment)?;
    let candidates = order_domain_values(puzzle, &self.domains, slot, assignment);
    let snapshot = self.domains.clone();

    for word in candidates {
      self.stats.on_assignment_tried();
      assignment.insert(slot, word);

      if assignment.is_consistent(puzzle) {
        self.domains.assign(slot, word);
        let arcs = puzzle.neighbors(slot).iter().map(|&neighbor| (neighbor, slot));
        let propagation = ac3_from(puzzle, &mut self.domains, arcs);
        self.stats.on_propagation(!propagation.is_consistent());
        // A wipeout is not a cut: the emptied slot has the fewest remaining values, so
        // the next node selects it and fails immediately.
        if let Propagation::Wipeout(emptied) = propagation {
          log::trace!("Placing word {word} in slot {slot} empties slot {emptied}");
        }

        match self.backtrack(assignment, depth + 1)? {
          Search::Solved => return Ok(Search::Solved),
          Search::Exhausted => self.stats.on_backtrack(),
          aborted @ Search::Aborted(_) => {
            assignment.remove(slot);
            self.domains = snapshot;
            return Ok(aborted);
          }
        }
      } else {
        self.stats.on_inconsistent();
      }

      assignment.remove(slot);
      self.domains.clone_from(&snapshot);
    }

    log::trace!("Exhausted all candidates for slot {slot} at depth {depth}");
    Ok(Search::Exhausted)
  }
}
