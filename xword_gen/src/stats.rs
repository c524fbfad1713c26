use std::{fmt::Display, time::Duration};

/// Counters collected while searching for a fill.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
  /// Search nodes entered, including the root.
  pub nodes_explored: u64,
  /// Candidate words tentatively placed in a slot.
  pub assignments_tried: u64,
  /// Candidates rejected by the consistency check.
  pub inconsistent_assignments: u64,
  /// Candidates undone after their subtree failed.
  pub backtracks: u64,
  /// Local arc-consistency passes run after an assignment.
  pub propagations: u64,
  /// Local passes that emptied some domain.
  pub wipeouts: u64,
  pub max_depth: u64,
  pub time_total: Duration,
}

impl SearchStats {
  #[inline]
  pub fn on_node_explored(&mut self, depth: u64) {
    self.nodes_explored = self.nodes_explored.saturating_add(1);
    self.max_depth = self.max_depth.max(depth);
  }

  #[inline]
  pub fn on_assignment_tried(&mut self) {
    self.assignments_tried = self.assignments_tried.saturating_add(1);
  }

  #[inline]
  pub fn on_inconsistent(&mut self) {
    self.inconsistent_assignments = self.inconsistent_assignments.saturating_add(1);
  }

  #[inline]
  pub fn on_backtrack(&mut self) {
    self.backtracks = self.backtracks.saturating_add(1);
  }

  #[inline]
  pub fn on_propagation(&mut self, wiped_out: bool) {
    self.propagations = self.propagations.saturating_add(1);
    if wiped_out {
      self.wipeouts = self.wipeouts.saturating_add(1);
    }
  }

  #[inline]
  pub fn set_total_time(&mut self, duration: Duration) {
    self.time_total = duration;
  }
}

impl Display for SearchStats {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    writeln!(f, "Search statistics:")?;
    writeln!(f, "  nodes explored:      {}", self.nodes_explored)?;
    writeln!(f, "  assignments tried:   {}", self.assignments_tried)?;
    writeln!(f, "  inconsistent:        {}", self.inconsistent_assignments)?;
    writeln!(f, "  backtracks:          {}", self.backtracks)?;
    writeln!(
      f,
      "  propagations:        {} ({} wipeouts)",
      self.propagations, self.wipeouts
    )?;
    writeln!(f, "  max depth:           {}", self.max_depth)?;
    write!(f, "  total time:          {:.3}s", self.time_total.as_secs_f64())
  }
}
