use std::{cmp::Reverse, collections::HashMap, vec::IntoIter};

use itertools::Itertools;
use log::{debug, info};

use crate::{
  assignment::Assignment,
  consistency::ArcConsistency,
  domain::Domains,
  slot::SlotId,
  structure::Overlap,
  word_bank::WordId,
  xword::XWord,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Inference {
  /// Order and prune against the domains left by the initial AC-3 pass only.
  #[default]
  None,
  /// Re-run AC-3 from each newly assigned slot, on a copy of the domains.
  MaintainArcConsistency,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveConfig {
  pub inference: Inference,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolveStats {
  /// Set when the initial consistency pass proved the puzzle unsolvable.
  pub wipeout: Option<SlotId>,
  /// Words tentatively placed during search.
  pub states: usize,
  pub backtracks: usize,
}

/// One level of the search: the slot being filled and the candidates left to
/// try for it.
struct Frame {
  slot: SlotId,
  candidates: IntoIter<WordId>,
  /// Domains in effect when `slot` was selected. Only kept when inferring.
  snapshot: Option<Domains>,
  /// Domains after assigning the current candidate and propagating.
  inferred: Option<Domains>,
}

impl XWord {
  /// Minimum remaining values, then highest degree, then lowest id.
  pub fn select_unassigned_variable(
    &self,
    assignment: &Assignment,
    domains: &Domains,
  ) -> Option<SlotId> {
    self
      .structure()
      .slot_ids()
      .filter(|&slot| !assignment.is_assigned(slot))
      .min_by_key(|&slot| (domains.size(slot), Reverse(self.structure().degree(slot)), slot))
  }

  /// The domain of `slot` ordered by how many candidates each word would rule
  /// out of unassigned neighbors, fewest first.
  pub fn order_domain_values(
    &self,
    slot: SlotId,
    assignment: &Assignment,
    domains: &Domains,
  ) -> Vec<WordId> {
    let neighbor_letters: Vec<(SlotId, Overlap, HashMap<char, usize>)> = self
      .structure()
      .neighbors(slot)
      .iter()
      .filter(|&&neighbor| !assignment.is_assigned(neighbor))
      .filter_map(|&neighbor| {
        self
          .structure()
          .overlap(slot, neighbor)
          .map(|overlap| (neighbor, overlap))
      })
      .map(|(neighbor, overlap)| {
        let counts = domains
          .iter(neighbor)
          .filter_map(|word| self.bank().letter(word, overlap.second))
          .counts();
        (neighbor, overlap, counts)
      })
      .collect();

    domains
      .iter(slot)
      .map(|word| {
        let eliminated: usize = neighbor_letters
          .iter()
          .map(|(neighbor, overlap, counts)| {
            let letter = self.bank().letter(word, overlap.first);
            let compatible = letter
              .and_then(|letter| counts.get(&letter))
              .cloned()
              .unwrap_or(0);
            // The word itself never counts as eliminated from a neighbor.
            let itself = domains.contains(*neighbor, word)
              && self.bank().letter(word, overlap.second) != letter;
            domains
              .size(*neighbor)
              .saturating_sub(compatible + itself as usize)
          })
          .sum();
        (eliminated, word)
      })
      .sorted()
      .map(|(_, word)| word)
      .collect()
  }

  /// Depth-first search for a complete, consistent assignment over `domains`.
  pub fn backtrack(&self, domains: Domains, config: SolveConfig) -> (Option<Assignment>, SolveStats) {
    let mut stats = SolveStats::default();
    let mut assignment = Assignment::new();
    let mut stack: Vec<Frame> = Vec::new();

    loop {
      if self.assignment_complete(&assignment) {
        return (Some(assignment), stats);
      }

      let current = stack
        .last()
        .and_then(|frame| frame.inferred.as_ref())
        .unwrap_or(&domains);
      let Some(slot) = self.select_unassigned_variable(&assignment, current) else {
        return (Some(assignment), stats);
      };
      let candidates = self.order_domain_values(slot, &assignment, current);
      let snapshot = match config.inference {
        Inference::None => None,
        Inference::MaintainArcConsistency => Some(current.clone()),
      };
      stack.push(Frame {
        slot,
        candidates: candidates.into_iter(),
        snapshot,
        inferred: None,
      });

      // Advance to the next viable candidate, unwinding exhausted frames.
      loop {
        let Some(frame) = stack.last_mut() else {
          return (None, stats);
        };
        let Some(word) = frame.candidates.next() else {
          stack.pop();
          stats.backtracks += 1;
          if let Some(parent) = stack.last_mut() {
            assignment.unassign(parent.slot);
            parent.inferred = None;
          }
          continue;
        };

        if !self.consistent_with(&assignment, frame.slot, word) {
          continue;
        }
        if let Some(snapshot) = &frame.snapshot {
          let mut inferred = snapshot.clone();
          inferred.restrict_to(frame.slot, word);
          let arcs = self
            .structure()
            .neighbors(frame.slot)
            .iter()
            .map(|&neighbor| (neighbor, frame.slot))
            .collect();
          if !self.ac3(&mut inferred, Some(arcs)).is_consistent() {
            continue;
          }
          frame.inferred = Some(inferred);
        }

        stats.states += 1;
        assignment.push(frame.slot, word);
        break;
      }
    }
  }

  /// Node consistency and AC-3 over `domains`, then search if neither emptied
  /// a domain.
  pub fn solve_from(
    &self,
    mut domains: Domains,
    config: SolveConfig,
  ) -> (Option<Assignment>, SolveStats) {
    info!(
      "Filling {} slots from {} words",
      self.structure().num_slots(),
      self.bank().len()
    );

    self.enforce_node_consistency(&mut domains);
    let wipeout = match domains.first_empty() {
      Some(slot) => Some(slot),
      None => match self.ac3(&mut domains, None) {
        ArcConsistency::Consistent => None,
        ArcConsistency::Wipeout(slot) => Some(slot),
      },
    };
    if let Some(slot) = wipeout {
      info!("Slot {slot} has no candidate words left, the puzzle is unsolvable");
      return (None, SolveStats { wipeout, ..SolveStats::default() });
    }
    debug!("{} candidates remain after AC-3", domains.total_size());

    let (assignment, stats) = self.backtrack(domains, config);
    debug!(
      "Search visited {} states with {} backtracks",
      stats.states, stats.backtracks
    );
    (assignment, stats)
  }

  pub fn solve_with(&self, config: SolveConfig) -> (Option<Assignment>, SolveStats) {
    self.solve_from(self.initial_domains(), config)
  }

  /// Returns a complete assignment, or `None` when the puzzle has no solution.
  pub fn solve(&self) -> Option<Assignment> {
    self.solve_with(SolveConfig::default()).0
  }
}
