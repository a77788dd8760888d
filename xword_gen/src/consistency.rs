use std::collections::{HashSet, VecDeque};

use log::{debug, trace};

use crate::{domain::Domains, slot::SlotId, xword::XWord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArcConsistency {
  Consistent,
  /// Propagation emptied the domain of this slot.
  Wipeout(SlotId),
}

impl ArcConsistency {
  pub fn is_consistent(self) -> bool {
    matches!(self, ArcConsistency::Consistent)
  }
}

impl XWord {
  /// Removes every word whose length disagrees with its slot. Returns the
  /// number of words removed.
  pub fn enforce_node_consistency(&self, domains: &mut Domains) -> usize {
    let removed: usize = self
      .structure()
      .slot_ids()
      .filter_map(|id| self.structure().slot(id).map(|slot| (id, slot.length() as usize)))
      .map(|(id, length)| domains.retain(id, |word| self.bank().word_len(word) == length))
      .sum();
    debug!(
      "Node consistency removed {removed} words, {} candidates remain",
      domains.total_size()
    );
    removed
  }

  /// Makes `x` arc consistent with `y`: drops each word of `x` with no word in
  /// `y` sharing its letter at the crossing. Returns whether `x` changed.
  pub fn revise(&self, domains: &mut Domains, x: SlotId, y: SlotId) -> bool {
    let Some(overlap) = self.structure().overlap(x, y) else {
      return false;
    };

    let supported: HashSet<char> = domains
      .iter(y)
      .filter_map(|word| self.bank().letter(word, overlap.second))
      .collect();
    domains.retain(x, |word| {
      self
        .bank()
        .letter(word, overlap.first)
        .is_some_and(|letter| supported.contains(&letter))
    }) > 0
  }

  /// AC-3. With `arcs` of `None`, starts from every arc in the structure.
  pub fn ac3(&self, domains: &mut Domains, arcs: Option<Vec<(SlotId, SlotId)>>) -> ArcConsistency {
    let mut queue: VecDeque<_> = match arcs {
      Some(arcs) => arcs.into(),
      None => self.structure().arcs().collect(),
    };
    let mut pending: HashSet<_> = queue.iter().cloned().collect();
    let mut revisions = 0usize;

    while let Some((x, y)) = queue.pop_front() {
      pending.remove(&(x, y));
      if !self.revise(domains, x, y) {
        continue;
      }
      revisions += 1;

      if domains.size(x) == 0 {
        trace!("AC-3 emptied the domain of slot {x} while revising against {y}");
        return ArcConsistency::Wipeout(x);
      }

      for &z in self.structure().neighbors(x) {
        if z != y && pending.insert((z, x)) {
          queue.push_back((z, x));
        }
      }
    }

    trace!("AC-3 reached a fixpoint after {revisions} revisions");
    ArcConsistency::Consistent
  }
}
