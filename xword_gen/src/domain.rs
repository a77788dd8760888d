use std::collections::BTreeSet;

use util::error::{XWordError, XWordResult};

use crate::{slot::SlotId, word_bank::WordId, xword::XWord};

/// The candidate words still available to each slot, indexed by `SlotId`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Domains {
  domains: Vec<BTreeSet<WordId>>,
}

impl Domains {
  pub fn get(&self, slot: SlotId) -> Option<&BTreeSet<WordId>> {
    self.domains.get(slot.index())
  }

  pub fn size(&self, slot: SlotId) -> usize {
    self.get(slot).map_or(0, |domain| domain.len())
  }

  pub fn contains(&self, slot: SlotId, word: WordId) -> bool {
    self.get(slot).is_some_and(|domain| domain.contains(&word))
  }

  pub fn iter(&self, slot: SlotId) -> impl Iterator<Item = WordId> + '_ {
    self.get(slot).into_iter().flatten().cloned()
  }

  pub fn num_slots(&self) -> usize {
    self.domains.len()
  }

  /// The first slot with no remaining candidates, if any.
  pub fn first_empty(&self) -> Option<SlotId> {
    self
      .domains
      .iter()
      .position(|domain| domain.is_empty())
      .map(SlotId)
  }

  pub fn total_size(&self) -> usize {
    self.domains.iter().map(|domain| domain.len()).sum()
  }

  /// Keeps only the words of `slot` for which `f` holds, returning how many
  /// were removed.
  pub(crate) fn retain(&mut self, slot: SlotId, mut f: impl FnMut(WordId) -> bool) -> usize {
    self.domains.get_mut(slot.index()).map_or(0, |domain| {
      let before = domain.len();
      domain.retain(|&word| f(word));
      before - domain.len()
    })
  }

  /// Narrows the domain of `slot` down to `word` alone.
  pub(crate) fn restrict_to(&mut self, slot: SlotId, word: WordId) {
    if let Some(domain) = self.domains.get_mut(slot.index()) {
      *domain = BTreeSet::from([word]);
    }
  }
}

impl XWord {
  /// domain(S) = every vocabulary word with exactly S.length letters.
  pub fn initial_domains(&self) -> Domains {
    Domains {
      domains: self
        .structure()
        .slots()
        .iter()
        .map(|slot| {
          self
            .bank()
            .all_ids()
            .filter(|&word| self.bank().word_len(word) == slot.length() as usize)
            .collect()
        })
        .collect(),
    }
  }

  /// Every vocabulary word in every slot, before any unary filtering.
  pub fn unfiltered_domains(&self) -> Domains {
    let all: BTreeSet<_> = self.bank().all_ids().collect();
    Domains { domains: vec![all; self.structure().num_slots()] }
  }

  /// Builds domains from externally supplied candidate lists. Slots not
  /// mentioned start out empty. Words must come from the vocabulary, but their
  /// lengths are not checked here.
  pub fn domains_from_candidates<S: AsRef<str>>(
    &self,
    candidates: impl IntoIterator<Item = (SlotId, Vec<S>)>,
  ) -> XWordResult<Domains> {
    let mut domains = vec![BTreeSet::new(); self.structure().num_slots()];
    for (slot, words) in candidates {
      let domain = domains
        .get_mut(slot.index())
        .ok_or_else(|| XWordError::Internal(format!("Unknown slot {slot}")))?;
      for word in words {
        let word = word.as_ref();
        domain.insert(self.bank().id(word).ok_or_else(|| {
          XWordError::Internal(format!("Word \"{word}\" is not in the vocabulary"))
        })?);
      }
    }
    Ok(Domains { domains })
  }

  pub fn domain_words<'a>(&'a self, domains: &'a Domains, slot: SlotId) -> Vec<&'a str> {
    domains
      .iter(slot)
      .filter_map(|word| self.bank().get(word))
      .collect()
  }
}
