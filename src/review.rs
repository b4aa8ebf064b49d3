use crate::types::Candidate;

/// Candidates under review, each with its own inclusion flag.
///
/// Everything starts included. The reviewer unticks entries by index and
/// [`Review::into_approved`] hands back the remaining list in its original
/// order.
#[derive(Debug)]
pub struct Review {
    candidates: Vec<Candidate>,
    included: Vec<bool>,
}

impl Review {
    #[must_use]
    pub fn new(candidates: Vec<Candidate>) -> Self {
        let included = vec![true; candidates.len()];
        Review {
            candidates,
            included,
        }
    }

    /// Keep exactly the given indices. Out-of-range indices are ignored.
    pub fn retain_indices(&mut self, keep: &[usize]) {
        self.included.fill(false);
        for &index in keep {
            if let Some(flag) = self.included.get_mut(index) {
                *flag = true;
            }
        }
    }

    #[must_use]
    pub fn approved_count(&self) -> usize {
        self.included.iter().filter(|&&flag| flag).count()
    }

    #[must_use]
    pub fn approved_size(&self) -> u64 {
        self.candidates
            .iter()
            .zip(&self.included)
            .filter(|(_, flag)| **flag)
            .map(|(c, _)| c.entry.size)
            .sum()
    }

    #[must_use]
    pub fn into_approved(self) -> Vec<Candidate> {
        self.candidates
            .into_iter()
            .zip(self.included)
            .filter_map(|(candidate, flag)| flag.then_some(candidate))
            .collect()
    }
}
