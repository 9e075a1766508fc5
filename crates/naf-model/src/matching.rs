use serde::{Deserialize, Serialize};

/// One boolean per dataset row: did any enabled strategy match any text column.
///
/// Always recomputed from the dataset's current state; a vector computed
/// for one rule is never reused by another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchVector(Vec<bool>);

impl MatchVector {
    pub fn new(values: Vec<bool>) -> Self {
        Self(values)
    }

    /// A vector of `len` rows with nothing matched.
    pub fn none(len: usize) -> Self {
        Self(vec![false; len])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, row: usize) -> bool {
        self.0.get(row).copied().unwrap_or(false)
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    /// Number of matched rows.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|hit| **hit).count()
    }

    /// Indices of matched rows, ascending.
    pub fn matched_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(row, hit)| hit.then_some(row))
    }

    /// OR-combines `other` into `self`. Rows past the shorter length are left as is.
    pub fn union_with(&mut self, other: &MatchVector) {
        debug_assert_eq!(self.len(), other.len());
        for (hit, other_hit) in self.0.iter_mut().zip(&other.0) {
            *hit |= *other_hit;
        }
    }

    /// Rows matched here and allowed by `mask`.
    #[must_use]
    pub fn and_mask(&self, mask: &[bool]) -> MatchVector {
        self.0
            .iter()
            .zip(mask)
            .map(|(hit, allowed)| *hit && *allowed)
            .collect()
    }

    /// True if every row matched here is also matched by `other`.
    pub fn is_subset_of(&self, other: &MatchVector) -> bool {
        self.len() == other.len() && self.matched_rows().all(|row| other.get(row))
    }

    pub fn into_inner(self) -> Vec<bool> {
        self.0
    }
}

impl From<Vec<bool>> for MatchVector {
    fn from(values: Vec<bool>) -> Self {
        Self(values)
    }
}

impl FromIterator<bool> for MatchVector {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_is_row_wise_or() {
        let mut left = MatchVector::new(vec![true, false, false]);
        left.union_with(&MatchVector::new(vec![false, false, true]));
        assert_eq!(left.as_slice(), &[true, false, true]);
        assert_eq!(left.count(), 2);
        assert_eq!(left.matched_rows().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn and_mask_restricts_rows() {
        let hits = MatchVector::new(vec![true, true, false]);
        let restricted = hits.and_mask(&[false, true, true]);
        assert_eq!(restricted.as_slice(), &[false, true, false]);
        assert!(restricted.is_subset_of(&hits));
    }
}
