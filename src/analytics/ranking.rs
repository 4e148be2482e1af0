use crate::core::StudentRecord;
use crate::store::{compare_gpa_desc, RecordStore};
use serde::Serialize;

/// A record with its competition rank
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RankedRecord<'a> {
    pub rank: usize,
    pub record: &'a StudentRecord,
}

/// Rank every record by GPA, highest first.
///
/// Works on a sorted view; the store keeps its order. Ties share a rank and
/// the next distinct GPA takes its 1-based position (1, 1, 3, 4).
pub fn rank_by_gpa(store: &RecordStore) -> Vec<RankedRecord<'_>> {
    let mut sorted: Vec<&StudentRecord> = store.iter().collect();
    sorted.sort_by(|a, b| compare_gpa_desc(a, b));

    let gpas: Vec<f64> = sorted.iter().map(|r| r.gpa()).collect();
    competition_ranks(&gpas)
        .into_iter()
        .zip(sorted)
        .map(|(rank, record)| RankedRecord { rank, record })
        .collect()
}

/// Ranks for values already sorted in descending order
pub fn competition_ranks(sorted_desc: &[f64]) -> Vec<usize> {
    let mut ranks = Vec::with_capacity(sorted_desc.len());
    let mut rank = 1;
    for (i, value) in sorted_desc.iter().enumerate() {
        if i > 0 && *value != sorted_desc[i - 1] {
            rank = i + 1;
        }
        ranks.push(rank);
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competition_ranks_skip_after_ties() {
        assert_eq!(competition_ranks(&[4.0, 4.0, 3.0, 2.0]), vec![1, 1, 3, 4]);
        assert_eq!(competition_ranks(&[3.0, 3.0, 3.0]), vec![1, 1, 1]);
        assert_eq!(competition_ranks(&[4.5, 2.0, 2.0, 1.0]), vec![1, 2, 2, 4]);
        assert!(competition_ranks(&[]).is_empty());
    }

    #[test]
    fn test_rank_by_gpa_leaves_store_order() {
        let mut store = RecordStore::default();
        for (id, score) in [(1, 60.0), (2, 90.0), (3, 75.0)] {
            store.add(id, "S", "M", "2024-01-01").unwrap();
            store.record_mut(id).unwrap().add_grade("X", score, 1).unwrap();
        }

        let ranked = rank_by_gpa(&store);
        let order: Vec<_> = ranked.iter().map(|r| (r.record.id(), r.rank)).collect();
        assert_eq!(order, vec![(2, 1), (3, 2), (1, 3)]);

        let store_order: Vec<_> = store.iter().map(|r| r.id()).collect();
        assert_eq!(store_order, vec![1, 2, 3]);
    }
}
