//! Index stream: hands out the next unused derivation index
//!
//! The session owns one growing skip set; every index ever derived (and
//! every index the caller seeded) lives in it, so no index is issued twice
//! within a session.

use crate::DerivationIndex;
use std::collections::BTreeSet;

/// Find the smallest free index after `after`.
///
/// Returns the smallest index strictly greater than `after` that is not in
/// `skip`. `None` means "before index 0": the first call of a session may
/// return 0 itself, while every later call advances past the previous
/// index. This asymmetry is deliberate. Seeding works by populating `skip`
/// alone, so a session seeded with `{0, 1}` starts scanning at 2, and one
/// seeded with `{5}` still starts at 0.
///
/// Walks forward one index at a time; skip sets are accumulated per session
/// and never dense enough for this to matter.
pub fn next_free_index(
    after: Option<DerivationIndex>,
    skip: &BTreeSet<DerivationIndex>,
) -> DerivationIndex {
    let mut candidate = match after {
        Some(index) => index + 1,
        None => 0,
    };
    while skip.contains(&candidate) {
        candidate += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skip(indexes: &[DerivationIndex]) -> BTreeSet<DerivationIndex> {
        indexes.iter().copied().collect()
    }

    #[test]
    fn test_first_call_may_return_zero() {
        assert_eq!(next_free_index(None, &skip(&[])), 0);
    }

    #[test]
    fn test_seeded_zero_still_scans_from_smallest_free() {
        // Seeding index 0 must not push the stream past other free slots.
        assert_eq!(next_free_index(None, &skip(&[0])), 1);
        assert_eq!(next_free_index(None, &skip(&[0, 1, 2])), 3);
        assert_eq!(next_free_index(None, &skip(&[0, 2])), 1);
    }

    #[test]
    fn test_seeds_above_cursor_do_not_advance_it() {
        // A caller that already knows index 5 still scans 0..5 first.
        assert_eq!(next_free_index(None, &skip(&[5])), 0);
    }

    #[test]
    fn test_subsequent_calls_strictly_advance() {
        let skip = skip(&[0, 1, 2]);
        assert_eq!(next_free_index(Some(2), &skip), 3);
        assert_eq!(next_free_index(Some(3), &skip), 4);
    }

    #[test]
    fn test_skips_runs_of_taken_indexes() {
        assert_eq!(next_free_index(Some(0), &skip(&[1, 2, 3, 5])), 4);
        assert_eq!(next_free_index(Some(4), &skip(&[1, 2, 3, 5])), 6);
    }

    #[test]
    fn test_never_returns_member_of_skip_set() {
        let skip = skip(&[0, 1, 3, 4, 7]);
        let mut cursor = None;
        let mut issued = Vec::new();
        for _ in 0..5 {
            let index = next_free_index(cursor, &skip);
            assert!(!skip.contains(&index));
            cursor = Some(index);
            issued.push(index);
        }
        assert_eq!(issued, vec![2, 5, 6, 8, 9]);
    }
}
