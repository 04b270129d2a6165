//! Naive last-known-good reference implementations
//!
//! These are the trusted side of every differential check. They are
//! written for obvious correctness over performance: direct single-pass
//! or double-pass loops, no blocking, no unrolling, no SIMD. If one of
//! these is wrong, the whole battery is wrong, so keep them boring.

use std::cmp::Ordering;

/// Occurrences of `value` in `hay`.
pub fn count<T: PartialEq>(hay: &[T], value: &T) -> usize {
    let mut total = 0;
    for item in hay {
        if item == value {
            total += 1;
        }
    }
    total
}

/// Index of the first occurrence of `value`.
pub fn find<T: PartialEq>(hay: &[T], value: &T) -> Option<usize> {
    for (index, item) in hay.iter().enumerate() {
        if item == value {
            return Some(index);
        }
    }
    None
}

/// Index of the last occurrence of `value`.
pub fn find_last<T: PartialEq>(hay: &[T], value: &T) -> Option<usize> {
    let mut found = None;
    for (index, item) in hay.iter().enumerate() {
        if item == value {
            found = Some(index);
        }
    }
    found
}

/// Length of the common prefix of `a` and `b`.
pub fn mismatch<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let limit = a.len().min(b.len());
    let mut index = 0;
    while index < limit {
        if a[index] != b[index] {
            break;
        }
        index += 1;
    }
    index
}

/// Lexicographic ordering of `a` relative to `b`, derived from the first
/// point of disagreement.
pub fn lex_compare<T: Ord>(a: &[T], b: &[T]) -> Ordering {
    let split = mismatch(a, b);
    match (a.get(split), b.get(split)) {
        (Some(x), Some(y)) => x.cmp(y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Index of the first occurrence of `needle` as a subsequence of `hay`.
/// An empty needle matches at index 0.
pub fn search<T: PartialEq>(hay: &[T], needle: &[T]) -> Option<usize> {
    if needle.len() > hay.len() {
        return None;
    }
    for start in 0..=(hay.len() - needle.len()) {
        let mut matched = true;
        for offset in 0..needle.len() {
            if hay[start + offset] != needle[offset] {
                matched = false;
                break;
            }
        }
        if matched {
            return Some(start);
        }
    }
    None
}

/// Index of the first run of at least `count` consecutive occurrences of
/// `value`. A zero count matches at index 0.
pub fn search_n<T: PartialEq>(hay: &[T], count: usize, value: &T) -> Option<usize> {
    if count == 0 {
        return Some(0);
    }
    if count > hay.len() {
        return None;
    }
    for start in 0..=(hay.len() - count) {
        let mut run_ok = true;
        for offset in 0..count {
            if hay[start + offset] != *value {
                run_ok = false;
                break;
            }
        }
        if run_ok {
            return Some(start);
        }
    }
    None
}

/// In-place reversal by walking both ends inward.
pub fn reverse<T>(values: &mut [T]) {
    if values.is_empty() {
        return;
    }
    let mut lo = 0;
    let mut hi = values.len() - 1;
    while lo < hi {
        values.swap(lo, hi);
        lo += 1;
        hi -= 1;
    }
}

/// Element-wise exchange of two equal-length ranges.
pub fn swap_ranges<T>(a: &mut [T], b: &mut [T]) {
    debug_assert_eq!(a.len(), b.len());
    for index in 0..a.len() {
        std::mem::swap(&mut a[index], &mut b[index]);
    }
}

/// Index of the first smallest element.
pub fn min_element<T: PartialOrd>(values: &[T]) -> Option<usize> {
    if values.is_empty() {
        return None;
    }
    let mut best = 0;
    for index in 1..values.len() {
        if values[index] < values[best] {
            best = index;
        }
    }
    Some(best)
}

/// Index of the first largest element.
pub fn max_element<T: PartialOrd>(values: &[T]) -> Option<usize> {
    if values.is_empty() {
        return None;
    }
    let mut best = 0;
    for index in 1..values.len() {
        if values[index] > values[best] {
            best = index;
        }
    }
    Some(best)
}

/// Indices of the first smallest and the *last* largest element — the
/// classic minmax stability contract, which differs from running
/// [`min_element`] and [`max_element`] separately on the max side.
pub fn minmax_element<T: PartialOrd>(values: &[T]) -> Option<(usize, usize)> {
    if values.is_empty() {
        return None;
    }
    let mut min_index = 0;
    let mut max_index = 0;
    for index in 1..values.len() {
        if values[index] < values[min_index] {
            min_index = index;
        }
        if values[index] >= values[max_index] {
            max_index = index;
        }
    }
    Some((min_index, max_index))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Fixed end-to-end scenario: [5,3,3,7,1,9] searched for 3.
    #[test]
    fn count_and_find_known_values() {
        let hay = [5, 3, 3, 7, 1, 9];
        assert_eq!(count(&hay, &3), 2);
        assert_eq!(find(&hay, &3), Some(1));
        assert_eq!(find_last(&hay, &3), Some(2));
        assert_eq!(find(&hay, &8), None);
    }

    #[test]
    fn references_are_idempotent() {
        let hay = [5, 3, 3, 7, 1, 9];
        assert_eq!(count(&hay, &3), count(&hay, &3));
        assert_eq!(find(&hay, &3), find(&hay, &3));
        assert_eq!(minmax_element(&hay), minmax_element(&hay));
    }

    #[test]
    fn mismatch_and_lex_compare_agree() {
        assert_eq!(mismatch(b"abcd", b"abxd"), 2);
        assert_eq!(mismatch(b"abc", b"abc"), 3);
        assert_eq!(mismatch(b"abc", b"abcd"), 3);
        assert_eq!(lex_compare(b"abc", b"abd"), Ordering::Less);
        assert_eq!(lex_compare(b"abc", b"abc"), Ordering::Equal);
        assert_eq!(lex_compare(b"abcd", b"abc"), Ordering::Greater);
        assert_eq!(lex_compare(b"", b"a"), Ordering::Less);
    }

    #[test]
    fn search_family_edges() {
        assert_eq!(search(b"mississippi", b"ssi"), Some(2));
        assert_eq!(search(b"mississippi", b"xyz"), None);
        assert_eq!(search(b"abc", b""), Some(0));
        assert_eq!(search(b"ab", b"abc"), None);

        assert_eq!(search_n(b"aabbbac", 3, &b'b'), Some(2));
        assert_eq!(search_n(b"aabbbac", 4, &b'b'), None);
        assert_eq!(search_n(b"aabbbac", 0, &b'b'), Some(0));
    }

    #[test]
    fn extremum_tie_breaks() {
        // all-equal: first min, first max, minmax = (first, last)
        let flat = [1i32; 64];
        assert_eq!(min_element(&flat), Some(0));
        assert_eq!(max_element(&flat), Some(0));
        assert_eq!(minmax_element(&flat), Some((0, 63)));

        let mixed = [20, 10, 30, 30, 30, 30, 40, 60, 50];
        assert_eq!(min_element(&mixed), Some(1));
        assert_eq!(max_element(&mixed), Some(7));
        assert_eq!(minmax_element(&mixed), Some((1, 7)));
    }

    #[test]
    fn signed_zeros_are_one_equivalence_class() {
        let zeros = [0.0f32, -0.0, 0.0, -0.0];
        assert_eq!(min_element(&zeros), Some(0));
        assert_eq!(max_element(&zeros), Some(0));
        assert_eq!(minmax_element(&zeros), Some((0, 3)));
    }

    #[test]
    fn reverse_and_swap_ranges() {
        let mut v = [1, 2, 3, 4, 5];
        reverse(&mut v);
        assert_eq!(v, [5, 4, 3, 2, 1]);

        let mut even = [2, 4, 6];
        let mut odd = [1, 3, 5];
        swap_ranges(&mut even, &mut odd);
        assert_eq!(even, [1, 3, 5]);
        assert_eq!(odd, [2, 4, 6]);
    }
}
