//! Stable merge sort tolerant of inconsistent comparators
//!
//! Mixed-type columns make the value comparator intransitive (numbers
//! compare numerically, number/text pairs compare as text). `slice::sort_by`
//! may panic when it detects that; this sort always terminates and keeps
//! equal elements in input order.

use std::cmp::Ordering;

const INSERTION_THRESHOLD: usize = 16;

/// Sorts `items` in place, stably
pub fn stable_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() < 2 {
        return;
    }
    let mut scratch = items.to_vec();
    merge_sort(items, &mut scratch, &mut compare);
}

fn merge_sort<T, F>(items: &mut [T], scratch: &mut [T], compare: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len <= INSERTION_THRESHOLD {
        insertion_sort(items, compare);
        return;
    }

    let mid = len / 2;
    merge_sort(&mut items[..mid], &mut scratch[..mid], compare);
    merge_sort(&mut items[mid..], &mut scratch[mid..], compare);

    scratch[..len].copy_from_slice(items);
    let (left, right) = scratch[..len].split_at(mid);
    let (mut i, mut j) = (0, 0);

    for slot in items.iter_mut() {
        // Take from the right run only when strictly smaller
        let take_right = j < right.len()
            && (i >= left.len() || compare(&right[j], &left[i]) == Ordering::Less);
        if take_right {
            *slot = right[j];
            j += 1;
        } else {
            *slot = left[i];
            i += 1;
        }
    }
}

fn insertion_sort<T, F>(items: &mut [T], compare: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
