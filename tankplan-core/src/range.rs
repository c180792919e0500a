//! Closed-interval arithmetic over water parameter ranges.

use tankplan_schemas::organism::ToleranceRange;

/// Overlap of two closed ranges, or `None` when they share no value.
pub fn intersect(a: &ToleranceRange, b: &ToleranceRange) -> Option<ToleranceRange> {
    let lo = a.min.max(b.min);
    let hi = a.max.min(b.max);
    if lo > hi {
        None
    } else {
        Some(ToleranceRange::new(lo, hi))
    }
}

/// Overlap of every range yielded. `None` for an empty iterator or when any pair is disjoint.
pub fn intersect_all<'a, I>(ranges: I) -> Option<ToleranceRange>
where
    I: IntoIterator<Item = &'a ToleranceRange>,
{
    let mut iter = ranges.into_iter();
    let first = *iter.next()?;
    iter.try_fold(first, |acc, r| intersect(&acc, r))
}

pub fn contains(range: &ToleranceRange, value: f64) -> bool {
    range.min <= value && value <= range.max
}

/// True when `value` lies within `margin` of either bound.
pub fn near_edge(range: &ToleranceRange, value: f64, margin: f64) -> bool {
    value < range.min + margin || value > range.max - margin
}
