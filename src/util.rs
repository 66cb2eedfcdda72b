/// Splits sorted `items` around its midpoint `len / 2`, returning the items before the midpoint,
/// the midpoint itself, and the items after it. When `len` is even the left half gets the extra
/// item. Returns `None` for an empty `Vec`.
pub(crate) fn split_mid<T>(mut items: Vec<T>) -> Option<(Vec<T>, T, Vec<T>)> {
    if items.is_empty() {
        return None;
    }

    let mid = items.len() / 2;
    let after = items.split_off(mid + 1);
    let middle = items.pop()?;
    Some((items, middle, after))
}

/// How far apart two subtree heights are, treating a missing subtree as height `-1`.
pub(crate) fn height_gap(left: Option<usize>, right: Option<usize>) -> usize {
    let signed = |height: Option<usize>| height.map_or(-1, |h| h as isize);
    signed(left).abs_diff(signed(right))
}
