//! Two-way merge of owned, non-decreasing buffers.

/// Merges `left` and `right` into a single non-decreasing buffer.
///
/// On equal heads the element from `left` is taken first. Both inputs must already be sorted,
/// otherwise the output order is unspecified but still contains every input element exactly once.
pub fn merge_two<T: Ord>(left: Vec<T>, right: Vec<T>) -> Vec<T> {
    if left.is_empty() {
        return right;
    }
    if right.is_empty() {
        return left;
    }

    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => !(r < l),
            _ => break,
        };

        // Both heads were just observed, so the chosen side is non-empty.
        let next = if take_left { left.next() } else { right.next() };
        out.extend(next);
    }

    // At most one side still has elements.
    out.extend(left);
    out.extend(right);

    out
}
