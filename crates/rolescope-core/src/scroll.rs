//! Scroll-window management.
//!
//! Two distinct policies: cursor-follow windowing for list-style views keeps
//! the cursor visible with the minimal scroll delta; match-centering for
//! document-style views places a target line in the middle of the viewport.
//! Manual document scrolling moves the offset one line at a time, clamped to
//! the content.

/// Compute the half-open `[start, end)` window that keeps `cursor` visible.
///
/// Scrolls by the minimal delta rather than centering. Whenever `total > 0`
/// and `cursor < total`, the result satisfies `start <= cursor < end` and
/// `end - start <= visible`.
#[must_use]
pub fn follow_window(cursor: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    let start = if cursor >= visible {
        cursor - visible + 1
    } else {
        0
    };
    let end = (start + visible).min(total);
    (start, end)
}

/// Largest valid scroll offset for a document of `total` lines.
#[must_use]
pub fn max_offset(total: usize, visible: usize) -> usize {
    total.saturating_sub(visible)
}

/// Offset that centers `line` in the viewport, clamped to the content.
#[must_use]
pub fn centered_offset(line: usize, total: usize, visible: usize) -> usize {
    line.saturating_sub(visible / 2).min(max_offset(total, visible))
}

/// Scroll down one line, clamped to the content.
#[must_use]
pub fn scroll_down(offset: usize, total: usize, visible: usize) -> usize {
    (offset + 1).min(max_offset(total, visible))
}

/// Scroll up one line, floor-clamped at zero.
#[must_use]
pub fn scroll_up(offset: usize) -> usize {
    offset.saturating_sub(1)
}
