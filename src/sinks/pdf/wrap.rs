//! Greedy word wrapping with a fixed-width character heuristic.
//!
//! The quiz document is laid out against an estimated glyph width of six
//! points per character rather than real font metrics. That makes wrapping a
//! pure function of character counts, which keeps the pagination height
//! estimates cheap and deterministic. Helvetica at 12 pt averages slightly
//! narrower than 6 pt per glyph, so the estimate errs toward wrapping early
//! rather than overflowing the right margin.

/// Estimated width of a string at body size, in points.
pub fn estimated_width(text: &str) -> f32 {
    text.chars().count() as f32 * 6.0
}

/// Break `text` into lines no wider than `max_width_pt` (estimated).
///
/// Words are taken as whitespace-delimited tokens and never sub-split: a
/// single word wider than the limit gets a line of its own and overflows.
/// Empty (or all-whitespace) input produces no lines. Joining the returned
/// lines with single spaces reproduces the whitespace-normalized input.
pub fn wrap_text(text: &str, max_width_pt: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if estimated_width(&candidate) > max_width_pt {
            if !current.is_empty() {
                lines.push(current);
            }
            current = word.to_string();
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
