//! Fixed-width text helpers shared by every block.
//!
//! Widths count `char`s, not bytes, so box-drawing glyphs take one column.

/// Width of every rendered block.
pub const WIDTH: usize = 55;

/// A full-width rule made of `ch`.
#[must_use]
pub fn line(ch: char) -> String {
    std::iter::repeat_n(ch, WIDTH).collect()
}

/// Left-pad `text` so it sits centered within [`WIDTH`].
#[must_use]
pub fn center(text: &str) -> String {
    let text = truncate(text, WIDTH - 2);
    let left = (WIDTH - text.chars().count()) / 2;
    format!("{}{text}", " ".repeat(left))
}

/// The first `max` characters of `text`.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// A run of `ch` whose length is `fraction * width`, rounded and clamped to
/// `0..=width`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn bar(ch: char, fraction: f64, width: usize) -> String {
    let len = (fraction * width as f64).round().clamp(0.0, width as f64) as usize;
    std::iter::repeat_n(ch, len).collect()
}
