//! Console banners.

use std::io::{self, Write};

const MAX_WIDTH: usize = 100;
const MIN_WIDTH: usize = 60;
const PADDING: usize = 4;

/// Banner width for a title: title plus padding, clamped to `[60, 100]`.
pub fn banner_width(title: &str) -> usize {
    let raw = title.chars().count() + PADDING * 2;
    raw.clamp(MIN_WIDTH, MAX_WIDTH)
}

/// Write a three-line banner with the title centered between `=` rules.
pub fn write_banner<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    let width = banner_width(title);
    let len = title.chars().count();
    let left = width.saturating_sub(len) / 2;
    let right = width.saturating_sub(left + len);
    let rule = "=".repeat(width);

    writeln!(out, "{rule}")?;
    writeln!(out, "{}{}{}", " ".repeat(left), title, " ".repeat(right))?;
    writeln!(out, "{rule}")?;
    Ok(())
}
