//! Small text widgets for the summary view

/// Render a fraction of the whole as a percentage
///
/// Slivers under one percent show as `<1%` so they never read as zero.
pub fn format_share(fraction: f64) -> String {
    let pct = fraction * 100.0;
    if pct > 0.0 && pct < 1.0 {
        "<1%".to_string()
    } else {
        format!("{:.0}%", pct)
    }
}

/// Progress bar for a ratio, clamped to `[0, 1]`
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = if ratio.is_finite() {
        ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width)
    } else {
        0
    };

    let mut bar = String::with_capacity(width * 3);
    bar.extend(std::iter::repeat('█').take(filled));
    bar.extend(std::iter::repeat('░').take(width - filled));
    bar
}

/// Rule drawn under a heading
pub fn rule(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
