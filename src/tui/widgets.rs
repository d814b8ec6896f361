pub mod header;
pub mod live_chart;
pub mod progress;
pub mod results;
pub mod speed_gauge;

/// Shorten `text` to at most `width` characters, marking the cut with `…`.
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("connection refused", 8), "connect…");
        assert_eq!(truncate("abc", 1), "…");
    }
}
