use unicode_width::UnicodeWidthStr;

pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Pads `s` with spaces up to `width` terminal columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(s));
    format!("{s}{}", " ".repeat(pad))
}

/// Widest entry of `labels`, in terminal columns.
pub fn max_width<'a>(labels: impl IntoIterator<Item = &'a str>) -> usize {
    labels.into_iter().map(display_width).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_ascii() {
        assert_eq!(display_width("hello"), 5);
    }

    #[test]
    fn width_wide_chars() {
        assert_eq!(display_width("テスト"), 6);
    }

    #[test]
    fn pad_right_fills_to_width() {
        assert_eq!(pad_right("Bob", 6), "Bob   ");
    }

    #[test]
    fn pad_right_counts_columns_not_chars() {
        assert_eq!(pad_right("テ", 4), "テ  ");
    }

    #[test]
    fn pad_right_never_truncates() {
        assert_eq!(pad_right("Charlie", 3), "Charlie");
    }

    #[test]
    fn max_width_of_labels() {
        assert_eq!(max_width(["a", "テスト", "abcd"]), 6);
        assert_eq!(max_width(Vec::<&str>::new()), 0);
    }
}
