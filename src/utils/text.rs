/// First `max_chars` characters of `text`, never splitting a character
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_counts_characters() {
        assert_eq!(preview("頭痛がありますか？", 2), "頭痛");
        assert_eq!(preview("short", 60), "short");
        assert_eq!(preview("", 3), "");
        assert_eq!(preview("abc", 0), "");
    }
}
