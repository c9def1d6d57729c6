pub fn format_share(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

/// Shorten a comment for table display, on a character boundary.
pub fn truncate_comment(comment: &str, max_chars: usize) -> String {
    let single_line: String = comment
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if single_line.chars().count() <= max_chars {
        return single_line;
    }
    let mut truncated: String = single_line.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_share() {
        assert_eq!(format_share(0.0), "0.0%");
        assert_eq!(format_share(0.5), "50.0%");
        assert_eq!(format_share(1.0 / 3.0), "33.3%");
    }

    #[test]
    fn test_truncate_comment() {
        assert_eq!(truncate_comment("corto", 10), "corto");
        assert_eq!(truncate_comment("azúcar y químicos", 7), "azúcar…");
        assert_eq!(truncate_comment("a\nb", 10), "a b");
    }
}
