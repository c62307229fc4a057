/// Compact duration like `1d 2h 3m 4s`; leading zero units are left out.
pub fn format_seconds(total: i64) -> String {
    let sign = if total < 0 { "-" } else { "" };
    let s_total = total.unsigned_abs();

    let d = s_total / 86400;
    let h = (s_total % 86400) / 3600;
    let m = (s_total % 3600) / 60;
    let s = s_total % 60;

    let formatted = if d > 0 {
        format!("{}d {}h {}m {}s", d, h, m, s)
    } else if h > 0 {
        format!("{}h {}m {}s", h, m, s)
    } else if m > 0 {
        format!("{}m {}s", m, s)
    } else {
        format!("{}s", s)
    };

    format!("{}{}", sign, formatted)
}

/// Escapes characters that Discord would read as markdown.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        if matches!(c, '\\' | '*' | '_' | '~' | '`' | '|' | '>') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds() {
        assert_eq!(format_seconds(0), "0s");
        assert_eq!(format_seconds(59), "59s");
        assert_eq!(format_seconds(61), "1m 1s");
        assert_eq!(format_seconds(3600), "1h 0m 0s");
        assert_eq!(format_seconds(5400), "1h 30m 0s");
        assert_eq!(format_seconds(90061), "1d 1h 1m 1s");
        assert_eq!(format_seconds(-61), "-1m 1s");
    }

    #[test]
    fn markdown() {
        assert_eq!(escape_markdown("my_project"), r"my\_project");
        assert_eq!(escape_markdown("**bold** `x`"), r"\*\*bold\*\* \`x\`");
        assert_eq!(escape_markdown("plain"), "plain");
    }
}
