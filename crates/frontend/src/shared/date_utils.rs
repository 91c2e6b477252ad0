/// Formatting of DATE / TIME widget values for read-only display

/// "2024-03-15" -> "15.03.2024"; anything else is returned unchanged
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}.{}.{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// "14:02:26" -> "14:02"
pub fn format_time(time_str: &str) -> String {
    let mut parts = time_str.splitn(3, ':');
    match (parts.next(), parts.next()) {
        (Some(h), Some(m)) if !h.is_empty() && !m.is_empty() => format!("{}:{}", h, m),
        _ => time_str.to_string(),
    }
}

/// "a - b", or a single side when the other is blank
pub fn format_range(start: &str, end: &str) -> String {
    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{} - {}", start, end),
        (false, true) => start.to_string(),
        (true, false) => end.to_string(),
        (true, true) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15.03.2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15.03.2024");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time("14:02:26"), "14:02");
        assert_eq!(format_time("09:30"), "09:30");
        assert_eq!(format_time("noon"), "noon");
    }

    #[test]
    fn test_format_range() {
        assert_eq!(format_range("15.03.2024", "16.03.2024"), "15.03.2024 - 16.03.2024");
        assert_eq!(format_range("", "16.03.2024"), "16.03.2024");
        assert_eq!(format_range("", ""), "");
    }
}
