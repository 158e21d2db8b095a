/// Date helpers for filter inputs and confirmation messages.
///
/// Dates travel as `YYYY-MM-DD` strings, the format of `<input type="date">`.

/// Today in the browser's local time zone, as `YYYY-MM-DD`
pub fn today_iso() -> String {
    let now = js_sys::Date::new_0();
    iso_date(now.get_full_year(), now.get_month() + 1, now.get_date())
}

/// Example: (2024, 3, 5) -> "2024-03-05"
pub fn iso_date(year: u32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Format ISO date string to DD/MM/YYYY
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15/03/2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}/{}/{}", day, month, year);
        }
    }
    date_str.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_date_pads() {
        assert_eq!(iso_date(2024, 3, 5), "2024-03-05");
        assert_eq!(iso_date(2025, 12, 31), "2025-12-31");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26Z"), "15/03/2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_date("invalid"), "invalid");
    }
}
