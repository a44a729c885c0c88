//! Small formatting helpers shared by console output and logging.

/// Formats a byte count as a human readable size.
///
/// # Example
///
/// ```
/// use instagrab::core::utils::format_size;
///
/// assert_eq!(format_size(1536), "1.50 KB");
/// assert_eq!(format_size(1048576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.2} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.2} TB", size)
}

/// Formats a duration in seconds as `MM:SS`, or `HH:MM:SS` once it has an
/// hour component. Missing or zero durations render as `"Unknown"`.
pub fn format_duration(seconds: Option<f64>) -> String {
    let total = match seconds {
        Some(s) if s > 0.0 => s as u64,
        _ => return "Unknown".to_string(),
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Truncates a string to at most `max` characters (not bytes, so multibyte
/// captions stay valid UTF-8).
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        let cases = vec![
            (0, "0.00 B"),
            (512, "512.00 B"),
            (1023, "1023.00 B"),
            (1024, "1.00 KB"),
            (1536, "1.50 KB"),
            (1048576, "1.00 MB"),
            (5242880, "5.00 MB"),
            (1073741824, "1.00 GB"),
            (1099511627776, "1.00 TB"),
        ];

        for (input, expected) in cases {
            assert_eq!(format_size(input), expected, "Failed for: {}", input);
        }
    }

    #[test]
    fn test_format_duration() {
        let cases = vec![
            (None, "Unknown"),
            (Some(0.0), "Unknown"),
            (Some(12.7), "00:12"),
            (Some(30.0), "00:30"),
            (Some(90.0), "01:30"),
            (Some(3599.0), "59:59"),
            (Some(3600.0), "01:00:00"),
            (Some(3661.0), "01:01:01"),
        ];

        for (input, expected) in cases {
            assert_eq!(format_duration(input), expected, "Failed for: {:?}", input);
        }
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("привет мир", 6), "привет");
        assert_eq!(truncate_chars("", 5), "");
    }
}
