//! Duration formatting for timer displays and summaries.

/// `MM:SS`, or `H:MM:SS` from one hour up.
pub fn format_clock(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

/// `1h 05m`, `25m`, `45s`.
pub fn format_human(secs: u64) -> String {
    let (h, m) = (secs / 3600, (secs % 3600) / 60);
    match (h, m) {
        (0, 0) => format!("{secs}s"),
        (0, m) => format!("{m}m"),
        (h, m) => format!("{h}h {m:02}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(3725), "1:02:05");
    }

    #[test]
    fn human() {
        assert_eq!(format_human(45), "45s");
        assert_eq!(format_human(1500), "25m");
        assert_eq!(format_human(3900), "1h 05m");
        assert_eq!(format_human(7200), "2h 00m");
    }
}
