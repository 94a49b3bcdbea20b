//! Argument parsing and output helpers shared by the commands.

use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse `1500`, `25m`, `1h30m`, `90s` or `1h 5m 30s` into seconds.
pub fn parse_duration(input: &str) -> Result<u64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("empty duration".into());
    }
    if let Ok(secs) = input.parse::<u64>() {
        return Ok(secs);
    }

    let mut total: u64 = 0;
    let mut digits = String::new();
    for c in input.chars() {
        match c {
            '0'..='9' => digits.push(c),
            'h' | 'm' | 's' => {
                let n: u64 = digits
                    .parse()
                    .map_err(|_| format!("invalid duration '{input}'"))?;
                digits.clear();
                let unit = match c {
                    'h' => 3600,
                    'm' => 60,
                    _ => 1,
                };
                total = total
                    .checked_add(n.saturating_mul(unit))
                    .ok_or_else(|| format!("duration '{input}' is too large"))?;
            }
            ' ' => {}
            _ => return Err(format!("invalid duration '{input}'")),
        }
    }
    if !digits.is_empty() {
        return Err(format!("missing unit in duration '{input}'"));
    }
    Ok(total)
}

/// Split a comma-separated tag list.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
