//! Turns raw provider text into list results.

/// Split on line breaks, trim each line, drop blanks.
///
/// The count is not checked against what the prompt asked for.
pub fn parse_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
