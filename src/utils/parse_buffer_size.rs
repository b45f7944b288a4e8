/// Parses a size such as `512`, `64k`, `1mb`, or `2G` into bytes.
///
/// Used for the CLI `--capacity` flag; errors are plain strings so the
/// function can be handed straight to clap as a value parser.
pub fn parse_buffer_size(size_str: &str) -> Result<usize, String> {
    let size_str = size_str.trim().to_lowercase();

    // Find the position where the numeric part ends
    let num_end = size_str
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(size_str.len());

    let (num_part, unit_part) = size_str.split_at(num_end);

    let multiplier: usize = match unit_part.trim() {
        "" | "b" => 1,
        "k" | "kb" => 1024,
        "m" | "mb" => 1024 * 1024,
        "g" | "gb" => 1024 * 1024 * 1024,
        other => return Err(format!("Invalid buffer size unit: {}", other)),
    };

    let count = num_part
        .parse::<usize>()
        .map_err(|_| format!("Failed to parse buffer size: {}", size_str))?;

    count
        .checked_mul(multiplier)
        .ok_or_else(|| format!("Buffer size too large: {}", size_str))
}
