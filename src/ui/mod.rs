/// Presentation layer: everything that draws with egui.
///
/// * `panels`  – top bar and left filter panel
/// * `summary` – metric cards and insight cards
/// * `charts`  – top countries, technology pie, country comparisons
/// * `map`     – geographic scatter of tower counts
/// * `table`   – detailed per-country table
pub mod charts;
pub mod map;
pub mod panels;
pub mod summary;
pub mod table;

/// `1903025` → `"1,903,025"`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::format_thousands;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(1_903_025), "1,903,025");
    }
}
