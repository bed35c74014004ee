//! Excel-style cell references: column letters, `A1` cells, `A1:B2` ranges.

/// Convert a 0-indexed column to its letters (0 → `A`, 26 → `AA`).
///
/// Bijective base 26: there is no zero digit, so the index is decremented
/// before every division.
#[must_use]
pub fn col_to_letter(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = u64::from(col) + 1; // 1-based
    while n > 0 {
        n -= 1;
        #[allow(clippy::cast_possible_truncation)]
        let digit = (n % 26) as u8;
        letters.push(b'A' + digit);
        n /= 26;
    }
    letters.iter().rev().map(|&b| char::from(b)).collect()
}

/// Reference for a 0-indexed (row, col), e.g. `(2, 1)` → `B3`.
#[must_use]
pub fn cell_ref(row: u32, col: u32) -> String {
    format!("{}{}", col_to_letter(col), u64::from(row) + 1)
}

/// Range reference between two 0-indexed corners, e.g. `A1:D10`.
#[must_use]
pub fn range_ref(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> String {
    format!(
        "{}:{}",
        cell_ref(start_row, start_col),
        cell_ref(end_row, end_col)
    )
}

/// Absolute range reference, e.g. `$A$1:$D$10`.
#[must_use]
pub fn abs_range_ref(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> String {
    format!(
        "${}${}:${}${}",
        col_to_letter(start_col),
        u64::from(start_row) + 1,
        col_to_letter(end_col),
        u64::from(end_row) + 1
    )
}
