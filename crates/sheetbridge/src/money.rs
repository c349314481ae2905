//! Currency rendering for designated money columns

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use sheetbridge_docx::Table;

/// Parse a comma-separated list of 1-based column numbers into 0-based indices
///
/// Tokens that are not plain digits are dropped, and so is `0`, which names
/// no column.
///
/// ```
/// use sheetbridge::money::parse_money_columns;
///
/// assert_eq!(parse_money_columns("2, 3,x,,0"), vec![1, 2]);
/// ```
pub fn parse_money_columns(columns: &str) -> Vec<usize> {
    columns
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|token| token.parse::<usize>().ok())
        .filter_map(|n| n.checked_sub(1))
        .collect()
}

/// Render text as a dollar amount, e.g. `1234.5` -> `$1,234.50`
///
/// `,` and `$` are stripped before parsing, so an already formatted amount
/// comes back unchanged. Midpoints round to even. Returns `None` when the
/// text is not a number.
pub fn format_currency(text: &str) -> Option<String> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$')
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    let amount = Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .ok()?;
    let mut amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    amount.rescale(2);

    let digits = amount.abs().to_string();
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    Some(format!("${}{}.{}", sign, group_thousands(whole), cents))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Rewrite the designated columns of every row after the header rows as currency
///
/// Columns are grid columns, so a row with a spanned cell still finds its
/// amounts. Cells that do not parse as a number keep their text; columns a
/// row does not have are skipped. Returns the number of cells that hold an amount.
pub fn format_money_columns(table: &mut Table<'_>, columns: &[usize], header_rows: usize) -> usize {
    let mut amounts = 0;
    for row in header_rows..table.row_count() {
        for &col in columns {
            let Some(mut cell) = table.grid_cell_mut(row, col) else {
                log::debug!("money column {} is not in row {}", col + 1, row);
                continue;
            };
            let text = cell.text();
            match format_currency(&text) {
                Some(amount) => {
                    if amount != text {
                        cell.set_text(&amount);
                    }
                    amounts += 1;
                }
                None => log::debug!("row {} column {}: '{}' is not an amount", row, col + 1, text),
            }
        }
    }
    amounts
}
