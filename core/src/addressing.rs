//! A1-style cell and range address conversions.

/// Convert zero-based (row, col) indices to an A1 address string.
pub fn index_to_address(row: u32, col: u32) -> String {
    let mut col_index = col;
    let mut col_label = String::new();

    loop {
        let rem = (col_index % 26) as u8;
        col_label.push((b'A' + rem) as char);
        if col_index < 26 {
            break;
        }
        col_index = col_index / 26 - 1;
    }

    col_label.chars().rev().collect::<String>() + &(row + 1).to_string()
}

/// Parse an A1 address into zero-based (row, col) indices.
/// Returns `None` for malformed addresses.
pub fn address_to_index(a1: &str) -> Option<(u32, u32)> {
    if a1.is_empty() {
        return None;
    }

    let mut col: u32 = 0;
    let mut row: u32 = 0;
    let mut saw_letter = false;
    let mut saw_digit = false;

    for ch in a1.chars() {
        if ch.is_ascii_alphabetic() {
            saw_letter = true;
            if saw_digit {
                // Letters after digits are not allowed.
                return None;
            }
            let upper = ch.to_ascii_uppercase() as u8;
            col = col
                .checked_mul(26)?
                .checked_add((upper - b'A' + 1) as u32)?;
        } else if ch.is_ascii_digit() {
            saw_digit = true;
            row = row.checked_mul(10)?.checked_add((ch as u8 - b'0') as u32)?;
        } else {
            return None;
        }
    }

    if !saw_letter || !saw_digit || row == 0 || col == 0 {
        return None;
    }

    Some((row - 1, col - 1))
}

/// Parse an A1 range reference (`"A1:F3"`, or a single cell `"B2"`) into
/// zero-based inclusive `(row0, col0, row1, col1)` corners.
pub fn range_to_indices(reference: &str) -> Option<(u32, u32, u32, u32)> {
    let mut parts = reference.split(':');
    let start = parts.next()?;
    let end = parts.next().unwrap_or(start);
    if parts.next().is_some() {
        return None;
    }

    let (row0, col0) = address_to_index(start)?;
    let (row1, col1) = address_to_index(end)?;
    if row1 < row0 || col1 < col0 {
        return None;
    }
    Some((row0, col0, row1, col1))
}

/// Format zero-based inclusive corners as an A1 range reference.
pub fn indices_to_range(row0: u32, col0: u32, row1: u32, col1: u32) -> String {
    format!(
        "{}:{}",
        index_to_address(row0, col0),
        index_to_address(row1, col1)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_to_address_examples() {
        assert_eq!(index_to_address(0, 0), "A1");
        assert_eq!(index_to_address(0, 25), "Z1");
        assert_eq!(index_to_address(0, 26), "AA1");
        assert_eq!(index_to_address(30, 5), "F31");
    }

    #[test]
    fn round_trip_addresses() {
        let addresses = ["A1", "B2", "Z10", "AA1", "AB7", "BA1", "ZZ10"];
        for addr in addresses {
            let (r, c) = address_to_index(addr).expect("address should parse");
            assert_eq!(index_to_address(r, c), addr);
        }
    }

    #[test]
    fn invalid_addresses_rejected() {
        let invalid = ["", "1A", "A0", "A", "AA0", "A-1", "A1A"];
        for addr in invalid {
            assert!(address_to_index(addr).is_none(), "{addr} should be invalid");
        }
    }

    #[test]
    fn range_parsing() {
        assert_eq!(range_to_indices("A22:F22"), Some((21, 0, 21, 5)));
        assert_eq!(range_to_indices("B2"), Some((1, 1, 1, 1)));
        assert_eq!(range_to_indices("F1:A1"), None);
        assert_eq!(range_to_indices("A1:B2:C3"), None);
        assert_eq!(indices_to_range(21, 0, 21, 5), "A22:F22");
    }
}
