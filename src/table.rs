use std::collections::HashMap;

/// The authoritative SKU → available-quantity mapping for one
/// reconciliation run.
///
/// Keys are trimmed, case-sensitive SKU strings; values are non-negative
/// integers. All the messiness of the inventory export is absorbed at build
/// time — [`StockTable::insert_cell`] coerces whatever the quantity cell
/// held — so the resolution engine only ever sees clean entries. The table
/// is read-only during resolution; lookups take `&self`.
#[derive(Debug, Clone, Default)]
pub struct StockTable {
    entries: HashMap<String, u64>,
}

impl StockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an already-clean quantity. The SKU is trimmed.
    pub fn insert(&mut self, sku: &str, quantity: u64) {
        self.entries.insert(sku.trim().to_string(), quantity);
    }

    /// Insert a raw record straight from the inventory export: the SKU is
    /// trimmed and the quantity cell is coerced to a non-negative integer.
    pub fn insert_cell(&mut self, sku: &str, quantity_cell: &str) {
        self.insert(sku, coerce_quantity(quantity_cell));
    }

    /// Build a table from raw (SKU cell, quantity cell) records.
    pub fn from_records<I, K, V>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut table = Self::new();
        for (sku, quantity_cell) in records {
            table.insert_cell(sku.as_ref(), quantity_cell.as_ref());
        }
        table
    }

    pub fn get(&self, sku: &str) -> Option<u64> {
        self.entries.get(sku).copied()
    }

    pub fn contains(&self, sku: &str) -> bool {
        self.entries.contains_key(sku)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, u64)> for StockTable {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (sku, quantity) in iter {
            table.insert(sku.as_ref(), quantity);
        }
        table
    }
}

/// Coerce a raw quantity cell to a non-negative integer.
///
/// Fractional stock truncates toward zero; non-numeric, empty and negative
/// cells all coerce to 0. This is the only place quantity coercion happens;
/// the resolver itself assumes integers.
fn coerce_quantity(cell: &str) -> u64 {
    match cell.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value.trunc() as u64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_trimmed_on_build() {
        let table = StockTable::from_records([("  ABC123-M  ", "5")]);
        assert_eq!(table.get("ABC123-M"), Some(5));
        assert!(!table.contains("  ABC123-M  "));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let table = StockTable::from_records([("ABC123-M", "5")]);
        assert_eq!(table.get("abc123-m"), None);
    }

    #[test]
    fn quantity_cells_coerce() {
        let cases: Vec<(&str, u64)> = vec![
            ("12", 12),
            (" 12 ", 12),
            ("3.7", 3),
            ("0", 0),
            ("", 0),
            ("abc", 0),
            ("-4", 0),
            ("1e3", 1000),
        ];

        for (cell, expected) in cases {
            let table = StockTable::from_records([("SKU-X", cell)]);
            assert_eq!(table.get("SKU-X"), Some(expected), "wrong coercion for cell '{}'", cell);
        }
    }

    #[test]
    fn later_records_overwrite_earlier() {
        let table = StockTable::from_records([("ABC123-M", "5"), ("ABC123-M", "9")]);
        assert_eq!(table.get("ABC123-M"), Some(9));
        assert_eq!(table.len(), 1);
    }
}
