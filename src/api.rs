use crate::{Outcome, StockTable, engine};
use std::time::{Duration, Instant};

/// Result from [`reconcile`]: one full sweep over the listing rows.
#[derive(Debug, Clone)]
pub struct ReconcileResult {
    /// Per-row outcomes, in input row order.
    pub outcomes: Vec<Outcome>,
    /// Per-row column values, parallel to `outcomes`. Keep-original rows
    /// render as the empty string; substitute them with [`fill_column`]
    /// before writing the column back.
    pub values: Vec<String>,
    /// Every SKU that failed lookup, across all rows, in encounter order.
    /// Duplicates are preserved; deduplicate at display time if desired.
    pub unmatched: Vec<String>,
    /// Total elapsed time for the sweep.
    pub elapsed: Duration,
}

/// Resolve every listing row against `table`, in order.
///
/// The output `values` correspond one-to-one, in the original row order, to
/// `tokens`; callers rely on this to write values back into the correct
/// template positions. Rows never fail: unresolved single items yield the
/// keep-original sentinel and short bundles yield `"0"`.
///
/// # Example
/// ```
/// use stockline::{StockTable, reconcile};
///
/// let table: StockTable = [("ABC123-S", 3), ("DEF456-S", 7)].into_iter().collect();
/// let rows = ["ABC123-S", "QQQ000-S", "ABC123DEF456-S"];
///
/// let run = reconcile(&rows, &table);
/// assert_eq!(run.values, vec!["3", "", "3"]);
/// assert_eq!(run.unmatched, vec!["QQQ000-S"]);
/// ```
pub fn reconcile<S: AsRef<str>>(tokens: &[S], table: &StockTable) -> ReconcileResult {
    let started = Instant::now();

    let mut outcomes = Vec::with_capacity(tokens.len());
    let mut values = Vec::with_capacity(tokens.len());
    let mut unmatched = Vec::new();

    for token in tokens {
        let resolution = engine::resolve(token.as_ref(), table);
        values.push(resolution.column_value());
        outcomes.push(resolution.outcome);
        unmatched.extend(resolution.unmatched);
    }

    ReconcileResult { outcomes, values, unmatched, elapsed: started.elapsed() }
}

/// Substitute keep-original sentinels with the rows' pre-existing
/// quantities, producing the final publishable column.
///
/// `originals` is parallel to `values`; a row whose original is missing
/// substitutes the empty string.
pub fn fill_column<S: AsRef<str>>(values: &[String], originals: &[S]) -> Vec<String> {
    values
        .iter()
        .enumerate()
        .map(|(row, value)| {
            if value.is_empty() {
                originals.get(row).map(|orig| orig.as_ref().to_string()).unwrap_or_default()
            } else {
                value.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_table() -> StockTable {
        [("ABC123-S", 3), ("DEF456-S", 7)].into_iter().collect()
    }

    #[test]
    fn sweep_preserves_row_order() {
        let table = demo_table();
        let rows = ["ABC123-S", "QQQ000-S", "ABC123DEF456-S"];

        let run = reconcile(&rows, &table);

        assert_eq!(run.values, vec!["3", "", "3"]);
        assert_eq!(
            run.outcomes,
            vec![Outcome::Resolved(3), Outcome::KeepOriginal, Outcome::Resolved(3)]
        );
        assert_eq!(run.unmatched, vec!["QQQ000-S"]);
        assert!(run.elapsed >= Duration::ZERO);
    }

    #[test]
    fn sentinel_substitution_uses_row_originals() {
        let table = demo_table();
        let rows = ["ABC123-S", "QQQ000-S", "ABC123DEF456-S"];
        let originals = ["9", "9", "9"];

        let run = reconcile(&rows, &table);
        let column = fill_column(&run.values, &originals);

        assert_eq!(column, vec!["3", "9", "3"]);
    }

    #[test]
    fn unmatched_accumulates_duplicates_in_encounter_order() {
        let table = StockTable::new();
        let rows = ["QQQ000-S", "ABC123DEF456-M", "QQQ000-S"];

        let run = reconcile(&rows, &table);

        assert_eq!(run.values, vec!["", "0", ""]);
        assert_eq!(run.unmatched, vec!["QQQ000-S", "ABC123-M", "DEF456-M", "QQQ000-S"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let run = reconcile::<&str>(&[], &demo_table());
        assert!(run.values.is_empty());
        assert!(run.outcomes.is_empty());
        assert!(run.unmatched.is_empty());
    }

    #[test]
    fn column_always_matches_row_count() {
        let table = demo_table();
        let rows = ["", "nan", "None", "garbage", "ABC123-S", "--weird--"];

        let run = reconcile(&rows, &table);

        assert_eq!(run.values.len(), rows.len());
        assert_eq!(run.outcomes.len(), rows.len());
    }
}
