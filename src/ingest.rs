//! CSV ingestion for the reconciliation binary.
//!
//! This is the "external collaborator" side of the pipeline: it turns the
//! two input files into what the engine consumes (a stock table and an
//! ordered list of listing rows) and knows nothing about bundle semantics.
//!
//! Both loaders locate their columns by header name from a candidate list,
//! since marketplace exports and inventory dumps disagree on naming; the
//! candidates can be overridden from the command line.

use std::fs::File;
use std::io;

use stockline::StockTable;

/// The listing rows that actually need reconciliation, instructional rows
/// already filtered out. `original_quantities` is parallel to `tokens`.
pub struct Listing {
    pub tokens: Vec<String>,
    pub original_quantities: Vec<String>,
}

const STOCK_SKU_HEADERS: &[&str] = &["sku", "seller sku", "sku编码"];
const STOCK_QTY_HEADERS: &[&str] = &["quantity", "qty", "stock", "当前库存"];

const LISTING_SKU_HEADERS: &[&str] = &["seller sku", "sku"];
const LISTING_QTY_HEADERS: &[&str] = &[
    "quantity in u.s pickup warehouse",
    "total quantity in u.s pickup warehouse",
    "quantity",
    "qty",
];

/// Load the internal inventory export and build the stock table.
///
/// Rows with an empty SKU cell are dropped; quantity cells are coerced by
/// the table itself (non-numeric and negative cells become 0).
pub fn load_stock_csv(path: &str, sku_header: Option<&str>, qty_header: Option<&str>) -> Result<StockTable, String> {
    let file = File::open(path).map_err(|err| format!("open stock csv '{path}': {err}"))?;
    read_stock(file, sku_header, qty_header, path)
}

fn read_stock<R: io::Read>(
    reader: R,
    sku_header: Option<&str>,
    qty_header: Option<&str>,
    source: &str,
) -> Result<StockTable, String> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers().map_err(|err| format!("read headers of '{source}': {err}"))?.clone();
    let sku_col = find_column(&headers, sku_header, STOCK_SKU_HEADERS, "SKU", source)?;
    let qty_col = find_column(&headers, qty_header, STOCK_QTY_HEADERS, "quantity", source)?;

    let mut table = StockTable::new();
    for record in rdr.records() {
        let record = record.map_err(|err| format!("read record of '{source}': {err}"))?;
        let sku = record.get(sku_col).unwrap_or("").trim();
        if sku.is_empty() {
            continue;
        }
        table.insert_cell(sku, record.get(qty_col).unwrap_or(""));
    }
    Ok(table)
}

/// Load the marketplace listing template.
///
/// Marketplace exports lead with instructional rows ("Cannot be edited",
/// fill-in hints) before the real data. Real data begins at the first row
/// whose quantity cell is numeric or empty; everything before that is
/// skipped, as are explicitly non-editable rows anywhere in the file.
pub fn load_listing_csv(path: &str, sku_header: Option<&str>, qty_header: Option<&str>) -> Result<Listing, String> {
    let file = File::open(path).map_err(|err| format!("open listing csv '{path}': {err}"))?;
    read_listing(file, sku_header, qty_header, path)
}

fn read_listing<R: io::Read>(
    reader: R,
    sku_header: Option<&str>,
    qty_header: Option<&str>,
    source: &str,
) -> Result<Listing, String> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers().map_err(|err| format!("read headers of '{source}': {err}"))?.clone();
    let sku_col = find_column(&headers, sku_header, LISTING_SKU_HEADERS, "Seller SKU", source)?;
    let qty_col = find_column(&headers, qty_header, LISTING_QTY_HEADERS, "quantity", source)?;

    let mut tokens = Vec::new();
    let mut original_quantities = Vec::new();
    let mut data_started = false;

    for record in rdr.records() {
        let record = record.map_err(|err| format!("read record of '{source}': {err}"))?;
        let sku = record.get(sku_col).unwrap_or("").trim().to_string();
        let quantity = record.get(qty_col).unwrap_or("").trim().to_string();

        if sku.contains("Cannot be edited") {
            continue;
        }
        if !data_started {
            if quantity.is_empty() || is_numeric_cell(&quantity) {
                data_started = true;
            } else {
                continue;
            }
        }

        tokens.push(sku);
        original_quantities.push(quantity);
    }

    Ok(Listing { tokens, original_quantities })
}

/// Write the final `sku,updated_quantity` export.
pub fn export_csv(path: &str, tokens: &[String], column: &[String]) -> Result<(), String> {
    let file = File::create(path).map_err(|err| format!("create export csv '{path}': {err}"))?;
    write_export(file, tokens, column).map_err(|err| format!("write export csv '{path}': {err}"))
}

fn write_export<W: io::Write>(writer: W, tokens: &[String], column: &[String]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["sku", "updated_quantity"])?;
    for (sku, value) in tokens.iter().zip(column) {
        wtr.write_record([sku, value])?;
    }
    wtr.flush()?;
    Ok(())
}

fn find_column(
    headers: &csv::StringRecord,
    override_name: Option<&str>,
    candidates: &[&str],
    what: &str,
    source: &str,
) -> Result<usize, String> {
    if let Some(name) = override_name {
        return headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| format!("no '{name}' column in '{source}'"));
    }

    headers
        .iter()
        .position(|header| {
            let lowered = header.trim().to_lowercase();
            candidates.iter().any(|candidate| *candidate == lowered)
        })
        .ok_or_else(|| {
            format!(
                "could not locate a {what} column in '{source}' (headers found: {})",
                headers.iter().map(str::trim).collect::<Vec<_>>().join(", ")
            )
        })
}

/// A cell counts as numeric if it is digits with at most one decimal point,
/// which is how marketplace templates write pre-existing quantities.
fn is_numeric_cell(cell: &str) -> bool {
    let mut seen_dot = false;
    let mut seen_digit = false;
    for ch in cell.chars() {
        match ch {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_headers_are_auto_detected() {
        let csv = "SKU编码,当前库存\nABC123-M,5\n DEF456-M ,3.9\nGHI789-M,oops\n";
        let table = read_stock(csv.as_bytes(), None, None, "test").unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get("ABC123-M"), Some(5));
        assert_eq!(table.get("DEF456-M"), Some(3));
        assert_eq!(table.get("GHI789-M"), Some(0));
    }

    #[test]
    fn stock_header_override_wins() {
        let csv = "code,on_hand\nABC123-M,5\n";
        let table = read_stock(csv.as_bytes(), Some("code"), Some("on_hand"), "test").unwrap();
        assert_eq!(table.get("ABC123-M"), Some(5));
    }

    #[test]
    fn missing_stock_column_is_an_error() {
        let csv = "something,else\nABC123-M,5\n";
        let err = read_stock(csv.as_bytes(), None, None, "test").unwrap_err();
        assert!(err.contains("SKU column"), "unexpected error: {err}");
    }

    #[test]
    fn rows_without_sku_are_dropped() {
        let csv = "sku,quantity\nABC123-M,5\n,9\n   ,9\n";
        let table = read_stock(csv.as_bytes(), None, None, "test").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn listing_skips_instructional_rows() {
        let csv = "Seller SKU,Quantity in U.S Pickup Warehouse\n\
                   Fill in your SKU,Required field\n\
                   ABC123-S,9\n\
                   DEF456-S,\n";
        let listing = read_listing(csv.as_bytes(), None, None, "test").unwrap();

        assert_eq!(listing.tokens, vec!["ABC123-S", "DEF456-S"]);
        assert_eq!(listing.original_quantities, vec!["9", ""]);
    }

    #[test]
    fn listing_drops_non_editable_rows() {
        let csv = "Seller SKU,Quantity\n\
                   ABC123-S,9\n\
                   Cannot be edited,4\n\
                   DEF456-S,2\n";
        let listing = read_listing(csv.as_bytes(), None, None, "test").unwrap();

        assert_eq!(listing.tokens, vec!["ABC123-S", "DEF456-S"]);
    }

    #[test]
    fn numeric_cell_detection() {
        assert!(is_numeric_cell("12"));
        assert!(is_numeric_cell("3.5"));
        assert!(!is_numeric_cell("."));
        assert!(!is_numeric_cell(""));
        assert!(!is_numeric_cell("Required field"));
        assert!(!is_numeric_cell("1.2.3"));
    }

    #[test]
    fn export_writes_header_and_rows() {
        let tokens = vec!["ABC123-S".to_string(), "QQQ000-S".to_string()];
        let column = vec!["3".to_string(), "9".to_string()];

        let mut out = Vec::new();
        write_export(&mut out, &tokens, &column).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "sku,updated_quantity\nABC123-S,3\nQQQ000-S,9\n");
    }
}
