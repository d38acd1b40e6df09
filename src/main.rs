mod ingest;
mod report;

use std::io::{self, IsTerminal};

use stockline::{fill_column, reconcile};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(config: &CliConfig) -> Result<(), String> {
    let table = ingest::load_stock_csv(&config.stock, config.stock_sku.as_deref(), config.stock_qty.as_deref())?;
    let listing = ingest::load_listing_csv(&config.listing, config.sku.as_deref(), config.qty.as_deref())?;

    let result = reconcile(&listing.tokens, &table);
    let column = fill_column(&result.values, &listing.original_quantities);

    // The column goes to stdout, one value per row, ready to paste back
    // into the template; everything else goes to stderr.
    for value in &column {
        println!("{value}");
    }

    if let Some(path) = &config.export {
        ingest::export_csv(path, &listing.tokens, &column)?;
    }

    report::print_run(&result, table.len(), config.color);
    Ok(())
}

struct CliConfig {
    stock: String,
    listing: String,
    sku: Option<String>,
    qty: Option<String>,
    stock_sku: Option<String>,
    stock_qty: Option<String>,
    export: Option<String>,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut stock: Option<String> = None;
    let mut listing: Option<String> = None;
    let mut sku: Option<String> = None;
    let mut qty: Option<String> = None;
    let mut stock_sku: Option<String> = None;
    let mut stock_qty: Option<String> = None;
    let mut export: Option<String> = None;
    let mut color = io::stderr().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("stockline {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--stock" => stock = Some(expect_value(&mut args, "--stock")?),
            "--listing" => listing = Some(expect_value(&mut args, "--listing")?),
            "--sku" => sku = Some(expect_value(&mut args, "--sku")?),
            "--qty" => qty = Some(expect_value(&mut args, "--qty")?),
            "--stock-sku" => stock_sku = Some(expect_value(&mut args, "--stock-sku")?),
            "--stock-qty" => stock_qty = Some(expect_value(&mut args, "--stock-qty")?),
            "--export" => export = Some(expect_value(&mut args, "--export")?),
            _ if arg.starts_with("--stock-sku=") => stock_sku = Some(value_of(&arg)),
            _ if arg.starts_with("--stock-qty=") => stock_qty = Some(value_of(&arg)),
            _ if arg.starts_with("--stock=") => stock = Some(value_of(&arg)),
            _ if arg.starts_with("--listing=") => listing = Some(value_of(&arg)),
            _ if arg.starts_with("--sku=") => sku = Some(value_of(&arg)),
            _ if arg.starts_with("--qty=") => qty = Some(value_of(&arg)),
            _ if arg.starts_with("--export=") => export = Some(value_of(&arg)),
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            // Positional paths: stock first, listing second.
            _ if stock.is_none() => stock = Some(arg),
            _ if listing.is_none() => listing = Some(arg),
            _ => return Err(format!("error: unexpected argument '{arg}'")),
        }
    }

    let stock = stock.ok_or_else(|| format!("error: no stock csv provided\n\n{}", help_text()))?;
    let listing = listing.ok_or_else(|| format!("error: no listing csv provided\n\n{}", help_text()))?;

    Ok(CliConfig { stock, listing, sku, qty, stock_sku, stock_qty, export, color })
}

fn expect_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("error: {flag} expects a value"))
}

fn value_of(arg: &str) -> String {
    arg.splitn(2, '=').nth(1).unwrap_or("").to_string()
}

fn help_text() -> String {
    format!(
        "stockline {version}

SKU reconciliation CLI: rebuilds a marketplace quantity column from an
internal stock export, resolving concatenated bundle SKUs by their
scarcest component.

Usage:
  stockline [OPTIONS] <stock.csv> <listing.csv>
  stockline [OPTIONS] --stock <path> --listing <path>

The updated quantity column is written to stdout, one value per listing
row; the run report goes to stderr.

Options:
  --stock <path>        Internal inventory export (CSV).
  --listing <path>      Marketplace listing template (CSV).
  --sku <header>        Listing SKU column header (default: auto-detect,
                        e.g. 'Seller SKU').
  --qty <header>        Listing quantity column header (default: auto-detect).
  --stock-sku <header>  Stock SKU column header (default: auto-detect).
  --stock-qty <header>  Stock quantity column header (default: auto-detect).
  --export <path>       Also write a sku,updated_quantity CSV.
  --color               Force ANSI color output.
  --no-color            Disable ANSI color output.
  -h, --help            Show this help message.
  -V, --version         Print version information.

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION")
    )
}
