// src/process/table.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::error::ParseError;
use crate::process::cleanup::clean_cell;

/// One table row: cleaned cell strings in column order.
pub type TableRow = Vec<String>;

static TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("table selector should parse"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("tr selector should parse"));
static CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("td selector should parse"));

/// Decode a response body strictly as UTF-8.
pub fn decode_body(bytes: Vec<u8>) -> Result<String, ParseError> {
    Ok(String::from_utf8(bytes)?)
}

/// Extract every `<tr>` of the first `<table>` in `html` as a row of cleaned
/// `<td>` texts. Rows are neither padded nor truncated.
pub fn extract_table(html: &str) -> Result<Vec<TableRow>, ParseError> {
    let document = Html::parse_document(html);
    let table = document.select(&TABLE).next().ok_or(ParseError::NoTable)?;

    Ok(table.select(&ROW).map(row_cells).collect())
}

fn row_cells(row: ElementRef<'_>) -> TableRow {
    row.select(&CELL)
        .map(|cell| clean_cell(&cell.text().collect::<String>()))
        .collect()
}
