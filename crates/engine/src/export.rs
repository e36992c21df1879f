//! CSV export of a month's entries.

use csv::{Terminator, WriterBuilder};
use serde::Serialize;

use crate::{Entry, EngineError, MoneyCents, ResultEngine, YearMonth};

/// UTF-8 byte-order mark, so spreadsheet tools pick the right encoding.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Serialize)]
struct ExportRow<'a> {
    date: &'a str,
    name: &'a str,
    category: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    amount: MoneyCents,
}

/// A rendered export, ready to be written to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// File name for `month`, e.g. `budget_2_2024.csv`.
#[must_use]
pub fn export_file_name(month: YearMonth) -> String {
    format!("budget_{}_{}.csv", month.month(), month.year())
}

/// Renders `entries` (normally the month's filtered subset) as CSV.
///
/// Columns are `date,name,category,type,amount`. Fields holding a comma or
/// a quote are quoted with inner quotes doubled.
pub fn export_csv<'a>(
    month: YearMonth,
    entries: impl IntoIterator<Item = &'a Entry>,
) -> ResultEngine<CsvExport> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(UTF8_BOM.to_vec());

    let mut rows = 0usize;
    for entry in entries {
        writer.serialize(ExportRow {
            date: &entry.date,
            name: &entry.name,
            category: entry.category.label(),
            kind: if entry.is_income { "Income" } else { "Expense" },
            amount: entry.amount,
        })?;
        rows += 1;
    }
    if rows == 0 {
        writer.write_record(["date", "name", "category", "type", "amount"])?;
    }

    let content = writer
        .into_inner()
        .map_err(|err| EngineError::Storage(err.into_error()))?;

    tracing::info!(%month, rows, "rendered csv export");
    Ok(CsvExport {
        file_name: export_file_name(month),
        content,
    })
}
