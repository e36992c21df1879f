//! Budget core: the entry store and the statistics derived from it.
//!
//! The front end mutates an [`ItemStore`]; after each change it recomputes
//! the month views with [`MonthReport::compute`] (or the individual
//! functions in [`stats`]) and renders them.
pub use category::Category;
pub use entry::{Entry, EntryDraft, new_entry_id};
pub use error::EngineError;
pub use export::{CsvExport, export_csv, export_file_name};
pub use money::MoneyCents;
pub use month::YearMonth;
pub use stats::{
    CategoryTotal, DEFAULT_TREND_WINDOW, MonthReport, Totals, TrendBucket, aggregate_totals,
    category_breakdown, month_filter, trend_series,
};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{ITEMS_SLOT, ItemStore};
pub use table::{TableFilter, table_rows};

mod category;
mod entry;
mod error;
mod export;
mod money;
mod month;
pub mod stats;
mod storage;
pub mod store;
mod table;

type ResultEngine<T> = Result<T, EngineError>;
