use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use engine::{Category, EngineError, Entry, EntryDraft, MoneyCents, YearMonth};

#[derive(Debug, Parser)]
#[command(name = "budget", about = "Personal monthly budget dashboard")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the data directory.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    /// Override the log level (e.g. debug).
    #[arg(long, global = true)]
    pub level: Option<String>,
    /// Override the number of months in the trend series.
    #[arg(long, global = true)]
    pub trend_window: Option<usize>,
    /// Override timezone (IANA name).
    #[arg(long, global = true)]
    pub timezone: Option<String>,
    /// Reference month, `YYYY-MM`. Defaults to the current month.
    #[arg(long, global = true)]
    pub month: Option<YearMonth>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new income or expense.
    Add(EntryArgs),
    /// Change fields of an existing entry. Fields not given keep their value.
    Edit {
        id: String,
        #[command(flatten)]
        entry: EditArgs,
    },
    /// Permanently delete an entry.
    Delete { id: String },
    /// Show the month's transactions, newest first.
    List {
        /// Only show one category.
        #[arg(long)]
        category: Option<Category>,
        /// Match against name or amount.
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show totals, category breakdown and trend for the month.
    Summary,
    /// Write the month's entries to a CSV file.
    Export {
        /// Output directory.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct EntryArgs {
    pub name: String,
    pub amount: MoneyCents,
    #[arg(long, default_value = "Fixed")]
    pub category: Category,
    /// Mark as income. Implied by `--category income`.
    #[arg(long)]
    pub income: bool,
    /// Entry date, `YYYY-MM-DD`.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub details: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub amount: Option<MoneyCents>,
    #[arg(long)]
    pub category: Option<Category>,
    /// `true` or `false`.
    #[arg(long)]
    pub income: Option<bool>,
    /// Entry date, `YYYY-MM-DD`.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Empty text clears the details.
    #[arg(long)]
    pub details: Option<String>,
}

impl EditArgs {
    /// Draft holding `existing`'s fields with the given flags applied on top.
    pub fn apply(self, existing: &Entry) -> Result<EntryDraft, EngineError> {
        let date = self.date.or_else(|| existing.date()).ok_or_else(|| {
            EngineError::InvalidEntry(format!(
                "stored date {:?} is malformed, pass --date",
                existing.date
            ))
        })?;
        let details = self.details.or_else(|| existing.details.clone());
        Ok(EntryDraft::new(
            self.name.as_deref().unwrap_or(&existing.name),
            self.amount.unwrap_or(existing.amount),
            self.category.unwrap_or(existing.category),
            date,
        )
        .income(self.income.unwrap_or(existing.is_income))
        .details(details.as_deref()))
    }
}
