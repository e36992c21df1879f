use std::fs;

use chrono::NaiveDate;
use clap::Parser;
use engine::{
    EntryDraft, FileStorage, ItemStore, MonthReport, TableFilter, YearMonth, export_csv,
    month_filter, table_rows,
};

use crate::{
    cli::{Cli, Command, EntryArgs},
    error::{AppError, Result},
    settings::Settings,
};

mod cli;
mod error;
mod render;
mod settings;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "budget={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))?;

    let today = settings.today()?;
    let month = cli.month.unwrap_or_else(|| YearMonth::of(today));
    let reference = month.first_day();
    tracing::debug!(%month, data_dir = %settings.data_dir.display(), "starting");

    let mut items = ItemStore::open(FileStorage::new(&settings.data_dir));
    let window = settings.trend_window;
    items.subscribe(move |entries| {
        let report = MonthReport::compute(entries, reference, window);
        println!("{}: {}", report.month, render::totals_line(&report.totals));
    });

    match cli.command {
        Command::Add(args) => {
            let draft = draft_from(args, month, today);
            let entry = items.create(draft)?;
            tracing::info!(id = %entry.id, "entry added");
            println!("added {entry}");
        }
        Command::Edit { id, entry } => {
            let Some(existing) = items.get(&id) else {
                tracing::warn!(%id, "no entry with this id, nothing updated");
                return Ok(());
            };
            let draft = entry.apply(existing)?;
            if items.update(&id, draft)? {
                tracing::info!(%id, "entry updated");
            }
        }
        Command::Delete { id } => {
            if items.remove(&id)? {
                tracing::info!(%id, "entry deleted");
            } else {
                tracing::warn!(%id, "no entry with this id, nothing deleted");
            }
        }
        Command::List { category, search } => {
            let monthly = month_filter(items.entries(), reference);
            let filter = TableFilter::default().category(category).query(&search);
            print!("{}", render::table(&table_rows(monthly, &filter)));
        }
        Command::Summary => {
            let report = MonthReport::compute(items.entries(), reference, window);
            print!("{}", render::summary(&report));
        }
        Command::Export { out } => {
            let monthly = month_filter(items.entries(), reference);
            if monthly.is_empty() {
                tracing::warn!(%month, "nothing to export");
                return Ok(());
            }
            let export = export_csv(month, monthly)?;
            fs::create_dir_all(&out)?;
            let path = out.join(&export.file_name);
            fs::write(&path, &export.content)?;
            tracing::info!(path = %path.display(), "export written");
            println!("{}", path.display());
        }
    }

    Ok(())
}

/// Builds a draft from CLI input. Without `--date`, the entry lands on today
/// when viewing the current month, otherwise on the first of the viewed month.
fn draft_from(args: EntryArgs, month: YearMonth, today: NaiveDate) -> EntryDraft {
    let date = args.date.unwrap_or_else(|| {
        if month.contains(today) {
            today
        } else {
            month.first_day()
        }
    });
    EntryDraft::new(&args.name, args.amount, args.category, date)
        .income(args.income)
        .details(args.details.as_deref())
}
