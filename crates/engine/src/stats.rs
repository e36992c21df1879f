//! Derived statistics over the entry collection.
//!
//! Every function here is pure: it reads a snapshot and returns a value.
//! Entries whose stored date does not parse belong to no month and are
//! therefore skipped by all month-scoped views.
use chrono::NaiveDate;

use crate::{Category, Entry, MoneyCents, YearMonth};

/// Number of months in the default trend series.
pub const DEFAULT_TREND_WINDOW: usize = 6;

/// Month-level totals.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Totals {
    pub total_income: MoneyCents,
    pub total_expenses: MoneyCents,
    pub balance: MoneyCents,
    pub tax_total: MoneyCents,
    /// Percentage of income left after expenses; 0 when there is no income.
    pub savings_rate: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: MoneyCents,
}

/// One month of the trend series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrendBucket {
    pub month: YearMonth,
    pub income: MoneyCents,
    pub expense: MoneyCents,
}

impl TrendBucket {
    /// Short month name for chart axes.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.month.short_name()
    }
}

/// Entries dated in the same calendar month as `reference`, in input order.
#[must_use]
pub fn month_filter(entries: &[Entry], reference: NaiveDate) -> Vec<&Entry> {
    entries_in(entries, YearMonth::of(reference)).collect()
}

fn entries_in(entries: &[Entry], month: YearMonth) -> impl Iterator<Item = &Entry> {
    entries
        .iter()
        .filter(move |entry| entry.date().is_some_and(|date| month.contains(date)))
}

fn split_income_expense<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> (MoneyCents, MoneyCents) {
    entries
        .into_iter()
        .fold((MoneyCents::ZERO, MoneyCents::ZERO), |(income, expense), entry| {
            if entry.is_income {
                (income + entry.amount, expense)
            } else {
                (income, expense + entry.amount)
            }
        })
}

/// Income, expenses, balance, tax and savings rate over `monthly`.
#[must_use]
pub fn aggregate_totals<'a>(monthly: impl IntoIterator<Item = &'a Entry>) -> Totals {
    let monthly: Vec<&Entry> = monthly.into_iter().collect();
    let (total_income, total_expenses) = split_income_expense(monthly.iter().copied());
    let tax_total = monthly
        .iter()
        .filter(|entry| entry.category == Category::Tax)
        .map(|entry| entry.amount)
        .sum();
    let balance = total_income - total_expenses;
    let savings_rate = if total_income.is_positive() {
        balance.as_f64() / total_income.as_f64() * 100.0
    } else {
        0.0
    };

    Totals {
        total_income,
        total_expenses,
        balance,
        tax_total,
        savings_rate,
    }
}

/// Expense totals per category, largest first.
///
/// Only categories with at least one expense appear. Equal totals keep the
/// order in which their category was first met.
#[must_use]
pub fn category_breakdown<'a>(monthly: impl IntoIterator<Item = &'a Entry>) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for entry in monthly.into_iter().filter(|entry| !entry.is_income) {
        match totals.iter_mut().find(|t| t.category == entry.category) {
            Some(slot) => slot.total += entry.amount,
            None => totals.push(CategoryTotal {
                category: entry.category,
                total: entry.amount,
            }),
        }
    }
    // `sort_by` is stable.
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// `window` monthly buckets ending at `reference`'s month, oldest first.
#[must_use]
pub fn trend_series(entries: &[Entry], reference: NaiveDate, window: usize) -> Vec<TrendBucket> {
    let anchor = YearMonth::of(reference);
    (0..window)
        .rev()
        .map(|back| {
            let month = anchor.offset(-(back as i64));
            let (income, expense) = split_income_expense(entries_in(entries, month));
            TrendBucket {
                month,
                income,
                expense,
            }
        })
        .collect()
}

/// Everything a dashboard shows for one reference month.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthReport {
    pub month: YearMonth,
    pub entries: Vec<Entry>,
    pub totals: Totals,
    pub breakdown: Vec<CategoryTotal>,
    pub trend: Vec<TrendBucket>,
}

impl MonthReport {
    /// Recomputes every derived view from scratch.
    #[must_use]
    pub fn compute(entries: &[Entry], reference: NaiveDate, window: usize) -> Self {
        let monthly = month_filter(entries, reference);
        let report = Self {
            month: YearMonth::of(reference),
            totals: aggregate_totals(monthly.iter().copied()),
            breakdown: category_breakdown(monthly.iter().copied()),
            trend: trend_series(entries, reference, window),
            entries: monthly.into_iter().cloned().collect(),
        };
        tracing::debug!(
            month = %report.month,
            entries = report.entries.len(),
            "recomputed month report"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(id: &str, date: &str, units: i64, category: Category, is_income: bool) -> Entry {
        Entry {
            id: id.to_string(),
            name: id.to_string(),
            amount: MoneyCents::from_units(units),
            category,
            is_income,
            details: None,
            date: date.to_string(),
        }
    }

    #[test]
    fn month_filter_keeps_same_month_in_order() {
        let entries = vec![
            entry("jan", "2024-01-31", 1, Category::Fixed, false),
            entry("feb1", "2024-02-01", 1, Category::Fixed, false),
            entry("leap", "2024-02-29", 1, Category::Fixed, false),
        ];
        let ids: Vec<&str> = month_filter(&entries, date(2024, 2, 15))
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, ["feb1", "leap"]);
    }

    #[test]
    fn month_filter_ignores_other_years_and_bad_dates() {
        let entries = vec![
            entry("old", "2023-02-10", 1, Category::Fixed, false),
            entry("bad", "not a date", 1, Category::Fixed, false),
            entry("ok", "2024-02-10", 1, Category::Fixed, false),
        ];
        let filtered = month_filter(&entries, date(2024, 2, 1));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "ok");
    }

    #[test]
    fn aggregate_totals_example() {
        let entries = vec![
            entry("salary", "2024-02-01", 1000, Category::Income, true),
            entry("rent", "2024-02-02", 300, Category::Fixed, false),
            entry("vat", "2024-02-03", 50, Category::Tax, false),
        ];
        let totals = aggregate_totals(&entries);
        assert_eq!(totals.total_income, MoneyCents::from_units(1000));
        assert_eq!(totals.total_expenses, MoneyCents::from_units(350));
        assert_eq!(totals.balance, MoneyCents::from_units(650));
        assert_eq!(totals.tax_total, MoneyCents::from_units(50));
        assert!((totals.savings_rate - 65.0).abs() < 1e-9);
    }

    #[test]
    fn zero_income_means_zero_savings_rate() {
        let entries = vec![entry("rent", "2024-02-02", 300, Category::Fixed, false)];
        let totals = aggregate_totals(&entries);
        assert_eq!(totals.savings_rate, 0.0);
        assert_eq!(totals.balance, MoneyCents::from_units(-300));
        assert_eq!(aggregate_totals(std::iter::empty()), Totals::default());
    }

    #[test]
    fn tax_counts_regardless_of_income_flag() {
        let entries = vec![
            entry("refund", "2024-02-02", 20, Category::Tax, true),
            entry("vat", "2024-02-03", 50, Category::Tax, false),
        ];
        assert_eq!(aggregate_totals(&entries).tax_total, MoneyCents::from_units(70));
    }

    #[test]
    fn breakdown_sorts_descending_and_keeps_ties_stable() {
        let entries = vec![
            entry("a", "2024-02-01", 40, Category::Personal, false),
            entry("b", "2024-02-01", 100, Category::Fixed, false),
            entry("c", "2024-02-01", 40, Category::Business, false),
            entry("salary", "2024-02-01", 5000, Category::Income, true),
        ];
        let breakdown = category_breakdown(&entries);
        let order: Vec<Category> = breakdown.iter().map(|t| t.category).collect();
        assert_eq!(
            order,
            [Category::Fixed, Category::Personal, Category::Business]
        );
    }

    #[test]
    fn breakdown_sums_per_category() {
        let entries = vec![
            entry("a", "2024-02-01", 40, Category::Personal, false),
            entry("b", "2024-02-01", 25, Category::Personal, false),
        ];
        assert_eq!(
            category_breakdown(&entries),
            vec![CategoryTotal {
                category: Category::Personal,
                total: MoneyCents::from_units(65),
            }]
        );
    }

    #[test]
    fn trend_has_window_buckets_oldest_first() {
        let entries = vec![
            entry("oct", "2023-10-05", 100, Category::Income, true),
            entry("feb", "2024-02-05", 30, Category::Fixed, false),
            entry("future", "2024-04-05", 999, Category::Fixed, false),
        ];
        let trend = trend_series(&entries, date(2024, 3, 10), DEFAULT_TREND_WINDOW);
        let labels: Vec<&str> = trend.iter().map(TrendBucket::label).collect();
        assert_eq!(labels, ["Oct", "Nov", "Dec", "Jan", "Feb", "Mar"]);
        assert_eq!(trend[0].income, MoneyCents::from_units(100));
        assert_eq!(trend[4].expense, MoneyCents::from_units(30));
        assert_eq!(trend[5].expense, MoneyCents::ZERO);
    }

    #[test]
    fn trend_size_does_not_depend_on_data() {
        for window in [0, 1, 6, 13] {
            assert_eq!(trend_series(&[], date(2024, 1, 1), window).len(), window);
        }
    }

    #[test]
    fn report_bundles_month_views() {
        let entries = vec![
            entry("salary", "2024-02-01", 1000, Category::Income, true),
            entry("rent", "2024-02-02", 300, Category::Fixed, false),
            entry("jan", "2024-01-02", 300, Category::Fixed, false),
        ];
        let report = MonthReport::compute(&entries, date(2024, 2, 20), 3);
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.totals.balance, MoneyCents::from_units(700));
        assert_eq!(report.breakdown.len(), 1);
        assert_eq!(report.trend.len(), 3);
        assert_eq!(report.trend[1].expense, MoneyCents::from_units(300));
    }
}
