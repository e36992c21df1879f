//! Plain-text views of the dashboard.

use engine::{Entry, MoneyCents, MonthReport, Totals, TrendBucket};

const BAR_WIDTH: usize = 30;

pub fn totals_line(totals: &Totals) -> String {
    format!(
        "income {}  expenses {}  balance {}  savings {:.1}%",
        totals.total_income, totals.total_expenses, totals.balance, totals.savings_rate
    )
}

pub fn summary(report: &MonthReport) -> String {
    let mut out = String::new();
    let totals = &report.totals;

    out.push_str(&format!("Month {}\n", report.month));
    out.push_str(&format!("  Income        {:>12}\n", totals.total_income));
    out.push_str(&format!("  Expenses      {:>12}\n", totals.total_expenses));
    out.push_str(&format!("  Balance       {:>12}\n", totals.balance));
    out.push_str(&format!("  Taxes         {:>12}\n", totals.tax_total));
    out.push_str(&format!("  Savings rate  {:>11.1}%\n", totals.savings_rate));

    out.push_str("\nExpenses by category\n");
    if report.breakdown.is_empty() {
        out.push_str("  (none)\n");
    }
    for item in &report.breakdown {
        out.push_str(&format!(
            "  {:<10} {:>12} {:>5.1}%\n",
            item.category.label(),
            item.total,
            share(item.total, totals.total_expenses)
        ));
    }

    out.push_str("\nTrend\n");
    out.push_str(&trend(&report.trend));
    out
}

fn share(part: MoneyCents, whole: MoneyCents) -> f64 {
    if whole.is_positive() {
        part.as_f64() / whole.as_f64() * 100.0
    } else {
        0.0
    }
}

fn bar(value: MoneyCents, max: MoneyCents, fill: char) -> String {
    if !max.is_positive() {
        return String::new();
    }
    let len = (value.as_f64() / max.as_f64() * BAR_WIDTH as f64).round() as usize;
    std::iter::repeat_n(fill, len).collect()
}

pub fn trend(buckets: &[TrendBucket]) -> String {
    let max = buckets
        .iter()
        .flat_map(|b| [b.income, b.expense])
        .max()
        .unwrap_or(MoneyCents::ZERO);

    let mut out = String::new();
    for bucket in buckets {
        out.push_str(&format!(
            "  {} {}  + {:<width$} {}\n",
            bucket.label(),
            bucket.month.year(),
            bar(bucket.income, max, '#'),
            bucket.income,
            width = BAR_WIDTH
        ));
        out.push_str(&format!(
            "           - {:<width$} {}\n",
            bar(bucket.expense, max, '='),
            bucket.expense,
            width = BAR_WIDTH
        ));
    }
    out
}

pub fn table(rows: &[&Entry]) -> String {
    if rows.is_empty() {
        return "No transactions.\n".to_string();
    }
    let mut out = String::new();
    for entry in rows {
        let sign = if entry.is_income { '+' } else { '-' };
        out.push_str(&format!(
            "{:<10}  {:<9} {sign}{:>11}  {}  [{}]\n",
            entry.date,
            entry.category.label(),
            entry.amount,
            entry.name,
            entry.id
        ));
    }
    out.push_str(&format!("{} transaction(s)\n", rows.len()));
    out
}

#[cfg(test)]
mod tests {
    use engine::{Category, YearMonth};

    use super::*;

    fn bucket(month: u32, income: i64, expense: i64) -> TrendBucket {
        TrendBucket {
            month: YearMonth::new(2024, month).unwrap(),
            income: MoneyCents::from_units(income),
            expense: MoneyCents::from_units(expense),
        }
    }

    #[test]
    fn bars_scale_to_largest_value() {
        let text = trend(&[bucket(1, 100, 50), bucket(2, 0, 0)]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains(&"#".repeat(BAR_WIDTH)));
        assert!(lines[1].contains(&"=".repeat(BAR_WIDTH / 2)));
        assert!(!lines[1].contains(&"=".repeat(BAR_WIDTH / 2 + 1)));
        assert!(lines[2].starts_with("  Feb 2024"));
    }

    #[test]
    fn table_lists_rows_and_count() {
        let entry = Entry {
            id: "abc".to_string(),
            name: "Rent".to_string(),
            amount: MoneyCents::from_units(900),
            category: Category::Fixed,
            is_income: false,
            details: None,
            date: "2024-02-01".to_string(),
        };
        let text = table(&[&entry]);
        assert!(text.contains("Rent"));
        assert!(text.contains("-     900.00"));
        assert!(text.ends_with("1 transaction(s)\n"));
    }

    #[test]
    fn share_guards_zero_total() {
        assert_eq!(share(MoneyCents::new(10), MoneyCents::ZERO), 0.0);
        assert_eq!(share(MoneyCents::new(25), MoneyCents::new(100)), 25.0);
    }

    #[test]
    fn summary_of_empty_month() {
        let reference = YearMonth::new(2024, 2).unwrap().first_day();
        let report = MonthReport::compute(&[], reference, 2);
        let text = summary(&report);
        assert!(text.starts_with("Month 2024-02\n"));
        assert!(text.contains("Expenses by category\n  (none)\n"));
        assert!(text.contains("  Jan 2024"));
        assert!(text.ends_with('\n'));
    }
}
