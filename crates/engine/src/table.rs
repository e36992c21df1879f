//! Filtering and ordering for the transaction table.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

use crate::{Category, Entry};

/// Category tab plus free-text search, as shown above the table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableFilter {
    /// `None` shows every category.
    pub category: Option<Category>,
    pub query: String,
}

impl TableFilter {
    pub fn category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn query(mut self, query: &str) -> Self {
        self.query = query.to_string();
        self
    }

    /// Whether `entry` passes the tab and the search.
    ///
    /// The search matches a case-insensitive substring of the name, or a
    /// substring of the amount in its shortest form (`12.5`, `900`).
    #[must_use]
    pub fn matches(&self, entry: &Entry) -> bool {
        if let Some(category) = self.category
            && entry.category != category
        {
            return false;
        }

        let query = normalize(&self.query);
        if query.is_empty() {
            return true;
        }
        normalize(&entry.name).contains(&query) || entry.amount.to_plain_string().contains(&query)
    }
}

fn normalize(value: &str) -> String {
    value.trim().nfkc().collect::<String>().to_lowercase()
}

/// Entries passing `filter`, newest first.
///
/// Entries with the same date keep their relative order; undated entries go last.
#[must_use]
pub fn table_rows<'a>(
    entries: impl IntoIterator<Item = &'a Entry>,
    filter: &TableFilter,
) -> Vec<&'a Entry> {
    let mut rows: Vec<&Entry> = entries
        .into_iter()
        .filter(|entry| filter.matches(entry))
        .collect();
    rows.sort_by(|a, b| match (a.date(), b.date()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MoneyCents;

    fn entry(id: &str, name: &str, cents: i64, category: Category, date: &str) -> Entry {
        Entry {
            id: id.to_string(),
            name: name.to_string(),
            amount: MoneyCents::new(cents),
            category,
            is_income: false,
            details: None,
            date: date.to_string(),
        }
    }

    fn ids(rows: &[&Entry]) -> Vec<String> {
        rows.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn sorts_newest_first_with_stable_ties() {
        let entries = vec![
            entry("a", "Coffee", 350, Category::Personal, "2024-02-01"),
            entry("b", "Rent", 90_000, Category::Fixed, "2024-02-10"),
            entry("c", "Tea", 200, Category::Personal, "2024-02-01"),
            entry("d", "???", 100, Category::Personal, "garbage"),
        ];
        let rows = table_rows(&entries, &TableFilter::default());
        assert_eq!(ids(&rows), ["b", "a", "c", "d"]);
    }

    #[test]
    fn filters_by_category_tab() {
        let entries = vec![
            entry("a", "Coffee", 350, Category::Personal, "2024-02-01"),
            entry("b", "Rent", 90_000, Category::Fixed, "2024-02-10"),
        ];
        let filter = TableFilter::default().category(Some(Category::Fixed));
        assert_eq!(ids(&table_rows(&entries, &filter)), ["b"]);
    }

    #[test]
    fn search_matches_name_or_amount() {
        let entries = vec![
            entry("a", "Coffee Beans", 350, Category::Personal, "2024-02-01"),
            entry("b", "Rent", 90_000, Category::Fixed, "2024-02-10"),
        ];
        let by_name = TableFilter::default().query("  BEANS");
        assert_eq!(ids(&table_rows(&entries, &by_name)), ["a"]);

        let by_amount = TableFilter::default().query("900");
        assert_eq!(ids(&table_rows(&entries, &by_amount)), ["b"]);
    }

    #[test]
    fn amount_search_uses_shortest_decimal_form() {
        let entries = vec![entry("a", "Coffee", 350, Category::Personal, "2024-02-01")];
        let short = TableFilter::default().query("3.5");
        assert_eq!(ids(&table_rows(&entries, &short)), ["a"]);

        let padded = TableFilter::default().query("3.50");
        assert!(table_rows(&entries, &padded).is_empty());
    }
}
