//! Monthly aggregation over ledger contents.

use std::collections::{BTreeMap, BTreeSet};

use crate::ledger::{Category, Ledger, MonthKey, Transaction};

/// Relative slack allowed when checking that a breakdown never exceeds the
/// total it was drawn from; the two sums may accumulate in different orders.
const TOTAL_TOLERANCE: f64 = 1e-9;

/// Everything the monthly summary report displays.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub month: MonthKey,
    pub total_income: f64,
    pub total_expense: f64,
    pub top_categories: Vec<(Category, f64)>,
    pub tags: Vec<(String, f64)>,
    pub budget: Option<f64>,
}

pub struct SummaryService;

impl SummaryService {
    pub fn monthly_total_income(ledger: &Ledger, month: MonthKey) -> f64 {
        in_month(ledger, month)
            .filter(|transaction| transaction.is_income())
            .map(|transaction| transaction.amount)
            .sum()
    }

    pub fn monthly_total_expense(ledger: &Ledger, month: MonthKey) -> f64 {
        in_month(ledger, month)
            .filter(|transaction| transaction.is_expense())
            .map(|transaction| transaction.amount)
            .sum()
    }

    /// Expense totals per category. Only categories with at least one expense
    /// in the month appear.
    pub fn monthly_categorised_expenses(
        ledger: &Ledger,
        month: MonthKey,
    ) -> BTreeMap<Category, f64> {
        let mut totals = BTreeMap::new();
        for transaction in in_month(ledger, month) {
            if let Some(category) = transaction.category() {
                *totals.entry(category).or_insert(0.0) += transaction.amount;
            }
        }
        totals
    }

    /// Totals per tag across incomes and expenses alike. A tag repeated on
    /// one transaction counts that transaction once.
    pub fn monthly_tagged_transactions(ledger: &Ledger, month: MonthKey) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for transaction in in_month(ledger, month) {
            let distinct: BTreeSet<&str> = transaction.tags.iter().map(String::as_str).collect();
            for tag in distinct {
                *totals.entry(tag.to_string()).or_insert(0.0) += transaction.amount;
            }
        }
        totals
    }

    /// Highest-spending categories, at most `cap`, stopping at the first zero.
    pub fn top_categories(ledger: &Ledger, month: MonthKey, cap: usize) -> Vec<(Category, f64)> {
        rank_with_cutoff(Self::monthly_categorised_expenses(ledger, month), Some(cap))
    }

    /// Every tag with a nonzero total, largest first.
    pub fn ranked_tags(ledger: &Ledger, month: MonthKey) -> Vec<(String, f64)> {
        rank_with_cutoff(Self::monthly_tagged_transactions(ledger, month), None)
    }

    pub fn monthly_summary(ledger: &Ledger, month: MonthKey, category_cap: usize) -> MonthlySummary {
        let total_income = Self::monthly_total_income(ledger, month);
        let total_expense = Self::monthly_total_expense(ledger, month);
        let top_categories = Self::top_categories(ledger, month, category_cap);
        let tags = Self::ranked_tags(ledger, month);

        for (category, amount) in &top_categories {
            check_within(*amount, total_expense, "category", &category.to_string());
        }
        for (tag, amount) in &tags {
            check_within(*amount, total_income + total_expense, "tag", tag);
        }
        tracing::trace!(
            %month,
            total_income,
            total_expense,
            categories = top_categories.len(),
            tags = tags.len(),
            "monthly summary computed"
        );

        MonthlySummary {
            month,
            total_income,
            total_expense,
            top_categories,
            tags,
            budget: ledger.targets().budget(month),
        }
    }
}

/// Sorts entries by amount, largest first, then keeps entries until the
/// first zero amount or until `cap` entries are taken, whichever comes first.
///
/// The sort is stable, so equal amounts keep the order the entries arrived in.
pub fn rank_with_cutoff<K>(
    entries: impl IntoIterator<Item = (K, f64)>,
    cap: Option<usize>,
) -> Vec<(K, f64)> {
    let mut ranked: Vec<(K, f64)> = entries.into_iter().collect();
    ranked.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    ranked
        .into_iter()
        .take_while(|(_, amount)| *amount != 0.0)
        .take(cap.unwrap_or(usize::MAX))
        .collect()
}

fn in_month(ledger: &Ledger, month: MonthKey) -> impl Iterator<Item = &Transaction> {
    ledger
        .transactions()
        .iter()
        .filter(move |transaction| month.contains(transaction.date))
}

fn check_within(part: f64, total: f64, kind: &str, name: &str) {
    let slack = TOTAL_TOLERANCE * total.abs().max(1.0);
    if part > total + slack {
        tracing::error!(kind, name, part, total, "breakdown exceeds monthly total");
        debug_assert!(part <= total + slack, "{kind} `{name}` exceeds monthly total");
    }
}
