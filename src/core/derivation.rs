//! Pure views computed from ledger state on every read.

use std::{cmp::Ordering, collections::BTreeMap, fmt, str::FromStr};

use crate::{
    currency::CurrencyCode,
    errors::LedgerError,
    ledger::{Category, CategoryLimits, Expense, LedgerState, PlanningMode},
};

/// Ordering applied by [`filter_sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Highest identifier (most recently created) first.
    #[default]
    Newest,
    Oldest,
    AmountDesc,
    AmountAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Newest,
        SortKey::Oldest,
        SortKey::AmountDesc,
        SortKey::AmountAsc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::AmountDesc => "amount-desc",
            SortKey::AmountAsc => "amount-asc",
        }
    }

    fn compare(&self, a: &Expense, b: &Expense) -> Ordering {
        match self {
            SortKey::Newest => b.id.cmp(&a.id),
            SortKey::Oldest => a.id.cmp(&b.id),
            SortKey::AmountDesc => b.amount.total_cmp(&a.amount),
            SortKey::AmountAsc => a.amount.total_cmp(&b.amount),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "amount-desc" | "amt-high" => Ok(SortKey::AmountDesc),
            "amount-asc" | "amt-low" => Ok(SortKey::AmountAsc),
            other => Err(LedgerError::validation(format!(
                "unknown sort key `{}` (expected newest, oldest, amount-desc or amount-asc)",
                other
            ))),
        }
    }
}

pub fn total<'a>(records: impl IntoIterator<Item = &'a Expense>) -> f64 {
    records.into_iter().map(|record| record.amount).sum()
}

/// Sum per category across the full fixed enumeration, zeros included.
pub fn category_totals<'a>(
    records: impl IntoIterator<Item = &'a Expense>,
) -> BTreeMap<Category, f64> {
    let mut totals: BTreeMap<Category, f64> =
        Category::ALL.into_iter().map(|c| (c, 0.0)).collect();
    for record in records {
        *totals.entry(record.category).or_insert(0.0) += record.amount;
    }
    totals
}

/// Non-zero category sums in the fixed category order.
pub fn breakdown<'a>(records: impl IntoIterator<Item = &'a Expense>) -> Vec<(Category, f64)> {
    category_totals(records)
        .into_iter()
        .filter(|(_, sum)| *sum != 0.0)
        .collect()
}

/// Categories whose total strictly exceeds a positive limit.
pub fn over_budget_categories<'a>(
    records: impl IntoIterator<Item = &'a Expense>,
    limits: &CategoryLimits,
) -> Vec<Category> {
    let totals = category_totals(records);
    limits
        .iter()
        .filter(|(category, limit)| totals.get(category).copied().unwrap_or(0.0) > *limit)
        .map(|(category, _)| category)
        .collect()
}

pub fn projected(total: f64, buffer_percent: f64) -> f64 {
    (total * (1.0 + buffer_percent / 100.0)).round()
}

/// Percentage of `goal` consumed by `total`, clamped to `0..=100`. A goal of
/// zero is treated as one so the result stays finite.
pub fn progress(total: f64, goal: f64) -> u8 {
    let denominator = if goal.is_finite() && goal > 0.0 { goal } else { 1.0 };
    (total / denominator * 100.0).round().clamp(0.0, 100.0) as u8
}

pub fn suggested_goal(total: f64, mode: PlanningMode) -> f64 {
    match mode {
        PlanningMode::Trip => (total * 1.25).round().max(500.0),
        PlanningMode::Monthly => (total * 1.2).round().max(800.0),
    }
}

/// Keeps records whose name, category or date contains `query`
/// (case-insensitive), then orders them by `key`. The sort is stable, so
/// records with equal keys keep their input order.
pub fn filter_sort<'a>(
    records: impl IntoIterator<Item = &'a Expense>,
    query: &str,
    key: SortKey,
) -> Vec<&'a Expense> {
    let needle = query.trim().to_lowercase();
    let mut matches: Vec<&Expense> = records
        .into_iter()
        .filter(|record| needle.is_empty() || matches_query(record, &needle))
        .collect();
    matches.sort_by(|a, b| key.compare(a, b));
    matches
}

fn matches_query(record: &Expense, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle)
        || record.category.as_str().to_lowercase().contains(needle)
        || record.date.to_string().contains(needle)
}

/// Headline figures shown alongside a ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: f64,
    pub goal: f64,
    pub projected: f64,
    pub buffer_percent: f64,
    pub progress: u8,
    pub recurring_count: usize,
    pub over_budget: Vec<Category>,
    pub currency: CurrencyCode,
    pub mode: PlanningMode,
}

/// Derived views available on any ledger state.
pub trait LedgerDerivations {
    fn total(&self) -> f64;
    fn category_totals(&self) -> BTreeMap<Category, f64>;
    fn breakdown(&self) -> Vec<(Category, f64)>;
    fn over_budget_categories(&self, limits: &CategoryLimits) -> Vec<Category>;
    fn projected(&self, buffer_percent: f64) -> f64;
    fn progress(&self, goal: f64) -> u8;
    fn recurring_count(&self) -> usize;
    fn suggested_goal(&self) -> f64;
    fn filter_sort(&self, query: &str, key: SortKey) -> Vec<&Expense>;
    fn summary(&self, limits: &CategoryLimits, buffer_percent: f64) -> Summary;
}

impl LedgerDerivations for LedgerState {
    fn total(&self) -> f64 {
        total(&self.records)
    }

    fn category_totals(&self) -> BTreeMap<Category, f64> {
        category_totals(&self.records)
    }

    fn breakdown(&self) -> Vec<(Category, f64)> {
        breakdown(&self.records)
    }

    fn over_budget_categories(&self, limits: &CategoryLimits) -> Vec<Category> {
        over_budget_categories(&self.records, limits)
    }

    fn projected(&self, buffer_percent: f64) -> f64 {
        projected(self.total(), buffer_percent)
    }

    fn progress(&self, goal: f64) -> u8 {
        progress(self.total(), goal)
    }

    fn recurring_count(&self) -> usize {
        self.records.iter().filter(|record| record.recurring).count()
    }

    fn suggested_goal(&self) -> f64 {
        suggested_goal(self.total(), self.mode)
    }

    fn filter_sort(&self, query: &str, key: SortKey) -> Vec<&Expense> {
        filter_sort(&self.records, query, key)
    }

    fn summary(&self, limits: &CategoryLimits, buffer_percent: f64) -> Summary {
        let total = self.total();
        Summary {
            total,
            goal: self.goal,
            projected: projected(total, buffer_percent),
            buffer_percent,
            progress: progress(total, self.goal),
            recurring_count: self.recurring_count(),
            over_budget: self.over_budget_categories(limits),
            currency: self.currency.clone(),
            mode: self.mode,
        }
    }
}
