use shared_types::{Case, Expense, Payment};
use std::collections::HashMap;
use std::hash::Hash;

/// One group of a [`Breakdown`]
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownEntry<K> {
    pub key: K,
    pub total: f64,
    pub count: usize,
    /// Share of the grand total, 0..=100
    pub percentage: f64,
}

/// Group-by result that keeps groups in the order their keys were first seen.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown<K> {
    pub entries: Vec<BreakdownEntry<K>>,
    pub grand_total: f64,
}

impl<K> Breakdown<K>
where
    K: Clone + Eq + Hash,
{
    /// Sum `value` per key
    pub fn sum_by<T>(
        items: &[T],
        key: impl Fn(&T) -> K,
        value: impl Fn(&T) -> f64,
    ) -> Self {
        let mut index: HashMap<K, usize> = HashMap::new();
        let mut entries: Vec<BreakdownEntry<K>> = Vec::new();

        for item in items {
            let k = key(item);
            let slot = *index.entry(k.clone()).or_insert_with(|| {
                entries.push(BreakdownEntry {
                    key: k,
                    total: 0.0,
                    count: 0,
                    percentage: 0.0,
                });
                entries.len() - 1
            });
            entries[slot].total += value(item);
            entries[slot].count += 1;
        }

        let grand_total: f64 = entries.iter().map(|e| e.total).sum();
        for entry in &mut entries {
            entry.percentage = percentage_of(entry.total, grand_total);
        }

        Self {
            entries,
            grand_total,
        }
    }

    /// Count items per key; `total` equals `count`
    pub fn count_by<T>(items: &[T], key: impl Fn(&T) -> K) -> Self {
        Self::sum_by(items, key, |_| 1.0)
    }

    pub fn get(&self, key: &K) -> Option<&BreakdownEntry<K>> {
        self.entries.iter().find(|e| &e.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `100 * part / total`, or 0 when there is nothing to divide by
pub fn percentage_of(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        part / total * 100.0
    }
}

pub fn cases_by_status(cases: &[Case]) -> Breakdown<shared_types::CaseStatus> {
    Breakdown::count_by(cases, |c| c.status)
}

pub fn cases_by_type(cases: &[Case]) -> Breakdown<String> {
    Breakdown::count_by(cases, |c| c.case_type.clone())
}

pub fn expenses_by_type(expenses: &[Expense]) -> Breakdown<String> {
    Breakdown::sum_by(expenses, |e| e.expense_type.clone(), |e| e.amount)
}

pub fn payments_by_status(payments: &[Payment]) -> Breakdown<shared_types::PaymentStatus> {
    Breakdown::sum_by(payments, |p| p.status, |p| p.amount)
}
