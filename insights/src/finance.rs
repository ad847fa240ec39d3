use shared_types::{Expense, ExpenseStatus, Payment, PaymentStatus};
use std::collections::HashMap;

/// Figures for the finance tab header cards
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinanceSummary {
    pub total_received: f64,
    pub total_actual_expenses: f64,
    pub pending: f64,
    pub refunded: f64,
    pub planned_expenses: f64,
    /// `total_received - total_actual_expenses`
    pub balance: f64,
}

impl FinanceSummary {
    pub fn compute(payments: &[Payment], expenses: &[Expense]) -> Self {
        let total_received = sum_payments(payments, PaymentStatus::Received);
        let total_actual_expenses = sum_expenses(expenses, ExpenseStatus::Actual);

        Self {
            total_received,
            total_actual_expenses,
            pending: sum_payments(payments, PaymentStatus::Pending),
            refunded: sum_payments(payments, PaymentStatus::Refunded),
            planned_expenses: sum_expenses(expenses, ExpenseStatus::Planned),
            balance: total_received - total_actual_expenses,
        }
    }
}

pub fn sum_payments(payments: &[Payment], status: PaymentStatus) -> f64 {
    payments
        .iter()
        .filter(|p| p.status == status)
        .map(|p| p.amount)
        .sum()
}

pub fn sum_expenses(expenses: &[Expense], status: ExpenseStatus) -> f64 {
    expenses
        .iter()
        .filter(|e| e.status == status)
        .map(|e| e.amount)
        .sum()
}

/// Money in and out for a single case
#[derive(Debug, Clone, PartialEq)]
pub struct CaseFinance {
    pub case_id: i64,
    pub case_title: Option<String>,
    pub received: f64,
    pub pending: f64,
    pub spent: f64,
    pub balance: f64,
}

/// Per-case totals, in the order cases first appear (payments before expenses).
pub fn by_case(payments: &[Payment], expenses: &[Expense]) -> Vec<CaseFinance> {
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut rows: Vec<CaseFinance> = Vec::new();

    for payment in payments {
        let row = row_for(&mut index, &mut rows, payment.case_id, &payment.case_title);
        match payment.status {
            PaymentStatus::Received => row.received += payment.amount,
            PaymentStatus::Pending => row.pending += payment.amount,
            PaymentStatus::Refunded => {}
        }
    }
    for expense in expenses {
        let row = row_for(&mut index, &mut rows, expense.case_id, &expense.case_title);
        if expense.status == ExpenseStatus::Actual {
            row.spent += expense.amount;
        }
    }

    for row in &mut rows {
        row.balance = row.received - row.spent;
    }
    rows
}

fn row_for<'a>(
    index: &mut HashMap<i64, usize>,
    rows: &'a mut Vec<CaseFinance>,
    case_id: i64,
    title: &Option<String>,
) -> &'a mut CaseFinance {
    let slot = *index.entry(case_id).or_insert_with(|| {
        rows.push(CaseFinance {
            case_id,
            case_title: None,
            received: 0.0,
            pending: 0.0,
            spent: 0.0,
            balance: 0.0,
        });
        rows.len() - 1
    });

    let row = &mut rows[slot];
    if row.case_title.is_none() {
        row.case_title = title.clone();
    }
    row
}
