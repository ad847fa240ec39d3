//! Plain-text rendering for the terminal. Every function is pure and
//! returns the finished text.

use crate::dashboard::DashboardSummary;
use chrono::NaiveDate;
use insights::cases::case_progress;
use insights::{Breakdown, BreakdownEntry, CaseFinance, FinanceSummary};
use shared_types::{Case, Client, ClientDetails, Task};
use std::collections::BTreeMap;
use std::fmt::Display;

/// `1234567.5` -> `1 234 567,50 ₽`
pub fn format_money(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = (cents / 100).to_string();

    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    format!("{sign}{grouped},{:02} ₽", cents % 100)
}

fn format_percent(value: f64) -> String {
    format!("{:.0}%", value)
}

fn breakdown_lines<K: Display>(
    out: &mut String,
    breakdown: &Breakdown<K>,
    amount: impl Fn(&BreakdownEntry<K>) -> String,
) {
    if breakdown.entries.is_empty() {
        out.push_str("  (none)\n");
        return;
    }
    for entry in &breakdown.entries {
        out.push_str(&format!(
            "  {:<24} {:>16} {:>5}\n",
            entry.key.to_string(),
            amount(entry),
            format_percent(entry.percentage)
        ));
    }
}

pub fn render_dashboard(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Cases: {} total, {} active, {} completed\n",
        summary.cases.total, summary.cases.active, summary.cases.completed
    ));
    out.push_str(&format!(
        "Clients: {} total ({} individuals, {} organizations)\n",
        summary.clients.total, summary.clients.individuals, summary.clients.organizations
    ));
    out.push_str(&format!(
        "Task completion: {}\n",
        format_percent(summary.cases.completion_rate)
    ));

    out.push_str("\nBy status\n");
    let by_status = Breakdown {
        entries: summary
            .by_status
            .entries
            .iter()
            .map(|e| BreakdownEntry {
                key: e.key.label(),
                total: e.total,
                count: e.count,
                percentage: e.percentage,
            })
            .collect(),
        grand_total: summary.by_status.grand_total,
    };
    breakdown_lines(&mut out, &by_status, |e| e.count.to_string());

    out.push_str("\nBy type\n");
    breakdown_lines(&mut out, &summary.by_type, |e| e.count.to_string());
    out
}

pub fn render_cases(cases: &[Case]) -> String {
    if cases.is_empty() {
        return "No cases\n".to_string();
    }

    let mut out = String::new();
    for case in cases {
        out.push_str(&format!(
            "#{:<4} {:<10} {:<32} {:<12} {:<20} {:>4}\n",
            case.id,
            case.internal_number,
            case.title,
            case.status.label(),
            case.client_display_name().unwrap_or("-"),
            format_percent(case_progress(case))
        ));
    }
    out
}

pub fn render_clients(clients: &[Client]) -> String {
    if clients.is_empty() {
        return "No clients\n".to_string();
    }

    let mut out = String::new();
    for client in clients {
        let identity = match &client.details {
            ClientDetails::Individual { .. } => String::new(),
            ClientDetails::Organization { inn, .. } => inn
                .as_deref()
                .map(|inn| format!("ИНН {inn}"))
                .unwrap_or_default(),
        };
        out.push_str(&format!(
            "#{:<4} {:<8} {:<32} {:<16} {}\n",
            client.id,
            client.client_type().label(),
            client.display_name(),
            identity,
            client.contact_info.phones.join(", ")
        ));
    }
    out
}

pub fn render_finances(
    summary: &FinanceSummary,
    expenses_by_type: &Breakdown<String>,
    per_case: &[CaseFinance],
) -> String {
    let mut out = String::new();
    out.push_str(&format!("Received: {}\n", format_money(summary.total_received)));
    out.push_str(&format!("Pending:  {}\n", format_money(summary.pending)));
    out.push_str(&format!(
        "Expenses: {}\n",
        format_money(summary.total_actual_expenses)
    ));
    out.push_str(&format!("Balance:  {}\n", format_money(summary.balance)));

    out.push_str("\nExpenses by category\n");
    breakdown_lines(&mut out, expenses_by_type, |e| format_money(e.total));

    out.push_str("\nBy case\n");
    if per_case.is_empty() {
        out.push_str("  (none)\n");
    }
    for row in per_case {
        let title = row
            .case_title
            .clone()
            .unwrap_or_else(|| format!("case #{}", row.case_id));
        out.push_str(&format!(
            "  {:<32} {:>16} {:>16} {:>16}\n",
            title,
            format_money(row.received),
            format_money(row.spent),
            format_money(row.balance)
        ));
    }
    out
}

fn task_line(task: &Task) -> String {
    let due = task
        .due_date
        .map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|| "--.--.----".to_string());
    match &task.case_title {
        Some(case_title) => format!("  {due}  {} ({case_title})\n", task.title),
        None => format!("  {due}  {}\n", task.title),
    }
}

pub fn render_agenda(
    month: &BTreeMap<NaiveDate, Vec<&Task>>,
    upcoming: &[&Task],
    overdue: &[&Task],
) -> String {
    let mut out = String::new();

    if !overdue.is_empty() {
        out.push_str("Overdue\n");
        for task in overdue {
            out.push_str(&task_line(task));
        }
        out.push('\n');
    }

    out.push_str("This month\n");
    if month.is_empty() {
        out.push_str("  (nothing due)\n");
    }
    for (day, tasks) in month {
        out.push_str(&format!("{}\n", day.format("%d.%m")));
        for task in tasks {
            out.push_str(&format!("    {}\n", task.title));
        }
    }

    out.push_str("\nUpcoming\n");
    if upcoming.is_empty() {
        out.push_str("  (nothing due)\n");
    }
    for task in upcoming {
        out.push_str(&task_line(task));
    }
    out
}
