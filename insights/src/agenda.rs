use chrono::{Datelike, NaiveDate};
use shared_types::Task;
use std::collections::BTreeMap;

/// Open tasks due in the given month, keyed by day.
pub fn tasks_by_day(tasks: &[Task], year: i32, month: u32) -> BTreeMap<NaiveDate, Vec<&Task>> {
    let mut days: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();

    for task in tasks.iter().filter(|t| !t.is_done()) {
        if let Some(due) = task.due_date {
            if due.year() == year && due.month() == month {
                days.entry(due).or_default().push(task);
            }
        }
    }

    days
}

/// Next open tasks due on or after `today`, soonest first.
pub fn upcoming(tasks: &[Task], today: NaiveDate, limit: usize) -> Vec<&Task> {
    let mut due: Vec<&Task> = tasks
        .iter()
        .filter(|t| !t.is_done())
        .filter(|t| t.due_date.is_some_and(|d| d >= today))
        .collect();

    // Stable sort keeps backend order for tasks due the same day
    due.sort_by_key(|t| t.due_date);
    due.truncate(limit);
    due
}

/// Open tasks whose due date has already passed
pub fn overdue(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| !t.is_done())
        .filter(|t| t.due_date.is_some_and(|d| d < today))
        .collect()
}
