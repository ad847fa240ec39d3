use crate::breakdown::percentage_of;
use shared_types::{Case, CaseStatus};

/// Summary card figures for the cases tab
#[derive(Debug, Clone, PartialEq)]
pub struct CaseStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    /// Percentage of finished tasks across all cases, 0..=100
    pub completion_rate: f64,
}

impl CaseStats {
    pub fn compute(cases: &[Case]) -> Self {
        Self {
            total: cases.len(),
            active: cases.iter().filter(|c| c.status.is_active()).count(),
            completed: count_by_status(cases, CaseStatus::Completed),
            completion_rate: completion_rate(cases),
        }
    }
}

pub fn count_by_status(cases: &[Case], status: CaseStatus) -> usize {
    cases.iter().filter(|c| c.status == status).count()
}

/// `100 * Σ completed_tasks / Σ tasks_count`; 0 when no case has tasks.
pub fn completion_rate(cases: &[Case]) -> f64 {
    let total: i64 = cases.iter().map(|c| c.tasks_count.max(0)).sum();
    let completed: i64 = cases.iter().map(|c| c.completed_tasks.max(0)).sum();
    percentage_of(completed as f64, total as f64).clamp(0.0, 100.0)
}

/// Progress bar value for a single case
pub fn case_progress(case: &Case) -> f64 {
    completion_rate(std::slice::from_ref(case))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::case;

    #[test]
    fn test_completion_rate_without_tasks_is_zero() {
        let cases = vec![case(1, CaseStatus::Open, 0, 0), case(2, CaseStatus::Open, 0, 0)];
        let rate = completion_rate(&cases);
        assert_eq!(rate, 0.0);
        assert!(!rate.is_nan());

        assert_eq!(completion_rate(&[]), 0.0);
    }

    #[test]
    fn test_completion_rate_across_cases() {
        let cases = vec![
            case(1, CaseStatus::InProgress, 4, 1),
            case(2, CaseStatus::Open, 6, 4),
        ];
        assert_eq!(completion_rate(&cases), 50.0);
    }

    #[test]
    fn test_completion_rate_stays_in_range() {
        // Inconsistent data from the backend must not leave the 0..=100 range
        let cases = vec![case(1, CaseStatus::Completed, 2, 5)];
        assert_eq!(completion_rate(&cases), 100.0);
    }

    #[test]
    fn test_case_stats() {
        let cases = vec![
            case(1, CaseStatus::Open, 2, 2),
            case(2, CaseStatus::InProgress, 2, 0),
            case(3, CaseStatus::Paused, 0, 0),
            case(4, CaseStatus::Completed, 4, 4),
            case(5, CaseStatus::Archived, 0, 0),
        ];

        let stats = CaseStats::compute(&cases);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.completion_rate, 75.0);
        assert_eq!(count_by_status(&cases, CaseStatus::Paused), 1);
    }

    #[test]
    fn test_case_progress() {
        assert_eq!(case_progress(&case(1, CaseStatus::Open, 4, 1)), 25.0);
        assert_eq!(case_progress(&case(2, CaseStatus::Open, 0, 0)), 0.0);
    }
}
