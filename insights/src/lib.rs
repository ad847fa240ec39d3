//! Insights Crate
//!
//! Derived statistics for the practice dashboard. Every function here is a
//! pure computation over slices of records fetched from the backend. There
//! is no I/O and no caching, so callers simply recompute after each refetch.
//!
//! # Modules
//!
//! - `cases`: totals, per-status counts and the task completion rate
//! - `clients`: totals per client type
//! - `finance`: received / spent / pending sums and the resulting balance
//! - `breakdown`: generic group-by with percentages, first-seen key order
//! - `agenda`: open tasks laid out by due date
//!
//! # Example
//!
//! ```rust,ignore
//! use insights::{CaseStats, FinanceSummary};
//!
//! let cases = CaseStats::compute(&cases);
//! let money = FinanceSummary::compute(&payments, &expenses);
//! println!("{}% done, balance {}", cases.completion_rate, money.balance);
//! ```

pub mod agenda;
pub mod breakdown;
pub mod cases;
pub mod clients;
pub mod finance;

pub use breakdown::{Breakdown, BreakdownEntry};
pub use cases::CaseStats;
pub use clients::ClientStats;
pub use finance::{CaseFinance, FinanceSummary};
