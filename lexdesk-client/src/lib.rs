//! Client side of the practice management system: backend gateway, form
//! lifecycle, dashboard composition and terminal views.

pub mod config;
pub mod dashboard;
pub mod forms;
pub mod gateway;
pub mod notifier;
pub mod views;

pub use config::CrmConfig;
pub use dashboard::{Agenda, Dashboard, DashboardSummary, FinanceView};
pub use forms::{FormDialog, FormError, FormSpec, FormState, SubmitOutcome};
pub use gateway::{CrmGateway, GatewayError, GatewayResult, HttpGateway};
pub use notifier::{Notification, NotificationKind, Notifier, TracingNotifier};
