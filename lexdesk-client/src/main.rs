use anyhow::{anyhow, Context};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Args as ClapArgs, Parser, Subcommand};
use lexdesk_client::forms::{
    EditCaseForm, FormSpec, NewCaseForm, NewClientForm, NewExpenseForm, NewPaymentForm,
};
use lexdesk_client::{
    views, Agenda, CrmConfig, CrmGateway, Dashboard, FinanceView, FormDialog, HttpGateway,
    TracingNotifier,
};
use shared_types::{CaseStatus, ClientType, ExpenseStatus, PaymentStatus, CASE_TYPE_SUGGESTIONS};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,

    /// Config file; defaults to the per-user lexdesk/client.toml
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summary cards and breakdowns
    Dashboard,
    Cases,
    Clients,
    /// Received, pending and spent money with per-case balances
    Finances,
    /// Open tasks for a month plus what is coming up
    Agenda {
        /// YYYY-MM, defaults to the current month
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        case_id: Option<i64>,
    },
    NewClient(NewClientArgs),
    NewCase(NewCaseArgs),
    SetCaseStatus {
        #[arg(long)]
        id: i64,
        #[arg(long, help = status_help(&CaseStatus::ALL.map(|s| s.as_str())))]
        status: String,
    },
    /// Move a case to the archive
    ArchiveCase {
        #[arg(long)]
        id: i64,
    },
    AddPayment(AddPaymentArgs),
    AddExpense(AddExpenseArgs),
    /// Mark a task done; its priority and assignee are kept
    CompleteTask {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        comment: Option<String>,
    },
}

#[derive(ClapArgs, Debug)]
struct NewClientArgs {
    #[arg(
        long = "type",
        default_value = "individual",
        help = status_help(&ClientType::ALL.map(|t| t.as_str()))
    )]
    client_type: String,
    #[arg(long, default_value = "")]
    full_name: String,
    #[arg(long, default_value = "")]
    passport: String,
    #[arg(long, default_value = "")]
    date_of_birth: String,
    #[arg(long, default_value = "")]
    company_name: String,
    #[arg(long, default_value = "")]
    inn: String,
    #[arg(long, default_value = "")]
    kpp: String,
    #[arg(long, default_value = "")]
    ogrn: String,
    #[arg(long, default_value = "")]
    legal_address: String,
    /// Comma separated
    #[arg(long, default_value = "")]
    phones: String,
    /// Comma separated
    #[arg(long, default_value = "")]
    emails: String,
    #[arg(long, default_value = "")]
    address: String,
}

#[derive(ClapArgs, Debug)]
struct NewCaseArgs {
    #[arg(long)]
    internal_number: String,
    #[arg(long)]
    title: String,
    #[arg(long = "type", help = format!("Free text, e.g. {}", CASE_TYPE_SUGGESTIONS.join(", ")))]
    case_type: String,
    #[arg(long)]
    client_id: Option<i64>,
    #[arg(long, default_value = "")]
    external_number: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, help = status_help(&CaseStatus::ALL.map(|s| s.as_str())))]
    status: Option<String>,
}

#[derive(ClapArgs, Debug)]
struct AddPaymentArgs {
    #[arg(long)]
    case_id: i64,
    #[arg(long)]
    amount: String,
    /// YYYY-MM-DD, defaults to today
    #[arg(long)]
    date: Option<String>,
    #[arg(long, default_value = "")]
    purpose: String,
    #[arg(long, default_value = "")]
    document_number: String,
    #[arg(long, help = status_help(&PaymentStatus::ALL.map(|s| s.as_str())))]
    status: Option<String>,
}

#[derive(ClapArgs, Debug)]
struct AddExpenseArgs {
    #[arg(long)]
    case_id: i64,
    #[arg(long = "type")]
    expense_type: String,
    #[arg(long)]
    amount: String,
    /// YYYY-MM-DD, defaults to today
    #[arg(long)]
    date: Option<String>,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, help = status_help(&ExpenseStatus::ALL.map(|s| s.as_str())))]
    status: Option<String>,
}

/// Help line listing the accepted wire literals; English names work too
fn status_help(literals: &[&str]) -> String {
    format!("One of: {}", literals.join(", "))
}

fn init_tracing(log_file_path: Option<String>, level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("lexdesk.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn parse_month(input: Option<&str>, today: NaiveDate) -> anyhow::Result<(i32, u32)> {
    let Some(input) = input else {
        return Ok((today.year(), today.month()));
    };
    let first = NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{input}', expected YYYY-MM"))?;
    Ok((first.year(), first.month()))
}

fn parse_status<T>(input: Option<&str>) -> anyhow::Result<T>
where
    T: std::str::FromStr<Err = String> + Default,
{
    match input {
        Some(raw) => raw.parse::<T>().map_err(|e| anyhow!(e)),
        None => Ok(T::default()),
    }
}

/// Run a dialog through open, fill, and submit; then refetch the dashboard.
async fn run_form<S: FormSpec>(
    dashboard: &mut Dashboard,
    spec: S,
    fill: impl FnOnce(&mut S::Fields),
) -> anyhow::Result<()> {
    let mut dialog = FormDialog::new(spec, Arc::new(TracingNotifier));
    dialog.open();
    if let Some(fields) = dialog.fields_mut() {
        fill(fields);
    }

    let gateway = dashboard.gateway().clone();
    dialog.submit(gateway.as_ref()).await?;
    dashboard.refresh().await;
    Ok(())
}

async fn run(command: Command, gateway: Arc<dyn CrmGateway>) -> anyhow::Result<()> {
    let today = Local::now().date_naive();

    match command {
        Command::Dashboard => {
            let dashboard = Dashboard::load(gateway).await;
            print!("{}", views::render_dashboard(&dashboard.summary()));
        }
        Command::Cases => {
            let dashboard = Dashboard::load(gateway).await;
            print!("{}", views::render_cases(&dashboard.cases));
        }
        Command::Clients => {
            let dashboard = Dashboard::load(gateway).await;
            print!("{}", views::render_clients(&dashboard.clients));
        }
        Command::Finances => {
            let finances = FinanceView::load(gateway).await;
            print!(
                "{}",
                views::render_finances(
                    &finances.summary(),
                    &finances.expenses_by_type(),
                    &finances.by_case()
                )
            );
        }
        Command::Agenda { month, case_id } => {
            let (year, month) = parse_month(month.as_deref(), today)?;
            let agenda = Agenda::load(gateway, case_id).await;
            print!(
                "{}",
                views::render_agenda(
                    &agenda.month(year, month),
                    &agenda.upcoming(today, 10),
                    &agenda.overdue(today)
                )
            );
        }
        Command::NewClient(args) => {
            let client_type: ClientType = args.client_type.parse().map_err(|e: String| anyhow!(e))?;
            let mut dashboard = Dashboard::load(gateway).await;
            run_form(&mut dashboard, NewClientForm, |fields| {
                fields.client_type = client_type;
                fields.full_name = args.full_name;
                fields.passport_series_number = args.passport;
                fields.date_of_birth = args.date_of_birth;
                fields.company_name = args.company_name;
                fields.inn = args.inn;
                fields.kpp = args.kpp;
                fields.ogrn = args.ogrn;
                fields.legal_address = args.legal_address;
                fields.phones = args.phones;
                fields.emails = args.emails;
                fields.address = args.address;
            })
            .await?;
            print!("{}", views::render_clients(&dashboard.clients));
        }
        Command::NewCase(args) => {
            let status: CaseStatus = parse_status(args.status.as_deref())?;
            let mut dashboard = Dashboard::load(gateway).await;
            if let Some(client_id) = args.client_id {
                if dashboard.find_client(client_id).is_none() {
                    tracing::warn!("Client #{} is not in the loaded client list", client_id);
                }
            }
            run_form(&mut dashboard, NewCaseForm, |fields| {
                fields.internal_number = args.internal_number;
                fields.title = args.title;
                fields.case_type = args.case_type;
                fields.client_id = args.client_id;
                fields.external_number = args.external_number;
                fields.description = args.description;
                fields.status = status;
            })
            .await?;
            print!("{}", views::render_cases(&dashboard.cases));
        }
        Command::SetCaseStatus { id, status } => {
            let status: CaseStatus = parse_status(Some(&status))?;
            let mut dashboard = Dashboard::load(gateway).await;
            let case = dashboard
                .find_case(id)
                .cloned()
                .ok_or_else(|| anyhow!("Case #{id} not found"))?;
            run_form(&mut dashboard, EditCaseForm::new(case), |fields| {
                fields.status = status;
            })
            .await?;
            print!("{}", views::render_cases(&dashboard.cases));
        }
        Command::ArchiveCase { id } => {
            let mut dashboard = Dashboard::load(gateway).await;
            dashboard
                .gateway()
                .archive_case(id)
                .await
                .with_context(|| format!("Failed to archive case #{id}"))?;
            dashboard.refresh().await;
            print!("{}", views::render_cases(&dashboard.cases));
        }
        Command::AddPayment(args) => {
            let status: PaymentStatus = parse_status(args.status.as_deref())?;
            let mut dashboard = Dashboard::load(gateway.clone()).await;
            let client_id = dashboard.find_case(args.case_id).and_then(|c| c.client_id);
            run_form(
                &mut dashboard,
                NewPaymentForm::new(args.case_id, client_id, today),
                |fields| {
                    fields.amount = args.amount;
                    if let Some(date) = args.date {
                        fields.date = date;
                    }
                    fields.purpose = args.purpose;
                    fields.document_number = args.document_number;
                    fields.status = status;
                },
            )
            .await?;
            let finances = FinanceView::load(gateway).await;
            print!(
                "{}",
                views::render_finances(
                    &finances.summary(),
                    &finances.expenses_by_type(),
                    &finances.by_case()
                )
            );
        }
        Command::AddExpense(args) => {
            let status: ExpenseStatus = parse_status(args.status.as_deref())?;
            let mut dashboard = Dashboard::load(gateway.clone()).await;
            run_form(
                &mut dashboard,
                NewExpenseForm::new(args.case_id, today),
                |fields| {
                    fields.expense_type = args.expense_type;
                    fields.amount = args.amount;
                    if let Some(date) = args.date {
                        fields.date = date;
                    }
                    fields.description = args.description;
                    fields.status = status;
                },
            )
            .await?;
            let finances = FinanceView::load(gateway).await;
            print!(
                "{}",
                views::render_finances(
                    &finances.summary(),
                    &finances.expenses_by_type(),
                    &finances.by_case()
                )
            );
        }
        Command::CompleteTask { id, comment } => {
            let mut agenda = Agenda::load(gateway, None).await;
            agenda
                .complete_task(id, comment)
                .await
                .with_context(|| format!("Failed to complete task #{id}"))?;
            print!(
                "{}",
                views::render_agenda(
                    &agenda.month(today.year(), today.month()),
                    &agenda.upcoming(today, 10),
                    &agenda.overdue(today)
                )
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (config, config_path) =
        CrmConfig::load(args.config.as_deref()).context("Failed to load config")?;

    init_tracing(args.log_file_path, &config.logging.level);
    tracing::debug!("Config loaded from {:?}", config_path);

    let gateway: Arc<dyn CrmGateway> = Arc::new(HttpGateway::from_config(&config)?);
    run(args.command, gateway).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_new_case_help_lists_types_and_statuses() {
        let mut command = Args::command();
        let help = command
            .find_subcommand_mut("new-case")
            .unwrap()
            .render_help()
            .to_string();
        assert!(help.contains("Арбитраж"));
        assert!(help.contains("Медиация"));
        assert!(help.contains("завершено"));
    }

    #[test]
    fn test_add_payment_help_lists_statuses() {
        let mut command = Args::command();
        let help = command
            .find_subcommand_mut("add-payment")
            .unwrap()
            .render_help()
            .to_string();
        for status in PaymentStatus::ALL {
            assert!(help.contains(status.as_str()));
        }
    }

    #[test]
    fn test_parse_month() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 15).unwrap();
        assert_eq!(parse_month(None, today).unwrap(), (2025, 12));
        assert_eq!(parse_month(Some("2026-02"), today).unwrap(), (2026, 2));
        assert!(parse_month(Some("02.2026"), today).is_err());
    }
}
