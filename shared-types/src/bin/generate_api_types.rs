use shared_types::*;
use std::fs;
use std::path::PathBuf;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = Vec::new();

    // Client types
    types.push(clean_type(ClientType::export_to_string()?));
    types.push(clean_type(ClientDetails::export_to_string()?));
    types.push(clean_type(ContactInfo::export_to_string()?));
    types.push(clean_type(Client::export_to_string()?));
    types.push(clean_type(ClientPayload::export_to_string()?));

    // Case types
    types.push(clean_type(CaseStatus::export_to_string()?));
    types.push(clean_type(Case::export_to_string()?));
    types.push(clean_type(CreateCaseRequest::export_to_string()?));
    types.push(clean_type(UpdateCaseRequest::export_to_string()?));

    // Payment types
    types.push(clean_type(PaymentStatus::export_to_string()?));
    types.push(clean_type(Payment::export_to_string()?));
    types.push(clean_type(CreatePaymentRequest::export_to_string()?));
    types.push(clean_type(UpdatePaymentRequest::export_to_string()?));

    // Expense types
    types.push(clean_type(ExpenseStatus::export_to_string()?));
    types.push(clean_type(Expense::export_to_string()?));
    types.push(clean_type(CreateExpenseRequest::export_to_string()?));
    types.push(clean_type(UpdateExpenseRequest::export_to_string()?));

    // Task types
    types.push(clean_type(Task::export_to_string()?));
    types.push(clean_type(CreateTaskRequest::export_to_string()?));
    types.push(clean_type(UpdateTaskRequest::export_to_string()?));

    // Output file, e.g. `generate_api_types web/src/api-types.ts`
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("bindings/api-types.ts"));
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let output = types.join("\n");
    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

/// Everything lands in one file, so cross-file imports and the per-file
/// banner are dropped.
fn clean_type(type_def: String) -> String {
    let kept: Vec<&str> = type_def
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type") && !trimmed.contains("This file was generated")
        })
        .collect();

    format!("{}\n", kept.join("\n").trim())
}
