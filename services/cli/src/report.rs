use crate::cli::{ChecklistArgs, SummaryArgs};
use crate::infra::resolve_reference_date;
use loan_checklist::config::{AppConfig, OutputFormat};
use loan_checklist::error::AppError;
use loan_checklist::workflows::checklist::{
    ChecklistReport, DocumentRequirement, LoanSummary, RequirementCategory, RequirementStatus,
};
use loan_checklist::workflows::mismo::MismoDealImporter;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

pub(crate) fn run_checklist(args: ChecklistArgs, config: &AppConfig) -> Result<(), AppError> {
    let reference_date = resolve_reference_date(args.today, config.checklist.reference_date);
    let report = load_report(&args.xml, reference_date)?;

    match args.format.unwrap_or(config.checklist.format) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", render_checklist(&report)),
    }

    Ok(())
}

pub(crate) fn run_summary(args: SummaryArgs, config: &AppConfig) -> Result<(), AppError> {
    let reference_date = resolve_reference_date(args.today, config.checklist.reference_date);
    let report = load_report(&args.xml, reference_date)?;
    print!("{}", render_summary(&report.summary));
    Ok(())
}

fn load_report(
    path: &Path,
    reference_date: chrono::NaiveDate,
) -> Result<ChecklistReport, AppError> {
    let deal = MismoDealImporter::from_path(path)?;
    info!(path = %path.display(), %reference_date, "evaluating loan file");
    Ok(ChecklistReport::build(&deal, reference_date))
}

pub(crate) fn render_summary(summary: &LoanSummary) -> String {
    let mut out = String::new();
    let ltv = summary
        .ltv
        .map(|ltv| format!("{ltv:.1}%"))
        .unwrap_or_else(|| "unknown".to_string());

    let _ = writeln!(
        out,
        "{} {} | {} | {} ({} unit{})",
        summary.program.label(),
        summary.purpose.label(),
        summary.occupancy.label(),
        summary.property_type.label(),
        summary.units,
        if summary.units == 1 { "" } else { "s" }
    );
    let _ = writeln!(
        out,
        "LTV {ltv} | {} borrower(s) | complexity {}",
        summary.borrower_count,
        summary.tier.label()
    );

    let flags = summary.flags;
    let active: Vec<&str> = [
        (flags.self_employed, "self-employed"),
        (flags.variable_income, "variable income"),
        (flags.non_citizen, "non-citizen borrower"),
        (flags.derogatory_credit, "derogatory credit"),
        (flags.employment_gaps, "employment gaps"),
        (flags.gift_funds, "gift funds"),
        (flags.investment_reo, "investment REO"),
    ]
    .into_iter()
    .filter_map(|(set, label)| set.then_some(label))
    .collect();

    if active.is_empty() {
        let _ = writeln!(out, "Flags: none");
    } else {
        let _ = writeln!(out, "Flags: {}", active.join(", "));
    }
    out
}

pub(crate) fn render_checklist(report: &ChecklistReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Loan checklist (evaluated {})", report.reference_date);
    out.push_str(&render_summary(&report.summary));

    for category in RequirementCategory::ALL {
        let items = report.requirements.bucket(category);
        let _ = writeln!(out, "\n{} ({})", section_title(category), items.len());
        if items.is_empty() {
            let _ = writeln!(out, "  none");
        }
        for item in items {
            render_item(&mut out, item);
        }
    }

    let requirements = &report.requirements;
    let _ = writeln!(
        out,
        "\n{} required, {} conditional, {} verified",
        requirements.count_with_status(RequirementStatus::Required),
        requirements.count_with_status(RequirementStatus::Conditional),
        requirements.count_with_status(RequirementStatus::Ok)
    );
    out
}

fn section_title(category: RequirementCategory) -> &'static str {
    match category {
        RequirementCategory::Income => "Income",
        RequirementCategory::General => "General",
        RequirementCategory::Assets => "Assets",
        RequirementCategory::Credit => "Credit",
    }
}

fn render_item(out: &mut String, item: &DocumentRequirement) {
    let marker = match item.status {
        RequirementStatus::Required => "[ ]",
        RequirementStatus::Conditional => "[?]",
        RequirementStatus::Ok => "[x]",
    };
    let _ = writeln!(out, "  {marker} {}", item.name);
    let _ = writeln!(out, "      {}", item.reason);
}
