use super::super::coverage::residence_coverage;
use super::super::domain::{Borrower, Citizenship};
use super::super::requirements::{ChecklistBuilder, RequirementCategory::*};
use super::RuleContext;

pub(super) fn apply(ctx: &RuleContext<'_>, builder: &mut ChecklistBuilder) {
    for borrower in &ctx.deal.borrowers {
        apply_identity(borrower, builder);
        apply_residency(borrower, builder);
        apply_declarations(borrower, builder);
        apply_residence_history(borrower, builder);
    }
}

fn apply_identity(borrower: &Borrower, builder: &mut ChecklistBuilder) {
    builder.required(
        General,
        "Government-issued photo ID",
        format!("Identity verification for {}", borrower.name),
    );
}

fn apply_residency(borrower: &Borrower, builder: &mut ChecklistBuilder) {
    let name = &borrower.name;
    match borrower.declarations.citizenship {
        Some(Citizenship::UsCitizen) => {}
        Some(Citizenship::PermanentResidentAlien) => {
            builder.required(
                General,
                "Permanent Resident Card (Form I-551), front and back",
                format!("{name} is a permanent resident alien"),
            );
        }
        Some(Citizenship::NonPermanentResidentAlien) => {
            builder.required(
                General,
                "Unexpired Employment Authorization Document (EAD) or work visa",
                format!("{name} is a non-permanent resident alien"),
            );
            builder.required(
                General,
                "Evidence of lawful residency (Form I-94 or visa history)",
                format!("{name} is a non-permanent resident alien"),
            );
            builder.conditional(
                General,
                "Evidence of likely visa or EAD renewal",
                format!("Required if {name}'s authorization expires within 3 years"),
            );
        }
        None => {
            builder.conditional(
                General,
                "Proof of citizenship or lawful residency",
                format!("Citizenship status was not declared for {name}"),
            );
        }
    }
}

fn apply_declarations(borrower: &Borrower, builder: &mut ChecklistBuilder) {
    let name = &borrower.name;
    let declarations = &borrower.declarations;

    if declarations.bankruptcy == Some(true) {
        builder.required(
            Credit,
            "Bankruptcy petition, schedules, and discharge papers",
            format!("{name} declared a bankruptcy in the past 7 years"),
        );
        builder.required(
            Credit,
            "Letter of explanation for bankruptcy",
            format!("{name} declared a bankruptcy in the past 7 years"),
        );
    }

    if declarations.foreclosure == Some(true) {
        builder.required(
            Credit,
            "Foreclosure documentation (trustee's deed or deed-in-lieu)",
            format!("{name} declared a prior foreclosure"),
        );
        builder.required(
            Credit,
            "Letter of explanation for foreclosure",
            format!("{name} declared a prior foreclosure"),
        );
    }

    if declarations.outstanding_judgments == Some(true) {
        builder.required(
            Credit,
            "Judgment satisfaction or executed payment agreement",
            format!("{name} declared outstanding judgments"),
        );
        builder.required(
            Credit,
            "Letter of explanation for outstanding judgments",
            format!("{name} declared outstanding judgments"),
        );
    }

    if declarations.alimony_obligation == Some(true) {
        builder.required(
            General,
            "Divorce decree or separation agreement",
            format!("{name} is obligated to pay alimony or child support"),
        );
        builder.conditional(
            Credit,
            "Child support order showing payment amount",
            format!("Required if {name}'s obligation includes child support"),
        );
    }

    if declarations.federal_debt_delinquency == Some(true) {
        builder.required(
            Credit,
            "Evidence of repayment plan or cure for delinquent federal debt",
            format!("{name} declared a delinquent federal debt"),
        );
    }

    if declarations.party_to_lawsuit == Some(true) {
        builder.required(
            Credit,
            "Attorney letter describing the pending lawsuit",
            format!("{name} declared being party to a lawsuit"),
        );
    }
}

fn apply_residence_history(borrower: &Borrower, builder: &mut ChecklistBuilder) {
    if borrower.residences.is_empty() {
        return;
    }

    let coverage = residence_coverage(&borrower.residences);
    if !coverage.is_sufficient {
        builder.conditional(
            General,
            "Prior address history covering 24 months",
            format!(
                "Residence history for {} covers {} months; {} more needed",
                borrower.name, coverage.total_months, coverage.months_needed
            ),
        );
    }
}
