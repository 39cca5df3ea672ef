use tracing::debug;

use super::super::classifier::patterns;
use super::super::domain::{LoanPurpose, MortgageProgram};
use super::super::requirements::{ChecklistBuilder, RequirementCategory::*};
use super::RuleContext;

/// Conventional loans above this LTV carry mortgage insurance.
const PMI_LTV_THRESHOLD: f64 = 80.0;

pub(super) fn apply(ctx: &RuleContext<'_>, builder: &mut ChecklistBuilder) {
    match ctx.loan().program {
        MortgageProgram::Fha => apply_fha(ctx, builder),
        MortgageProgram::Va => apply_va(ctx, builder),
        MortgageProgram::Usda => apply_usda(builder),
        MortgageProgram::Conventional => apply_conventional(ctx, builder),
        MortgageProgram::Unknown => debug!("mortgage program missing; skipping program rules"),
    }
}

fn apply_fha(ctx: &RuleContext<'_>, builder: &mut ChecklistBuilder) {
    let purpose = ctx.loan().purpose;

    builder.required(
        General,
        "FHA case number assignment",
        "Every FHA-insured loan needs a case number before appraisal",
    );

    if purpose == LoanPurpose::Purchase {
        builder.required(
            General,
            "Signed amendatory clause and real estate certification",
            "FHA purchase transaction",
        );
        builder.conditional(
            General,
            "Anti-flipping review: seller's prior deed and acquisition date",
            "Required if the seller acquired the property within the last 180 days",
        );
    } else if purpose.is_refinance() {
        builder.conditional(
            General,
            "Prior FHA case number and 6-month payment history",
            "Applies when the refinance is an FHA streamline",
        );
    }

    builder.required(
        General,
        "CAIVRS clearance for all borrowers",
        "FHA requires a CAIVRS check for every borrower",
    );
    builder.conditional(
        Credit,
        "Collection account payoff or payment plan",
        "FHA requires action when non-medical collections total $2,000 or more",
    );
}

fn apply_va(ctx: &RuleContext<'_>, builder: &mut ChecklistBuilder) {
    builder.required(
        General,
        "Certificate of Eligibility (COE)",
        "VA-guaranteed loan",
    );

    let active_duty = ctx.deal.borrowers.iter().any(|borrower| {
        borrower.employments.iter().any(|job| {
            patterns().active_duty.is_match(&job.classification)
                || job
                    .employer_name
                    .as_deref()
                    .is_some_and(|employer| patterns().active_duty.is_match(employer))
        })
    });

    if active_duty {
        builder.required(
            General,
            "Statement of Service signed by commanding officer",
            "Borrower is currently on active duty",
        );
    } else {
        builder.required(
            General,
            "DD-214 (Member 4 copy)",
            "Veteran separated from active service",
        );
    }

    builder.conditional(
        General,
        "VA funding fee receipt or exemption letter",
        "Exempt when the veteran receives service-connected disability compensation",
    );
    builder.conditional(
        General,
        "Wood-destroying insect (termite) inspection",
        "Required by VA in designated states or when the appraiser notes damage",
    );
}

fn apply_usda(builder: &mut ChecklistBuilder) {
    builder.required(
        General,
        "USDA property eligibility determination",
        "Subject property must be in a USDA-eligible rural area",
    );
    builder.required(
        General,
        "USDA household income eligibility worksheet",
        "Total household income must be within the area limit",
    );
    builder.required(
        General,
        "USDA guarantee fee disclosure",
        "USDA guaranteed loan carries an upfront and annual fee",
    );
}

fn apply_conventional(ctx: &RuleContext<'_>, builder: &mut ChecklistBuilder) {
    match ctx.loan().ltv {
        Some(ltv) if ltv > PMI_LTV_THRESHOLD => {
            builder.conditional(
                General,
                "Private mortgage insurance (PMI) certificate",
                format!("LTV of {ltv:.1}% exceeds 80%"),
            );
        }
        Some(_) => {}
        None => debug!("LTV unavailable; skipping PMI rule"),
    }
}
