use super::super::classifier::patterns;
use super::super::requirements::{ChecklistBuilder, RequirementCategory::*};
use super::RuleContext;

pub(super) fn apply(ctx: &RuleContext<'_>, builder: &mut ChecklistBuilder) {
    builder.required(
        General,
        "Homeowner's insurance binder or declarations page",
        "Hazard insurance must be in force at closing",
    );
    builder.conditional(
        General,
        "Flood insurance policy",
        "Required if the property is in a special flood hazard area",
    );

    if ctx.loan().has_hoa {
        let reason = "Property is subject to a homeowners association";
        builder.required(General, "HOA dues statement", reason);
        builder.required(General, "HOA contact information and management company", reason);
    }

    for liability in ctx.deal.liabilities.iter().filter(|l| l.paid_at_closing) {
        let kind = if liability.liability_type.is_empty() {
            "Liability"
        } else {
            liability.liability_type.as_str()
        };
        builder.required(
            Credit,
            format!("Payoff letter for {}", liability.label()),
            format!("{kind} to be paid at closing"),
        );
    }

    builder.conditional(
        Credit,
        "Letter of explanation for recent credit inquiries",
        "Required for inquiries in the last 90 days that did not result in new credit",
    );

    let rents = ctx.deal.borrowers.iter().any(|borrower| {
        borrower
            .residences
            .iter()
            .any(|residence| patterns().rent.is_match(&residence.residency_basis))
    });
    if rents {
        builder.conditional(
            Credit,
            "Verification of rent (12 months cancelled checks or landlord VOR)",
            "Borrower currently or previously rented",
        );
    }
}
