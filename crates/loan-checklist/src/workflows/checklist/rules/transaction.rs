use tracing::debug;

use super::super::domain::LoanPurpose;
use super::super::requirements::{ChecklistBuilder, RequirementCategory::*};
use super::RuleContext;

pub(super) fn apply_universal(_ctx: &RuleContext<'_>, builder: &mut ChecklistBuilder) {
    builder.required(
        General,
        "Signed IRS Form 4506-C",
        "Tax transcript authorization is required on every loan",
    );
    builder.required(
        General,
        "Signed and dated loan application (URLA Form 1003)",
        "Final application must be signed by all borrowers",
    );
}

pub(super) fn apply_purpose(ctx: &RuleContext<'_>, builder: &mut ChecklistBuilder) {
    match ctx.loan().purpose {
        LoanPurpose::Purchase => {
            builder.required(
                General,
                "Fully executed purchase contract with all addenda",
                "Purchase transaction",
            );
            builder.required(
                Assets,
                "Earnest money deposit: copy of check and proof it cleared",
                "Earnest money must be sourced on a purchase",
            );
        }
        purpose @ (LoanPurpose::CashOutRefinance | LoanPurpose::RateTermRefinance) => {
            builder.required(
                General,
                "Most recent mortgage statement for the subject property",
                "Refinance of an existing lien",
            );
            builder.conditional(
                General,
                "Copy of current note and recorded deed",
                "Needed when title or the existing lien cannot be verified",
            );

            if purpose == LoanPurpose::CashOutRefinance {
                builder.conditional(
                    General,
                    "Letter of explanation for use of cash-out proceeds",
                    "Cash-out refinance",
                );
                builder.required(
                    General,
                    "Evidence of 12 months seasoning on current ownership",
                    "Cash-out refinance requires seasoned title",
                );
            } else {
                builder.required(
                    General,
                    "Payoff statement for the existing lien",
                    "Rate/term refinance pays off the existing mortgage",
                );
            }
        }
        LoanPurpose::Unknown => {
            debug!("loan purpose missing; skipping purchase/refinance rules");
        }
    }
}
