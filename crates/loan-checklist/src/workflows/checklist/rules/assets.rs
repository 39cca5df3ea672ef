use super::super::classifier::patterns;
use super::super::domain::LoanPurpose;
use super::super::requirements::{ChecklistBuilder, RequirementCategory::*};
use super::RuleContext;

pub(super) fn apply_assets(ctx: &RuleContext<'_>, builder: &mut ChecklistBuilder) {
    let assets = &ctx.deal.assets;

    for (position, asset) in assets.iter().enumerate() {
        let kind = if asset.asset_type.is_empty() {
            "Asset"
        } else {
            asset.asset_type.as_str()
        };
        builder.required(
            Assets,
            format!("Most recent 2 months statements for {}", asset.label(position)),
            format!("{kind} account listed on the application"),
        );
    }

    if assets.is_empty() && ctx.loan().purpose == LoanPurpose::Purchase {
        builder.required(
            Assets,
            "Proof of funds for down payment and closing costs",
            "No assets were listed on a purchase transaction",
        );
    }

    if assets
        .iter()
        .any(|asset| patterns().gift.is_match(&asset.asset_type))
    {
        let reason = "Gift funds listed as an asset";
        builder.required(Assets, "Gift letter signed by the donor", reason);
        builder.required(
            Assets,
            "Evidence of donor's ability to give (donor bank statement)",
            reason,
        );
        builder.required(
            Assets,
            "Evidence of gift transfer or deposit into borrower's account",
            reason,
        );
    }

    builder.conditional(
        Assets,
        "Letter of explanation and source for large deposits",
        "Required for any non-payroll deposit over 50% of monthly income",
    );
}

pub(super) fn apply_reo(ctx: &RuleContext<'_>, builder: &mut ChecklistBuilder) {
    let properties = &ctx.deal.reo_properties;
    let mut schedule_e_requested = false;

    for (position, property) in properties.iter().enumerate() {
        let label = property.label(position);
        let reason = format!("Real estate owned: {label}");

        builder.required(General, format!("Mortgage statement for {label}"), reason.clone());
        builder.required(
            General,
            format!("Homeowner's insurance declarations page for {label}"),
            reason.clone(),
        );

        if property.is_investment() {
            builder.required(General, format!("Lease agreement for {label}"), reason);

            if !schedule_e_requested {
                schedule_e_requested = true;
                builder.required(
                    Income,
                    "Schedule E from personal tax returns",
                    format!(
                        "Rental income from {} real estate owned propert{}",
                        properties.len(),
                        if properties.len() == 1 { "y" } else { "ies" }
                    ),
                );
            }
        }
    }
}
