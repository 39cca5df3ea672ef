use super::super::domain::{MortgageProgram, Occupancy, PropertyType};
use super::super::requirements::{ChecklistBuilder, RequirementCategory::*};
use super::RuleContext;
use tracing::debug;

pub(super) fn apply(ctx: &RuleContext<'_>, builder: &mut ChecklistBuilder) {
    let loan = ctx.loan();

    match loan.property_type {
        PropertyType::Condominium => {
            builder.required(
                General,
                "Condominium project questionnaire",
                "Subject property is a condominium",
            );
            builder.required(
                General,
                "Master HOA insurance policy",
                "Subject property is a condominium",
            );
            if loan.program == MortgageProgram::Fha {
                builder.required(
                    General,
                    "FHA condominium project approval or single-unit approval",
                    "FHA loan on a condominium",
                );
            }
        }
        PropertyType::Manufactured => {
            let reason = "Subject property is a manufactured home";
            builder.required(General, "HUD data plate and certification label", reason);
            builder.required(General, "Engineer's permanent foundation certification", reason);
            builder.required(
                General,
                "Evidence the home is titled as real property (affidavit of affixation)",
                reason,
            );
        }
        _ => {}
    }

    let units = loan.unit_count();
    if units > 1 {
        builder.required(
            General,
            "Existing leases for all rental units",
            format!("{units}-unit property"),
        );
    }
    if units >= 3 {
        builder.conditional(
            General,
            "Small residential income property operating statement",
            format!("Required when rental income on the {units}-unit property is used to qualify"),
        );
    }

    match loan.occupancy {
        Occupancy::Investment => {
            let reason = "Investment property";
            builder.required(General, "Lease agreement for the subject property", reason);
            builder.required(
                Income,
                "Schedule E from personal tax returns",
                "Rental income on an investment property",
            );
            builder.required(
                Assets,
                "Evidence of 6 months PITIA reserves",
                "Investment properties require reserves",
            );
        }
        Occupancy::SecondHome => {
            builder.required(
                General,
                "Second home occupancy affidavit",
                "Subject property will be a second home",
            );
        }
        Occupancy::PrimaryResidence => {}
        Occupancy::Unknown => debug!("occupancy missing; skipping occupancy rules"),
    }

    builder.conditional(
        General,
        "Solar panel lease or PACE lien documentation",
        "Required if the property has leased solar panels or a PACE assessment",
    );
}
