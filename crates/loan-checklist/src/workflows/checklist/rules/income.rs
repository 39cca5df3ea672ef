use chrono::NaiveDate;

use super::super::classifier::{classify, patterns, IncomeProfile};
use super::super::coverage::{
    continuity_gaps, employment_coverage, explanation_gaps, HISTORY_MONTHS_REQUIRED,
};
use super::super::domain::{Borrower, Employment, MortgageProgram};
use super::super::requirements::{ChecklistBuilder, RequirementCategory::Income};
use super::super::tax_years::{format_tax_years, tax_years};
use super::RuleContext;

/// Businesses older than this need one year of returns instead of two.
const SEASONED_BUSINESS_YEARS: f64 = 5.0;
const OFFER_LETTER_WINDOW_DAYS: i64 = 30;
const FINAL_PAYSTUB_WINDOW_DAYS: i64 = 180;

pub(super) fn apply(ctx: &RuleContext<'_>, builder: &mut ChecklistBuilder) {
    for borrower in &ctx.deal.borrowers {
        let profile = classify(borrower);

        if profile.self_employed {
            apply_self_employment(ctx, borrower, builder);
        }
        if profile.base_income {
            apply_base_income(ctx, borrower, &profile, builder);
        }
        if profile.alimony {
            apply_support_income(borrower, builder);
        }
        if profile.retired {
            apply_retirement(borrower, builder);
        }
        apply_other_income(borrower, &profile, builder);
        apply_employment_gaps(ctx, borrower, &profile, builder);
        apply_employment_history(ctx, borrower, &profile, builder);
    }
}

fn apply_self_employment(
    ctx: &RuleContext<'_>,
    borrower: &Borrower,
    builder: &mut ChecklistBuilder,
) {
    let reference = ctx.reference_date;
    let name = &borrower.name;
    let businesses: Vec<&Employment> = borrower
        .employments
        .iter()
        .filter(|job| job.self_employed)
        .collect();

    let years_in_business = businesses
        .iter()
        .min_by_key(|job| job.start_date.unwrap_or(NaiveDate::MAX))
        .map(|job| job.months_employed(reference) as f64 / 12.0)
        .unwrap_or(0.0);
    let years_needed = if years_in_business > SEASONED_BUSINESS_YEARS {
        1
    } else {
        2
    };
    let span = format_tax_years(&tax_years(years_needed, reference));

    builder.required(
        Income,
        format!("Personal federal tax returns with all schedules ({span})"),
        format!("{name} is self-employed ({years_in_business:.1} years in business)"),
    );
    builder.required(
        Income,
        "Year-to-date profit and loss statement",
        format!("Self-employment income for {name}"),
    );

    for business in &businesses {
        let employer = business.employer_label();
        let owner_reason = format!("{name} is an owner-employee of {employer}");
        if business.is_s_corp() {
            builder.required(Income, format!("W-2 from {employer} ({span})"), owner_reason.clone());
            builder.required(
                Income,
                format!("Business tax returns (Form 1120S) for {employer} ({span})"),
                owner_reason,
            );
        } else if business.is_1120() {
            builder.required(Income, format!("W-2 from {employer} ({span})"), owner_reason.clone());
            builder.required(
                Income,
                format!("Business tax returns (Form 1120) for {employer} ({span})"),
                owner_reason,
            );
        } else if business.is_partnership() || business.is_1065() {
            builder.required(
                Income,
                format!("Business tax returns (Form 1065) for {employer} ({span})"),
                format!("{name} is a partner in {employer}"),
            );
        }
    }

    if !businesses.iter().any(|job| job.has_entity_structure()) {
        builder.required(
            Income,
            "Business bank statements (most recent 3 months)",
            format!("Sole proprietorship income for {name}"),
        );
        builder.conditional(
            Income,
            "Paystubs covering the most recent 30 days",
            format!("Required if the business pays {name} a salary"),
        );
    }

    for job in borrower.employments.iter().filter(|job| job.is_minority_owner()) {
        let employer = job.employer_label();
        let stake = match job.ownership_percent {
            Some(percent) => format!("{percent:.0}%"),
            None => "less than 25%".to_string(),
        };
        builder.required(
            Income,
            format!("Schedule K-1 for {employer} ({span})"),
            format!("{name} owns {stake} of {employer}"),
        );
    }

    if ctx.loan().program == MortgageProgram::Fha {
        builder.required(
            Income,
            "Verification of business operation (CPA letter or current business license)",
            format!("FHA requires evidence that {name}'s business is currently operating"),
        );
    }
}

fn apply_base_income(
    ctx: &RuleContext<'_>,
    borrower: &Borrower,
    profile: &IncomeProfile,
    builder: &mut ChecklistBuilder,
) {
    let reference = ctx.reference_date;
    let name = &borrower.name;
    let (current, prior): (Vec<&Employment>, Vec<&Employment>) = borrower
        .employments
        .iter()
        .filter(|job| !job.self_employed)
        .partition(|job| job.is_current(reference));
    let (upcoming, current): (Vec<&Employment>, Vec<&Employment>) = current
        .into_iter()
        .partition(|job| job.start_date.is_some_and(|start| start > reference));

    let stub = if profile.military_income {
        "Leave and Earnings Statement (LES), most recent month"
    } else {
        "Paystubs covering the most recent 30 days"
    };
    let base_reason = format!("Base employment income for {name}");

    // No paystubs exist yet when the only job has not started.
    let only_upcoming = current.is_empty() && !upcoming.is_empty();
    let current_names = known_employers(&current);
    if !current_names.is_empty() {
        for employer in &current_names {
            builder.required(Income, format!("{stub} from {employer}"), base_reason.clone());
        }
    } else if !only_upcoming {
        builder.required(Income, stub, base_reason.clone());
    }

    let span = format_tax_years(&tax_years(2, reference));
    let all_names: Vec<&str> = current_names
        .iter()
        .copied()
        .chain(known_employers(&prior))
        .collect();
    let w2_reason = if all_names.is_empty() {
        format!("W-2 wage history for {name}")
    } else {
        format!("W-2 wage history for {name}: {}", all_names.join(", "))
    };
    builder.required(Income, format!("W-2 forms ({span})"), w2_reason);

    let latest_prior = prior
        .iter()
        .max_by_key(|job| job.end_date.unwrap_or(NaiveDate::MIN))
        .map(|job| job.employer_label());

    for job in &upcoming {
        let employer = job.employer_label();
        if let Some(start) = job.start_date {
            builder.required(
                Income,
                format!("Signed offer letter from {employer}"),
                format!("{name} starts with {employer} on {start}"),
            );
        }
    }

    for job in &current {
        let Some(start) = job.start_date else {
            continue;
        };
        let employer = job.employer_label();
        let days_on_job = (reference - start).num_days();

        if days_on_job <= OFFER_LETTER_WINDOW_DAYS {
            builder.required(
                Income,
                format!("Signed offer letter from {employer}"),
                format!("{name} started with {employer} {days_on_job} days ago"),
            );
        } else if days_on_job <= FINAL_PAYSTUB_WINDOW_DAYS {
            if let Some(previous) = latest_prior {
                builder.conditional(
                    Income,
                    format!("Final paystub from {previous}"),
                    format!("{name} changed jobs within the last 6 months"),
                );
            }
        }
    }

    if profile.variable_income {
        let reason = format!(
            "Variable income (bonus, overtime, commission, tips, or part-time) for {name} must show a 2-year history"
        );
        builder.required(
            Income,
            format!("Personal federal tax returns ({span})"),
            reason.clone(),
        );
        builder.required(Income, format!("Year-end final paystubs ({span})"), reason);
    }
}

fn known_employers<'a>(jobs: &[&'a Employment]) -> Vec<&'a str> {
    jobs.iter()
        .filter_map(|job| job.employer_name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

fn apply_support_income(borrower: &Borrower, builder: &mut ChecklistBuilder) {
    let reason = format!("Alimony/child support income for {}", borrower.name);
    builder.required(
        Income,
        "Divorce decree or separation agreement establishing support",
        reason.clone(),
    );
    builder.required(
        Income,
        "Bank statements showing 6 months of support receipt",
        reason.clone(),
    );
    builder.required(
        Income,
        "Evidence support continues for at least 3 years",
        reason,
    );
}

fn apply_retirement(borrower: &Borrower, builder: &mut ChecklistBuilder) {
    let patterns = patterns();
    let name = &borrower.name;
    let mut documented = false;

    for income in &borrower.incomes {
        let kind = income.income_type.as_str();

        if patterns.social_security.is_match(kind) {
            documented = true;
            let reason = format!("Social Security income for {name}");
            builder.required(Income, "Social Security award letter (SSA-1099)", reason.clone());
            builder.required(
                Income,
                "Bank statement showing Social Security deposit",
                reason.clone(),
            );
            if patterns.on_behalf_of_another.is_match(kind) {
                builder.conditional(
                    Income,
                    "Evidence Social Security continues for at least 3 years",
                    format!("{name} receives Social Security on another person's behalf"),
                );
            } else {
                builder.required(
                    Income,
                    "Evidence Social Security continues for at least 3 years",
                    reason,
                );
            }
        } else if patterns.pension_or_disability.is_match(kind) {
            documented = true;
            let reason = format!("Pension/disability income for {name}");
            builder.required(
                Income,
                "Pension or disability award letter",
                reason.clone(),
            );
            builder.required(
                Income,
                "Bank statement showing pension/disability deposit",
                reason.clone(),
            );
            builder.required(
                Income,
                "Evidence pension/disability continues for at least 3 years",
                reason,
            );
        } else if patterns.retirement_distribution.is_match(kind) {
            documented = true;
            let reason = format!("Retirement account distributions for {name}");
            builder.required(
                Income,
                "Distribution award letter or Form 1099-R",
                reason.clone(),
            );
            builder.required(
                Income,
                "Retirement account statements (most recent 2)",
                reason.clone(),
            );
            builder.required(
                Income,
                "Evidence distributions continue for at least 3 years",
                reason,
            );
        }
    }

    if !documented {
        builder.conditional(
            Income,
            "Retirement income award letter or distribution statement",
            format!("{name} is retired but no retirement income type was reported"),
        );
    }
}

fn apply_other_income(
    borrower: &Borrower,
    profile: &IncomeProfile,
    builder: &mut ChecklistBuilder,
) {
    for category in &profile.other_income {
        let reason = format!("{} income for {}", category.label(), borrower.name);
        for document in category.documents() {
            builder.required(Income, document, reason.clone());
        }
    }
}

fn apply_employment_gaps(
    ctx: &RuleContext<'_>,
    borrower: &Borrower,
    profile: &IncomeProfile,
    builder: &mut ChecklistBuilder,
) {
    // A retiree's last job legitimately ends before today.
    let gaps = explanation_gaps(&borrower.employments, ctx.reference_date)
        .into_iter()
        .filter(|gap| !(profile.retired && gap.abuts_present()));

    for gap in gaps {
        builder.required(
            Income,
            "Letter of explanation for employment gap",
            format!(
                "{}: {} month gap between {} and {}",
                borrower.name, gap.gap_months, gap.from_employer, gap.to_employer
            ),
        );
    }
}

fn apply_employment_history(
    ctx: &RuleContext<'_>,
    borrower: &Borrower,
    profile: &IncomeProfile,
    builder: &mut ChecklistBuilder,
) {
    if borrower.employments.is_empty() || profile.retired {
        return;
    }

    let coverage = employment_coverage(&borrower.employments, ctx.reference_date);
    if !coverage.is_sufficient {
        builder.required(
            Income,
            "Verification of employment for prior employers",
            format!(
                "{} has {} of {} months employment history on file",
                borrower.name, coverage.total_months, HISTORY_MONTHS_REQUIRED
            ),
        );
    } else if continuity_gaps(&borrower.employments, ctx.reference_date).is_empty() {
        builder.satisfied(
            Income,
            "Two-year employment history",
            format!(
                "{} has {} continuous months of employment on file",
                borrower.name, coverage.total_months
            ),
        );
    }
}
