//! Single-pass requirement rules, evaluated in a fixed group order.
//!
//! Group order only affects presentation; no group reads what another appended.

mod assets;
mod borrowers;
mod closing;
mod income;
mod program;
mod property;
mod transaction;

use chrono::NaiveDate;
use tracing::debug;

use super::domain::{Deal, LoanContext};
use super::requirements::{ChecklistBuilder, RequirementBuckets};

pub(crate) struct RuleContext<'a> {
    pub(crate) deal: &'a Deal,
    pub(crate) reference_date: NaiveDate,
}

impl<'a> RuleContext<'a> {
    pub(crate) fn loan(&self) -> &'a LoanContext {
        &self.deal.loan
    }
}

/// Stateless evaluator; the reference date stands in for "today" everywhere.
#[derive(Debug, Clone, Copy)]
pub struct RequirementEngine {
    reference_date: NaiveDate,
}

impl RequirementEngine {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn evaluate(&self, deal: &Deal) -> RequirementBuckets {
        let ctx = RuleContext {
            deal,
            reference_date: self.reference_date,
        };
        let mut builder = ChecklistBuilder::new();

        transaction::apply_universal(&ctx, &mut builder);
        transaction::apply_purpose(&ctx, &mut builder);
        borrowers::apply(&ctx, &mut builder);
        income::apply(&ctx, &mut builder);
        program::apply(&ctx, &mut builder);
        property::apply(&ctx, &mut builder);
        assets::apply_assets(&ctx, &mut builder);
        assets::apply_reo(&ctx, &mut builder);
        closing::apply(&ctx, &mut builder);

        let buckets = builder.finish();
        debug!(
            reference_date = %self.reference_date,
            income = buckets.income.len(),
            general = buckets.general.len(),
            assets = buckets.assets.len(),
            credit = buckets.credit.len(),
            "requirement rules evaluated"
        );
        buckets
    }
}
