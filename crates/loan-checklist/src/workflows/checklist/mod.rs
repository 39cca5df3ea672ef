//! Document requirement engine: classifies borrowers and derives the underwriting checklist.

pub mod classifier;
pub mod coverage;
pub mod domain;
pub mod requirements;
mod rules;
pub mod summary;
pub mod tax_years;

#[cfg(test)]
mod tests;

pub use classifier::{IncomeProfile, OtherIncomeCategory};
pub use coverage::{EmploymentGap, HistoryCoverage};
pub use domain::{
    Asset, Borrower, Citizenship, Deal, Declarations, Employment, EmploymentStatus, Income,
    Liability, LoanContext, LoanPurpose, MortgageProgram, Occupancy, OwnershipBand,
    PropertyType, ReoProperty, Residence,
};
pub use requirements::{
    DocumentRequirement, RequirementBuckets, RequirementCategory, RequirementStatus,
};
pub use rules::RequirementEngine;
pub use summary::{ComplexityFlags, ComplexityTier, LoanSummary};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::mismo::{MismoDealImporter, MismoImportError};

/// Everything downstream renderers need for one loan file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistReport {
    pub reference_date: NaiveDate,
    pub summary: LoanSummary,
    #[serde(flatten)]
    pub requirements: RequirementBuckets,
}

impl ChecklistReport {
    pub fn build(deal: &Deal, reference_date: NaiveDate) -> Self {
        let requirements = RequirementEngine::new(reference_date).evaluate(deal);
        let summary = LoanSummary::from_deal(deal, reference_date);

        info!(
            program = summary.program.label(),
            borrowers = summary.borrower_count,
            tier = summary.tier.label(),
            required = requirements.count_with_status(RequirementStatus::Required),
            conditional = requirements.count_with_status(RequirementStatus::Conditional),
            "loan checklist generated"
        );

        Self {
            reference_date,
            summary,
            requirements,
        }
    }

    /// Parses MISMO XML text and evaluates it. Malformed XML fails without a partial result.
    pub fn from_mismo_str(xml: &str, reference_date: NaiveDate) -> Result<Self, MismoImportError> {
        let deal = MismoDealImporter::from_xml(xml)?;
        Ok(Self::build(&deal, reference_date))
    }
}
