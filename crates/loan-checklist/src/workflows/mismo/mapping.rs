use super::normalizer::normalize_code;
use crate::workflows::checklist::domain::{
    Citizenship, EmploymentStatus, LoanPurpose, MortgageProgram, Occupancy, OwnershipBand,
};
use std::collections::HashMap;
use std::sync::OnceLock;

static CODE_TABLES: OnceLock<CodeTables> = OnceLock::new();

struct CodeTables {
    programs: HashMap<String, MortgageProgram>,
    occupancy: HashMap<String, Occupancy>,
    citizenship: HashMap<String, Citizenship>,
    employment_status: HashMap<String, EmploymentStatus>,
    ownership_band: HashMap<String, OwnershipBand>,
}

fn build<T: Copy>(entries: &[(&str, T)]) -> HashMap<String, T> {
    let mut map = HashMap::with_capacity(entries.len());
    for (code, value) in entries {
        map.insert(normalize_code(code), *value);
    }
    map
}

fn code_tables() -> &'static CodeTables {
    CODE_TABLES.get_or_init(|| CodeTables {
        programs: build(&[
            ("Conventional", MortgageProgram::Conventional),
            ("FHA", MortgageProgram::Fha),
            ("VA", MortgageProgram::Va),
            ("USDARuralDevelopment", MortgageProgram::Usda),
            ("USDA", MortgageProgram::Usda),
            ("USDA Rural Housing", MortgageProgram::Usda),
            ("RuralHousing", MortgageProgram::Usda),
        ]),
        occupancy: build(&[
            ("PrimaryResidence", Occupancy::PrimaryResidence),
            ("Primary", Occupancy::PrimaryResidence),
            ("SecondHome", Occupancy::SecondHome),
            ("Investment", Occupancy::Investment),
            ("Investor", Occupancy::Investment),
        ]),
        citizenship: build(&[
            ("USCitizen", Citizenship::UsCitizen),
            ("PermanentResidentAlien", Citizenship::PermanentResidentAlien),
            ("NonPermanentResidentAlien", Citizenship::NonPermanentResidentAlien),
            ("NonResidentAlien", Citizenship::NonPermanentResidentAlien),
        ]),
        employment_status: build(&[
            ("Current", EmploymentStatus::Current),
            ("Prior", EmploymentStatus::Prior),
            ("Previous", EmploymentStatus::Prior),
        ]),
        ownership_band: build(&[
            ("LessThan25Percent", OwnershipBand::LessThan25Percent),
            ("GreaterThanOrEqualTo25Percent", OwnershipBand::AtLeast25Percent),
        ]),
    })
}

pub(crate) fn mortgage_program(code: &str) -> MortgageProgram {
    code_tables()
        .programs
        .get(&normalize_code(code))
        .copied()
        .unwrap_or(MortgageProgram::Unknown)
}

pub(crate) fn occupancy(code: &str) -> Occupancy {
    code_tables()
        .occupancy
        .get(&normalize_code(code))
        .copied()
        .unwrap_or(Occupancy::Unknown)
}

pub(crate) fn citizenship(code: &str) -> Option<Citizenship> {
    code_tables().citizenship.get(&normalize_code(code)).copied()
}

pub(crate) fn employment_status(code: &str) -> Option<EmploymentStatus> {
    code_tables()
        .employment_status
        .get(&normalize_code(code))
        .copied()
}

pub(crate) fn ownership_band(code: &str) -> Option<OwnershipBand> {
    code_tables().ownership_band.get(&normalize_code(code)).copied()
}

/// `LoanPurposeType` plus the refinance cash-out determination. A refinance
/// without a cash-out determination is treated as rate/term.
pub(crate) fn loan_purpose(purpose: Option<&str>, cash_out: Option<&str>) -> LoanPurpose {
    let Some(purpose) = purpose.map(normalize_code) else {
        return LoanPurpose::Unknown;
    };

    match purpose.as_str() {
        "purchase" => LoanPurpose::Purchase,
        "cashoutrefinance" => LoanPurpose::CashOutRefinance,
        "ratetermrefinance" | "nocashoutrefinance" => LoanPurpose::RateTermRefinance,
        "refinance" => match cash_out.map(normalize_code).as_deref() {
            Some("cashout") => LoanPurpose::CashOutRefinance,
            _ => LoanPurpose::RateTermRefinance,
        },
        _ => LoanPurpose::Unknown,
    }
}
