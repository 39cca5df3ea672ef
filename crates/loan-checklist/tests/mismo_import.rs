use chrono::NaiveDate;
use loan_checklist::workflows::checklist::{
    Citizenship, EmploymentStatus, LoanPurpose, MortgageProgram, Occupancy, PropertyType,
};
use loan_checklist::workflows::mismo::{MismoDealImporter, MismoImportError};

const FHA_PURCHASE: &str = include_str!("fixtures/fha_self_employed_purchase.xml");
const CASH_OUT_REFI: &str = include_str!("fixtures/conventional_cash_out_refinance.xml");

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn importer_reads_fha_purchase_file() {
    let deal = MismoDealImporter::from_xml(FHA_PURCHASE).expect("import succeeds");

    assert_eq!(deal.loan.purpose, LoanPurpose::Purchase);
    assert_eq!(deal.loan.program, MortgageProgram::Fha);
    assert_eq!(deal.loan.property_type, PropertyType::SingleFamily);
    assert_eq!(deal.loan.occupancy, Occupancy::PrimaryResidence);
    assert_eq!(deal.loan.ltv, Some(96.5));
    assert_eq!(deal.loan.base_loan_amount, Some(294325.0));
    assert!(!deal.loan.has_hoa);

    // The title company party is not a borrower.
    assert_eq!(deal.borrowers.len(), 1);
    let borrower = &deal.borrowers[0];
    assert_eq!(borrower.index, 0);
    assert_eq!(borrower.name, "Jordan Vale");
    assert_eq!(borrower.incomes[0].income_type, "Self Employment");
    assert_eq!(borrower.incomes[0].monthly_amount, Some(7800.0));
    assert_eq!(borrower.declarations.bankruptcy, Some(true));
    assert_eq!(borrower.declarations.alimony_obligation, None);
    assert_eq!(borrower.declarations.citizenship, Some(Citizenship::UsCitizen));

    let job = &borrower.employments[0];
    assert_eq!(job.employer_name.as_deref(), Some("Vale Fabrication Inc"));
    assert_eq!(job.start_date, Some(date(2021, 6, 1)));
    assert_eq!(job.ownership_percent, Some(20.0));
    assert!(job.is_s_corp());
    assert!(job.is_minority_owner());

    assert_eq!(deal.assets.len(), 1);
    assert_eq!(deal.assets[0].holder_name.as_deref(), Some("Prairie State Bank"));
    assert_eq!(deal.assets[0].value, Some(38500.0));
}

#[test]
fn importer_reads_refinance_with_reo_and_liabilities() {
    let deal = MismoDealImporter::from_xml(CASH_OUT_REFI).expect("import succeeds");

    assert_eq!(deal.loan.purpose, LoanPurpose::CashOutRefinance);
    assert_eq!(deal.loan.program, MortgageProgram::Conventional);
    assert_eq!(deal.loan.property_type, PropertyType::PlannedUnitDevelopment);
    assert!(deal.loan.has_hoa);
    let ltv = deal.loan.ltv.expect("ltv derived from valuation");
    assert!((ltv - 85.0).abs() < 1e-9);

    let names: Vec<&str> = deal.borrowers.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Morgan Ellis", "Ruth Ellis"]);
    assert_eq!(deal.borrowers[1].index, 1);

    let morgan = &deal.borrowers[0];
    assert_eq!(morgan.employments.len(), 2);
    assert_eq!(morgan.employments[1].status, Some(EmploymentStatus::Prior));
    assert_eq!(morgan.employments[1].end_date, Some(date(2022, 10, 31)));
    assert_eq!(morgan.residences.len(), 2);
    assert_eq!(morgan.residences[1].residency_basis, "Rent");
    assert_eq!(morgan.residences[1].current, Some(false));

    assert_eq!(deal.assets.len(), 1);
    assert_eq!(deal.assets[0].value, Some(21400.18));
    assert_eq!(deal.assets[0].label(0), "SAV-2231");

    assert_eq!(deal.reo_properties.len(), 1);
    let reo = &deal.reo_properties[0];
    assert_eq!(reo.address.as_deref(), Some("88 Lakeview Dr, Madison, WI"));
    assert!(reo.is_investment());
    assert_eq!(reo.disposition.as_deref(), Some("Retain"));
    assert_eq!(reo.market_value, Some(265000.0));

    assert_eq!(deal.liabilities.len(), 2);
    assert!(deal.liabilities[0].paid_at_closing);
    assert_eq!(
        deal.liabilities[0].holder_name.as_deref(),
        Some("Lakeshore Card Services")
    );
    assert!(!deal.liabilities[1].paid_at_closing);
}

#[test]
fn importer_reads_from_path_and_reader() {
    let path = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/fha_self_employed_purchase.xml"
    );
    let from_path = MismoDealImporter::from_path(path).expect("import from path");
    let from_reader =
        MismoDealImporter::from_reader(FHA_PURCHASE.as_bytes()).expect("import from reader");

    assert_eq!(from_path, from_reader);
}

#[test]
fn missing_file_is_io_error() {
    let err = MismoDealImporter::from_path("does/not/exist.xml").expect_err("missing file");
    assert!(matches!(err, MismoImportError::Io(_)));
}

#[test]
fn truncated_document_is_rejected_without_partial_result() {
    let truncated = &FHA_PURCHASE[..FHA_PURCHASE.len() / 2];
    let err = MismoDealImporter::from_xml(truncated).expect_err("truncated XML");

    assert!(matches!(err, MismoImportError::Xml(_)));
}
