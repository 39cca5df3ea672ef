use std::collections::HashSet;

use super::common::*;
use crate::workflows::checklist::domain::{Borrower, LoanPurpose, MortgageProgram};
use crate::workflows::checklist::requirements::{
    DocumentRequirement, RequirementCategory, RequirementStatus,
};
use crate::workflows::checklist::RequirementEngine;

fn fha_s_corp_borrower() -> Borrower {
    let mut borrower = Borrower {
        name: "Jordan Vale".to_string(),
        employments: vec![business(
            "Vale Fabrication",
            "S-Corp",
            date(2021, 6, 1),
            20.0,
        )],
        ..salaried_borrower("Jordan Vale")
    };
    borrower.incomes = vec![income("SelfEmploymentIncome")];
    borrower.declarations.bankruptcy = Some(true);
    borrower
}

#[test]
fn fha_s_corp_purchase_end_to_end() {
    let deal = deal(
        loan(MortgageProgram::Fha, LoanPurpose::Purchase),
        vec![fha_s_corp_borrower()],
    );
    let buckets = evaluate(&deal);

    assert!(has(&buckets.credit, "Bankruptcy petition, schedules, and discharge papers"));
    assert!(has(&buckets.credit, "Letter of explanation for bankruptcy"));

    assert!(has(&buckets.income, "W-2 from Vale Fabrication (2022-2023)"));
    assert!(has(
        &buckets.income,
        "Business tax returns (Form 1120S) for Vale Fabrication (2022-2023)"
    ));
    assert!(has(&buckets.income, "Year-to-date profit and loss statement"));
    assert!(has(&buckets.income, "Schedule K-1 for Vale Fabrication (2022-2023)"));
    assert!(has(
        &buckets.income,
        "Personal federal tax returns with all schedules (2022-2023)"
    ));
    assert!(has(
        &buckets.income,
        "Verification of business operation (CPA letter or current business license)"
    ));
    assert!(!has(&buckets.income, "Business bank statements (most recent 3 months)"));

    assert!(has(&buckets.general, "FHA case number assignment"));
    assert!(has(&buckets.general, "Signed amendatory clause and real estate certification"));
    assert!(has(&buckets.general, "CAIVRS clearance for all borrowers"));
    assert!(!has_prefix(&buckets.general, "Private mortgage insurance"));
}

#[test]
fn evaluation_is_deterministic() {
    let deal = deal(
        loan(MortgageProgram::Fha, LoanPurpose::Purchase),
        vec![fha_s_corp_borrower(), salaried_borrower("Casey Vale")],
    );
    let engine = RequirementEngine::new(reference_date());

    let first = engine.evaluate(&deal);
    let second = engine.evaluate(&deal);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("serialize"),
        serde_json::to_string(&second).expect("serialize")
    );
}

#[test]
fn buckets_never_repeat_name_and_reason() {
    // Same-named borrowers make every per-borrower rule collide.
    let twin = salaried_borrower("Alex Kim");
    let mut other = salaried_borrower("Alex Kim");
    other.index = 1;
    let deal = deal(
        loan(MortgageProgram::Conventional, LoanPurpose::Purchase),
        vec![twin, other],
    );
    let buckets = evaluate(&deal);

    for category in RequirementCategory::ALL {
        let items = buckets.bucket(category);
        let unique: HashSet<(&str, &str)> = items
            .iter()
            .map(|item| (item.name.as_str(), item.reason.as_str()))
            .collect();
        assert_eq!(unique.len(), items.len(), "duplicate in {}", category.label());
    }

    let ids: HashSet<&str> = buckets.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids.len(), buckets.len());
    assert_eq!(
        buckets
            .general
            .iter()
            .filter(|item| item.name == "Government-issued photo ID")
            .count(),
        1
    );
}

#[test]
fn declaring_bankruptcy_only_adds_bankruptcy_items() {
    let before_deal = deal(
        loan(MortgageProgram::Conventional, LoanPurpose::RateTermRefinance),
        vec![salaried_borrower("Morgan Lee")],
    );
    let mut after_deal = before_deal.clone();
    after_deal.borrowers[0].declarations.bankruptcy = Some(true);

    let before = evaluate(&before_deal);
    let after = evaluate(&after_deal);

    let after_items: Vec<&DocumentRequirement> = after.iter().collect();
    for item in before.iter() {
        assert!(after_items.contains(&item), "lost or altered {:?}", item.name);
    }

    let added: Vec<&str> = after
        .iter()
        .filter(|item| !before.iter().any(|old| old == *item))
        .map(|item| item.name.as_str())
        .collect();
    assert_eq!(
        added,
        vec![
            "Bankruptcy petition, schedules, and discharge papers",
            "Letter of explanation for bankruptcy",
        ]
    );
    assert!(after
        .credit
        .iter()
        .filter(|item| added.contains(&item.name.as_str()))
        .all(|item| item.category == RequirementCategory::Credit
            && item.status == RequirementStatus::Required));
}

#[test]
fn every_declaration_flag_has_documents() {
    let mut borrower = salaried_borrower("Riley Park");
    let declarations = &mut borrower.declarations;
    declarations.foreclosure = Some(true);
    declarations.outstanding_judgments = Some(true);
    declarations.alimony_obligation = Some(true);
    declarations.federal_debt_delinquency = Some(true);
    declarations.party_to_lawsuit = Some(true);

    let buckets = evaluate(&deal(
        loan(MortgageProgram::Conventional, LoanPurpose::Purchase),
        vec![borrower],
    ));

    assert!(has(&buckets.credit, "Letter of explanation for foreclosure"));
    assert!(has(&buckets.credit, "Judgment satisfaction or executed payment agreement"));
    assert!(has(&buckets.general, "Divorce decree or separation agreement"));
    assert_eq!(
        status_of(&buckets.credit, "Child support order showing payment amount"),
        RequirementStatus::Conditional
    );
    assert!(has(
        &buckets.credit,
        "Evidence of repayment plan or cure for delinquent federal debt"
    ));
    assert!(has(&buckets.credit, "Attorney letter describing the pending lawsuit"));
}

#[test]
fn empty_deal_still_gets_universal_items() {
    let buckets = evaluate(&crate::workflows::checklist::Deal::default());

    assert!(has(&buckets.general, "Signed IRS Form 4506-C"));
    assert!(has(
        &buckets.general,
        "Signed and dated loan application (URLA Form 1003)"
    ));
    assert!(buckets.income.is_empty());
    assert!(!has_prefix(&buckets.general, "Fully executed purchase contract"));
    assert!(!has(&buckets.general, "Most recent mortgage statement for the subject property"));

    for (items, name) in [
        (&buckets.general, "Solar panel lease or PACE lien documentation"),
        (&buckets.general, "Flood insurance policy"),
        (&buckets.credit, "Letter of explanation for recent credit inquiries"),
    ] {
        assert_eq!(status_of(items, name), RequirementStatus::Conditional, "{name}");
    }
}

#[test]
fn engine_reports_its_reference_date() {
    let engine = RequirementEngine::new(reference_date());
    assert_eq!(engine.reference_date(), date(2024, 6, 1));
}
