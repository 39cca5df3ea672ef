//! Walks a MISMO 3.4 `DEAL` and builds the normalized [`Deal`].
//!
//! Missing elements never fail extraction; they surface as `None`, empty
//! collections, or `Unknown` enum values.

use super::mapping;
use super::node::{
    child, children, descendants, first_descendant, own_text, path, text_of, XmlElement,
};
use super::normalizer::{normalize_code, parse_amount, parse_count, parse_date, parse_indicator};
use crate::workflows::checklist::domain::{
    Asset, Borrower, Deal, Declarations, Employment, Income, Liability, LoanContext,
    PropertyType, ReoProperty, Residence,
};
use tracing::{debug, warn};

pub(crate) fn extract_deal<E: XmlElement>(root: &E) -> Deal {
    let deal = if root.local_name() == "DEAL" {
        root.clone()
    } else {
        match first_descendant(root, "DEAL") {
            Some(deal) => deal,
            None => {
                warn!(root = root.local_name(), "no DEAL element; reading from document root");
                root.clone()
            }
        }
    };

    let loan = extract_loan_context(&deal);
    let borrowers = extract_borrowers(&deal);
    let (assets, reo_properties) = extract_assets(&deal);
    let liabilities = extract_liabilities(&deal);

    debug!(
        borrowers = borrowers.len(),
        assets = assets.len(),
        liabilities = liabilities.len(),
        reo = reo_properties.len(),
        "mismo deal extracted"
    );

    Deal {
        loan,
        borrowers,
        assets,
        liabilities,
        reo_properties,
    }
}

fn subject_loan<E: XmlElement>(deal: &E) -> Option<E> {
    let loans = descendants(deal, "LOAN");
    loans
        .iter()
        .find(|loan| loan.attribute("LoanRoleType") == Some("SubjectLoan"))
        .or_else(|| loans.first())
        .cloned()
}

fn extract_loan_context<E: XmlElement>(deal: &E) -> LoanContext {
    let mut context = LoanContext::default();

    let loan = subject_loan(deal);
    match &loan {
        Some(loan) => {
            context.purpose = mapping::loan_purpose(
                text_of(loan, "LoanPurposeType").as_deref(),
                text_of(loan, "RefinanceCashOutDeterminationType").as_deref(),
            );
            context.program = text_of(loan, "MortgageType")
                .map(|code| mapping::mortgage_program(&code))
                .unwrap_or(context.program);
            context.base_loan_amount = amount_of(loan, "BaseLoanAmount")
                .or_else(|| amount_of(loan, "NoteAmount"));
            context.ltv = amount_of(loan, "LTVRatioPercent");
            context.has_hoa = descendants(loan, "HousingExpenseType")
                .iter()
                .filter_map(own_text)
                .any(|code| is_association_expense(&code));
        }
        None => warn!("no LOAN element; loan purpose and program are unknown"),
    }

    let Some(subject) = first_descendant(deal, "SUBJECT_PROPERTY") else {
        warn!("no SUBJECT_PROPERTY element; property rules will be skipped");
        return context;
    };

    context.occupancy = text_of(&subject, "PropertyUsageType")
        .map(|code| mapping::occupancy(&code))
        .unwrap_or(context.occupancy);
    context.units = text_of(&subject, "FinancedUnitCount").and_then(|value| parse_count(&value));
    context.property_type = property_type(&subject);
    if matches!(
        context.property_type,
        PropertyType::Condominium | PropertyType::Cooperative | PropertyType::PlannedUnitDevelopment
    ) {
        context.has_hoa = true;
    }

    if context.ltv.is_none() {
        let value = amount_of(&subject, "PropertyValuationAmount")
            .or_else(|| amount_of(&subject, "PropertyEstimatedValueAmount"));
        let price = amount_of(&subject, "SalesContractAmount");
        let basis = match (value, price) {
            (Some(value), Some(price)) => Some(value.min(price)),
            (value, price) => value.or(price),
        };
        context.ltv = match (context.base_loan_amount, basis) {
            (Some(amount), Some(basis)) if basis > 0.0 => Some(amount / basis * 100.0),
            _ => None,
        };
    }

    context
}

fn is_association_expense(code: &str) -> bool {
    let code = normalize_code(code);
    code.contains("homeownersassociation")
        || code.contains("condominium")
        || code.contains("cooperative")
}

fn property_type<E: XmlElement>(subject: &E) -> PropertyType {
    let construction = text_of(subject, "ConstructionMethodType")
        .map(|code| normalize_code(&code))
        .unwrap_or_default();
    if construction.contains("manufactured") || construction.contains("mobilehome") {
        return PropertyType::Manufactured;
    }

    match text_of(subject, "ProjectLegalStructureType")
        .map(|code| normalize_code(&code))
        .as_deref()
    {
        Some("condominium") => return PropertyType::Condominium,
        Some("cooperative") => return PropertyType::Cooperative,
        _ => {}
    }

    if indicator_of(subject, "PUDIndicator") == Some(true) {
        return PropertyType::PlannedUnitDevelopment;
    }

    if first_descendant(subject, "PROPERTY_DETAIL").is_some() {
        PropertyType::SingleFamily
    } else {
        PropertyType::Unknown
    }
}

fn extract_borrowers<E: XmlElement>(deal: &E) -> Vec<Borrower> {
    descendants(deal, "PARTY")
        .into_iter()
        .filter(is_borrower_party)
        .enumerate()
        .map(|(index, party)| extract_borrower(index, &party))
        .collect()
}

fn is_borrower_party<E: XmlElement>(party: &E) -> bool {
    first_descendant(party, "BORROWER").is_some()
        || descendants(party, "PartyRoleType")
            .iter()
            .filter_map(own_text)
            .any(|role| role.eq_ignore_ascii_case("Borrower"))
}

fn extract_borrower<E: XmlElement>(index: usize, party: &E) -> Borrower {
    let name = path(party, &["INDIVIDUAL", "NAME"])
        .and_then(|name| individual_name(&name))
        .unwrap_or_else(|| format!("Borrower {}", index + 1));

    let role = first_descendant(party, "BORROWER").unwrap_or_else(|| party.clone());

    let borrower = Borrower {
        index,
        name,
        incomes: descendants(&role, "CURRENT_INCOME_ITEM")
            .iter()
            .map(extract_income)
            .collect(),
        employments: descendants(&role, "EMPLOYER")
            .iter()
            .map(extract_employment)
            .collect(),
        residences: descendants(&role, "RESIDENCE")
            .iter()
            .map(extract_residence)
            .collect(),
        declarations: first_descendant(&role, "DECLARATION_DETAIL")
            .map(|detail| extract_declarations(&detail))
            .unwrap_or_default(),
    };

    if borrower.incomes.is_empty() && borrower.employments.is_empty() {
        debug!(borrower = index, "borrower has no income or employment records");
    }

    borrower
}

fn individual_name<E: XmlElement>(name: &E) -> Option<String> {
    if let Some(full) = text_of(name, "FullName") {
        return Some(full);
    }

    let parts: Vec<String> = ["FirstName", "MiddleName", "LastName", "SuffixName"]
        .iter()
        .filter_map(|field| text_of(name, field))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn extract_income<E: XmlElement>(item: &E) -> Income {
    let kind = text_of(item, "IncomeType").unwrap_or_default();
    let income_type = if kind.eq_ignore_ascii_case("Other") {
        text_of(item, "IncomeTypeOtherDescription").unwrap_or(kind)
    } else {
        kind
    };

    Income {
        income_type,
        monthly_amount: amount_of(item, "CurrentIncomeMonthlyTotalAmount"),
        employment_income: indicator_of(item, "EmploymentIncomeIndicator").unwrap_or(false),
    }
}

fn extract_employment<E: XmlElement>(employer: &E) -> Employment {
    let employer_name = path(employer, &["LEGAL_ENTITY", "LEGAL_ENTITY_DETAIL", "FullName"])
        .and_then(|name| own_text(&name))
        .or_else(|| text_of(employer, "FullName"));
    let employment = child(employer, "EMPLOYMENT").unwrap_or_else(|| employer.clone());

    let classification = [
        text_of(&employment, "EmploymentClassificationType"),
        text_of(&employment, "EmploymentPositionDescription"),
        text_of(employer, "LegalEntityType"),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ");

    Employment {
        employer_name,
        start_date: text_of(&employment, "EmploymentStartDate")
            .and_then(|value| parse_date(&value)),
        end_date: text_of(&employment, "EmploymentEndDate").and_then(|value| parse_date(&value)),
        status: text_of(&employment, "EmploymentStatusType")
            .and_then(|code| mapping::employment_status(&code)),
        months_on_job: text_of(&employment, "EmploymentMonthsOnJobCount")
            .and_then(|value| parse_count(&value)),
        self_employed: indicator_of(&employment, "EmploymentBorrowerSelfEmployedIndicator")
            .unwrap_or(false),
        classification,
        ownership_percent: amount_of(&employment, "OwnershipInterestPercent"),
        ownership_band: text_of(&employment, "OwnershipInterestType")
            .and_then(|code| mapping::ownership_band(&code)),
    }
}

fn extract_residence<E: XmlElement>(residence: &E) -> Residence {
    Residence {
        months_at_residence: text_of(residence, "BorrowerResidencyDurationMonthsCount")
            .and_then(|value| parse_count(&value)),
        residency_basis: text_of(residence, "BorrowerResidencyBasisType").unwrap_or_default(),
        current: text_of(residence, "BorrowerResidencyType").and_then(|code| {
            match normalize_code(&code).as_str() {
                "current" => Some(true),
                "prior" => Some(false),
                _ => None,
            }
        }),
    }
}

fn extract_declarations<E: XmlElement>(detail: &E) -> Declarations {
    Declarations {
        citizenship: text_of(detail, "CitizenshipResidencyType")
            .and_then(|code| mapping::citizenship(&code)),
        bankruptcy: indicator_of(detail, "BankruptcyIndicator"),
        foreclosure: indicator_of(detail, "PriorPropertyForeclosureCompletedIndicator"),
        outstanding_judgments: indicator_of(detail, "OutstandingJudgmentsIndicator"),
        alimony_obligation: indicator_of(detail, "AlimonyChildSupportObligationIndicator"),
        federal_debt_delinquency: indicator_of(detail, "PresentlyDelinquentIndicator"),
        party_to_lawsuit: indicator_of(detail, "PartyToLawsuitIndicator"),
    }
}

fn extract_assets<E: XmlElement>(deal: &E) -> (Vec<Asset>, Vec<ReoProperty>) {
    let mut assets = Vec::new();
    let mut reo_properties = Vec::new();

    let Some(container) = child(deal, "ASSETS") else {
        return (assets, reo_properties);
    };

    for asset in children(&container, "ASSET") {
        match child(&asset, "OWNED_PROPERTY") {
            Some(owned) => reo_properties.push(extract_reo(&owned)),
            None => assets.push(extract_asset(&asset)),
        }
    }

    (assets, reo_properties)
}

fn extract_asset<E: XmlElement>(asset: &E) -> Asset {
    let kind = text_of(asset, "AssetType").unwrap_or_default();
    let asset_type = if kind.eq_ignore_ascii_case("Other") {
        text_of(asset, "AssetTypeOtherDescription").unwrap_or(kind)
    } else {
        kind
    };

    Asset {
        asset_type,
        holder_name: child(asset, "ASSET_HOLDER").and_then(|holder| text_of(&holder, "FullName")),
        account_identifier: text_of(asset, "AssetAccountIdentifier"),
        value: amount_of(asset, "AssetCashOrMarketValueAmount"),
    }
}

fn extract_reo<E: XmlElement>(owned: &E) -> ReoProperty {
    let address = first_descendant(owned, "ADDRESS").and_then(|address| {
        let parts: Vec<String> = ["AddressLineText", "CityName", "StateCode"]
            .iter()
            .filter_map(|field| text_of(&address, field))
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    });

    let rental_income = amount_of(owned, "OwnedPropertyRentalIncomeGrossAmount")
        .filter(|amount| *amount > 0.0);
    let usage = text_of(owned, "PropertyCurrentUsageType")
        .or_else(|| text_of(owned, "PropertyUsageType"))
        .or_else(|| rental_income.map(|_| "Rental".to_string()))
        .unwrap_or_default();

    ReoProperty {
        address,
        usage,
        disposition: text_of(owned, "OwnedPropertyDispositionStatusType"),
        market_value: amount_of(owned, "PropertyEstimatedValueAmount"),
    }
}

fn extract_liabilities<E: XmlElement>(deal: &E) -> Vec<Liability> {
    let Some(container) = child(deal, "LIABILITIES") else {
        return Vec::new();
    };

    children(&container, "LIABILITY")
        .iter()
        .map(|liability| Liability {
            liability_type: text_of(liability, "LiabilityType").unwrap_or_default(),
            holder_name: child(liability, "LIABILITY_HOLDER")
                .and_then(|holder| text_of(&holder, "FullName")),
            account_identifier: text_of(liability, "LiabilityAccountIdentifier"),
            unpaid_balance: amount_of(liability, "LiabilityUnpaidBalanceAmount"),
            monthly_payment: amount_of(liability, "LiabilityMonthlyPaymentAmount"),
            paid_at_closing: indicator_of(liability, "LiabilityPayoffStatusIndicator")
                .unwrap_or(false),
        })
        .collect()
}

fn amount_of<E: XmlElement>(element: &E, name: &str) -> Option<f64> {
    text_of(element, name).and_then(|value| parse_amount(&value))
}

fn indicator_of<E: XmlElement>(element: &E, name: &str) -> Option<bool> {
    text_of(element, name).and_then(|value| parse_indicator(&value))
}
