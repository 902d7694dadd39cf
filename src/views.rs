// 📦 Wire shapes - field names are the external contract
//
// - NewBank         → create request body
// - BankDetails     → single bank (HQs also carry `branches`)
// - BankSummary     → bank inside a list (country name implied by the parent)
// - CountryDetails  → country with all its banks
// - Confirmation    → `{"message": ...}` for create/delete

use crate::entities::{Bank, Country};
use serde::{Deserialize, Serialize};

/// Create-bank request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBank {
    pub swift_code: String,
    pub bank_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub is_headquarter: bool,
}

/// Bank rendered without its country name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankSummary {
    pub swift_code: String,
    pub bank_name: String,
    pub address: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub is_headquarter: bool,
}

impl From<Bank> for BankSummary {
    fn from(bank: Bank) -> Self {
        Self {
            swift_code: bank.swift_code,
            bank_name: bank.bank_name,
            address: bank.address,
            country_iso2: bank.country_iso2,
            is_headquarter: bank.is_headquarter,
        }
    }
}

/// Single-bank read view
///
/// `branches` is present only for headquarters (possibly empty) and is left
/// out of the JSON entirely for branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub swift_code: String,
    pub bank_name: String,
    pub address: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub is_headquarter: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<Vec<BankSummary>>,
}

impl BankDetails {
    pub fn branch(bank: Bank, country_name: String) -> Self {
        Self {
            swift_code: bank.swift_code,
            bank_name: bank.bank_name,
            address: bank.address,
            country_iso2: bank.country_iso2,
            country_name,
            is_headquarter: bank.is_headquarter,
            branches: None,
        }
    }

    pub fn headquarter(bank: Bank, country_name: String, branches: Vec<Bank>) -> Self {
        let mut details = Self::branch(bank, country_name);
        details.branches = Some(branches.into_iter().map(BankSummary::from).collect());
        details
    }
}

/// Country read view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDetails {
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub swift_codes: Vec<BankSummary>,
}

impl CountryDetails {
    pub fn new(country: Country, banks: Vec<Bank>) -> Self {
        Self {
            country_iso2: country.iso2,
            country_name: country.name,
            swift_codes: banks.into_iter().map(BankSummary::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub message: String,
}

impl Confirmation {
    pub fn created(swift_code: &str) -> Self {
        Self {
            message: format!("SWIFT CODE = {} successfully created.", swift_code),
        }
    }

    pub fn deleted(swift_code: &str) -> Self {
        Self {
            message: format!("SWIFT CODE = {} successfully deleted.", swift_code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bank(code: &str) -> Bank {
        Bank::new(
            code.to_string(),
            "PKO Bank".to_string(),
            "Warsaw".to_string(),
            "PL".to_string(),
            code.ends_with("XXX"),
        )
    }

    #[test]
    fn test_branch_view_has_no_branches_field() {
        let view = BankDetails::branch(bank("PKOPPLPW123"), "POLAND".to_string());
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(
            value,
            json!({
                "swiftCode": "PKOPPLPW123",
                "bankName": "PKO Bank",
                "address": "Warsaw",
                "countryISO2": "PL",
                "countryName": "POLAND",
                "isHeadquarter": false,
            })
        );
    }

    #[test]
    fn test_headquarter_view_lists_branches_without_country_name() {
        let view = BankDetails::headquarter(
            bank("PKOPPLPWXXX"),
            "POLAND".to_string(),
            vec![bank("PKOPPLPW123")],
        );
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["branches"].as_array().unwrap().len(), 1);
        assert_eq!(value["branches"][0]["swiftCode"], "PKOPPLPW123");
        assert!(value["branches"][0].get("countryName").is_none());
    }

    #[test]
    fn test_headquarter_without_branches_keeps_empty_list() {
        let view = BankDetails::headquarter(bank("PKOPPLPWXXX"), "POLAND".to_string(), vec![]);
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["branches"], json!([]));
    }

    #[test]
    fn test_new_bank_address_defaults_to_empty() {
        let request: NewBank = serde_json::from_value(json!({
            "swiftCode": "PKOPPLPWXXX",
            "bankName": "PKO Bank",
            "countryISO2": "PL",
            "countryName": "POLAND",
            "isHeadquarter": true,
        }))
        .unwrap();

        assert_eq!(request.address, "");
        assert_eq!(request.country_iso2, "PL");
    }

    #[test]
    fn test_confirmation_messages() {
        assert_eq!(
            Confirmation::created("PKOPPLPWXXX").message,
            "SWIFT CODE = PKOPPLPWXXX successfully created."
        );
        assert_eq!(
            Confirmation::deleted("PKOPPLPWXXX").message,
            "SWIFT CODE = PKOPPLPWXXX successfully deleted."
        );
    }
}
