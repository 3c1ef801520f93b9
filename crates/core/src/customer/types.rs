//! Customer domain types.

use chrono::NaiveDate;
use minibank_shared::types::CustomerId;
use serde::{Deserialize, Serialize};

/// Customer classification used for product eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerType {
    /// Individual customer.
    Personal,
    /// Company customer.
    Corporate,
}

impl std::fmt::Display for CustomerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Personal => write!(f, "PERSONAL"),
            Self::Corporate => write!(f, "CORPORATE"),
        }
    }
}

impl std::str::FromStr for CustomerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PERSONAL" => Ok(Self::Personal),
            "CORPORATE" => Ok(Self::Corporate),
            other => Err(format!("Unknown customer type: {other}")),
        }
    }
}

/// Customer account standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerStatus {
    /// Customer can open accounts and transact.
    Active,
    /// Customer is dormant.
    Inactive,
    /// Customer relationship has ended.
    Closed,
    /// Customer is blocked pending review.
    Frozen,
}

/// Identity document types accepted for personal customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentityType {
    /// Indonesian national identity card.
    Ktp,
    /// Passport.
    Passport,
    /// Indonesian driving licence.
    Sim,
}

/// Fields specific to a personal customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDetails {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth.
    pub date_of_birth: NaiveDate,
    /// Identity document type.
    pub identity_type: IdentityType,
    /// Identity document number.
    pub identity_number: String,
}

/// Fields specific to a corporate customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateDetails {
    /// Registered company name.
    pub company_name: String,
    /// Company registration number.
    pub company_registration_number: String,
    /// Tax identification number (NPWP).
    pub tax_identification_number: String,
    /// Name of the contact person.
    pub contact_person_name: String,
    /// Title of the contact person.
    pub contact_person_title: String,
}

/// Type-specific customer data.
///
/// A tagged variant rather than inheritance: the only cross-cutting need is
/// whether the customer type satisfies a product's allowed-types set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "customer_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomerDetails {
    /// Individual customer data.
    Personal(PersonalDetails),
    /// Company customer data.
    Corporate(CorporateDetails),
}

/// A bank customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier.
    pub id: CustomerId,
    /// Human-displayable customer number (e.g. `C00000042`).
    pub customer_number: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Current standing.
    pub status: CustomerStatus,
    /// Type-specific data.
    pub details: CustomerDetails,
}

impl Customer {
    /// Returns the customer type for eligibility checks.
    #[must_use]
    pub const fn customer_type(&self) -> CustomerType {
        match self.details {
            CustomerDetails::Personal(_) => CustomerType::Personal,
            CustomerDetails::Corporate(_) => CustomerType::Corporate,
        }
    }

    /// Returns the display name used as the default account name.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.details {
            CustomerDetails::Personal(p) => format!("{} {}", p.first_name, p.last_name),
            CustomerDetails::Corporate(c) => c.company_name.clone(),
        }
    }

    /// Returns true if the customer can open accounts and transact.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == CustomerStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn personal_customer() -> Customer {
        Customer {
            id: CustomerId::new(),
            customer_number: "C00000001".to_string(),
            email: "siti@example.com".to_string(),
            phone_number: "+62811111111".to_string(),
            status: CustomerStatus::Active,
            details: CustomerDetails::Personal(PersonalDetails {
                first_name: "Siti".to_string(),
                last_name: "Rahayu".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 2).unwrap(),
                identity_type: IdentityType::Ktp,
                identity_number: "3201010101900001".to_string(),
            }),
        }
    }

    fn corporate_customer() -> Customer {
        Customer {
            id: CustomerId::new(),
            customer_number: "CORP00000001".to_string(),
            email: "finance@amanah.co.id".to_string(),
            phone_number: "+62215551234".to_string(),
            status: CustomerStatus::Active,
            details: CustomerDetails::Corporate(CorporateDetails {
                company_name: "PT Amanah Sejahtera".to_string(),
                company_registration_number: "REG00000099".to_string(),
                tax_identification_number: "01.234.567.8-901.000".to_string(),
                contact_person_name: "Budi Santoso".to_string(),
                contact_person_title: "Director".to_string(),
            }),
        }
    }

    #[test]
    fn test_personal_display_name() {
        assert_eq!(personal_customer().display_name(), "Siti Rahayu");
    }

    #[test]
    fn test_corporate_display_name() {
        assert_eq!(corporate_customer().display_name(), "PT Amanah Sejahtera");
    }

    #[test]
    fn test_customer_type() {
        assert_eq!(personal_customer().customer_type(), CustomerType::Personal);
        assert_eq!(
            corporate_customer().customer_type(),
            CustomerType::Corporate
        );
    }

    #[test]
    fn test_is_active() {
        let mut customer = personal_customer();
        assert!(customer.is_active());

        customer.status = CustomerStatus::Frozen;
        assert!(!customer.is_active());
    }

    #[test]
    fn test_customer_type_from_str() {
        assert_eq!(
            CustomerType::from_str("PERSONAL").unwrap(),
            CustomerType::Personal
        );
        assert_eq!(
            CustomerType::from_str("corporate").unwrap(),
            CustomerType::Corporate
        );
        assert_eq!(
            CustomerType::from_str(" Personal ").unwrap(),
            CustomerType::Personal
        );
        assert!(CustomerType::from_str("GOVERNMENT").is_err());
    }
}
