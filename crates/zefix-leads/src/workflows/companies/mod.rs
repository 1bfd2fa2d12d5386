//! Normalized company records and their legal-form ranking.

pub mod address;
pub mod legal_form;

use serde::Serialize;

pub use address::format_address;
pub use legal_form::classify;

/// Registered legal structure, reduced to the categories prospecting cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalForm {
    JointStockCompany,
    LimitedLiabilityCompany,
    SoleProprietorship,
    Other,
}

impl LegalForm {
    pub fn rank(self) -> u8 {
        match self {
            LegalForm::JointStockCompany => 1,
            LegalForm::LimitedLiabilityCompany => 2,
            LegalForm::SoleProprietorship => 3,
            LegalForm::Other => u8::MAX,
        }
    }

    /// Short French form shown in the workbook.
    pub fn abbreviation(self) -> &'static str {
        match self {
            LegalForm::JointStockCompany => "SA",
            LegalForm::LimitedLiabilityCompany => "Sàrl",
            LegalForm::SoleProprietorship => "EI",
            LegalForm::Other => "Autre",
        }
    }

    pub fn priority(self) -> PriorityLabel {
        match self {
            LegalForm::JointStockCompany => PriorityLabel::High,
            LegalForm::LimitedLiabilityCompany => PriorityLabel::Medium,
            LegalForm::SoleProprietorship | LegalForm::Other => PriorityLabel::Low,
        }
    }

    pub fn is_prospect(self) -> bool {
        !matches!(self, LegalForm::Other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityLabel {
    High,
    Medium,
    Low,
}

impl PriorityLabel {
    pub fn label(self) -> &'static str {
        match self {
            PriorityLabel::High => "Haute",
            PriorityLabel::Medium => "Moyenne",
            PriorityLabel::Low => "Basse",
        }
    }

    /// RGB hex fill of the priority cell.
    pub fn fill_color(self) -> &'static str {
        match self {
            PriorityLabel::High => "FFCCCC",
            PriorityLabel::Medium => "FFE5CC",
            PriorityLabel::Low => "FFFFCC",
        }
    }
}

/// One newly registered company, tagged with the canton it was fetched under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyRecord {
    pub name: String,
    pub legal_form: LegalForm,
    pub canton: String,
    pub city: String,
    pub postal_code: String,
    pub address: String,
    pub registration_date: String,
    pub uid: String,
    pub register_number: String,
}

/// Stable sort by legal-form rank; fetch order survives among equal ranks.
pub fn prioritize(mut records: Vec<CompanyRecord>) -> Vec<CompanyRecord> {
    records.sort_by_key(|record| record.legal_form.rank());
    records
}
