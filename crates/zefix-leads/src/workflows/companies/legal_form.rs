use super::LegalForm;

/// Markers are tested as plain substrings, in this order; the first hit decides.
const MARKERS: &[(LegalForm, &[&str])] = &[
    (
        LegalForm::JointStockCompany,
        &["0106", "sa", "aktiengesellschaft", "société anonyme"],
    ),
    (
        LegalForm::LimitedLiabilityCompany,
        &["0107", "sàrl", "sarl", "gmbh"],
    ),
    (
        LegalForm::SoleProprietorship,
        &["0108", "individuel", "einzelfirma", "einzelunternehmen"],
    ),
];

/// Map a raw registry legal form (numeric code or French/German name) onto
/// one of the four categories.
pub fn classify(raw: &str) -> LegalForm {
    let lowered = raw.to_lowercase();

    MARKERS
        .iter()
        .find(|(_, markers)| markers.iter().any(|marker| lowered.contains(marker)))
        .map(|(form, _)| *form)
        .unwrap_or(LegalForm::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_codes_map_to_forms() {
        assert_eq!(classify("0106"), LegalForm::JointStockCompany);
        assert_eq!(classify("0107"), LegalForm::LimitedLiabilityCompany);
        assert_eq!(classify("0108"), LegalForm::SoleProprietorship);
        assert_eq!(classify("0103"), LegalForm::Other);
    }

    #[test]
    fn names_are_matched_case_insensitively() {
        assert_eq!(classify("SA"), LegalForm::JointStockCompany);
        assert_eq!(classify("Aktiengesellschaft"), LegalForm::JointStockCompany);
        assert_eq!(classify("Société anonyme"), LegalForm::JointStockCompany);
        assert_eq!(classify("SÀRL"), LegalForm::LimitedLiabilityCompany);
        assert_eq!(classify("GmbH"), LegalForm::LimitedLiabilityCompany);
        assert_eq!(
            classify("Entreprise individuelle"),
            LegalForm::SoleProprietorship
        );
        assert_eq!(classify("Einzelunternehmen"), LegalForm::SoleProprietorship);
        assert_eq!(classify("Einzelfirma"), LegalForm::SoleProprietorship);
    }

    #[test]
    fn joint_stock_markers_win_over_later_categories() {
        assert_eq!(classify("SA / GmbH"), LegalForm::JointStockCompany);
        assert_eq!(classify("sarl"), LegalForm::JointStockCompany);
        assert_eq!(classify("0106 0107"), LegalForm::JointStockCompany);
        assert_eq!(classify("GmbH 0108"), LegalForm::LimitedLiabilityCompany);
    }

    #[test]
    fn unrecognized_or_empty_input_is_other() {
        for raw in ["", "   ", "Genossenschaft", "Stiftung", "Verein", "\u{0}\u{feff}"] {
            assert_eq!(classify(raw), LegalForm::Other, "input {raw:?}");
        }
    }
}
