use crate::workflows::companies::CompanyRecord;

pub(crate) struct Column {
    pub(crate) title: &'static str,
    pub(crate) width: u8,
}

pub(crate) const COLUMNS: [Column; 17] = [
    Column { title: "Priorité", width: 12 },
    Column { title: "Nom entreprise", width: 40 },
    Column { title: "Forme juridique", width: 15 },
    Column { title: "Canton", width: 10 },
    Column { title: "Ville", width: 20 },
    Column { title: "NPA", width: 8 },
    Column { title: "Adresse", width: 35 },
    Column { title: "Date publication", width: 15 },
    Column { title: "Téléphone", width: 18 },
    Column { title: "Email", width: 30 },
    Column { title: "Site web", width: 35 },
    Column { title: "LinkedIn", width: 35 },
    Column { title: "Statut", width: 12 },
    Column { title: "Notes", width: 40 },
    Column { title: "Date dernier contact", width: 18 },
    Column { title: "Numéro RC", width: 20 },
    Column { title: "UID", width: 20 },
];

/// Status every freshly extracted prospect starts with.
pub(crate) const NEW_STATUS: &str = "Nouveau";

pub(crate) fn column_letter(index: usize) -> char {
    debug_assert!(index < 26, "layout only spans single-letter columns");
    char::from(b'A' + index as u8)
}

pub(crate) fn last_column() -> char {
    column_letter(COLUMNS.len() - 1)
}

/// Populated rectangle, header included.
pub(crate) fn used_range(last_row: usize) -> String {
    format!("A1:{}{}", last_column(), last_row)
}

/// Cell texts for one data row, in column order. Contact and follow-up
/// columns are filled in by hand later and start blank.
pub(crate) fn row_values(record: &CompanyRecord) -> [&str; 17] {
    [
        record.legal_form.priority().label(),
        record.name.as_str(),
        record.legal_form.abbreviation(),
        record.canton.as_str(),
        record.city.as_str(),
        record.postal_code.as_str(),
        record.address.as_str(),
        record.registration_date.as_str(),
        "",
        "",
        "",
        "",
        NEW_STATUS,
        "",
        "",
        record.register_number.as_str(),
        record.uid.as_str(),
    ]
}
