//! Prospecting workbook rendering.
//!
//! The workbook is a minimal SpreadsheetML package written by hand: one sheet,
//! a fixed stylesheet and inline strings. Nothing time-dependent is embedded,
//! so the same records always render to the same bytes.

mod layout;
mod package;
mod sheet;
mod styles;

use std::borrow::Cow;

use chrono::NaiveDate;

use crate::workflows::companies::CompanyRecord;

pub const SHEET_NAME: &str = "Nouvelles Entreprises";

#[derive(Debug, thiserror::Error)]
pub enum WorkbookError {
    #[error("failed to format workbook xml")]
    Xml(#[from] std::fmt::Error),
    #[error("failed to write workbook archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("failed to write workbook bytes: {0}")]
    Io(#[from] std::io::Error),
}

/// Drop characters XML 1.0 cannot carry. Tab, line feed and carriage return
/// are kept.
pub(crate) fn sanitize_text(text: &str) -> Cow<'_, str> {
    fn allowed(ch: char) -> bool {
        !matches!(
            ch,
            '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
        )
    }

    if text.chars().all(allowed) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&ch| allowed(ch)).collect())
    }
}

pub fn workbook_filename(today: NaiveDate) -> String {
    format!("Nouvelles_Entreprises_{}.xlsx", today.format("%Y-%m-%d"))
}

/// Render prioritized records into `.xlsx` bytes, one row per record below the
/// header, in the order given.
pub fn render_workbook(records: &[CompanyRecord]) -> Result<Vec<u8>, WorkbookError> {
    let last_row = records.len() + 1;

    let parts = [
        ("[Content_Types].xml", package::CONTENT_TYPES.to_string()),
        ("_rels/.rels", package::ROOT_RELATIONSHIPS.to_string()),
        ("xl/workbook.xml", package::workbook_xml(SHEET_NAME, last_row)?),
        (
            "xl/_rels/workbook.xml.rels",
            package::WORKBOOK_RELATIONSHIPS.to_string(),
        ),
        ("xl/styles.xml", styles::styles_xml()?),
        ("xl/worksheets/sheet1.xml", sheet::worksheet_xml(records)?),
    ];

    package::write_package(&parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::companies::LegalForm;
    use std::io::{Cursor, Read};

    fn records() -> Vec<CompanyRecord> {
        ["Helvetia Data SA", "Lac Léman Sàrl"]
            .iter()
            .zip([LegalForm::JointStockCompany, LegalForm::LimitedLiabilityCompany])
            .map(|(name, legal_form)| CompanyRecord {
                name: name.to_string(),
                legal_form,
                canton: "VD".to_string(),
                city: "Lausanne".to_string(),
                postal_code: "1003".to_string(),
                address: "Place de la Gare 1".to_string(),
                registration_date: "2026-10-17".to_string(),
                uid: String::new(),
                register_number: String::new(),
            })
            .collect()
    }

    #[test]
    fn rendering_is_byte_identical_across_runs() {
        let first = render_workbook(&records()).expect("render");
        let second = render_workbook(&records()).expect("render");
        assert_eq!(first, second);
    }

    #[test]
    fn package_contains_every_part() {
        let bytes = render_workbook(&records()).expect("render");
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip");

        let names: Vec<String> = archive.file_names().map(str::to_string).collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/worksheets/sheet1.xml",
        ] {
            assert!(names.iter().any(|name| name == part), "missing {part}");
        }

        let mut sheet = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .expect("sheet part")
            .read_to_string(&mut sheet)
            .expect("utf-8 sheet");
        assert!(sheet.contains("Lac Léman Sàrl"));
        assert!(sheet.contains(r#"<autoFilter ref="A1:Q3"/>"#));
    }

    #[test]
    fn filename_encodes_the_date() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");
        assert_eq!(
            workbook_filename(today),
            "Nouvelles_Entreprises_2026-10-19.xlsx"
        );
    }
}
