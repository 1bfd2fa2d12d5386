use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::layout::last_column;
use super::WorkbookError;

pub(crate) const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
    r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
    r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
    "</Types>"
);

pub(crate) const ROOT_RELATIONSHIPS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
    "</Relationships>"
);

pub(crate) const WORKBOOK_RELATIONSHIPS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>"#,
    r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
    "</Relationships>"
);

/// Workbook part with the single sheet and the hidden filter-range name Excel
/// expects next to a sheet-level auto-filter.
pub(crate) fn workbook_xml(sheet_name: &str, last_row: usize) -> Result<String, WorkbookError> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );
    xml.push_str(r#"<bookViews><workbookView/></bookViews>"#);
    write!(
        xml,
        r#"<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets>"#,
        escape(sheet_name)
    )?;
    let reference = format!(
        "'{}'!$A$1:${}${}",
        sheet_name.replace('\'', "''"),
        last_column(),
        last_row
    );
    write!(
        xml,
        r#"<definedNames><definedName name="_xlnm._FilterDatabase" localSheetId="0" hidden="1">{}</definedName></definedNames>"#,
        escape(reference.as_str())
    )?;
    xml.push_str("</workbook>");
    Ok(xml)
}

/// Zip the parts in the given order. Every entry carries the DOS epoch as its
/// modification time so identical parts always produce identical bytes.
pub(crate) fn write_package(parts: &[(&str, String)]) -> Result<Vec<u8>, WorkbookError> {
    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    for (name, body) in parts {
        archive.start_file(*name, options)?;
        archive.write_all(body.as_bytes())?;
    }

    Ok(archive.finish()?.into_inner())
}
