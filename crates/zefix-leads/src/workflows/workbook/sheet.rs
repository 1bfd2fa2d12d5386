use std::fmt::Write as FmtWrite;

use quick_xml::escape::escape;

use super::layout::{column_letter, row_values, used_range, COLUMNS};
use super::styles::{priority_style, HEADER_STYLE};
use super::{sanitize_text, WorkbookError};
use crate::workflows::companies::CompanyRecord;

fn write_text_cell(
    xml: &mut String,
    column: usize,
    row: usize,
    text: &str,
    style: Option<usize>,
) -> Result<(), WorkbookError> {
    write!(xml, r#"<c r="{}{}""#, column_letter(column), row)?;
    if let Some(style) = style {
        write!(xml, r#" s="{style}""#)?;
    }
    xml.push_str(r#" t="inlineStr"><is><t"#);
    let text = sanitize_text(text);
    if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
        xml.push_str(r#" xml:space="preserve""#);
    }
    write!(xml, ">{}</t></is></c>", escape(text.as_ref()))?;
    Ok(())
}

pub(crate) fn worksheet_xml(records: &[CompanyRecord]) -> Result<String, WorkbookError> {
    let last_row = records.len() + 1;
    let range = used_range(last_row);
    let mut xml = String::with_capacity(4096 + records.len() * 512);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );
    write!(xml, r#"<dimension ref="{range}"/>"#)?;

    // Header row stays visible while scrolling.
    xml.push_str(r#"<sheetViews><sheetView tabSelected="1" workbookViewId="0">"#);
    xml.push_str(r#"<pane ySplit="1" topLeftCell="A2" activePane="bottomLeft" state="frozen"/>"#);
    xml.push_str(r#"<selection pane="bottomLeft" activeCell="A2" sqref="A2"/>"#);
    xml.push_str("</sheetView></sheetViews>");
    xml.push_str(r#"<sheetFormatPr defaultRowHeight="15"/>"#);

    xml.push_str("<cols>");
    for (index, column) in COLUMNS.iter().enumerate() {
        write!(
            xml,
            r#"<col min="{n}" max="{n}" width="{}" customWidth="1"/>"#,
            column.width,
            n = index + 1
        )?;
    }
    xml.push_str("</cols>");

    xml.push_str("<sheetData>");
    xml.push_str(r#"<row r="1">"#);
    for (index, column) in COLUMNS.iter().enumerate() {
        write_text_cell(&mut xml, index, 1, column.title, Some(HEADER_STYLE))?;
    }
    xml.push_str("</row>");

    for (offset, record) in records.iter().enumerate() {
        let row = offset + 2;
        let priority = priority_style(record.legal_form.priority());
        write!(xml, r#"<row r="{row}">"#)?;
        for (index, value) in row_values(record).iter().enumerate() {
            if index == 0 {
                write_text_cell(&mut xml, index, row, value, Some(priority))?;
            } else if !value.is_empty() {
                write_text_cell(&mut xml, index, row, value, None)?;
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData>");

    write!(xml, r#"<autoFilter ref="{range}"/>"#)?;
    xml.push_str(
        r#"<pageMargins left="0.7" right="0.7" top="0.75" bottom="0.75" header="0.3" footer="0.3"/>"#,
    );
    xml.push_str("</worksheet>");
    Ok(xml)
}
