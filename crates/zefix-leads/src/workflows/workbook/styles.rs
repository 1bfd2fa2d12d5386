use std::fmt::Write as FmtWrite;

use super::WorkbookError;
use crate::workflows::companies::PriorityLabel;

const HEADER_FILL: &str = "4472C4";
const PRIORITY_ORDER: [PriorityLabel; 3] =
    [PriorityLabel::High, PriorityLabel::Medium, PriorityLabel::Low];

/// `cellXfs` index of the header cells.
pub(crate) const HEADER_STYLE: usize = 1;

/// `cellXfs` index of a priority cell; follows the header entry.
pub(crate) fn priority_style(label: PriorityLabel) -> usize {
    let offset = PRIORITY_ORDER
        .iter()
        .position(|candidate| *candidate == label)
        .unwrap_or(0);
    HEADER_STYLE + 1 + offset
}

fn solid_fill(xml: &mut String, rgb: &str) -> Result<(), WorkbookError> {
    write!(
        xml,
        r#"<fill><patternFill patternType="solid"><fgColor rgb="FF{rgb}"/><bgColor rgb="FF{rgb}"/></patternFill></fill>"#
    )?;
    Ok(())
}

/// Fonts: 0 default, 1 bold white (header), 2 bold (priority).
/// Fills: 0 none, 1 gray125 (both reserved by Excel), 2 header, 3.. priorities.
pub(crate) fn styles_xml() -> Result<String, WorkbookError> {
    let mut xml = String::with_capacity(2048);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );

    xml.push_str(r#"<fonts count="3">"#);
    xml.push_str(r#"<font><sz val="11"/><name val="Calibri"/><family val="2"/></font>"#);
    xml.push_str(
        r#"<font><b/><sz val="11"/><color rgb="FFFFFFFF"/><name val="Calibri"/><family val="2"/></font>"#,
    );
    xml.push_str(r#"<font><b/><sz val="11"/><name val="Calibri"/><family val="2"/></font>"#);
    xml.push_str("</fonts>");

    write!(xml, r#"<fills count="{}">"#, 3 + PRIORITY_ORDER.len())?;
    xml.push_str(r#"<fill><patternFill patternType="none"/></fill>"#);
    xml.push_str(r#"<fill><patternFill patternType="gray125"/></fill>"#);
    solid_fill(&mut xml, HEADER_FILL)?;
    for label in PRIORITY_ORDER {
        solid_fill(&mut xml, label.fill_color())?;
    }
    xml.push_str("</fills>");

    xml.push_str(
        r#"<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>"#,
    );
    xml.push_str(
        r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
    );

    write!(xml, r#"<cellXfs count="{}">"#, 2 + PRIORITY_ORDER.len())?;
    xml.push_str(r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>"#);
    xml.push_str(
        r#"<xf numFmtId="0" fontId="1" fillId="2" borderId="0" xfId="0" applyFont="1" applyFill="1" applyAlignment="1"><alignment horizontal="center" vertical="center"/></xf>"#,
    );
    for (offset, _) in PRIORITY_ORDER.iter().enumerate() {
        write!(
            xml,
            r#"<xf numFmtId="0" fontId="2" fillId="{}" borderId="0" xfId="0" applyFont="1" applyFill="1"/>"#,
            3 + offset
        )?;
    }
    xml.push_str("</cellXfs>");

    xml.push_str(
        r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#,
    );
    xml.push_str("</styleSheet>");
    Ok(xml)
}
