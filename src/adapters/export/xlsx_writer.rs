//! XLSX Writer - SpreadsheetML implementation of the SpreadsheetWriter port.
//!
//! Produces a minimal Office Open XML workbook: one worksheet, inline strings,
//! a small fixed stylesheet, explicit column widths and merged cells. Parts
//! are written with `quick-xml` and packaged with `zip`.
//!
//! # Package Layout
//!
//! ```text
//! [Content_Types].xml
//! _rels/.rels
//! xl/workbook.xml
//! xl/_rels/workbook.xml.rels
//! xl/styles.xml
//! xl/worksheets/sheet1.xml
//! ```

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::borrow::Cow;
use std::fmt::Write as _;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::export::{Cell, ExportError, MergeRange, RowKind, SheetLayout};
use crate::ports::SpreadsheetWriter;

const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

// cellXfs indexes: 0 default, 1 header, 2 wrapped data, 3 total, 4 plain data.
const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="2"><font><sz val="11"/><name val="Calibri"/><family val="2"/></font><font><b/><sz val="11"/><name val="Calibri"/><family val="2"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="5"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1" applyAlignment="1"><alignment horizontal="center" vertical="center" wrapText="1"/></xf><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0" applyAlignment="1"><alignment vertical="top" wrapText="1"/></xf><xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1" applyAlignment="1"><alignment vertical="top"/></xf><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0" applyAlignment="1"><alignment vertical="top"/></xf></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#;

const STYLE_HEADER: u8 = 1;
const STYLE_WRAPPED: u8 = 2;
const STYLE_TOTAL: u8 = 3;
const STYLE_PLAIN: u8 = 4;

/// Writes `.xlsx` workbooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxWriter;

impl XlsxWriter {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self
    }
}

impl SpreadsheetWriter for XlsxWriter {
    fn write(&self, layout: &SheetLayout) -> Result<Vec<u8>, ExportError> {
        let workbook = workbook_xml(&layout.name)?;
        let sheet = worksheet_xml(layout)?;

        let parts: [(&str, &[u8]); 6] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
            ("_rels/.rels", ROOT_RELS_XML.as_bytes()),
            ("xl/workbook.xml", workbook.as_slice()),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML.as_bytes()),
            ("xl/styles.xml", STYLES_XML.as_bytes()),
            ("xl/worksheets/sheet1.xml", sheet.as_slice()),
        ];

        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, bytes) in parts {
            zip.start_file(name, options)
                .map_err(|e| ExportError::spreadsheet(e.to_string()))?;
            zip.write_all(bytes)
                .map_err(|e| ExportError::spreadsheet(e.to_string()))?;
        }
        let cursor = zip
            .finish()
            .map_err(|e| ExportError::spreadsheet(e.to_string()))?;

        Ok(cursor.into_inner())
    }

    fn extension(&self) -> &'static str {
        "xlsx"
    }
}

/// Converts a zero-based column index to letters (0 → A, 25 → Z, 26 → AA).
pub fn column_letters(col: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// A1-style reference for a zero-based position.
pub fn cell_reference(row: usize, col: usize) -> String {
    format!("{}{}", column_letters(col), row + 1)
}

/// Encodes characters XML 1.0 cannot carry as SpreadsheetML `_xHHHH_` escapes.
///
/// An underscore that would otherwise start a literal `_xHHHH_` sequence is
/// itself escaped as `_x005F_` so the text reads back unchanged.
pub fn encode_cell_text(text: &str) -> Cow<'_, str> {
    if !text
        .char_indices()
        .any(|(i, ch)| is_forbidden_in_xml(ch) || starts_escape_sequence(&text[i..]))
    {
        return Cow::Borrowed(text);
    }

    let mut encoded = String::with_capacity(text.len() + 16);
    for (i, ch) in text.char_indices() {
        if is_forbidden_in_xml(ch) || (ch == '_' && starts_escape_sequence(&text[i..])) {
            let _ = write!(encoded, "_x{:04X}_", u32::from(ch));
        } else {
            encoded.push(ch);
        }
    }
    Cow::Owned(encoded)
}

/// Characters outside the XML 1.0 `Char` production.
fn is_forbidden_in_xml(ch: char) -> bool {
    matches!(
        ch,
        '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
    )
}

fn starts_escape_sequence(rest: &str) -> bool {
    let bytes = rest.as_bytes();
    bytes.len() >= 7
        && bytes[0] == b'_'
        && bytes[1] == b'x'
        && bytes[2..6].iter().all(u8::is_ascii_hexdigit)
        && bytes[6] == b'_'
}

fn merge_reference(merge: &MergeRange) -> String {
    format!(
        "{}:{}",
        cell_reference(merge.first_row, merge.first_col),
        cell_reference(merge.last_row, merge.last_col)
    )
}

type XmlWriter = Writer<Vec<u8>>;

fn emit(writer: &mut XmlWriter, event: Event<'_>) -> Result<(), ExportError> {
    writer
        .write_event(event)
        .map_err(|e| ExportError::spreadsheet(e.to_string()))
}

fn xml_writer() -> Result<XmlWriter, ExportError> {
    let mut writer = Writer::new(Vec::new());
    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))),
    )?;
    Ok(writer)
}

fn workbook_xml(sheet_name: &str) -> Result<Vec<u8>, ExportError> {
    let mut w = xml_writer()?;
    emit(
        &mut w,
        Event::Start(
            BytesStart::new("workbook")
                .with_attributes([("xmlns", SPREADSHEET_NS), ("xmlns:r", RELATIONSHIPS_NS)]),
        ),
    )?;
    emit(&mut w, Event::Start(BytesStart::new("sheets")))?;
    emit(
        &mut w,
        Event::Empty(BytesStart::new("sheet").with_attributes([
            ("name", sheet_name),
            ("sheetId", "1"),
            ("r:id", "rId1"),
        ])),
    )?;
    emit(&mut w, Event::End(BytesEnd::new("sheets")))?;
    emit(&mut w, Event::End(BytesEnd::new("workbook")))?;
    Ok(w.into_inner())
}

fn worksheet_xml(layout: &SheetLayout) -> Result<Vec<u8>, ExportError> {
    let mut w = xml_writer()?;
    emit(
        &mut w,
        Event::Start(
            BytesStart::new("worksheet")
                .with_attributes([("xmlns", SPREADSHEET_NS), ("xmlns:r", RELATIONSHIPS_NS)]),
        ),
    )?;

    let last_row = layout.row_count().max(1) - 1;
    let last_col = layout.column_count().max(1) - 1;
    let dimension = format!("A1:{}", cell_reference(last_row, last_col));
    emit(
        &mut w,
        Event::Empty(BytesStart::new("dimension").with_attributes([("ref", dimension.as_str())])),
    )?;

    write_columns(&mut w, layout)?;
    write_sheet_data(&mut w, layout)?;
    write_merges(&mut w, &layout.merges)?;

    emit(&mut w, Event::End(BytesEnd::new("worksheet")))?;
    Ok(w.into_inner())
}

fn write_columns(w: &mut XmlWriter, layout: &SheetLayout) -> Result<(), ExportError> {
    emit(w, Event::Start(BytesStart::new("cols")))?;
    for (index, width) in layout.column_widths.iter().enumerate() {
        let position = (index + 1).to_string();
        let width = width.to_string();
        emit(
            w,
            Event::Empty(BytesStart::new("col").with_attributes([
                ("min", position.as_str()),
                ("max", position.as_str()),
                ("width", width.as_str()),
                ("customWidth", "1"),
            ])),
        )?;
    }
    emit(w, Event::End(BytesEnd::new("cols")))
}

fn write_sheet_data(w: &mut XmlWriter, layout: &SheetLayout) -> Result<(), ExportError> {
    emit(w, Event::Start(BytesStart::new("sheetData")))?;
    for (row_index, row) in layout.rows.iter().enumerate() {
        let row_number = (row_index + 1).to_string();
        emit(
            w,
            Event::Start(BytesStart::new("row").with_attributes([("r", row_number.as_str())])),
        )?;
        for (col_index, cell) in row.cells.iter().enumerate() {
            let wrap = layout.wrap_columns.get(col_index).copied().unwrap_or(false);
            let style = match row.kind {
                RowKind::Header => STYLE_HEADER,
                RowKind::Total => STYLE_TOTAL,
                RowKind::Data if wrap => STYLE_WRAPPED,
                RowKind::Data => STYLE_PLAIN,
            };
            write_cell(w, &cell_reference(row_index, col_index), style, cell)?;
        }
        emit(w, Event::End(BytesEnd::new("row")))?;
    }
    emit(w, Event::End(BytesEnd::new("sheetData")))
}

fn write_cell(w: &mut XmlWriter, reference: &str, style: u8, cell: &Cell) -> Result<(), ExportError> {
    let style = style.to_string();
    let mut start = BytesStart::new("c");
    start.push_attribute(("r", reference));
    start.push_attribute(("s", style.as_str()));

    match cell {
        // Styled but valueless so header merges keep their formatting.
        Cell::Empty => emit(w, Event::Empty(start)),
        Cell::Integer(value) => {
            emit(w, Event::Start(start))?;
            emit(w, Event::Start(BytesStart::new("v")))?;
            emit(w, Event::Text(BytesText::new(&value.to_string())))?;
            emit(w, Event::End(BytesEnd::new("v")))?;
            emit(w, Event::End(BytesEnd::new("c")))
        }
        Cell::Text(text) => {
            start.push_attribute(("t", "inlineStr"));
            emit(w, Event::Start(start))?;
            emit(w, Event::Start(BytesStart::new("is")))?;
            emit(
                w,
                Event::Start(BytesStart::new("t").with_attributes([("xml:space", "preserve")])),
            )?;
            emit(w, Event::Text(BytesText::new(&encode_cell_text(text))))?;
            emit(w, Event::End(BytesEnd::new("t")))?;
            emit(w, Event::End(BytesEnd::new("is")))?;
            emit(w, Event::End(BytesEnd::new("c")))
        }
    }
}

fn write_merges(w: &mut XmlWriter, merges: &[MergeRange]) -> Result<(), ExportError> {
    if merges.is_empty() {
        return Ok(());
    }
    let count = merges.len().to_string();
    emit(
        w,
        Event::Start(BytesStart::new("mergeCells").with_attributes([("count", count.as_str())])),
    )?;
    for merge in merges {
        let reference = merge_reference(merge);
        emit(
            w,
            Event::Empty(BytesStart::new("mergeCell").with_attributes([("ref", reference.as_str())])),
        )?;
    }
    emit(w, Event::End(BytesEnd::new("mergeCells")))
}
