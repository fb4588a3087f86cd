//! Spreadsheet export of the filtered guest list.
//!
//! The workbook is SpreadsheetML 2003, an XML format Excel and LibreOffice
//! open directly as `.xls`. Photos are never exported.

use std::{borrow::Cow, io::Cursor};

use axum::{
  extract::{Query, State, rejection::QueryRejection},
  http::header,
  response::IntoResponse,
};
use chrono::TimeZone;
use quick_xml::{
  Writer,
  events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event},
};
use tamu_core::{format, guest::GuestRecord, report, store::GuestStore};

use crate::{ApiState, error::ApiError, guests::ListParams, session::AdminSession};

pub const CONTENT_TYPE: &str = "application/vnd.ms-excel";
pub const SHEET_NAME: &str = "Data Tamu";

const NS_SPREADSHEET: &str = "urn:schemas-microsoft-com:office:spreadsheet";

/// Header text and column width in points.
const COLUMNS: [(&str, u32); 7] = [
  ("No", 35),
  ("Nama Lengkap", 175),
  ("Nomor Telepon", 105),
  ("Perusahaan/Instansi", 210),
  ("Tujuan Kunjungan", 175),
  ("Petugas Piket", 140),
  ("Waktu Kunjungan", 140),
];

type XmlWriter = Writer<Cursor<Vec<u8>>>;

// ─── Workbook ────────────────────────────────────────────────────────────────

/// Render `rows` as a single-sheet workbook, numbered from 1 in the given
/// order. Visit times are shown in `tz`.
pub fn workbook<Tz: TimeZone>(rows: &[&GuestRecord], tz: &Tz) -> Result<Vec<u8>, ApiError> {
  let mut w = Writer::new(Cursor::new(Vec::new()));

  emit(&mut w, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
  emit(&mut w, Event::PI(BytesPI::new(r#"mso-application progid="Excel.Sheet""#)))?;

  let mut root = BytesStart::new("Workbook");
  root.push_attribute(("xmlns", NS_SPREADSHEET));
  root.push_attribute(("xmlns:ss", NS_SPREADSHEET));
  emit(&mut w, Event::Start(root))?;

  start(&mut w, "Styles")?;
  let mut style = BytesStart::new("Style");
  style.push_attribute(("ss:ID", "header"));
  emit(&mut w, Event::Start(style))?;
  let mut font = BytesStart::new("Font");
  font.push_attribute(("ss:Bold", "1"));
  emit(&mut w, Event::Empty(font))?;
  end(&mut w, "Style")?;
  end(&mut w, "Styles")?;

  let mut sheet = BytesStart::new("Worksheet");
  sheet.push_attribute(("ss:Name", SHEET_NAME));
  emit(&mut w, Event::Start(sheet))?;
  start(&mut w, "Table")?;

  for (_, width) in COLUMNS {
    let mut col = BytesStart::new("Column");
    col.push_attribute(("ss:Width", width.to_string().as_str()));
    emit(&mut w, Event::Empty(col))?;
  }

  start(&mut w, "Row")?;
  for (title, _) in COLUMNS {
    cell(&mut w, "String", title, Some("header"))?;
  }
  end(&mut w, "Row")?;

  for (index, guest) in rows.iter().enumerate() {
    start(&mut w, "Row")?;
    cell(&mut w, "Number", &(index + 1).to_string(), None)?;
    cell(&mut w, "String", &guest.name, None)?;
    cell(&mut w, "String", guest.phone.as_deref().unwrap_or_default(), None)?;
    cell(&mut w, "String", guest.company.as_deref().unwrap_or_default(), None)?;
    cell(&mut w, "String", &guest.purpose, None)?;
    cell(&mut w, "String", &guest.officer, None)?;
    cell(&mut w, "String", &format::visit_time(guest.timestamp, tz), None)?;
    end(&mut w, "Row")?;
  }

  end(&mut w, "Table")?;
  end(&mut w, "Worksheet")?;
  end(&mut w, "Workbook")?;

  Ok(w.into_inner().into_inner())
}

fn emit(w: &mut XmlWriter, event: Event<'_>) -> Result<(), ApiError> {
  w.write_event(event)
    .map_err(|e| ApiError::Export(e.to_string()))
}

fn start(w: &mut XmlWriter, tag: &str) -> Result<(), ApiError> {
  emit(w, Event::Start(BytesStart::new(tag)))
}

fn end(w: &mut XmlWriter, tag: &str) -> Result<(), ApiError> {
  emit(w, Event::End(BytesEnd::new(tag)))
}

fn cell(w: &mut XmlWriter, kind: &str, text: &str, style: Option<&str>) -> Result<(), ApiError> {
  let mut el = BytesStart::new("Cell");
  if let Some(style) = style {
    el.push_attribute(("ss:StyleID", style));
  }
  emit(w, Event::Start(el))?;

  let mut data = BytesStart::new("Data");
  data.push_attribute(("ss:Type", kind));
  emit(w, Event::Start(data))?;
  emit(w, Event::Text(BytesText::new(&xml_text(text))))?;
  end(w, "Data")?;

  end(w, "Cell")
}

/// Drop characters XML 1.0 cannot carry. Escaping `&`, `<` and `>` is left to
/// [`BytesText`].
fn xml_text(text: &str) -> Cow<'_, str> {
  fn allowed(c: char) -> bool {
    matches!(
      c,
      '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
  }

  if text.chars().all(allowed) {
    Cow::Borrowed(text)
  } else {
    Cow::Owned(text.chars().filter(|&c| allowed(c)).collect())
  }
}

// ─── Handler ─────────────────────────────────────────────────────────────────

/// `GET /admin/export`, same query as `/admin/guests`.
pub async fn download<S>(
  _: AdminSession,
  State(state): State<ApiState<S>>,
  params: Result<Query<ListParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GuestStore + 'static,
{
  let Query(params) = params?;
  let spec = params.spec();
  let records = state.store.list_guests().await.map_err(ApiError::store)?;
  let now = state.now();

  let rows = report::filter(&records, &spec, &now);
  if rows.is_empty() {
    return Err(ApiError::NothingToExport);
  }

  let body = workbook(&rows, &state.offset)?;
  let file_name = format::export_file_name(&spec.label(), now.date_naive());
  tracing::info!(rows = rows.len(), file = %file_name, "export produced");

  Ok((
    [
      (header::CONTENT_TYPE, CONTENT_TYPE.to_owned()),
      (
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{file_name}\""),
      ),
    ],
    body,
  ))
}
