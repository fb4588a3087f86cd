//! Indonesian-locale date labels and export file naming.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use regex::Regex;

const MONTHS: [&str; 12] = [
  "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September",
  "Oktober", "November", "Desember",
];

const MONTHS_SHORT: [&str; 12] = [
  "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

static WHITESPACE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

static NON_WORD: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("non-word regex is valid"));

fn month_name(names: &[&'static str; 12], date: &impl Datelike) -> &'static str {
  names
    .get(date.month0() as usize)
    .copied()
    .unwrap_or_default()
}

/// `"1 Jan 2025"`.
pub fn short_date(date: NaiveDate) -> String {
  format!("{} {} {}", date.day(), month_name(&MONTHS_SHORT, &date), date.year())
}

/// `"01 Januari 2025 pukul 10.05"` in the zone of `tz`, or `"-"` when the
/// record has no timestamp.
pub fn visit_time<Tz: TimeZone>(ts: Option<DateTime<Utc>>, tz: &Tz) -> String {
  let Some(ts) = ts else {
    return "-".to_owned();
  };
  let local = ts.with_timezone(tz).naive_local();
  format!(
    "{:02} {} {} pukul {}",
    local.day(),
    month_name(&MONTHS, &local),
    local.year(),
    local.format("%H.%M"),
  )
}

/// `Buku_Tamu_KPU_<label>_<dd-mm-yyyy>.xls`, with whitespace runs in the
/// label turned into `_` and anything outside `[A-Za-z0-9_-]` dropped.
pub fn export_file_name(label: &str, today: NaiveDate) -> String {
  let label = WHITESPACE.replace_all(label, "_");
  let label = NON_WORD.replace_all(&label, "");
  format!("Buku_Tamu_KPU_{label}_{}.xls", today.format("%d-%m-%Y"))
}
