//! Aggregation and filtering over an in-memory snapshot of guest records.
//!
//! Both entry points are pure: they read the caller's slice, perform no I/O
//! and return fresh values. The snapshot may be stale relative to the store;
//! that is accepted.
//!
//! "Local" means the time zone carried by the `now` argument. Timestamps are
//! compared as local wall-clock times truncated to milliseconds, which makes
//! the inclusive `23:59:59.999` window ends equivalent to calendar-day
//! membership.

use std::{collections::HashMap, hash::Hash};

use chrono::{
  DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound,
  TimeDelta, TimeZone, Timelike, Utc,
};
use serde::{Deserialize, Serialize};

use crate::{format, guest::GuestRecord};

/// Entries kept in each top-N ranking.
pub const TOP_N: usize = 5;
/// Entries kept in the busiest-hours ranking.
pub const PEAK_HOURS_N: usize = 3;

// ─── Filter spec ─────────────────────────────────────────────────────────────

/// The reporting window requested by the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterSpec {
  #[default]
  All,
  Today,
  ThisWeek,
  ThisMonth,
  /// Inclusive date range. With either bound missing the filter keeps every
  /// record.
  Custom {
    start: Option<NaiveDate>,
    end:   Option<NaiveDate>,
  },
}

impl FilterSpec {
  /// Parse the dashboard's `?filter=` value. Unrecognised values mean `All`.
  pub fn from_query(
    filter: Option<&str>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
  ) -> Self {
    match filter.map(str::trim) {
      Some("today") => Self::Today,
      Some("week") => Self::ThisWeek,
      Some("month") => Self::ThisMonth,
      Some("custom") => Self::Custom { start, end },
      _ => Self::All,
    }
  }

  /// The inclusive window this spec selects on the calendar day `today`, or
  /// `None` when no filtering applies.
  pub fn window(&self, today: NaiveDate) -> Option<Window> {
    match *self {
      Self::All => None,
      Self::Today => Some(Window::day(today)),
      Self::ThisWeek => Some(Window::week_of(today)),
      Self::ThisMonth => Some(Window::month_of(today)),
      Self::Custom { start: Some(start), end: Some(end) } => {
        Some(Window::custom(start, end))
      }
      Self::Custom { .. } => None,
    }
  }

  /// Human-readable label, as shown on the dashboard and in export names.
  pub fn label(&self) -> String {
    match *self {
      Self::All => "Semua Data".to_owned(),
      Self::Today => "Hari Ini".to_owned(),
      Self::ThisWeek => "Minggu Ini".to_owned(),
      Self::ThisMonth => "Bulan Ini".to_owned(),
      Self::Custom { start: Some(start), end: Some(end) } => {
        format!("{} - {}", format::short_date(start), format::short_date(end))
      }
      Self::Custom { .. } => "Custom".to_owned(),
    }
  }
}

// ─── Windows ─────────────────────────────────────────────────────────────────

/// An inclusive range of local wall-clock times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
  pub start: NaiveDateTime,
  pub end:   NaiveDateTime,
}

impl Window {
  /// `00:00:00.000` through `23:59:59.999` of `date`.
  pub fn day(date: NaiveDate) -> Self {
    Self::custom(date, date)
  }

  /// Sunday through Saturday of the week containing `date`.
  pub fn week_of(date: NaiveDate) -> Self {
    let back = Days::new(date.weekday().num_days_from_sunday().into());
    let sunday = date.checked_sub_days(back).unwrap_or(NaiveDate::MIN);
    let saturday = sunday.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
    Self::custom(sunday, saturday)
  }

  /// First through last calendar day of `date`'s month.
  pub fn month_of(date: NaiveDate) -> Self {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
      .checked_add_months(Months::new(1))
      .and_then(|next| next.pred_opt())
      .unwrap_or(NaiveDate::MAX);
    Self::custom(first, last)
  }

  /// Start of `start` through end of `end`.
  pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
    Self { start: start_of_day(start), end: end_of_day(end) }
  }

  pub fn contains(&self, at: NaiveDateTime) -> bool {
    self.start <= at && at <= self.end
  }
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
  date.and_time(NaiveTime::MIN)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
  date
    .succ_opt()
    .map(|next| start_of_day(next) - TimeDelta::milliseconds(1))
    .unwrap_or(NaiveDateTime::MAX)
}

fn local_time<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> NaiveDateTime {
  ts.with_timezone(tz).naive_local().trunc_subsecs(3)
}

// ─── Filtering ───────────────────────────────────────────────────────────────

/// Keep the records that fall inside `spec`'s window, preserving input order.
///
/// `All` (and a `Custom` missing a bound) returns every record. Otherwise
/// records without a timestamp are dropped.
pub fn filter<'a, Tz: TimeZone>(
  records: &'a [GuestRecord],
  spec: &FilterSpec,
  now: &DateTime<Tz>,
) -> Vec<&'a GuestRecord> {
  let Some(window) = spec.window(now.date_naive()) else {
    return records.iter().collect();
  };
  let tz = now.timezone();

  records
    .iter()
    .filter(|r| {
      r.timestamp
        .is_some_and(|ts| window.contains(local_time(&ts, &tz)))
    })
    .collect()
}

// ─── Statistics ──────────────────────────────────────────────────────────────

/// One row of a frequency ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
  pub name:  String,
  pub count: usize,
}

/// One row of the busiest-hours ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakHour {
  /// Local hour of day, `0..=23`.
  pub hour:  u32,
  /// e.g. `"09:00 - 10:00"`; hour 23 renders as `"23:00 - 24:00"`.
  pub label: String,
  pub count: usize,
}

/// Dashboard summary over the full record set, independent of any filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
  pub today:         usize,
  /// Half-open: from yesterday's start up to, not including, today's start.
  pub yesterday:     usize,
  pub this_week:     usize,
  pub this_month:    usize,
  pub total:         usize,
  pub top_purposes:  Vec<RankEntry>,
  pub top_companies: Vec<RankEntry>,
  pub top_officers:  Vec<RankEntry>,
  pub peak_hours:    Vec<PeakHour>,
}

/// Compute period counts and rankings for `records` as seen at `now`.
pub fn summarize<Tz: TimeZone>(records: &[GuestRecord], now: &DateTime<Tz>) -> Statistics {
  let tz = now.timezone();
  let today = now.date_naive();

  let day = Window::day(today);
  let week = Window::week_of(today);
  let month = Window::month_of(today);
  let yesterday_start = today
    .pred_opt()
    .map(start_of_day)
    .unwrap_or(NaiveDateTime::MIN);

  let mut stats = Statistics { total: records.len(), ..Statistics::default() };

  for at in records
    .iter()
    .filter_map(|r| r.timestamp)
    .map(|ts| local_time(&ts, &tz))
  {
    if day.contains(at) {
      stats.today += 1;
    }
    if yesterday_start <= at && at < day.start {
      stats.yesterday += 1;
    }
    if week.contains(at) {
      stats.this_week += 1;
    }
    if month.contains(at) {
      stats.this_month += 1;
    }
  }

  stats.top_purposes = rank(records.iter().map(|r| Some(r.purpose.as_str())));
  stats.top_companies = rank(records.iter().map(|r| r.company.as_deref()));
  stats.top_officers = rank(records.iter().map(|r| Some(r.officer.as_str())));
  stats.peak_hours = peak_hours(records, &tz);

  stats
}

/// Count occurrences, most frequent first. Ties keep first-encountered order.
fn tally<K: Eq + Hash + Clone>(keys: impl IntoIterator<Item = K>) -> Vec<(K, usize)> {
  let mut index: HashMap<K, usize> = HashMap::new();
  let mut counts: Vec<(K, usize)> = Vec::new();

  for key in keys {
    if let Some(&i) = index.get(&key) {
      counts[i].1 += 1;
    } else {
      index.insert(key.clone(), counts.len());
      counts.push((key, 1));
    }
  }

  // `sort_by` is stable, which is what gives the tie-break.
  counts.sort_by(|a, b| b.1.cmp(&a.1));
  counts
}

fn rank<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<RankEntry> {
  tally(values.flatten().filter(|v| !v.is_empty()))
    .into_iter()
    .take(TOP_N)
    .map(|(name, count)| RankEntry { name: name.to_owned(), count })
    .collect()
}

fn peak_hours<Tz: TimeZone>(records: &[GuestRecord], tz: &Tz) -> Vec<PeakHour> {
  let hours = records
    .iter()
    .filter_map(|r| r.timestamp)
    .map(|ts| ts.with_timezone(tz).hour());

  tally(hours)
    .into_iter()
    .take(PEAK_HOURS_N)
    .map(|(hour, count)| PeakHour { hour, label: hour_label(hour), count })
    .collect()
}

pub fn hour_label(hour: u32) -> String {
  format!("{hour:02}:00 - {:02}:00", hour + 1)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::{FixedOffset, Weekday};
  use uuid::Uuid;

  use super::*;
  use crate::guest::PhotoRef;

  fn wib() -> FixedOffset {
    FixedOffset::east_opt(7 * 3600).unwrap()
  }

  fn at(tz: &FixedOffset, local: &str) -> DateTime<FixedOffset> {
    let naive = NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S%.f").unwrap();
    tz.from_local_datetime(&naive).single().unwrap()
  }

  fn guest(purpose: &str, company: Option<&str>, officer: &str, ts: Option<DateTime<Utc>>) -> GuestRecord {
    GuestRecord {
      id:        Uuid::new_v4(),
      name:      "Tamu".into(),
      phone:     None,
      company:   company.map(Into::into),
      purpose:   purpose.into(),
      photo:     PhotoRef { content_hash: "00".into(), media_type: "image/png".into() },
      officer:   officer.into(),
      timestamp: ts,
    }
  }

  fn visit(tz: &FixedOffset, local: &str) -> GuestRecord {
    guest("Layanan PPID", None, "Andi", Some(at(tz, local).with_timezone(&Utc)))
  }

  fn ids(records: &[&GuestRecord]) -> Vec<Uuid> {
    records.iter().map(|r| r.id).collect()
  }

  // ── Windows ───────────────────────────────────────────────────────────────

  #[test]
  fn week_always_spans_sunday_to_saturday() {
    let mut date = NaiveDate::from_ymd_opt(2024, 12, 20).unwrap();
    for _ in 0..21 {
      let w = Window::week_of(date);
      assert_eq!(w.start.weekday(), Weekday::Sun, "for {date}");
      assert_eq!(w.start.time(), NaiveTime::MIN);
      assert_eq!((w.end.date() - w.start.date()).num_days(), 6, "for {date}");
      assert_eq!(w.end.time(), NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap());
      assert!(w.contains(start_of_day(date)));
      date = date.succ_opt().unwrap();
    }
  }

  #[test]
  fn week_crossing_year_boundary() {
    let w = Window::week_of(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    assert_eq!(w.start.date(), NaiveDate::from_ymd_opt(2024, 12, 29).unwrap());
    assert_eq!(w.end.date(), NaiveDate::from_ymd_opt(2025, 1, 4).unwrap());
  }

  #[test]
  fn month_ends_on_last_calendar_day() {
    let feb = Window::month_of(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
    assert_eq!(feb.start.date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    assert_eq!(feb.end.date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

    let dec = Window::month_of(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    assert_eq!(dec.end.date(), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
  }

  // ── filter ────────────────────────────────────────────────────────────────

  #[test]
  fn today_keeps_same_local_day_only() {
    let tz = wib();
    let records = vec![
      visit(&tz, "2025-01-01T10:00:00"),
      visit(&tz, "2025-01-01T23:00:00"),
      visit(&tz, "2025-01-02T00:30:00"),
    ];
    let now = at(&tz, "2025-01-01T12:00:00");

    let out = filter(&records, &FilterSpec::Today, &now);
    assert_eq!(ids(&out), vec![records[0].id, records[1].id]);
    assert_eq!(out.len(), summarize(&records, &now).today);
  }

  #[test]
  fn day_boundary_follows_local_calendar_not_utc() {
    let tz = wib();
    // 20:00 UTC on Jan 1 is 03:00 on Jan 2 in UTC+7.
    let ts = Utc.with_ymd_and_hms(2025, 1, 1, 20, 0, 0).unwrap();
    let records = vec![guest("A", None, "Andi", Some(ts))];

    let jan2 = at(&tz, "2025-01-02T08:00:00");
    assert_eq!(filter(&records, &FilterSpec::Today, &jan2).len(), 1);

    let jan1_utc = Utc.with_ymd_and_hms(2025, 1, 1, 21, 0, 0).unwrap();
    assert_eq!(filter(&records, &FilterSpec::Today, &jan1_utc).len(), 1);
    let jan2_utc = Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap();
    assert_eq!(filter(&records, &FilterSpec::Today, &jan2_utc).len(), 0);
  }

  #[test]
  fn all_is_identity() {
    let tz = wib();
    let records = vec![
      visit(&tz, "2025-03-01T10:00:00"),
      guest("B", None, "Andi", None),
      visit(&tz, "2020-01-01T10:00:00"),
    ];
    let now = at(&tz, "2025-03-02T10:00:00");
    let out = filter(&records, &FilterSpec::All, &now);
    assert_eq!(out, records.iter().collect::<Vec<_>>());
  }

  #[test]
  fn week_and_month_bounds_are_inclusive() {
    let tz = wib();
    // 2025-01-01 is a Wednesday; its week runs Dec 29 – Jan 4.
    let records = vec![
      visit(&tz, "2024-12-28T23:59:59.999"),
      visit(&tz, "2024-12-29T00:00:00"),
      visit(&tz, "2025-01-04T23:59:59.999"),
      visit(&tz, "2025-01-05T00:00:00"),
      visit(&tz, "2025-01-31T23:59:59.999"),
    ];
    let now = at(&tz, "2025-01-01T12:00:00");

    let week = filter(&records, &FilterSpec::ThisWeek, &now);
    assert_eq!(ids(&week), vec![records[1].id, records[2].id]);

    let month = filter(&records, &FilterSpec::ThisMonth, &now);
    assert_eq!(ids(&month), vec![records[2].id, records[3].id, records[4].id]);
  }

  #[test]
  fn sub_millisecond_tail_of_day_still_counts() {
    let tz = wib();
    let records = vec![visit(&tz, "2025-01-01T23:59:59.999900")];
    let now = at(&tz, "2025-01-01T08:00:00");
    assert_eq!(filter(&records, &FilterSpec::Today, &now).len(), 1);
  }

  #[test]
  fn custom_range_is_inclusive_of_both_days() {
    let tz = wib();
    let records = vec![
      visit(&tz, "2025-01-01T23:00:00"),
      visit(&tz, "2025-01-02T00:30:00"),
      visit(&tz, "2025-01-03T23:59:59"),
      visit(&tz, "2025-01-04T00:00:00"),
    ];
    let now = at(&tz, "2025-06-01T00:00:00");
    let spec = FilterSpec::Custom {
      start: NaiveDate::from_ymd_opt(2025, 1, 2),
      end:   NaiveDate::from_ymd_opt(2025, 1, 3),
    };
    assert_eq!(ids(&filter(&records, &spec, &now)), vec![records[1].id, records[2].id]);
  }

  #[test]
  fn custom_missing_bound_keeps_everything() {
    let tz = wib();
    let records = vec![visit(&tz, "2025-01-01T10:00:00"), guest("B", None, "X", None)];
    let now = at(&tz, "2025-06-01T00:00:00");
    let spec = FilterSpec::Custom { start: NaiveDate::from_ymd_opt(2025, 1, 2), end: None };
    assert_eq!(filter(&records, &spec, &now).len(), 2);
  }

  #[test]
  fn records_without_timestamp_only_appear_unfiltered() {
    let tz = wib();
    let records = vec![guest("A", None, "X", None)];
    let now = at(&tz, "2025-01-01T10:00:00");
    for spec in [FilterSpec::Today, FilterSpec::ThisWeek, FilterSpec::ThisMonth] {
      assert!(filter(&records, &spec, &now).is_empty(), "{spec:?}");
    }
    assert_eq!(filter(&records, &FilterSpec::All, &now).len(), 1);
    assert_eq!(summarize(&records, &now).total, 1);
  }

  #[test]
  fn filter_preserves_input_order() {
    let tz = wib();
    let records = vec![
      visit(&tz, "2025-01-01T09:00:00"),
      visit(&tz, "2025-01-01T15:00:00"),
      visit(&tz, "2025-01-01T11:00:00"),
    ];
    let now = at(&tz, "2025-01-01T16:00:00");
    let out = filter(&records, &FilterSpec::Today, &now);
    assert_eq!(ids(&out), records.iter().map(|r| r.id).collect::<Vec<_>>());
  }

  // ── summarize ─────────────────────────────────────────────────────────────

  #[test]
  fn yesterday_is_half_open() {
    let tz = wib();
    let records = vec![
      visit(&tz, "2024-12-31T00:00:00"),
      visit(&tz, "2024-12-31T23:59:59.999"),
      visit(&tz, "2025-01-01T00:00:00"),
      visit(&tz, "2024-12-30T23:59:59.999"),
    ];
    let now = at(&tz, "2025-01-01T12:00:00");
    let stats = summarize(&records, &now);
    assert_eq!(stats.yesterday, 2);
    assert_eq!(stats.today, 1);
    assert_eq!(stats.total, 4);
  }

  #[test]
  fn period_counts_match_filters() {
    let tz = wib();
    let records = vec![
      visit(&tz, "2025-01-15T10:00:00"),
      visit(&tz, "2025-01-14T10:00:00"),
      visit(&tz, "2025-01-12T10:00:00"),
      visit(&tz, "2025-01-02T10:00:00"),
      visit(&tz, "2024-12-31T10:00:00"),
      visit(&tz, "2025-01-16T10:00:00"),
    ];
    let now = at(&tz, "2025-01-15T18:00:00");
    let stats = summarize(&records, &now);

    assert_eq!(stats.today, filter(&records, &FilterSpec::Today, &now).len());
    assert_eq!(stats.this_week, filter(&records, &FilterSpec::ThisWeek, &now).len());
    assert_eq!(stats.this_month, filter(&records, &FilterSpec::ThisMonth, &now).len());
    assert_eq!((stats.today, stats.yesterday, stats.this_week, stats.this_month), (1, 1, 4, 5));
    assert_eq!(stats.total, 6);
  }

  #[test]
  fn today_plus_earlier_never_exceeds_total() {
    let tz = wib();
    let records = vec![
      visit(&tz, "2025-01-01T10:00:00"),
      visit(&tz, "2024-12-01T10:00:00"),
      visit(&tz, "2025-02-01T10:00:00"),
      guest("A", None, "X", None),
    ];
    let now = at(&tz, "2025-01-01T12:00:00");
    let today_start = start_of_day(now.date_naive());
    let earlier = records
      .iter()
      .filter_map(|r| r.timestamp)
      .filter(|ts| local_time(ts, &tz) < today_start)
      .count();
    let stats = summarize(&records, &now);
    assert!(stats.today + earlier <= stats.total);
  }

  #[test]
  fn rankings_break_ties_by_first_seen() {
    let tz = wib();
    let ts = Some(at(&tz, "2025-01-01T10:00:00").with_timezone(&Utc));
    let records = vec![
      guest("Konsultasi", Some("PT B"), "Budi", ts),
      guest("Layanan PPID", Some("PT A"), "Andi", ts),
      guest("Layanan PPID", Some("PT A"), "Andi", ts),
      guest("Konsultasi", Some("PT B"), "Budi", ts),
      guest("Pengaduan", None, "Citra", ts),
    ];
    let stats = summarize(&records, &at(&tz, "2025-01-01T12:00:00"));

    fn names(v: &[RankEntry]) -> Vec<(&str, usize)> {
      v.iter().map(|e| (e.name.as_str(), e.count)).collect()
    }
    let purposes: Vec<(&str, usize)> = vec![("Konsultasi", 2), ("Layanan PPID", 2), ("Pengaduan", 1)];
    let companies: Vec<(&str, usize)> = vec![("PT B", 2), ("PT A", 2)];
    assert_eq!(names(&stats.top_purposes), purposes);
    assert_eq!(names(&stats.top_companies), companies);
    assert_eq!(names(&stats.top_officers)[0], ("Budi", 2));
  }

  #[test]
  fn rankings_skip_empty_values_and_truncate() {
    let records: Vec<_> = ["a", "b", "c", "d", "e", "f", "g", "", "a"]
      .iter()
      .map(|&c| guest(c, Some(c), "Andi", None))
      .collect();
    let stats = summarize(&records, &Utc::now());

    assert_eq!(stats.top_purposes.len(), TOP_N);
    assert_eq!(stats.top_purposes[0], RankEntry { name: "a".into(), count: 2 });
    assert!(stats.top_purposes.iter().all(|e| !e.name.is_empty()));
    assert!(stats.top_companies.iter().all(|e| !e.name.is_empty()));
  }

  #[test]
  fn peak_hours_rank_local_hours() {
    let tz = wib();
    let records = vec![
      visit(&tz, "2025-01-01T10:00:00"),
      visit(&tz, "2025-01-01T23:00:00"),
      visit(&tz, "2025-01-02T00:30:00"),
    ];
    let stats = summarize(&records, &at(&tz, "2025-01-01T12:00:00"));
    assert_eq!(stats.peak_hours.len(), 3);
    assert_eq!(stats.peak_hours[0].label, "10:00 - 11:00");
    assert_eq!(stats.peak_hours[1].label, "23:00 - 24:00");
    assert_eq!(stats.peak_hours[2].label, "00:00 - 01:00");
    assert!(stats.peak_hours.iter().all(|p| p.count == 1));
  }

  #[test]
  fn peak_hours_prefer_busier_hours() {
    let tz = wib();
    let records = vec![
      visit(&tz, "2025-01-01T08:10:00"),
      visit(&tz, "2025-01-01T13:00:00"),
      visit(&tz, "2025-01-02T13:45:00"),
      visit(&tz, "2025-01-03T09:00:00"),
      visit(&tz, "2025-01-03T09:30:00"),
      visit(&tz, "2025-01-04T09:59:59"),
      visit(&tz, "2025-01-04T15:00:00"),
    ];
    let stats = summarize(&records, &at(&tz, "2025-01-04T18:00:00"));
    let hours: Vec<_> = stats.peak_hours.iter().map(|p| (p.hour, p.count)).collect();
    assert_eq!(hours, vec![(9, 3), (13, 2), (8, 1)]);
  }

  #[test]
  fn summarize_is_repeatable() {
    let tz = wib();
    let records = vec![visit(&tz, "2025-01-01T10:00:00"), visit(&tz, "2024-12-31T10:00:00")];
    let snapshot = records.clone();
    let now = at(&tz, "2025-01-01T12:00:00");
    assert_eq!(summarize(&records, &now), summarize(&records, &now));
    assert_eq!(
      filter(&records, &FilterSpec::ThisWeek, &now),
      filter(&records, &FilterSpec::ThisWeek, &now)
    );
    assert_eq!(records, snapshot);
  }

  #[test]
  fn statistics_serialize_with_snake_case_fields() {
    let tz = wib();
    let records = vec![visit(&tz, "2025-01-01T09:15:00")];
    let stats = summarize(&records, &at(&tz, "2025-01-01T12:00:00"));

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["today"], 1);
    assert_eq!(json["this_week"], 1);
    assert_eq!(json["top_purposes"][0], serde_json::json!({ "name": "Layanan PPID", "count": 1 }));
    assert_eq!(
      json["peak_hours"][0],
      serde_json::json!({ "hour": 9, "label": "09:00 - 10:00", "count": 1 })
    );
  }

  #[test]
  fn hour_label_does_not_wrap() {
    assert_eq!(hour_label(0), "00:00 - 01:00");
    assert_eq!(hour_label(9), "09:00 - 10:00");
    assert_eq!(hour_label(23), "23:00 - 24:00");
  }

  // ── FilterSpec ────────────────────────────────────────────────────────────

  #[test]
  fn from_query_maps_known_values_and_defaults_to_all() {
    let d = NaiveDate::from_ymd_opt(2025, 1, 2);
    assert_eq!(FilterSpec::from_query(Some("today"), None, None), FilterSpec::Today);
    assert_eq!(FilterSpec::from_query(Some("week"), None, None), FilterSpec::ThisWeek);
    assert_eq!(FilterSpec::from_query(Some("month"), None, None), FilterSpec::ThisMonth);
    assert_eq!(
      FilterSpec::from_query(Some("custom"), d, d),
      FilterSpec::Custom { start: d, end: d }
    );
    assert_eq!(FilterSpec::from_query(Some("yearly"), None, None), FilterSpec::All);
    assert_eq!(FilterSpec::from_query(None, d, d), FilterSpec::All);
  }

  #[test]
  fn labels() {
    assert_eq!(FilterSpec::All.label(), "Semua Data");
    assert_eq!(FilterSpec::Today.label(), "Hari Ini");
    assert_eq!(FilterSpec::ThisWeek.label(), "Minggu Ini");
    assert_eq!(FilterSpec::ThisMonth.label(), "Bulan Ini");
    assert_eq!(FilterSpec::Custom { start: None, end: None }.label(), "Custom");
    let spec = FilterSpec::Custom {
      start: NaiveDate::from_ymd_opt(2025, 1, 1),
      end:   NaiveDate::from_ymd_opt(2025, 8, 17),
    };
    assert_eq!(spec.label(), "1 Jan 2025 - 17 Agu 2025");
  }
}
