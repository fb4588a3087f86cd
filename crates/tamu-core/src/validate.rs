//! Field checks and free-text sanitization applied before anything reaches
//! the store.

use std::sync::LazyLock;

use regex::Regex;

static ANGLE_BRACKETS: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[<>]").expect("angle bracket regex is valid"));

static JAVASCRIPT_SCHEME: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("scheme regex is valid"));

static EVENT_HANDLER: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)on[0-9a-z_]+=").expect("event handler regex is valid"));

/// C0/C1 controls other than tab, line feed and carriage return.
static CONTROL_CHARS: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[\p{Cc}&&[^\t\n\r]]").expect("control char regex is valid"));

static PHONE_SEPARATORS: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[\s-]").expect("separator regex is valid"));

/// Indonesian mobile shape: `+62`, `62` or trunk `0`, then 8–14 digits.
static PHONE_SHAPE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^(\+62|62|0)[0-9]{8,14}$").expect("phone regex is valid"));

/// Strip markup and script triggers from visitor-supplied text.
///
/// Removes control characters (except tab, LF and CR), `<`/`>`, `javascript:`
/// and `on<word>=` (case-insensitive) and trims surrounding whitespace. Passes repeat until the text stops changing, so
/// removing one fragment can never splice together a new one and
/// `sanitize(sanitize(s)) == sanitize(s)`.
pub fn sanitize(input: &str) -> String {
  let mut current = input.to_owned();
  loop {
    let next = strip_once(&current);
    if next == current {
      return next;
    }
    current = next;
  }
}

fn strip_once(input: &str) -> String {
  let text = CONTROL_CHARS.replace_all(input.trim(), "");
  let text = ANGLE_BRACKETS.replace_all(&text, "");
  let text = JAVASCRIPT_SCHEME.replace_all(&text, "");
  let text = EVENT_HANDLER.replace_all(&text, "");
  text.trim().to_owned()
}

/// Absent or empty input is valid only when `min == 0`; otherwise the trimmed
/// character count must lie in `min..=max`.
pub fn validate_length(input: Option<&str>, min: usize, max: usize) -> bool {
  match input {
    None | Some("") => min == 0,
    Some(text) => (min..=max).contains(&text.trim().chars().count()),
  }
}

/// Absent or empty input is valid (the field is optional). Spaces and hyphens
/// are ignored.
pub fn validate_phone_number(phone: Option<&str>) -> bool {
  match phone {
    None | Some("") => true,
    Some(p) => PHONE_SHAPE.is_match(&PHONE_SEPARATORS.replace_all(p, "")),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sanitize_strips_markup_and_handlers() {
    assert_eq!(sanitize("  <b>Budi</b>  "), "bBudi/b");
    assert_eq!(sanitize("JavaScript:alert(1)"), "alert(1)");
    assert_eq!(sanitize("x onClick=steal() y"), "x steal() y");
    assert_eq!(sanitize("PT Maju Jaya"), "PT Maju Jaya");
  }

  #[test]
  fn sanitize_keeps_words_that_merely_contain_on() {
    assert_eq!(sanitize("Dinas Lingkungan"), "Dinas Lingkungan");
    assert_eq!(sanitize("konsultasi data"), "konsultasi data");
  }

  #[test]
  fn sanitize_drops_control_characters() {
    assert_eq!(sanitize("Budi\u{1}\u{b}Santoso"), "BudiSantoso");
    assert_eq!(sanitize("\u{7f}PT\u{0} Maju\u{1b}"), "PT Maju");
    assert_eq!(sanitize("java\u{2}script:x"), "x");
    assert_eq!(sanitize("a\tb"), "a\tb");
    assert!(!validate_length(Some(&sanitize("\u{1}\u{2}\u{3}")), 2, 100));
  }

  #[test]
  fn sanitize_is_idempotent() {
    let samples = [
      "  plain  ",
      "<script>alert(1)</script>",
      "javajavascript:script:alert(1)",
      "ononclick==x",
      "< leading space",
      "on<x>load=1",
      "\u{1}on\u{2}click=\u{3}",
      "",
      "   ",
    ];
    for s in samples {
      let once = sanitize(s);
      assert_eq!(sanitize(&once), once, "input {s:?}");
    }
  }

  #[test]
  fn sanitize_removes_reassembled_payloads() {
    assert_eq!(sanitize("javajavascript:script:alert(1)"), "alert(1)");
    assert!(!sanitize("ononclick==x").to_lowercase().contains("onclick="));
  }

  #[test]
  fn length_bounds() {
    assert!(validate_length(Some("ab"), 2, 100));
    assert!(!validate_length(Some(" a "), 2, 100));
    assert!(!validate_length(Some(&"x".repeat(101)), 2, 100));
    assert!(validate_length(Some(&"x".repeat(100)), 2, 100));
  }

  #[test]
  fn length_of_absent_value_depends_on_min() {
    assert!(validate_length(None, 0, 200));
    assert!(validate_length(Some(""), 0, 200));
    assert!(!validate_length(None, 2, 100));
    assert!(!validate_length(Some(""), 3, 200));
  }

  #[test]
  fn length_counts_characters_not_bytes() {
    assert!(validate_length(Some("Éé"), 2, 2));
  }

  #[test]
  fn phone_accepts_indonesian_shapes() {
    assert!(validate_phone_number(Some("081234567890")));
    assert!(validate_phone_number(Some("+6281234567890")));
    assert!(validate_phone_number(Some("6281234567890")));
    assert!(validate_phone_number(Some("0812-3456-7890")));
    assert!(validate_phone_number(Some("0812 3456 7890")));
  }

  #[test]
  fn phone_rejects_bad_shapes() {
    assert!(!validate_phone_number(Some("12345")));
    assert!(!validate_phone_number(Some("0812")));
    assert!(!validate_phone_number(Some("0812345678901234567")));
    assert!(!validate_phone_number(Some("08123abc4567")));
  }

  #[test]
  fn phone_is_optional() {
    assert!(validate_phone_number(None));
    assert!(validate_phone_number(Some("")));
  }
}
