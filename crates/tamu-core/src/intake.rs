//! Visitor intake: photo → field checks → keyword gate → sanitize → persist.

use serde::Deserialize;

use crate::{
  error::{FlowError, ValidationError},
  gate,
  guest::{GuestRecord, NewGuest},
  photo::Photo,
  purpose,
  store::GuestStore,
  validate::{sanitize, validate_length, validate_phone_number},
};

/// The kiosk form as submitted by a visitor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuestForm {
  pub name:          String,
  #[serde(default)]
  pub phone:         Option<String>,
  #[serde(default)]
  pub company:       Option<String>,
  /// A [`purpose::CATALOG`] code.
  pub purpose:       String,
  /// Free-text description; required when `purpose` is [`purpose::OTHER`].
  #[serde(default)]
  pub purpose_other: Option<String>,
  pub keyword:       String,
  /// Webcam capture as a `data:image/...;base64,` URL.
  #[serde(default)]
  pub photo:         Option<String>,
}

/// Decode the photo and run every field check. Pure; touches no store.
pub fn validate_form(form: &GuestForm) -> Result<Photo, ValidationError> {
  let photo = match form.photo.as_deref().map(str::trim) {
    None | Some("") => return Err(ValidationError::PhotoMissing),
    Some(url) => Photo::from_data_url(url)?,
  };

  if !validate_length(Some(&form.name), 2, 100) {
    return Err(ValidationError::Name);
  }
  if !validate_phone_number(form.phone.as_deref()) {
    return Err(ValidationError::Phone);
  }
  if !validate_length(form.company.as_deref(), 0, 200) {
    return Err(ValidationError::Company);
  }
  match purpose::find(&form.purpose) {
    None => return Err(ValidationError::UnknownPurpose(form.purpose.clone())),
    Some(p) if p.code == purpose::OTHER => {
      if !validate_length(form.purpose_other.as_deref(), 3, 200) {
        return Err(ValidationError::OtherPurpose);
      }
    }
    Some(_) => {}
  }

  Ok(photo)
}

/// The stored purpose label for a validated form.
fn resolve_purpose(form: &GuestForm) -> Result<String, ValidationError> {
  match purpose::find(&form.purpose) {
    Some(p) if p.code == purpose::OTHER => {
      let text = sanitize(form.purpose_other.as_deref().unwrap_or_default());
      if text.chars().count() < 3 {
        return Err(ValidationError::OtherPurpose);
      }
      Ok(text)
    }
    Some(p) => Ok(p.label.to_owned()),
    None => Err(ValidationError::UnknownPurpose(form.purpose.clone())),
  }
}

fn sanitize_optional(value: Option<&str>) -> Option<String> {
  value.map(sanitize).filter(|s| !s.is_empty())
}

/// Run the full intake flow and persist the visit.
///
/// Nothing is written unless validation and the keyword gate both pass.
pub async fn submit<S: GuestStore>(
  store: &S,
  form: GuestForm,
) -> Result<GuestRecord, FlowError<S::Error>> {
  let photo = validate_form(&form)?;

  let keyword = gate::check(store, &sanitize(&form.keyword)).await?;

  let name = sanitize(&form.name);
  if name.chars().count() < 2 {
    return Err(ValidationError::Name.into());
  }

  let input = NewGuest {
    name,
    phone: sanitize_optional(form.phone.as_deref()),
    company: sanitize_optional(form.company.as_deref()),
    purpose: resolve_purpose(&form)?,
    photo,
    officer: keyword.officer,
  };

  let record = store.insert_guest(input).await.map_err(FlowError::Store)?;
  tracing::info!(guest_id = %record.id, "guest recorded");
  Ok(record)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::PhotoError;

  const PIXEL: &str = "data:image/png;base64,iVBORw0KGgo=";

  fn form() -> GuestForm {
    GuestForm {
      name: "Siti Aminah".into(),
      phone: Some("081234567890".into()),
      company: Some("Dinas Pendidikan".into()),
      purpose: "PPID".into(),
      purpose_other: None,
      keyword: "rapat2025".into(),
      photo: Some(PIXEL.into()),
    }
  }

  #[test]
  fn valid_form_passes() {
    let photo = validate_form(&form()).unwrap();
    assert_eq!(photo.media_type, "image/png");
  }

  #[test]
  fn photo_is_required() {
    let mut f = form();
    f.photo = None;
    assert_eq!(validate_form(&f).unwrap_err(), ValidationError::PhotoMissing);
    f.photo = Some("  ".into());
    assert_eq!(validate_form(&f).unwrap_err(), ValidationError::PhotoMissing);
    f.photo = Some("data:text/plain;base64,aGk=".into());
    assert_eq!(
      validate_form(&f).unwrap_err(),
      ValidationError::Photo(PhotoError::NotImage("text/plain".into()))
    );
  }

  #[test]
  fn name_length_is_checked_after_trim() {
    let mut f = form();
    f.name = " a ".into();
    assert_eq!(validate_form(&f).unwrap_err(), ValidationError::Name);
  }

  #[test]
  fn phone_and_company_are_optional_but_checked() {
    let mut f = form();
    f.phone = None;
    f.company = None;
    assert!(validate_form(&f).is_ok());

    f.phone = Some("12345".into());
    assert_eq!(validate_form(&f).unwrap_err(), ValidationError::Phone);

    f.phone = None;
    f.company = Some("x".repeat(201));
    assert_eq!(validate_form(&f).unwrap_err(), ValidationError::Company);
  }

  #[test]
  fn other_purpose_needs_a_description() {
    let mut f = form();
    f.purpose = purpose::OTHER.into();
    assert_eq!(validate_form(&f).unwrap_err(), ValidationError::OtherPurpose);

    f.purpose_other = Some("Konsultasi".into());
    assert!(validate_form(&f).is_ok());
    assert_eq!(resolve_purpose(&f).unwrap(), "Konsultasi");
  }

  #[test]
  fn catalog_code_resolves_to_label() {
    assert_eq!(resolve_purpose(&form()).unwrap(), "Layanan PPID");
  }

  #[test]
  fn unknown_purpose_is_rejected() {
    let mut f = form();
    f.purpose = "BOGUS".into();
    assert_eq!(
      validate_form(&f).unwrap_err(),
      ValidationError::UnknownPurpose("BOGUS".into())
    );
  }

  #[test]
  fn blank_optional_fields_become_absent() {
    assert_eq!(sanitize_optional(Some("  ")), None);
    assert_eq!(sanitize_optional(Some("<>")), None);
    assert_eq!(sanitize_optional(Some(" PT A ")), Some("PT A".into()));
    assert_eq!(sanitize_optional(None), None);
  }
}
