//! Keyword gate: a submission is admitted only with the active keyword.

use crate::{error::FlowError, keyword::Keyword, store::GuestStore};

/// Compare `submitted` (case-insensitively) against every active keyword and
/// return the first match. No rate limiting or lockout.
pub async fn check<S: GuestStore>(
  store: &S,
  submitted: &str,
) -> Result<Keyword, FlowError<S::Error>> {
  let wanted = submitted.to_lowercase();
  let candidates = store.active_keywords().await.map_err(FlowError::Store)?;

  match candidates
    .into_iter()
    .find(|kw| kw.value.to_lowercase() == wanted)
  {
    Some(kw) => Ok(kw),
    None => {
      tracing::warn!("submission rejected: keyword mismatch");
      Err(FlowError::InvalidKeyword)
    }
  }
}
