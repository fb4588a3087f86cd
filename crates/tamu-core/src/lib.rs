//! Core types, rules and reporting for the Tamu visitor log.
//!
//! This crate knows nothing about HTTP or databases. Storage backends
//! implement [`store::GuestStore`]; the API layer drives the flows in
//! [`intake`], [`gate`] and [`keyword`] and renders [`report`] output.

pub mod error;
pub mod format;
pub mod gate;
pub mod guest;
pub mod intake;
pub mod keyword;
pub mod photo;
pub mod purpose;
pub mod report;
pub mod store;
pub mod validate;

pub use error::{FlowError, PhotoError, ValidationError};
