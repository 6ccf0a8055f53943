//! Petit Forms
//!
//! Contact-form behavior: per-field rule evaluation (required, email,
//! phone, bounded range), inline accessible error rendering, and submit
//! gating with a disabled control and transient outcome banner.

mod data;
mod field;
mod form;
mod rules;

pub use data::FormData;
pub use field::Field;
pub use form::{ContactForm, SubmitAction, SubmitError, BANNER_TTL, SUBMIT_LATENCY};
pub use rules::{first_violation, Rule, PHONE_MIN_SIGNIFICANT};
