//! PPDB 报名向导
pub mod draft;
pub mod fields;
pub mod form;
pub mod machine;
pub mod step;
pub mod summary;
pub mod validate;

pub use form::WizardPage;
pub use machine::{Outcome, WizardAction, WizardEffect};
pub use step::Step;
pub use summary::confirmation_summary;
