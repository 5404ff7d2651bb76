//! Service layer for poolwizard
//!
//! The wizard controller and its command queue, one-off token inspection,
//! and the block explorer. Chain access goes through the traits in
//! [`crate::chain`]; persistence through [`crate::storage`].

pub mod explorer;
pub mod handle;
pub mod inspect;
pub mod wizard;

#[cfg(test)]
pub(crate) mod testing;

pub use explorer::{BlockExplorer, DEFAULT_PAGE_SIZE};
pub use handle::{Submission, WizardCommand, WizardHandle};
pub use wizard::{WizardController, WizardView};
