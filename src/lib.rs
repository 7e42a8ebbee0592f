//! Frequency tally for line-delimited produce sale records.
//!
//! [`FrequencyTable`] ingests newline-delimited item names, answers point
//! lookups, renders a bordered report, and persists the tally as
//! `<name> <count>` lines. The interactive front end lives in [`menu`] and
//! the binary; the table itself never prompts or prints.

pub mod config;
pub mod error;
pub mod histogram;
pub mod menu;
pub mod table;

pub use config::Config;
pub use error::TallyError;
pub use table::{FrequencyTable, LookupOutcome};
