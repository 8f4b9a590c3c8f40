pub mod controller;
pub mod field;
pub mod prompt;
pub mod schema;

pub use controller::{EntryMode, FormController};
pub use field::{Field, FormValues};
pub use prompt::{PromptError, PromptOutcome, Prompter, Pools};
pub use schema::{validate, FieldError, ValidatedForm, MATCH_RESULT_SCHEMA};
