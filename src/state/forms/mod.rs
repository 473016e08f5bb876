//! Form domain layer
//!
//! Configuration types, the form state engine and keyboard input handling
//! for the loaded form.

mod field;
mod form_state;
mod input;
mod timer;

pub use field::{FieldDescriptor, FieldKind, FormConfig, FormValues, QuestionGroup};
pub use form_state::{FlagTimings, FormEngine, SubmitOutcome, TransientFlag};
pub use input::{edit_for_key, FormCursor};
pub use timer::FlagExpiry;
