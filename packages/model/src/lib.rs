//! # Formstudio Model
//!
//! Survey schema and participant answer data.
//!
//! ## Structure
//!
//! ```text
//! Survey
//!  ├─ workflows ── page-set types
//!  ├─ page sets ── page codes
//!  ├─ pages ────── fields (PageItem)
//!  └─ cross rules ─ variable names
//!
//! Participant
//!  └─ interviews (one page set each)
//!      └─ answered items ─ variable names
//! ```
//!
//! Values are plain data. Structural edits go through the editor's
//! mutable adapters, never through these types directly.

mod builder;
mod error;
mod item;
mod participant;
mod rule;
mod survey;
mod translations;

pub use builder::{
    validate, ItemBuilder, PageBuilder, PageSetBuilder, SurveyBuilder, WorkflowBuilder,
};
pub use error::ModelError;
pub use item::{ChoiceType, ItemType, Multiplicity, PageItem};
pub use participant::{Interview, InterviewItem, ItemValue, Participant};
pub use rule::{CrossRule, LetterCase, Rule};
pub use survey::{Page, PageSet, Survey, SurveyOptions, Workflow, MAIN_WORKFLOW};
pub use translations::{table_column, Translations, CODE_KEY, TABLE_SEPARATOR};
