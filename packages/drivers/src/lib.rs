//! # Formstudio Drivers
//!
//! Persistence boundary for the editor.
//!
//! [`SurveyDriver`] and [`ParticipantDriver`] fetch and store plain model
//! values. The decorators in this crate wrap them so that reads hand back
//! mutable adapters and saves only accept adapters, which is what the
//! editor's commands run against.
//!
//! ```text
//! MutableSurveyDriver ──wraps──> impl SurveyDriver ──> storage
//!        │
//!        └─ get_by_name → MutableSurvey → Command::start / apply → save
//! ```

mod decorators;
mod driver;
mod errors;
mod memory;

pub use decorators::{MutableParticipantDriver, MutableSurveyDriver, ParticipantRecord, SurveyRecord};
pub use driver::{ParticipantDriver, SurveyDriver};
pub use errors::DriverError;
pub use memory::{MemoryParticipantDriver, MemorySurveyDriver};
