//! # Formstudio Editor
//!
//! Structural editing of surveys that already have collected answers.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Survey / Participant values          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ adapters: MutableSurvey / MutableParticipant│
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ commands: start → can_apply → apply         │
//! │  - parts: parameter forms injected on start │
//! │  - predicates: commit gate over answers     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Same engine for parameters**: a command collects its parameters
//!    through ordinary survey fields rendered by the regular engine
//! 2. **Validate, then mutate**: `apply` resolves every parameter before
//!    touching either graph
//! 3. **Lockstep**: survey and participant page sets are resynchronised on
//!    every structural change
//! 4. **No rollback**: an abandoned edit is dropped with its adapters
//!
//! ## Usage
//!
//! ```rust
//! use formstudio_editor::{parts, Command, CommandKind, MutableParticipant, MutableSurvey};
//! use formstudio_model::{
//!     Interview, InterviewItem, ItemType, ItemValue, Participant, SurveyBuilder,
//! };
//!
//! let mut b = SurveyBuilder::new("demo");
//! b.page("P1").question("AGE", ItemType::Integer);
//! b.page_set("INCL").pages(&["P1"]);
//! let survey = b.build().unwrap();
//! let participant = Participant::new("001", "S1").with_interview(
//!     Interview::new(survey.page_sets[0].clone())
//!         .with_item(InterviewItem::new("AGE", ItemValue::Integer(42))),
//! );
//!
//! let mut survey = MutableSurvey::new(survey);
//! let mut participant = MutableParticipant::new(participant);
//! let mut command = Command::new(CommandKind::DeleteItem { page: 0, index: 0, count: 1 });
//!
//! command.start(&mut survey, &mut participant).unwrap();
//! let answers = vec![InterviewItem::new(parts::INFO_DELETION, ItemValue::Bool(true))];
//! assert!(command.can_apply(&survey.value(), &answers));
//!
//! command.apply(&mut survey, &mut participant, &answers).unwrap();
//! assert!(survey.value().item("AGE").is_none());
//! assert!(participant.value().items().next().is_none());
//! ```

mod adapters;
mod commands;
mod config;
mod errors;
pub mod parts;
pub mod predicates;

pub use adapters::{is_consistent, Dirty, MutableParticipant, MutableSurvey};
pub use commands::{Command, CommandKind, Phase, Staging};
pub use config::{StudioConfig, DEFAULT_CONFIG_NAME};
pub use errors::StudioError;
