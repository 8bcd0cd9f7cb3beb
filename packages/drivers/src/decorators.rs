//! Driver decorators that trade plain values for mutable adapters.
//!
//! Reads wrap the fetched value in an adapter. Saves take a record that
//! must hold an adapter; a plain value is rejected with
//! [`DriverError::NotMutable`].

use crate::driver::{ParticipantDriver, SurveyDriver};
use crate::errors::DriverError;
use formstudio_editor::{MutableParticipant, MutableSurvey};
use formstudio_model::{Participant, Survey};
use tracing::{debug, instrument, warn};

/// A survey handed to [`MutableSurveyDriver::save`]
#[derive(Debug, Clone, Copy)]
pub enum SurveyRecord<'a> {
    Plain(&'a Survey),
    Mutable(&'a MutableSurvey),
}

impl<'a> From<&'a Survey> for SurveyRecord<'a> {
    fn from(survey: &'a Survey) -> Self {
        SurveyRecord::Plain(survey)
    }
}

impl<'a> From<&'a MutableSurvey> for SurveyRecord<'a> {
    fn from(survey: &'a MutableSurvey) -> Self {
        SurveyRecord::Mutable(survey)
    }
}

/// A participant handed to [`MutableParticipantDriver`]
#[derive(Debug, Clone, Copy)]
pub enum ParticipantRecord<'a> {
    Plain(&'a Participant),
    Mutable(&'a MutableParticipant),
}

impl<'a> From<&'a Participant> for ParticipantRecord<'a> {
    fn from(participant: &'a Participant) -> Self {
        ParticipantRecord::Plain(participant)
    }
}

impl<'a> From<&'a MutableParticipant> for ParticipantRecord<'a> {
    fn from(participant: &'a MutableParticipant) -> Self {
        ParticipantRecord::Mutable(participant)
    }
}

pub struct MutableSurveyDriver<D> {
    inner: D,
}

impl<D: SurveyDriver> MutableSurveyDriver<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub async fn get_by_name(&self, name: &str) -> Result<MutableSurvey, DriverError> {
        let survey = self.inner.get_by_name(name).await?;
        debug!(survey = name, pages = survey.pages.len(), "Loaded survey");
        Ok(MutableSurvey::new(survey))
    }

    #[instrument(skip_all)]
    pub async fn save<'a>(&self, record: impl Into<SurveyRecord<'a>>) -> Result<(), DriverError> {
        match record.into() {
            SurveyRecord::Mutable(survey) => {
                debug!(survey = survey.name(), dirty = survey.dirty().any(), "Saving survey");
                self.inner.save(&survey.value()).await
            }
            SurveyRecord::Plain(survey) => {
                warn!(survey = %survey.name, "Rejected plain survey");
                Err(DriverError::NotMutable)
            }
        }
    }
}

pub struct MutableParticipantDriver<D> {
    inner: D,
}

impl<D: ParticipantDriver> MutableParticipantDriver<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub async fn get_by_participant_code(
        &self,
        survey: &str,
        participant_code: &str,
    ) -> Result<MutableParticipant, DriverError> {
        let participant = self
            .inner
            .get_by_participant_code(survey, participant_code)
            .await?;
        Ok(MutableParticipant::new(participant))
    }

    pub async fn get_all(&self, survey: &str) -> Result<Vec<MutableParticipant>, DriverError> {
        let participants = self.inner.get_all(survey).await?;
        debug!(survey, count = participants.len(), "Loaded participants");
        Ok(participants.into_iter().map(MutableParticipant::new).collect())
    }

    #[instrument(skip_all, fields(survey = survey))]
    pub async fn save<'a>(
        &self,
        survey: &str,
        record: impl Into<ParticipantRecord<'a>>,
    ) -> Result<(), DriverError> {
        match record.into() {
            ParticipantRecord::Mutable(participant) => {
                debug!(
                    participant = participant.participant_code(),
                    dirty = participant.is_dirty(),
                    "Saving participant"
                );
                self.inner.save(survey, &participant.value()).await
            }
            ParticipantRecord::Plain(participant) => {
                warn!(participant = %participant.participant_code, "Rejected plain participant");
                Err(DriverError::NotMutable)
            }
        }
    }

    /// Never supported through the mutable layer
    pub async fn delete<'a>(
        &self,
        survey: &str,
        record: impl Into<ParticipantRecord<'a>>,
    ) -> Result<(), DriverError> {
        let code = match record.into() {
            ParticipantRecord::Mutable(p) => p.participant_code().to_string(),
            ParticipantRecord::Plain(p) => p.participant_code.clone(),
        };
        warn!(survey, participant = %code, "Rejected participant deletion");
        Err(DriverError::Unsupported("participant deletion"))
    }
}
