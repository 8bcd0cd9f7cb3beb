use crate::errors::DriverError;
use async_trait::async_trait;
use formstudio_model::{Participant, Survey};

/// Fetches and stores surveys by name
#[async_trait]
pub trait SurveyDriver: Send + Sync {
    async fn get_by_name(&self, name: &str) -> Result<Survey, DriverError>;
    async fn save(&self, survey: &Survey) -> Result<(), DriverError>;
}

/// Fetches and stores the participants of a survey
#[async_trait]
pub trait ParticipantDriver: Send + Sync {
    async fn get_by_participant_code(
        &self,
        survey: &str,
        participant_code: &str,
    ) -> Result<Participant, DriverError>;
    async fn get_all(&self, survey: &str) -> Result<Vec<Participant>, DriverError>;
    async fn save(&self, survey: &str, participant: &Participant) -> Result<(), DriverError>;
    async fn delete(&self, survey: &str, participant_code: &str) -> Result<(), DriverError>;
}
