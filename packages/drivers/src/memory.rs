//! In-memory drivers for tests and demos.

use crate::driver::{ParticipantDriver, SurveyDriver};
use crate::errors::DriverError;
use async_trait::async_trait;
use formstudio_model::{Participant, Survey};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemorySurveyDriver {
    surveys: RwLock<BTreeMap<String, Survey>>,
}

impl MemorySurveyDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_survey(survey: Survey) -> Self {
        let mut surveys = BTreeMap::new();
        surveys.insert(survey.name.clone(), survey);
        Self {
            surveys: RwLock::new(surveys),
        }
    }
}

#[async_trait]
impl SurveyDriver for MemorySurveyDriver {
    async fn get_by_name(&self, name: &str) -> Result<Survey, DriverError> {
        self.surveys
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| DriverError::NotFound(name.to_string()))
    }

    async fn save(&self, survey: &Survey) -> Result<(), DriverError> {
        self.surveys
            .write()
            .await
            .insert(survey.name.clone(), survey.clone());
        Ok(())
    }
}

/// Participants keyed by survey name, then participant code
#[derive(Debug, Default)]
pub struct MemoryParticipantDriver {
    participants: RwLock<BTreeMap<(String, String), Participant>>,
}

impl MemoryParticipantDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_participants(
        survey: &str,
        participants: impl IntoIterator<Item = Participant>,
    ) -> Self {
        let participants = participants
            .into_iter()
            .map(|p| ((survey.to_string(), p.participant_code.clone()), p))
            .collect();
        Self {
            participants: RwLock::new(participants),
        }
    }
}

#[async_trait]
impl ParticipantDriver for MemoryParticipantDriver {
    async fn get_by_participant_code(
        &self,
        survey: &str,
        participant_code: &str,
    ) -> Result<Participant, DriverError> {
        self.participants
            .read()
            .await
            .get(&(survey.to_string(), participant_code.to_string()))
            .cloned()
            .ok_or_else(|| DriverError::NotFound(format!("{}/{}", survey, participant_code)))
    }

    async fn get_all(&self, survey: &str) -> Result<Vec<Participant>, DriverError> {
        Ok(self
            .participants
            .read()
            .await
            .iter()
            .filter(|((s, _), _)| s == survey)
            .map(|(_, p)| p.clone())
            .collect())
    }

    async fn save(&self, survey: &str, participant: &Participant) -> Result<(), DriverError> {
        self.participants.write().await.insert(
            (survey.to_string(), participant.participant_code.clone()),
            participant.clone(),
        );
        Ok(())
    }

    async fn delete(&self, survey: &str, participant_code: &str) -> Result<(), DriverError> {
        self.participants
            .write()
            .await
            .remove(&(survey.to_string(), participant_code.to_string()))
            .map(|_| ())
            .ok_or_else(|| DriverError::NotFound(format!("{}/{}", survey, participant_code)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_participants_are_scoped_by_survey() {
        let driver = MemoryParticipantDriver::with_participants(
            "cohort",
            vec![Participant::new("002", "S1"), Participant::new("001", "S1")],
        );
        driver
            .save("other", &Participant::new("003", "S2"))
            .await
            .unwrap();

        let codes: Vec<String> = driver
            .get_all("cohort")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.participant_code)
            .collect();
        assert_eq!(codes, vec!["001", "002"]);

        assert!(matches!(
            driver.get_by_participant_code("cohort", "003").await,
            Err(DriverError::NotFound(_))
        ));
        driver.delete("other", "003").await.unwrap();
        assert!(driver.get_all("other").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_survey() {
        let driver = MemorySurveyDriver::new();
        assert_eq!(
            driver.get_by_name("nope").await,
            Err(DriverError::NotFound("nope".into()))
        );
    }
}
