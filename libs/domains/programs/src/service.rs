use std::sync::Arc;

use crate::error::ProgramResult;
use crate::models::Program;
use crate::repository::ProgramRepository;

/// Service layer for programs
#[derive(Clone)]
pub struct ProgramService<R: ProgramRepository> {
    repository: Arc<R>,
}

impl<R: ProgramRepository> ProgramService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Active programs, newest first
    pub async fn list_active_programs(&self) -> ProgramResult<Vec<Program>> {
        self.repository.list_active().await
    }

    pub async fn health_check(&self) -> ProgramResult<()> {
        self.repository.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProgramError;
    use crate::repository::MockProgramRepository;
    use chrono::Utc;
    use database::DatabaseError;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_list_active_programs_returns_repository_rows() {
        let mut mock_repo = MockProgramRepository::new();
        let program = Program {
            id: Uuid::new_v4(),
            title: "Spring cohort".to_string(),
            description: Some("Twelve weeks".to_string()),
            is_active: true,
            created_at: Utc::now(),
        };
        let expected = vec![program.clone()];

        mock_repo
            .expect_list_active()
            .times(1)
            .returning(move || Ok(vec![program.clone()]));

        let service = ProgramService::new(mock_repo);
        let programs = service.list_active_programs().await.unwrap();

        assert_eq!(programs, expected);
    }

    #[tokio::test]
    async fn test_every_call_refetches() {
        let mut mock_repo = MockProgramRepository::new();
        mock_repo.expect_list_active().times(2).returning(|| Ok(vec![]));

        let service = ProgramService::new(mock_repo);
        service.list_active_programs().await.unwrap();
        service.list_active_programs().await.unwrap();
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let mut mock_repo = MockProgramRepository::new();
        mock_repo.expect_list_active().returning(|| {
            Err(ProgramError::Store(DatabaseError::Status {
                status: 503,
                message: "unavailable".to_string(),
            }))
        });

        let service = ProgramService::new(mock_repo);
        assert!(matches!(
            service.list_active_programs().await,
            Err(ProgramError::Store(_))
        ));
    }
}
