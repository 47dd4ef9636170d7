use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProgramResult;
use crate::models::Program;

/// Repository trait for reading programs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgramRepository: Send + Sync {
    /// Active programs, newest `created_at` first
    async fn list_active(&self) -> ProgramResult<Vec<Program>>;

    /// Check the backing store is reachable
    async fn health_check(&self) -> ProgramResult<()>;
}

/// Lets a service hold `Arc<dyn ProgramRepository>` and swap backends at runtime.
#[async_trait]
impl<T: ProgramRepository + ?Sized> ProgramRepository for Arc<T> {
    async fn list_active(&self) -> ProgramResult<Vec<Program>> {
        (**self).list_active().await
    }

    async fn health_check(&self) -> ProgramResult<()> {
        (**self).health_check().await
    }
}

/// In-memory implementation of ProgramRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProgramRepository {
    programs: Arc<RwLock<Vec<Program>>>,
}

impl InMemoryProgramRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_programs(programs: Vec<Program>) -> Self {
        Self {
            programs: Arc::new(RwLock::new(programs)),
        }
    }

    pub async fn insert(&self, program: Program) {
        self.programs.write().await.push(program);
    }
}

#[async_trait]
impl ProgramRepository for InMemoryProgramRepository {
    async fn list_active(&self) -> ProgramResult<Vec<Program>> {
        let programs = self.programs.read().await;

        let mut result: Vec<Program> = programs.iter().filter(|p| p.is_active).cloned().collect();

        // Sort by created_at descending (newest first)
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(result)
    }

    async fn health_check(&self) -> ProgramResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn program(title: &str, is_active: bool, age_days: i64) -> Program {
        Program {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: None,
            is_active,
            created_at: Utc::now() - Duration::days(age_days),
        }
    }

    #[tokio::test]
    async fn test_list_active_filters_and_orders() {
        let repo = InMemoryProgramRepository::with_programs(vec![
            program("old", true, 10),
            program("hidden", false, 0),
            program("new", true, 1),
        ]);

        let titles: Vec<String> = repo
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();

        assert_eq!(titles, vec!["new", "old"]);
    }

    #[tokio::test]
    async fn test_list_active_sees_new_rows() {
        let repo = InMemoryProgramRepository::new();
        assert!(repo.list_active().await.unwrap().is_empty());

        repo.insert(program("fresh", true, 0)).await;
        assert_eq!(repo.list_active().await.unwrap().len(), 1);
    }
}
