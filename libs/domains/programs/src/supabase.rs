use async_trait::async_trait;
use database::supabase::{self, Query, SupabaseClient};

use crate::error::ProgramResult;
use crate::models::Program;
use crate::repository::ProgramRepository;

/// Programs read through the hosted store's REST interface.
///
/// No caching: every call is a fresh query.
#[derive(Clone, Debug)]
pub struct SupabaseProgramRepository {
    client: SupabaseClient,
}

impl SupabaseProgramRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn active_query() -> Query {
        Query::new()
            .select("*")
            .eq("is_active", true)
            .order_desc("created_at")
    }
}

#[async_trait]
impl ProgramRepository for SupabaseProgramRepository {
    async fn list_active(&self) -> ProgramResult<Vec<Program>> {
        let programs: Vec<Program> = self
            .client
            .select(Program::TABLE, &Self::active_query())
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to list active programs"))?;

        tracing::debug!(count = programs.len(), "Listed active programs");
        Ok(programs)
    }

    async fn health_check(&self) -> ProgramResult<()> {
        supabase::check_health(&self.client).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_query_matches_store_contract() {
        let query = SupabaseProgramRepository::active_query();
        let params: Vec<(&str, &str)> = query
            .params()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        assert_eq!(
            params,
            vec![
                ("select", "*"),
                ("is_active", "eq.true"),
                ("order", "created_at.desc"),
            ]
        );
    }
}
