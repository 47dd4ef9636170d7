use super::connector::SupabaseClient;
use crate::common::{DatabaseError, DatabaseResult};

/// Check that the hosted store is reachable and accepts the configured key.
///
/// Requests the PostgREST root, which answers 200 for any valid key.
///
/// # Example
/// ```ignore
/// use database::supabase;
///
/// supabase::check_health(&client).await?;
/// ```
pub async fn check_health(client: &SupabaseClient) -> DatabaseResult<()> {
    let url = format!("{}/", client.rest_url());

    let response = client
        .http()
        .get(&url)
        .send()
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(DatabaseError::HealthCheckFailed(format!(
            "hosted store answered {}",
            response.status()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supabase::SupabaseConfig;
    use crate::supabase::connector::tests::spawn_stub;
    use axum::{Router, http::StatusCode, routing::get};

    #[tokio::test]
    async fn test_health_ok() {
        let base = spawn_stub(Router::new().route("/rest/v1/", get(|| async { "{}" }))).await;
        let client = SupabaseClient::new(&SupabaseConfig::new(base, "anon")).unwrap();

        assert!(check_health(&client).await.is_ok());
    }

    #[tokio::test]
    async fn test_health_fails_on_error_status() {
        let router = Router::new().route(
            "/rest/v1/",
            get(|| async { (StatusCode::UNAUTHORIZED, "invalid key") }),
        );
        let base = spawn_stub(router).await;
        let client = SupabaseClient::new(&SupabaseConfig::new(base, "anon")).unwrap();

        assert!(matches!(
            check_health(&client).await,
            Err(DatabaseError::HealthCheckFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_health_fails_when_unreachable() {
        let client =
            SupabaseClient::new(&SupabaseConfig::new("http://127.0.0.1:1", "anon")).unwrap();

        assert!(check_health(&client).await.is_err());
    }
}
