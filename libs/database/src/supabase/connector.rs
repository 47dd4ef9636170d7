use super::config::SupabaseConfig;
use crate::common::{DatabaseError, DatabaseResult};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// PostgREST query parameters for a `select` call
///
/// ```ignore
/// let query = Query::new()
///     .select("id,title")
///     .eq("is_active", "true")
///     .order_desc("created_at");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    /// An empty query; the store returns every column when `select` is not set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    /// `column = value`
    pub fn eq(mut self, column: &str, value: impl std::fmt::Display) -> Self {
        self.params.push((column.to_string(), format!("eq.{}", value)));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.params.push(("order".to_string(), format!("{}.desc", column)));
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// Thin REST client for the hosted store.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct SupabaseClient {
    http: reqwest::Client,
    rest_url: String,
}

impl SupabaseClient {
    /// Build a client that sends the anon key on every request.
    ///
    /// # Errors
    /// Returns `ConfigError` if the key is not a valid header value, or
    /// `Request` if the HTTP client cannot be built.
    pub fn new(config: &SupabaseConfig) -> DatabaseResult<Self> {
        let mut headers = HeaderMap::new();

        let mut api_key = HeaderValue::from_str(&config.anon_key)
            .map_err(|e| DatabaseError::ConfigError(format!("invalid anon key: {}", e)))?;
        api_key.set_sensitive(true);

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.anon_key))
            .map_err(|e| DatabaseError::ConfigError(format!("invalid anon key: {}", e)))?;
        bearer.set_sensitive(true);

        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            rest_url: config.rest_url(),
        })
    }

    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    /// Read rows of `table` matching `query`.
    ///
    /// # Errors
    /// - `Request` when the store is unreachable or the call times out
    /// - `Status` when the store answers with a non-success status
    /// - `Decode` when the rows do not deserialize into `T`
    pub async fn select<T>(&self, table: &str, query: &Query) -> DatabaseResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.rest_url, table);
        debug!(table, params = ?query.params(), "Querying hosted store");

        let response = self.http.get(&url).query(query.params()).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(table, status = status.as_u16(), "Hosted store rejected query");
            return Err(DatabaseError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        let rows = serde_json::from_slice(&bytes)?;
        Ok(rows)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }
}
