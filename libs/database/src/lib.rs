//! Client for the hosted data store (Supabase).
//!
//! The store is reached through its PostgREST interface at
//! `{url}/rest/v1/{table}`; every request carries the project's anon key as
//! both the `apikey` header and a bearer token. Row-level security on the
//! store decides what the anon key may read.
//!
//! # Features
//!
//! - `config` (default) - Configuration support with `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use database::supabase::{Query, SupabaseClient, SupabaseConfig};
//!
//! let client = SupabaseClient::new(&SupabaseConfig::from_env()?)?;
//! let rows: Vec<Program> = client
//!     .select("programs", &Query::new().eq("is_active", "true").order_desc("created_at"))
//!     .await?;
//! ```

pub mod common;
pub mod supabase;

pub use common::{DatabaseError, DatabaseResult};
