//! Programs Domain
//!
//! Read-only access to the programs the hosted store publishes. The store
//! owns the table and its row-level security; this crate only lists the
//! active rows, newest first, and re-fetches on every call.
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← GET /programs
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │   Service   │
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │ Repository  │  ← Supabase REST or in-memory
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_programs::{handlers, InMemoryProgramRepository, ProgramService};
//!
//! let service = ProgramService::new(InMemoryProgramRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod supabase;

pub use error::{ProgramError, ProgramResult};
pub use models::Program;
pub use repository::{InMemoryProgramRepository, ProgramRepository};
pub use service::ProgramService;
pub use supabase::SupabaseProgramRepository;
