//! Tokenward HTTP service
//!
//! Two endpoints sit on top of [`tokenward_jwt`]:
//!
//! - `POST /api/login` takes `{"name", "hash"}` and answers with a signed
//!   token whose role comes from a [`RolePolicy`]
//! - `GET /api/data` checks the token from the `Authorization` header or the
//!   `bearer` query parameter and answers 200, 401 or 400
//!
//! ```no_run
//! use tokenward_server::{ServerConfig, run};
//!
//! # async fn example() -> tokenward_server::ServerResult<()> {
//! run(ServerConfig::new("a-long-random-signing-key")).await
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gate;
pub mod issuance;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{Cli, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use gate::{AuthDecision, AuthorizationGate, extract_candidate};
pub use issuance::{DistinguishedSubjectPolicy, Identity, Issuer, RolePolicy};
pub use server::{router, run};
pub use state::AppState;
