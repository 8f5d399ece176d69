//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (PROCESSOR_URL from the process, else `.env`)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → injected into the HTTP server state
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at startup, never read from the environment per request
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{
    apply_env, apply_env_from, env_lookup, from_env, load_config, read_dotenv, ConfigError,
    DotenvVars, DOTENV_FILE, PROCESSOR_URL_ENV,
};
pub use schema::{LimitsConfig, ListenerConfig, ObservabilityConfig, ProcessorConfig, RelayConfig};
pub use validation::{validate_config, ValidationError};
