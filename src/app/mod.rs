//! Application layer with dependency injection container.
//!
//! [`App`] owns the infrastructure (the agent repository) and turns an
//! [`AgentConfig`] into a ready-to-play [`crate::ports::Agent`].
//!
//! ```
//! use push_battle::app::App;
//! use push_battle::adapters::InMemoryRepository;
//!
//! let app = App::for_testing()
//!     .with_repository(InMemoryRepository::new())
//!     .with_default_seed(42)
//!     .build();
//! ```

pub mod config;
pub mod container;

pub use config::{AgentConfig, AgentKind, DEFAULT_DEPTH};
pub use container::{App, AppBuilder};
