//! House price dashboard
//!
//! Axum server for the single-page prediction dashboard, the layered
//! configuration it runs with, and the `scaffold` command that lays out a
//! new project.

pub mod config;
pub mod page;
pub mod scaffold;
pub mod server;

pub use crate::config::DashboardConfig;
pub use crate::scaffold::{scaffold, ScaffoldReport};
pub use crate::server::{build_router, load_artifacts, start_server, AppState};
