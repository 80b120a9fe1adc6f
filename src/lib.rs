// src/lib.rs

// Declaração dos nossos módulos
pub mod access_control;
pub mod common;
pub mod config;
pub mod models;
pub mod services;
pub mod storage;

// Reexportações principais
pub use access_control::AccessContext;
pub use common::error::AppError;
pub use config::{AppConfig, AppState};
pub use services::{AuthService, Session};
pub use storage::Storage;
