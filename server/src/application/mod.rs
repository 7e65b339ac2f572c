//! Application Layer
//!
//! Use cases and application services that orchestrate domain and
//! infrastructure pieces into the request pipeline.

pub mod services;
pub mod use_cases;

pub use services::{CleanupWorker, PrioritySorter, SearchOrchestrator};
pub use use_cases::ResolveStreamUseCase;
