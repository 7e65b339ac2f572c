// Interface Abstraction Layer
//
// This module contains all interface definitions that establish the Dependency
// Inversion Principle. These interfaces define contracts between layers
// without specifying implementations.
//
// Layer Structure:
// - external_services: Interfaces for external APIs (metadata, providers, debrid)
// - repositories: Repository interfaces (defined in domain layer, re-exported here)

pub mod external_services;

pub use crate::domain::repositories::CacheRepository;
pub use external_services::{DebridClient, MetadataResolver, ProviderAdapter};
