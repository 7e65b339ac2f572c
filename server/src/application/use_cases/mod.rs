//! Use cases: application-specific orchestration built from domain and
//! infrastructure pieces.

pub mod resolve_stream;

pub use resolve_stream::ResolveStreamUseCase;
