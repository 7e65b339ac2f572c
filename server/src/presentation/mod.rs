//! Presentation Layer
//!
//! The HTTP boundary this service owns.

pub mod http;
