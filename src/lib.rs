//! Public library API for converting dynamic value trees to and from MC Pack bytes.

/// Value model, type directives, pack primitives, and encode/decode sessions.
pub mod pack;
