//! Typed storage service for schemakv
//!
//! `SafeStore` threads every read and write through the schema validator:
//! reads validate what storage returned before decoding it into the
//! caller's type, writes validate before anything reaches the backend.
//!
//! # Design Principles
//!
//! - Validation failures abort the operation, never coerce (V1)
//! - Rejected writes perform no backend I/O (V2)
//! - Absence is a normal outcome, distinct from invalid data (V3)
//! - No client-side cache: every read goes to the backend (V4)

mod errors;
mod key;
mod service;

pub use errors::{StoreError, StoreResult};
pub use key::TypedKey;
pub use service::SafeStore;
