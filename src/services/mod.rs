//! Services the session controller depends on.
//!
//! ARCHITECTURE
//! ============
//! Service modules own credential checks and session bookkeeping so the
//! controller can stay focused on state transitions.

pub mod session;
