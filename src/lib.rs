//! Layered login flow: an observable auth state, a session service that
//! checks credentials, and a controller that mediates login/logout.

pub mod controller;
pub mod services;
pub mod state;
pub mod view;

pub use controller::SessionController;
pub use services::session::{SessionError, SessionService, SimulatedSessionService};
pub use state::{AuthPhase, AuthState};
