pub mod gate;
pub mod login;
pub mod session;

pub use gate::{GateDecision, guard, is_authenticated};
pub use login::{LoginFieldError, check_login_fields};
pub use session::{MemorySessionStore, SessionStore, TokenPair};
