pub mod password;
pub mod registrations;
pub mod session;
pub mod users;

pub use registrations::JsonRegistrationStore;
pub use session::SessionAuth;
pub use users::JsonUserStore;

pub mod prelude {
    pub use super::{JsonRegistrationStore, JsonUserStore, SessionAuth};
    pub use copa_core::{RegistrationStore, Result, UserStore};
}
