pub mod auth;
pub mod cache;
pub mod error;
pub mod news;
pub mod storage;
pub mod types;

pub use auth::{AuthUser, Authenticator};
pub use cache::NewsCache;
pub use error::Error;
pub use news::{Article, ArticleSource, NewsItem, NewsPage};
pub use storage::{RegistrationStore, UserStore};
pub use types::{
    Athlete, Manager, NewRegistration, NewUser, PublicUser, Registration, RegistrationPatch,
    RegistrationStatus, Role, Team, User,
};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use super::{Error, Result};
    pub use super::{Article, NewsItem, NewsPage};
    pub use super::{Registration, RegistrationStatus, Role, User};
}
