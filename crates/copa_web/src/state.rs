use copa_core::{Authenticator, RegistrationStore, UserStore};
use copa_news::NewsService;
use std::sync::Arc;

pub struct AppState {
    pub news: NewsService,
    pub users: Arc<dyn UserStore>,
    pub registrations: Arc<dyn RegistrationStore>,
    pub auth: Arc<dyn Authenticator>,
}
