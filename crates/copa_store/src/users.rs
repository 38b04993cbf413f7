use async_trait::async_trait;
use chrono::Utc;
use copa_core::{Error, NewUser, Result, User, UserStore};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

/// User records in a flat JSON file, rewritten whole on every change.
/// Writes go through a temp file and a rename so a crash mid-write
/// never leaves a truncated store behind.
pub struct JsonUserStore {
    path: PathBuf,
    tmp_path: PathBuf,
    write_guard: Mutex<()>,
}

impl JsonUserStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let dir = data_dir.into();
        Self {
            path: dir.join("users.json"),
            tmp_path: dir.join("users.tmp"),
            write_guard: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<Vec<User>> {
        match fs::read_to_string(&self.path).await {
            Ok(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, users: &[User]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_string_pretty(users)?;
        fs::write(&self.tmp_path, body).await?;
        fs::rename(&self.tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for JsonUserStore {
    async fn list(&self) -> Result<Vec<User>> {
        self.read_all().await
    }

    async fn find_by_email(&self, email_lower: &str) -> Result<Option<User>> {
        let all = self.read_all().await?;
        Ok(all.into_iter().find(|u| u.email == email_lower))
    }

    async fn create(&self, new: NewUser) -> Result<User> {
        let _guard = self.write_guard.lock().await;
        let mut all = self.read_all().await?;
        if all.iter().any(|u| u.email == new.email) {
            return Err(Error::Conflict("email already registered".into()));
        }
        let user = User {
            id: Utc::now().timestamp_millis() as u64,
            name: new.name.trim().to_string(),
            email: new.email,
            password_hash: new.password_hash,
            role: new.role,
        };
        all.push(user.clone());
        self.write_all(&all).await?;
        debug!(user = user.id, "user created");
        Ok(user)
    }
}
