use async_trait::async_trait;
use chrono::Utc;
use copa_core::{
    NewRegistration, Registration, RegistrationPatch, RegistrationStatus, RegistrationStore,
    Result,
};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// Tournament registrations in a flat JSON file with atomic rewrites,
/// mirroring the user store's temp-file-and-rename protocol.
pub struct JsonRegistrationStore {
    path: PathBuf,
    tmp_path: PathBuf,
    write_guard: Mutex<()>,
}

impl JsonRegistrationStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let dir = data_dir.into();
        Self {
            path: dir.join("registrations.json"),
            tmp_path: dir.join("registrations.tmp"),
            write_guard: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<Vec<Registration>> {
        match fs::read_to_string(&self.path).await {
            Ok(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, regs: &[Registration]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_string_pretty(regs)?;
        fs::write(&self.tmp_path, body).await?;
        fs::rename(&self.tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl RegistrationStore for JsonRegistrationStore {
    async fn list(&self) -> Result<Vec<Registration>> {
        self.read_all().await
    }

    async fn list_by_user(&self, user_id: u64) -> Result<Vec<Registration>> {
        let all = self.read_all().await?;
        Ok(all.into_iter().filter(|r| r.user_id == user_id).collect())
    }

    async fn find(&self, id: &str) -> Result<Option<Registration>> {
        let all = self.read_all().await?;
        Ok(all.into_iter().find(|r| r.id == id))
    }

    async fn create(&self, new: NewRegistration) -> Result<Registration> {
        let _guard = self.write_guard.lock().await;
        let mut all = self.read_all().await?;
        let now = Utc::now();
        let registration = Registration {
            id: format!("reg_{}", Uuid::new_v4().simple()),
            user_id: new.user_id,
            team: new.team,
            manager: new.manager,
            athletes: new.athletes,
            status: RegistrationStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        all.push(registration.clone());
        self.write_all(&all).await?;
        debug!(registration = %registration.id, "registration created");
        Ok(registration)
    }

    async fn update(&self, id: &str, patch: RegistrationPatch) -> Result<Option<Registration>> {
        let _guard = self.write_guard.lock().await;
        let mut all = self.read_all().await?;
        let Some(reg) = all.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        if let Some(team) = patch.team {
            reg.team = team;
        }
        if let Some(manager) = patch.manager {
            reg.manager = manager;
        }
        if let Some(athletes) = patch.athletes {
            reg.athletes = athletes;
        }
        reg.updated_at = Utc::now();
        let updated = reg.clone();
        self.write_all(&all).await?;
        Ok(Some(updated))
    }

    async fn set_status(
        &self,
        id: &str,
        status: RegistrationStatus,
    ) -> Result<Option<Registration>> {
        let _guard = self.write_guard.lock().await;
        let mut all = self.read_all().await?;
        let Some(reg) = all.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        reg.status = status;
        reg.updated_at = Utc::now();
        let updated = reg.clone();
        self.write_all(&all).await?;
        debug!(registration = %updated.id, status = ?updated.status, "status changed");
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let _guard = self.write_guard.lock().await;
        let mut all = self.read_all().await?;
        let before = all.len();
        all.retain(|r| r.id != id);
        if all.len() == before {
            return Ok(false);
        }
        self.write_all(&all).await?;
        Ok(true)
    }
}
