use crate::model::{Calendar, GeneratedSchedule, Roster};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Contenu persisté d'une session : contraintes + dernier tableau.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub roster: Roster,
    #[serde(default)]
    pub calendar: Calendar,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_schedule: Option<GeneratedSchedule>,
}

pub trait Storage {
    /// Charge une session depuis un support.
    fn load(&self) -> anyhow::Result<Session>;
    /// Sauvegarde de manière atomique.
    fn save(&self, session: &Session) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Session vide si le fichier n'existe pas encore.
    pub fn load_or_default(&self) -> anyhow::Result<Session> {
        if self.path.exists() {
            self.load()
        } else {
            Ok(Session::default())
        }
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Session> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let session: Session = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(session)
    }

    fn save(&self, session: &Session) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(session)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
