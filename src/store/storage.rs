//! Capa de persistencia del store.
//!
//! El estado completo se guarda como un único blob JSON bajo `STORAGE_KEY`.
//! `StorageBackend` es la capacidad mínima que necesita el store; hay una
//! implementación SQLite, una de archivo JSON y una en memoria para pruebas.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::{debug, info};
use rusqlite::{params, Connection};

use crate::config::StorageConfig;
use crate::error::StorageError;
use crate::models::StoreState;

/// Clave bajo la cual se guarda el estado.
pub const STORAGE_KEY: &str = "class-schedule-data";

pub trait StorageBackend: Send {
    /// `Ok(None)` si nunca se ha guardado nada.
    fn load(&self) -> Result<Option<StoreState>, StorageError>;
    fn save(&mut self, state: &StoreState) -> Result<(), StorageError>;
    /// Descripción corta para logs.
    fn describe(&self) -> String;
}

/// Abre el backend indicado por la configuración.
pub fn open_storage(cfg: &StorageConfig) -> Result<Box<dyn StorageBackend>, StorageError> {
    let backend: Box<dyn StorageBackend> = match cfg {
        StorageConfig::Sqlite(path) => Box::new(SqliteStorage::open(Some(path))?),
        StorageConfig::File(path) => Box::new(JsonFileStorage::new(path)),
        StorageConfig::Memory => Box::new(MemoryStorage::new()),
    };
    info!("storage: {}", backend.describe());
    Ok(backend)
}

// --- memoria ---

#[derive(Debug, Default)]
struct MemoryInner {
    blob: Option<String>,
    fail_writes: bool,
    writes: usize,
}

/// Backend en memoria. Los clones comparten el mismo contenido, así una prueba
/// puede conservar un clon para inspeccionar lo que escribió el store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend precargado con un blob arbitrario (válido o no).
    pub fn with_blob(blob: impl Into<String>) -> Self {
        let s = Self::new();
        if let Ok(mut inner) = s.inner.lock() {
            inner.blob = Some(blob.into());
        }
        s
    }

    /// Simula almacenamiento lleno: las escrituras fallan.
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_writes = fail;
        }
    }

    pub fn blob(&self) -> Option<String> {
        self.inner.lock().ok().and_then(|i| i.blob.clone())
    }

    pub fn writes(&self) -> usize {
        self.inner.lock().map(|i| i.writes).unwrap_or(0)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryInner>, StorageError> {
        self.inner
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_string()))
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<Option<StoreState>, StorageError> {
        match &self.lock()?.blob {
            Some(text) => Ok(Some(serde_json::from_str(text)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, state: &StoreState) -> Result<(), StorageError> {
        let mut inner = self.lock()?;
        if inner.fail_writes {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }
        inner.blob = Some(serde_json::to_string(state)?);
        inner.writes += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// --- sqlite ---

/// Tabla clave/valor en SQLite; sólo se usa la fila `STORAGE_KEY`.
pub struct SqliteStorage {
    conn: Connection,
    label: String,
}

impl SqliteStorage {
    /// Abre una base en archivo o, con `None`, en memoria.
    pub fn open(path: Option<&Path>) -> Result<Self, StorageError> {
        let (conn, label) = match path {
            Some(p) => {
                if let Some(dir) = p.parent() {
                    if !dir.as_os_str().is_empty() && !dir.exists() {
                        fs::create_dir_all(dir)?;
                    }
                }
                (Connection::open(p)?, format!("sqlite://{}", p.display()))
            }
            None => (Connection::open_in_memory()?, "sqlite://:memory:".to_string()),
        };
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(SqliteStorage { conn, label })
    }

    /// Fecha (RFC 3339) de la última escritura, si existe.
    pub fn updated_at(&self) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT updated_at FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query_map(params![STORAGE_KEY], |row| row.get::<_, String>(0))?;
        match rows.next() {
            Some(r) => Ok(Some(r?)),
            None => Ok(None),
        }
    }
}

impl StorageBackend for SqliteStorage {
    fn load(&self) -> Result<Option<StoreState>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query_map(params![STORAGE_KEY], |row| row.get::<_, String>(0))?;
        if let Some(res) = rows.next() {
            let text = res?;
            let state: StoreState = serde_json::from_str(&text)?;
            Ok(Some(state))
        } else {
            Ok(None)
        }
    }

    fn save(&mut self, state: &StoreState) -> Result<(), StorageError> {
        let json = serde_json::to_string(state)?;
        let ts = chrono::Utc::now().to_rfc3339();
        self.conn.execute(
            "REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![STORAGE_KEY, json, ts],
        )?;
        debug!("estado guardado en {} ({} bytes)", self.label, json.len());
        Ok(())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

// --- archivo JSON ---

/// Un archivo JSON con el estado completo.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }
}

impl StorageBackend for JsonFileStorage {
    fn load(&self) -> Result<Option<StoreState>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&mut self, state: &StoreState) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let text = serde_json::to_string_pretty(state)?;
        let mut f = OpenOptions::new().write(true).create(true).truncate(true).open(&self.path)?;
        f.write_all(text.as_bytes())?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file://{}", self.path.display())
    }
}
