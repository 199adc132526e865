// Configuración leída del entorno (y de `.env` si existe).
//
// Variables:
// - HORARIO_BIND: dirección del servidor HTTP (por defecto 127.0.0.1:8080)
// - HORARIO_STORAGE_URL: sqlite://ruta.db | file://ruta.json | memory:
// - HORARIO_DB_PATH: ruta del archivo sqlite si no hay HORARIO_STORAGE_URL

use std::env;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_DB_PATH: &str = "data/horarios.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Sqlite(PathBuf),
    File(PathBuf),
    Memory,
}

impl StorageConfig {
    /// Interpreta una URL de almacenamiento. Una ruta sin esquema se trata como sqlite.
    pub fn from_url(url: &str) -> Result<StorageConfig, String> {
        let url = url.trim();
        if url.is_empty() {
            return Err("empty storage url".to_string());
        }
        if url == "memory:" || url == "memory://" {
            Ok(StorageConfig::Memory)
        } else if let Some(p) = url.strip_prefix("sqlite://") {
            Ok(StorageConfig::Sqlite(PathBuf::from(p)))
        } else if let Some(p) = url.strip_prefix("file://") {
            Ok(StorageConfig::File(PathBuf::from(p)))
        } else if url.contains("://") {
            Err(format!("HORARIO_STORAGE_URL uses unsupported scheme: {}", url))
        } else {
            Ok(StorageConfig::Sqlite(PathBuf::from(url)))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind: String,
    pub storage: StorageConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind: DEFAULT_BIND.to_string(),
            storage: StorageConfig::Sqlite(PathBuf::from(DEFAULT_DB_PATH)),
        }
    }
}

fn load_dotenv() {
    let _ = dotenv::dotenv();
}

impl AppConfig {
    pub fn from_env() -> Result<AppConfig, Box<dyn std::error::Error>> {
        load_dotenv();
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Versión parametrizable para pruebas: recibe la función que resuelve variables.
    pub fn from_lookup<F>(lookup: F) -> Result<AppConfig, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = AppConfig::default();
        if let Some(bind) = lookup("HORARIO_BIND").filter(|b| !b.trim().is_empty()) {
            cfg.bind = bind.trim().to_string();
        }
        if let Some(url) = lookup("HORARIO_STORAGE_URL").filter(|u| !u.trim().is_empty()) {
            cfg.storage = StorageConfig::from_url(&url)?;
        } else if let Some(p) = lookup("HORARIO_DB_PATH").filter(|p| !p.trim().is_empty()) {
            cfg.storage = StorageConfig::Sqlite(PathBuf::from(p.trim()));
        }
        Ok(cfg)
    }
}
