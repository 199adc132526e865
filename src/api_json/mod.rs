use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::algorithm::sessions::{Frecuencia, SessionDraft};
use crate::error::StorageError;
use crate::models::Session;
use crate::store::ScheduleStore;

/// Cuerpo de `POST /schedules`
///
/// ```json
/// { "name": "Plan A" }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    pub name: String,
}

/// Cuerpo de `POST /courses/remove`
///
/// ```json
/// { "ids": ["k3j9x0a1b", "p0o9i8u7y"] }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveCoursesRequest {
    #[serde(default)]
    pub ids: Vec<String>,
}

/// Cuerpo de `POST /conflicts/check`
///
/// ```json
/// {
///   "existing": [{"id": "s1", "day": "Lunes", "startTime": "08:00", "endTime": "10:00", "classroom": ""}],
///   "candidate": {"id": "s2", "day": "Lunes", "startTime": "09:59", "endTime": "11:00", "classroom": ""}
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ConflictCheckRequest {
    #[serde(default)]
    pub existing: Vec<Session>,
    pub candidate: Session,
}

/// Cuerpo de `POST /forms/sessions`: recalcula las sesiones del formulario al
/// cambiar la frecuencia.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeriveSessionsRequest {
    #[serde(default)]
    pub sessions: Vec<SessionDraft>,
    pub frecuencia: Frecuencia,
}

/// Query de `POST /import`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ImportQuery {
    /// Si es true, los cursos importados se agregan al horario actual.
    #[serde(default)]
    pub add: bool,
}

pub fn parse_json_input<T: serde::de::DeserializeOwned>(json_str: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str::<T>(json_str)
}

/// Respuesta estándar de una operación del store: el estado resultante y, si
/// la escritura falló, el motivo (el cambio en memoria se mantiene igual).
pub fn state_response(store: &ScheduleStore, res: &Result<(), StorageError>) -> Value {
    let persist_error = match res {
        Ok(()) => None,
        Err(e) => Some(e.to_string()),
    };
    json!({
        "state": store.state(),
        "persist_error": persist_error,
    })
}
