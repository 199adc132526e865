//! Store de horarios: dueño del estado en memoria y de su persistencia.
//!
//! Cada operación calcula el estado nuevo con `state::reducir`, lo reemplaza y
//! lo escribe completo en el backend. Si la escritura falla el estado en
//! memoria NO se revierte; el error se devuelve y queda en
//! `last_persist_error` hasta la próxima escritura exitosa.

pub mod state;
pub mod storage;

use log::{error, info, warn};
use serde::Serialize;

use crate::algorithm::conflict::{find_conflicts, Conflicto};
use crate::error::StorageError;
use crate::models::{generate_id, Course, Schedule, StoreState};
use state::{reducir, reparar, Accion};
use storage::StorageBackend;

pub use storage::{open_storage, JsonFileStorage, MemoryStorage, SqliteStorage, STORAGE_KEY};

/// Resultado de `toggle_scheduled`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "conflicts", rename_all = "snake_case")]
pub enum ToggleOutcome {
    Scheduled,
    Unscheduled,
    /// No se agendó: choca con estos cursos
    Blocked(Vec<Conflicto>),
    NotFound,
}

pub struct ScheduleStore {
    state: StoreState,
    backend: Box<dyn StorageBackend>,
    last_persist_error: Option<String>,
}

impl ScheduleStore {
    /// Hidrata el store desde el backend. Si no hay datos o están corruptos se
    /// parte con un horario por defecto. Un estado corrupto o reparado se
    /// vuelve a escribir de inmediato para que lo guardado coincida con memoria.
    pub fn open(backend: Box<dyn StorageBackend>) -> Self {
        let (state, reescribir) = match backend.load() {
            Ok(Some(s)) => {
                info!("estado cargado desde {}: {} horarios", backend.describe(), s.schedules.len());
                let reparado = reparar(s.clone(), generate_id());
                let cambio = reparado != s;
                if cambio {
                    warn!("estado en {} reparado al cargar", backend.describe());
                }
                (reparado, cambio)
            }
            Ok(None) => {
                info!("sin estado previo en {}, se crea horario por defecto", backend.describe());
                (StoreState::with_default_schedule(), false)
            }
            Err(e) => {
                warn!("estado ilegible en {} ({}), se crea horario por defecto", backend.describe(), e);
                (StoreState::with_default_schedule(), true)
            }
        };
        let mut store = ScheduleStore { state, backend, last_persist_error: None };
        if reescribir {
            // el error queda en last_persist_error
            let _ = store.persist();
        }
        store
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.state.schedules
    }

    pub fn current_schedule_id(&self) -> Option<&str> {
        self.state.current_schedule_id.as_deref()
    }

    pub fn current_schedule(&self) -> Option<&Schedule> {
        self.state.current_schedule()
    }

    /// Mensaje del último fallo de escritura, si la última escritura falló.
    pub fn last_persist_error(&self) -> Option<&str> {
        self.last_persist_error.as_deref()
    }

    fn dispatch(&mut self, accion: Accion) -> Result<(), StorageError> {
        self.state = reducir(&self.state, accion);
        self.persist()
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        match self.backend.save(&self.state) {
            Ok(()) => {
                self.last_persist_error = None;
                Ok(())
            }
            Err(e) => {
                error!("no se pudo guardar el estado en {}: {}", self.backend.describe(), e);
                self.last_persist_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Crea un horario vacío y lo deja como actual (su id queda en `current_schedule_id`).
    pub fn create_schedule(&mut self, name: &str) -> Result<(), StorageError> {
        self.dispatch(Accion::CreateSchedule { id: generate_id(), name: name.to_string() })
    }

    pub fn switch_schedule(&mut self, id: &str) -> Result<(), StorageError> {
        self.dispatch(Accion::SwitchSchedule { id: id.to_string() })
    }

    pub fn delete_schedule(&mut self, id: &str) -> Result<(), StorageError> {
        self.dispatch(Accion::DeleteSchedule { id: id.to_string(), replacement_id: generate_id() })
    }

    pub fn add_course(&mut self, course: Course) -> Result<(), StorageError> {
        if self.current_schedule().is_none() {
            warn!("add_course sin horario actual, se ignora {}", course.id);
        }
        self.dispatch(Accion::AddCourse(course))
    }

    /// Agrega varios cursos al horario actual con una sola escritura.
    pub fn add_courses(&mut self, courses: Vec<Course>) -> Result<(), StorageError> {
        if self.current_schedule().is_none() {
            warn!("add_courses sin horario actual, se ignoran {} cursos", courses.len());
        }
        self.dispatch(Accion::AddCourses(courses))
    }

    pub fn update_course(&mut self, course: Course) -> Result<(), StorageError> {
        self.dispatch(Accion::UpdateCourse(course))
    }

    pub fn remove_course(&mut self, id: &str) -> Result<(), StorageError> {
        self.remove_courses(&[id.to_string()])
    }

    /// Quita cursos sólo del horario actual; ids de otros horarios o inexistentes se ignoran.
    pub fn remove_courses(&mut self, ids: &[String]) -> Result<(), StorageError> {
        self.dispatch(Accion::RemoveCourses(ids.to_vec()))
    }

    /// Alterna `isScheduled` de un curso del horario actual. Al agendar se
    /// verifica que no choque con los demás cursos agendados.
    pub fn toggle_scheduled(&mut self, course_id: &str) -> Result<ToggleOutcome, StorageError> {
        let schedule = match self.current_schedule() {
            Some(s) => s,
            None => return Ok(ToggleOutcome::NotFound),
        };
        let course = match schedule.courses.iter().find(|c| c.id == course_id) {
            Some(c) => c,
            None => return Ok(ToggleOutcome::NotFound),
        };

        if course.is_scheduled {
            self.dispatch(Accion::SetScheduled { course_id: course_id.to_string(), scheduled: false })?;
            return Ok(ToggleOutcome::Unscheduled);
        }

        let conflictos = find_conflicts(&schedule.courses, course);
        if !conflictos.is_empty() {
            info!("curso {} no agendado: {} conflictos", course_id, conflictos.len());
            return Ok(ToggleOutcome::Blocked(conflictos));
        }
        self.dispatch(Accion::SetScheduled { course_id: course_id.to_string(), scheduled: true })?;
        Ok(ToggleOutcome::Scheduled)
    }
}
