//! Helpers del formulario de cursos.
//!
//! El formulario mantiene una lista de sesiones sin id (`SessionDraft`) cuyo
//! largo depende de la frecuencia semanal elegida. Al guardar, los borradores
//! se convierten en `Session` reutilizando los ids del curso editado por
//! posición.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithm::conflict::hora_a_minutos;
use crate::algorithm::normalize::format_hhmm;
use crate::models::{generate_id, Course, Dia, EstadoCurso, Session, DEFAULT_COURSE_COLOR};

/// Frecuencia semanal ofrecida por el formulario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frecuencia {
    Una,
    Dos,
}

impl Frecuencia {
    pub fn from_sessions(n: usize) -> Self {
        if n > 1 { Frecuencia::Dos } else { Frecuencia::Una }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDraft {
    pub day: Dia,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub classroom: String,
}

impl SessionDraft {
    pub fn vacia(day: Dia) -> Self {
        SessionDraft { day, start_time: String::new(), end_time: String::new(), classroom: String::new() }
    }
}

impl From<&Session> for SessionDraft {
    fn from(s: &Session) -> Self {
        SessionDraft {
            day: s.day,
            start_time: s.start_time.clone(),
            end_time: s.end_time.clone(),
            classroom: s.classroom.clone(),
        }
    }
}

/// Ajusta la lista de sesiones a la frecuencia elegida.
///
/// `Una` deja sólo la primera sesión; `Dos` agrega un jueves vacío si faltan
/// sesiones. Con `Dos` una lista de tres o más sesiones queda intacta.
pub fn derive_sessions(current: &[SessionDraft], freq: Frecuencia) -> Vec<SessionDraft> {
    match freq {
        Frecuencia::Una => match current.first() {
            Some(first) => vec![first.clone()],
            None => vec![SessionDraft::vacia(Dia::Lunes)],
        },
        Frecuencia::Dos => {
            let mut out = current.to_vec();
            if out.is_empty() {
                out.push(SessionDraft::vacia(Dia::Lunes));
            }
            if out.len() < 2 {
                out.push(SessionDraft::vacia(Dia::Jueves));
            }
            out
        }
    }
}

/// Convierte borradores en sesiones. La sesión `i` reutiliza el id de
/// `previous[i]` si existe; las posiciones nuevas reciben id fresco y los ids
/// sobrantes del curso anterior se descartan.
pub fn assign_session_ids(drafts: &[SessionDraft], previous: Option<&[Session]>) -> Vec<Session> {
    drafts
        .iter()
        .enumerate()
        .map(|(i, d)| Session {
            id: previous
                .and_then(|p| p.get(i))
                .map(|s| s.id.clone())
                .unwrap_or_else(generate_id),
            day: d.day,
            start_time: d.start_time.clone(),
            end_time: d.end_time.clone(),
            classroom: d.classroom.clone(),
        })
        .collect()
}

/// Campos editables del formulario de curso.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    pub name: String,
    #[serde(default)]
    pub campus: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub professor: String,
    #[serde(default)]
    pub credits: u32,
    #[serde(default)]
    pub quota: u32,
    #[serde(default)]
    pub reserved: bool,
    #[serde(default)]
    pub status: EstadoCurso,
    #[serde(default)]
    pub color: Option<String>,
    pub sessions: Vec<SessionDraft>,
}

impl CourseDraft {
    /// Carga un curso existente en el formulario.
    pub fn from_course(c: &Course) -> Self {
        CourseDraft {
            name: c.name.clone(),
            campus: c.campus.clone(),
            group: c.group.clone(),
            professor: c.professor.clone(),
            credits: c.credits,
            quota: c.quota,
            reserved: c.reserved,
            status: c.status,
            color: Some(c.color.clone()),
            sessions: c.sessions.iter().map(SessionDraft::from).collect(),
        }
    }

    pub fn frecuencia(&self) -> Frecuencia {
        Frecuencia::from_sessions(self.sessions.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseFormError {
    MissingName,
    NoSessions,
    /// Índice de la sesión sin hora de inicio o fin
    MissingTime(usize),
    InvalidTime(usize),
    /// inicio >= fin
    EmptyRange(usize),
}

impl fmt::Display for CourseFormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseFormError::MissingName => write!(f, "course name is required"),
            CourseFormError::NoSessions => write!(f, "a course needs at least one session"),
            CourseFormError::MissingTime(i) => write!(f, "session {} is missing its start or end time", i + 1),
            CourseFormError::InvalidTime(i) => write!(f, "session {} has a malformed time (expected HH:MM)", i + 1),
            CourseFormError::EmptyRange(i) => write!(f, "session {} must start before it ends", i + 1),
        }
    }
}

impl std::error::Error for CourseFormError {}

/// Valida el formulario y devuelve las sesiones con horas canónicas "HH:MM"
/// ("8:00" -> "08:00").
fn validar(draft: &CourseDraft) -> Result<Vec<SessionDraft>, CourseFormError> {
    if draft.name.trim().is_empty() {
        return Err(CourseFormError::MissingName);
    }
    if draft.sessions.is_empty() {
        return Err(CourseFormError::NoSessions);
    }
    let mut out = Vec::with_capacity(draft.sessions.len());
    for (i, s) in draft.sessions.iter().enumerate() {
        if s.start_time.trim().is_empty() || s.end_time.trim().is_empty() {
            return Err(CourseFormError::MissingTime(i));
        }
        let inicio = hora_a_minutos(&s.start_time).ok_or(CourseFormError::InvalidTime(i))?;
        let fin = hora_a_minutos(&s.end_time).ok_or(CourseFormError::InvalidTime(i))?;
        if inicio >= fin {
            return Err(CourseFormError::EmptyRange(i));
        }
        out.push(SessionDraft {
            day: s.day,
            start_time: format_hhmm(inicio / 60, inicio % 60),
            end_time: format_hhmm(fin / 60, fin % 60),
            classroom: s.classroom.clone(),
        });
    }
    Ok(out)
}

/// Construye el `Course` a guardar a partir del formulario.
///
/// Al editar se conservan id, `isScheduled`, color y código original del
/// curso editado, y los ids de sesión por posición.
pub fn build_course(draft: &CourseDraft, editing: Option<&Course>) -> Result<Course, CourseFormError> {
    let drafts = validar(draft)?;
    let sessions = assign_session_ids(&drafts, editing.map(|c| c.sessions.as_slice()));
    let color = draft
        .color
        .clone()
        .or_else(|| editing.map(|c| c.color.clone()))
        .unwrap_or_else(|| DEFAULT_COURSE_COLOR.to_string());

    Ok(Course {
        id: editing.map(|c| c.id.clone()).unwrap_or_else(generate_id),
        name: draft.name.trim().to_string(),
        campus: draft.campus.clone(),
        group: draft.group.clone(),
        professor: draft.professor.clone(),
        credits: draft.credits,
        quota: draft.quota,
        reserved: draft.reserved,
        status: draft.status,
        is_scheduled: editing.map(|c| c.is_scheduled).unwrap_or(false),
        color,
        sessions,
        original_code: editing.and_then(|c| c.original_code.clone()),
    })
}
