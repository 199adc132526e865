//! Lógica pura de horarios.
//!
//! - `normalize`: "Martes - 9:30:11:20" -> (Martes, "09:30", "11:20")
//! - `conflict`: choques entre sesiones del mismo día
//! - `sessions`: helpers del formulario (frecuencia, ids posicionales)

pub mod conflict;
pub mod normalize;
pub mod sessions;

pub use conflict::{find_conflicts, has_conflict, hora_a_minutos, sessions_overlap, Conflicto};
pub use normalize::{normalize_session, NormalizeError, NormalizedSlot};
pub use sessions::{assign_session_ids, build_course, derive_sessions, CourseDraft, CourseFormError, Frecuencia, SessionDraft};
