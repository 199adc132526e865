// Funciones para detectar conflictos entre sesiones.
use serde::Serialize;

use crate::models::{Course, Session};

/// Convierte "HH:MM" a minutos desde medianoche
pub fn hora_a_minutos(hora: &str) -> Option<u32> {
    let (hh, mm) = hora.trim().split_once(':')?;
    let hh = hh.parse::<u32>().ok()?;
    let mm = mm.parse::<u32>().ok()?;
    if hh > 23 || mm > 59 {
        return None;
    }
    Some(hh * 60 + mm)
}

fn rango(s: &Session) -> Option<(u32, u32)> {
    Some((hora_a_minutos(&s.start_time)?, hora_a_minutos(&s.end_time)?))
}

/// True si dos sesiones caen el mismo día y sus intervalos [inicio, fin) se solapan.
/// Tocarse en el borde (una termina cuando la otra empieza) no es conflicto.
/// Sesiones sin horas válidas nunca solapan.
pub fn sessions_overlap(a: &Session, b: &Session) -> bool {
    if a.day != b.day {
        return false;
    }
    match (rango(a), rango(b)) {
        (Some((s1, e1)), Some((s2, e2))) => s1 < e2 && s2 < e1,
        _ => false,
    }
}

/// True si `candidate` solapa con alguna de las sesiones existentes.
pub fn has_conflict(existing: &[Session], candidate: &Session) -> bool {
    existing.iter().any(|e| sessions_overlap(e, candidate))
}

/// Un choque concreto entre una sesión del curso candidato y otra ya agendada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflicto {
    pub course_id: String,
    pub course_name: String,
    pub session_id: String,
    pub candidate_session_id: String,
}

/// Lista los choques del curso `candidate` contra los cursos agendados (`isScheduled`)
/// de `courses`. El propio candidato (mismo id) se ignora.
pub fn find_conflicts(courses: &[Course], candidate: &Course) -> Vec<Conflicto> {
    let mut out = Vec::new();
    for other in courses.iter().filter(|c| c.is_scheduled && c.id != candidate.id) {
        for cs in &candidate.sessions {
            for os in &other.sessions {
                if sessions_overlap(cs, os) {
                    out.push(Conflicto {
                        course_id: other.id.clone(),
                        course_name: other.name.clone(),
                        session_id: os.id.clone(),
                        candidate_session_id: cs.id.clone(),
                    });
                }
            }
        }
    }
    out
}
