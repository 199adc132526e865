//! Transiciones puras del estado de horarios.
//!
//! `reducir` recibe el estado previo y una `Accion` y devuelve el estado nuevo
//! sin efectos secundarios. Los ids nuevos viajan dentro de la acción para que
//! la función sea determinista y se pueda probar directamente.

use std::collections::HashSet;

use crate::models::{Course, Schedule, StoreState, DEFAULT_SCHEDULE_NAME};

#[derive(Debug, Clone, PartialEq)]
pub enum Accion {
    CreateSchedule { id: String, name: String },
    SwitchSchedule { id: String },
    /// `replacement_id` se usa sólo si al borrar no queda ningún horario
    DeleteSchedule { id: String, replacement_id: String },
    AddCourse(Course),
    /// Agrega varios cursos en orden (importación)
    AddCourses(Vec<Course>),
    UpdateCourse(Course),
    /// Sólo afecta al horario actual
    RemoveCourses(Vec<String>),
    SetScheduled { course_id: String, scheduled: bool },
}

fn horario_actual_mut(state: &mut StoreState) -> Option<&mut Schedule> {
    let id = state.current_schedule_id.clone()?;
    state.schedules.iter_mut().find(|s| s.id == id)
}

pub fn reducir(prev: &StoreState, accion: Accion) -> StoreState {
    let mut next = prev.clone();
    match accion {
        Accion::CreateSchedule { id, name } => {
            next.schedules.push(Schedule::new(id.clone(), name));
            next.current_schedule_id = Some(id);
        }
        Accion::SwitchSchedule { id } => {
            if next.schedules.iter().any(|s| s.id == id) {
                next.current_schedule_id = Some(id);
            }
        }
        Accion::DeleteSchedule { id, replacement_id } => {
            let antes = next.schedules.len();
            next.schedules.retain(|s| s.id != id);
            if next.schedules.len() == antes {
                return next;
            }
            if next.schedules.is_empty() {
                next.schedules.push(Schedule::new(replacement_id, DEFAULT_SCHEDULE_NAME));
            }
            if next.current_schedule_id.as_deref() == Some(id.as_str()) || next.current_schedule().is_none() {
                next.current_schedule_id = next.schedules.first().map(|s| s.id.clone());
            }
        }
        Accion::AddCourse(course) => {
            if let Some(s) = horario_actual_mut(&mut next) {
                s.courses.push(course);
            }
        }
        Accion::AddCourses(courses) => {
            if let Some(s) = horario_actual_mut(&mut next) {
                s.courses.extend(courses);
            }
        }
        Accion::UpdateCourse(course) => {
            if let Some(s) = horario_actual_mut(&mut next) {
                if let Some(slot) = s.courses.iter_mut().find(|c| c.id == course.id) {
                    *slot = course;
                }
            }
        }
        Accion::RemoveCourses(ids) => {
            let ids: HashSet<String> = ids.into_iter().collect();
            if let Some(s) = horario_actual_mut(&mut next) {
                s.courses.retain(|c| !ids.contains(&c.id));
            }
        }
        Accion::SetScheduled { course_id, scheduled } => {
            if let Some(s) = horario_actual_mut(&mut next) {
                if let Some(c) = s.courses.iter_mut().find(|c| c.id == course_id) {
                    c.is_scheduled = scheduled;
                }
            }
        }
    }
    next
}

/// Repara un estado recién cargado: nunca sin horarios y con un horario actual válido.
pub fn reparar(mut state: StoreState, default_id: String) -> StoreState {
    if state.schedules.is_empty() {
        state.schedules.push(Schedule::new(default_id, DEFAULT_SCHEDULE_NAME));
    }
    if state.current_schedule().is_none() {
        state.current_schedule_id = state.schedules.first().map(|s| s.id.clone());
    }
    state
}
