use std::sync::{Mutex, MutexGuard};

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use log::{info, warn};
use serde_json::json;

use crate::algorithm::conflict::has_conflict;
use crate::algorithm::sessions::{build_course, derive_sessions, CourseDraft};
use crate::api_json::{
    state_response, ConflictCheckRequest, CreateScheduleRequest, DeriveSessionsRequest, ImportQuery,
    RemoveCoursesRequest,
};
use crate::config::AppConfig;
use crate::scraping::parse_tec_html_con_resumen;
use crate::store::{open_storage, ScheduleStore};

/// Store compartido entre workers; el mutex serializa las operaciones.
pub type SharedStore = web::Data<Mutex<ScheduleStore>>;

fn lock_store(store: &SharedStore) -> Result<MutexGuard<'_, ScheduleStore>, HttpResponse> {
    store
        .lock()
        .map_err(|_| HttpResponse::InternalServerError().json(json!({"error": "store lock poisoned"})))
}

/// GET /state
async fn state_handler(store: SharedStore) -> impl Responder {
    let guard = match lock_store(&store) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(json!({
        "state": guard.state(),
        "persist_error": guard.last_persist_error(),
    }))
}

/// POST /schedules
async fn create_schedule_handler(store: SharedStore, body: web::Json<CreateScheduleRequest>) -> impl Responder {
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "name is required"}));
    }
    let mut guard = match lock_store(&store) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let res = guard.create_schedule(name);
    HttpResponse::Ok().json(state_response(&guard, &res))
}

/// PUT /schedules/{id}/current
async fn switch_schedule_handler(store: SharedStore, path: web::Path<String>) -> impl Responder {
    let mut guard = match lock_store(&store) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let res = guard.switch_schedule(&path.into_inner());
    HttpResponse::Ok().json(state_response(&guard, &res))
}

/// DELETE /schedules/{id}
async fn delete_schedule_handler(store: SharedStore, path: web::Path<String>) -> impl Responder {
    let mut guard = match lock_store(&store) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let res = guard.delete_schedule(&path.into_inner());
    HttpResponse::Ok().json(state_response(&guard, &res))
}

/// POST /courses
/// Recibe el formulario (`CourseDraft`), lo valida y agrega el curso al horario actual.
async fn add_course_handler(store: SharedStore, body: web::Json<CourseDraft>) -> impl Responder {
    let course = match build_course(&body, None) {
        Ok(c) => c,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    };
    let mut guard = match lock_store(&store) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    if guard.current_schedule().is_none() {
        return HttpResponse::Conflict().json(json!({"error": "no current schedule"}));
    }
    let course_id = course.id.clone();
    let res = guard.add_course(course);
    let mut resp = state_response(&guard, &res);
    resp["course_id"] = json!(course_id);
    HttpResponse::Ok().json(resp)
}

/// PUT /courses/{id}
/// Edita un curso del horario actual conservando id, estado agendado e ids de sesión por posición.
async fn update_course_handler(
    store: SharedStore,
    path: web::Path<String>,
    body: web::Json<CourseDraft>,
) -> impl Responder {
    let id = path.into_inner();
    let mut guard = match lock_store(&store) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let editing = match guard.current_schedule().and_then(|s| s.courses.iter().find(|c| c.id == id)) {
        Some(c) => c.clone(),
        None => return HttpResponse::NotFound().json(json!({"error": format!("course '{}' not in current schedule", id)})),
    };
    let course = match build_course(&body, Some(&editing)) {
        Ok(c) => c,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
    };
    let res = guard.update_course(course);
    HttpResponse::Ok().json(state_response(&guard, &res))
}

/// DELETE /courses/{id}
async fn remove_course_handler(store: SharedStore, path: web::Path<String>) -> impl Responder {
    let mut guard = match lock_store(&store) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let res = guard.remove_course(&path.into_inner());
    HttpResponse::Ok().json(state_response(&guard, &res))
}

/// POST /courses/remove
async fn remove_courses_handler(store: SharedStore, body: web::Json<RemoveCoursesRequest>) -> impl Responder {
    let mut guard = match lock_store(&store) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let res = guard.remove_courses(&body.ids);
    HttpResponse::Ok().json(state_response(&guard, &res))
}

/// POST /courses/{id}/toggle
async fn toggle_scheduled_handler(store: SharedStore, path: web::Path<String>) -> impl Responder {
    let mut guard = match lock_store(&store) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let (outcome, persist_error) = match guard.toggle_scheduled(&path.into_inner()) {
        Ok(o) => (Some(o), None),
        Err(e) => (None, Some(e.to_string())),
    };
    HttpResponse::Ok().json(json!({
        "toggle": outcome,
        "state": guard.state(),
        "persist_error": persist_error,
    }))
}

/// POST /conflicts/check
async fn conflict_check_handler(body: web::Json<ConflictCheckRequest>) -> impl Responder {
    let conflict = has_conflict(&body.existing, &body.candidate);
    HttpResponse::Ok().json(json!({"conflict": conflict}))
}

/// POST /forms/sessions
async fn derive_sessions_handler(body: web::Json<DeriveSessionsRequest>) -> impl Responder {
    let sessions = derive_sessions(&body.sessions, body.frecuencia);
    HttpResponse::Ok().json(json!({"sessions": sessions}))
}

/// POST /import?add=true
/// El cuerpo es el HTML crudo de la guía de horarios.
async fn import_handler(store: SharedStore, query: web::Query<ImportQuery>, body: String) -> impl Responder {
    let (courses, resumen) = parse_tec_html_con_resumen(&body);
    if !query.add {
        return HttpResponse::Ok().json(json!({"courses": courses, "resumen": resumen}));
    }

    let mut guard = match lock_store(&store) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let res = guard.add_courses(courses.clone());
    let mut resp = state_response(&guard, &res);
    resp["courses"] = json!(courses);
    resp["resumen"] = json!(resumen);
    HttpResponse::Ok().json(resp)
}

async fn help_handler() -> impl Responder {
    let help = json!({
        "description": "API del armador de horarios. Todas las operaciones sobre cursos actúan sobre el horario actual.",
        "endpoints": {
            "GET /state": "estado completo {schedules, currentScheduleId}",
            "POST /schedules": "{name} crea un horario y lo deja como actual",
            "PUT /schedules/{id}/current": "cambia el horario actual (ids desconocidos se ignoran)",
            "DELETE /schedules/{id}": "borra un horario",
            "POST /courses": "formulario de curso (name, group, professor, sessions...)",
            "PUT /courses/{id}": "edita un curso del horario actual",
            "DELETE /courses/{id}": "quita un curso del horario actual",
            "POST /courses/remove": "{ids} quita varios cursos del horario actual",
            "POST /courses/{id}/toggle": "agenda/desagenda un curso verificando choques",
            "POST /conflicts/check": "{existing, candidate} -> {conflict}",
            "POST /forms/sessions": "{sessions, frecuencia: Una|Dos} -> {sessions}",
            "POST /import?add=true": "HTML crudo de la guía de horarios (tabla #tguiaHorario)"
        },
        "note": "Si persist_error no es null, el cambio se aplicó en memoria pero no se pudo guardar."
    });
    HttpResponse::Ok().json(help)
}

/// Registra las rutas; separado de `run_server` para poder montarlo en pruebas.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/state", web::get().to(state_handler))
        .route("/schedules", web::post().to(create_schedule_handler))
        .route("/schedules/{id}/current", web::put().to(switch_schedule_handler))
        .route("/schedules/{id}", web::delete().to(delete_schedule_handler))
        .route("/courses", web::post().to(add_course_handler))
        .route("/courses/remove", web::post().to(remove_courses_handler))
        .route("/courses/{id}", web::put().to(update_course_handler))
        .route("/courses/{id}", web::delete().to(remove_course_handler))
        .route("/courses/{id}/toggle", web::post().to(toggle_scheduled_handler))
        .route("/conflicts/check", web::post().to(conflict_check_handler))
        .route("/forms/sessions", web::post().to(derive_sessions_handler))
        .route("/import", web::post().to(import_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let backend = open_storage(&config.storage).map_err(|e| {
        warn!("no se pudo abrir el almacenamiento: {}", e);
        std::io::Error::other(e.to_string())
    })?;
    let store: SharedStore = web::Data::new(Mutex::new(ScheduleStore::open(backend)));

    info!("Iniciando servidor en http://{}", config.bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(store.clone())
            .app_data(web::PayloadConfig::new(4 * 1024 * 1024))
            .configure(configure)
    })
    .bind(&config.bind)?
    .run()
    .await
}
