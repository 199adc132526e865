use horarioshift::algorithm::sessions::{
    assign_session_ids, build_course, derive_sessions, CourseDraft, CourseFormError, Frecuencia, SessionDraft,
};
use horarioshift::models::{Course, Dia, EstadoCurso, Session, DEFAULT_COURSE_COLOR};

fn draft(day: Dia, ini: &str, fin: &str, aula: &str) -> SessionDraft {
    SessionDraft { day, start_time: ini.to_string(), end_time: fin.to_string(), classroom: aula.to_string() }
}

fn sesion(id: &str, day: Dia, ini: &str, fin: &str, aula: &str) -> Session {
    Session { id: id.to_string(), day, start_time: ini.to_string(), end_time: fin.to_string(), classroom: aula.to_string() }
}

fn fisica_ii() -> Course {
    Course {
        id: "c2".to_string(),
        name: "Fisica II".to_string(),
        campus: "Cartago".to_string(),
        group: "02".to_string(),
        professor: "Maria".to_string(),
        credits: 3,
        quota: 25,
        reserved: false,
        status: EstadoCurso::Presencial,
        is_scheduled: true,
        color: "#E53E3E".to_string(),
        sessions: vec![
            sesion("s1", Dia::Martes, "07:30", "09:20", "B1"),
            sesion("s2", Dia::Jueves, "09:30", "11:20", "B2"),
            sesion("s3", Dia::Viernes, "13:00", "14:50", "B3"),
        ],
        original_code: Some("FI1102".to_string()),
    }
}

#[test]
fn test_derive_sessions_una_vez() {
    let actuales = vec![draft(Dia::Martes, "07:30", "09:20", "B1"), draft(Dia::Jueves, "09:30", "11:20", "B2")];
    let out = derive_sessions(&actuales, Frecuencia::Una);
    assert_eq!(out, vec![actuales[0].clone()]);

    let vacio = derive_sessions(&[], Frecuencia::Una);
    assert_eq!(vacio, vec![SessionDraft::vacia(Dia::Lunes)]);
}

#[test]
fn test_derive_sessions_dos_veces_agrega_jueves() {
    let actuales = vec![draft(Dia::Lunes, "08:00", "09:50", "A1")];
    let out = derive_sessions(&actuales, Frecuencia::Dos);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0], actuales[0]);
    assert_eq!(out[1], SessionDraft::vacia(Dia::Jueves));
}

#[test]
fn test_derive_sessions_dos_veces_conserva_tres() {
    let draft_form = CourseDraft::from_course(&fisica_ii());
    assert_eq!(draft_form.frecuencia(), Frecuencia::Dos);
    let out = derive_sessions(&draft_form.sessions, draft_form.frecuencia());
    assert_eq!(out.len(), 3);
    assert_eq!(out[2].classroom, "B3");
}

#[test]
fn test_assign_ids_posicional() {
    let previas = fisica_ii().sessions;
    let drafts = vec![draft(Dia::Lunes, "08:00", "09:50", "X")];
    let out = assign_session_ids(&drafts, Some(previas.as_slice()));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "s1");
    assert_eq!(out[0].day, Dia::Lunes);

    let previas_una = vec![sesion("s1", Dia::Martes, "07:30", "09:20", "B1")];
    let drafts = vec![draft(Dia::Martes, "07:30", "09:20", "B1"), draft(Dia::Jueves, "07:30", "09:20", "B1")];
    let out = assign_session_ids(&drafts, Some(previas_una.as_slice()));
    assert_eq!(out[0].id, "s1");
    assert_ne!(out[1].id, "s1");
    assert_eq!(out[1].id.len(), 9);
}

#[test]
fn test_build_course_edicion_conserva_ids_y_estado() {
    let original = fisica_ii();
    let mut form = CourseDraft::from_course(&original);
    form.sessions = derive_sessions(&form.sessions, Frecuencia::Una);
    form.professor = "Maria y Juan".to_string();

    let editado = build_course(&form, Some(&original)).unwrap();
    assert_eq!(editado.id, "c2");
    assert!(editado.is_scheduled);
    assert_eq!(editado.color, "#E53E3E");
    assert_eq!(editado.original_code.as_deref(), Some("FI1102"));
    assert_eq!(editado.professor, "Maria y Juan");
    assert_eq!(editado.sessions.len(), 1);
    assert_eq!(editado.sessions[0].id, "s1");
}

#[test]
fn test_build_course_nuevo() {
    let form = CourseDraft {
        name: "  Cálculo I ".to_string(),
        campus: "Cartago".to_string(),
        group: "01".to_string(),
        professor: String::new(),
        credits: 4,
        quota: 30,
        reserved: true,
        status: EstadoCurso::Virtual,
        color: None,
        sessions: vec![draft(Dia::Lunes, "07:30", "09:20", "")],
    };
    let c = build_course(&form, None).unwrap();
    assert_eq!(c.name, "Cálculo I");
    assert!(!c.is_scheduled);
    assert_eq!(c.color, DEFAULT_COURSE_COLOR);
    assert_eq!(c.original_code, None);
    assert_eq!(c.id.len(), 9);
    assert_eq!(c.status, EstadoCurso::Virtual);
}

#[test]
fn test_build_course_validaciones() {
    let mut form = CourseDraft::from_course(&fisica_ii());
    form.name = " ".to_string();
    assert_eq!(build_course(&form, None), Err(CourseFormError::MissingName));

    let mut form = CourseDraft::from_course(&fisica_ii());
    form.sessions.clear();
    assert_eq!(build_course(&form, None), Err(CourseFormError::NoSessions));

    let mut form = CourseDraft::from_course(&fisica_ii());
    form.sessions = derive_sessions(&form.sessions[..1], Frecuencia::Dos);
    assert_eq!(build_course(&form, None), Err(CourseFormError::MissingTime(1)));

    let mut form = CourseDraft::from_course(&fisica_ii());
    form.sessions[0].end_time = "7:xx".to_string();
    assert_eq!(build_course(&form, None), Err(CourseFormError::InvalidTime(0)));
}

#[test]
fn test_build_course_guarda_horas_canonicas() {
    let form = CourseDraft {
        name: "Quimica".to_string(),
        campus: String::new(),
        group: "01".to_string(),
        professor: String::new(),
        credits: 3,
        quota: 20,
        reserved: false,
        status: EstadoCurso::Presencial,
        color: None,
        sessions: vec![draft(Dia::Lunes, "8:00", " 10:5", "A1"), draft(Dia::Jueves, "9:30", "11:20", "A2")],
    };
    let c = build_course(&form, None).unwrap();
    assert_eq!(c.sessions[0].start_time, "08:00");
    assert_eq!(c.sessions[0].end_time, "10:05");
    assert_eq!(c.sessions[1].start_time, "09:30");
    assert_eq!(c.sessions[0].classroom, "A1");
    // comparar como texto respeta el orden horario
    assert!(c.sessions.iter().all(|s| s.start_time < s.end_time));
}
