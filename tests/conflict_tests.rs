use horarioshift::algorithm::conflict::{find_conflicts, has_conflict, sessions_overlap};
use horarioshift::models::{Course, Dia, EstadoCurso, Session};

fn sesion(id: &str, day: Dia, ini: &str, fin: &str) -> Session {
    Session {
        id: id.to_string(),
        day,
        start_time: ini.to_string(),
        end_time: fin.to_string(),
        classroom: String::new(),
    }
}

fn curso(id: &str, agendado: bool, sessions: Vec<Session>) -> Course {
    Course {
        id: id.to_string(),
        name: format!("Curso {}", id),
        campus: "Cartago".to_string(),
        group: "01".to_string(),
        professor: String::new(),
        credits: 3,
        quota: 20,
        reserved: false,
        status: EstadoCurso::Presencial,
        is_scheduled: agendado,
        color: "#0066CC".to_string(),
        sessions,
        original_code: None,
    }
}

#[test]
fn test_borde_no_es_conflicto() {
    let existente = vec![sesion("a", Dia::Lunes, "08:00", "10:00")];
    assert!(!has_conflict(&existente, &sesion("b", Dia::Lunes, "10:00", "12:00")));
    assert!(!has_conflict(&existente, &sesion("b", Dia::Lunes, "06:00", "08:00")));
}

#[test]
fn test_solape_por_un_minuto() {
    let existente = vec![sesion("a", Dia::Lunes, "08:00", "10:00")];
    assert!(has_conflict(&existente, &sesion("b", Dia::Lunes, "09:59", "12:00")));
    assert!(has_conflict(&existente, &sesion("b", Dia::Lunes, "07:00", "08:01")));
    assert!(has_conflict(&existente, &sesion("b", Dia::Lunes, "08:30", "09:00")));
}

#[test]
fn test_distinto_dia_nunca_choca() {
    let existente = vec![sesion("a", Dia::Lunes, "08:00", "10:00")];
    assert!(!has_conflict(&existente, &sesion("b", Dia::Martes, "08:00", "10:00")));
    assert!(!has_conflict(&[], &sesion("b", Dia::Lunes, "08:00", "10:00")));
}

#[test]
fn test_horas_vacias_no_chocan() {
    let a = sesion("a", Dia::Lunes, "", "");
    let b = sesion("b", Dia::Lunes, "08:00", "10:00");
    assert!(!sessions_overlap(&a, &b));
}

#[test]
fn test_find_conflicts_solo_agendados() {
    let agendado = curso("x", true, vec![sesion("x1", Dia::Martes, "09:30", "11:20")]);
    let no_agendado = curso("y", false, vec![sesion("y1", Dia::Martes, "09:30", "11:20")]);
    let candidato = curso(
        "z",
        false,
        vec![sesion("z1", Dia::Martes, "11:00", "12:50"), sesion("z2", Dia::Jueves, "09:30", "11:20")],
    );
    let todos = vec![agendado, no_agendado, candidato.clone()];

    let conflictos = find_conflicts(&todos, &candidato);
    assert_eq!(conflictos.len(), 1);
    assert_eq!(conflictos[0].course_id, "x");
    assert_eq!(conflictos[0].session_id, "x1");
    assert_eq!(conflictos[0].candidate_session_id, "z1");
}

#[test]
fn test_find_conflicts_ignora_al_propio_curso() {
    let c = curso("x", true, vec![sesion("x1", Dia::Martes, "09:30", "11:20")]);
    assert!(find_conflicts(&[c.clone()], &c).is_empty());
}
