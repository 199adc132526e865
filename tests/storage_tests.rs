use std::path::PathBuf;

use horarioshift::config::StorageConfig;
use horarioshift::models::{Course, Dia, EstadoCurso, Schedule, Session, StoreState};
use horarioshift::store::storage::StorageBackend;
use horarioshift::store::{open_storage, JsonFileStorage, ScheduleStore, SqliteStorage};

fn estado_de_prueba() -> StoreState {
    let course = Course {
        id: "k3j9x0a1b".to_string(),
        name: "Elementos de computaci贸n".to_string(),
        campus: String::new(),
        group: "01".to_string(),
        professor: "Mata Rodriguez William".to_string(),
        credits: 3,
        quota: 24,
        reserved: false,
        status: EstadoCurso::Semipresencial,
        is_scheduled: true,
        color: "#0066CC".to_string(),
        sessions: vec![Session {
            id: "s1".to_string(),
            day: Dia::Miercoles,
            start_time: "09:30".to_string(),
            end_time: "11:20".to_string(),
            classroom: "B6-04".to_string(),
        }],
        original_code: Some("CA2125".to_string()),
    };
    let mut a = Schedule::new("a", "Plan A");
    a.courses.push(course);
    StoreState {
        schedules: vec![a, Schedule::new("b", "Plan B")],
        current_schedule_id: Some("b".to_string()),
    }
}

fn temp_path(nombre: &str) -> PathBuf {
    std::env::temp_dir().join(format!("horarioshift-{}-{}", std::process::id(), nombre))
}

#[test]
fn test_sqlite_en_memoria_ida_y_vuelta() {
    let mut db = SqliteStorage::open(None).unwrap();
    assert_eq!(db.load().unwrap(), None);
    assert_eq!(db.updated_at().unwrap(), None);

    let estado = estado_de_prueba();
    db.save(&estado).unwrap();
    assert_eq!(db.load().unwrap(), Some(estado.clone()));
    assert!(db.updated_at().unwrap().is_some());

    // sobrescribe la misma clave
    let mut otro = estado.clone();
    otro.current_schedule_id = None;
    db.save(&otro).unwrap();
    assert_eq!(db.load().unwrap(), Some(otro));
}

#[test]
fn test_sqlite_archivo_rehidrata_store() {
    let path = temp_path("store.db");
    let _ = std::fs::remove_file(&path);

    {
        let backend = open_storage(&StorageConfig::Sqlite(path.clone())).unwrap();
        let mut store = ScheduleStore::open(backend);
        store.create_schedule("Plan A").unwrap();
    }
    let backend = open_storage(&StorageConfig::Sqlite(path.clone())).unwrap();
    let store = ScheduleStore::open(backend);
    assert_eq!(store.schedules().len(), 2);
    assert_eq!(store.current_schedule().unwrap().name, "Plan A");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_archivo_json_ida_y_vuelta() {
    let path = temp_path("estado.json");
    let _ = std::fs::remove_file(&path);

    let mut file = JsonFileStorage::new(&path);
    assert_eq!(file.load().unwrap(), None);

    let estado = estado_de_prueba();
    file.save(&estado).unwrap();
    assert_eq!(file.load().unwrap(), Some(estado));

    std::fs::write(&path, "{ roto").unwrap();
    assert!(file.load().is_err());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_blob_serializado_es_estable() {
    let estado = estado_de_prueba();
    let texto = serde_json::to_string(&estado).unwrap();
    let de_vuelta: StoreState = serde_json::from_str(&texto).unwrap();
    assert_eq!(de_vuelta, estado);
    assert_eq!(serde_json::to_string(&de_vuelta).unwrap(), texto);
    assert!(texto.contains("\"originalCode\":\"CA2125\""));
    assert!(texto.contains("\"day\":\"Miércoles\""));
}
