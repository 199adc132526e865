// Estructuras de datos principales
//
// Todo el modelo se serializa en camelCase para que el blob persistido tenga
// la forma `{ schedules: [...], currentScheduleId }`.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Color asignado a un curso cuando no se especifica otro.
pub const DEFAULT_COURSE_COLOR: &str = "#0066CC";

/// Nombre del horario creado automáticamente cuando no queda ninguno.
pub const DEFAULT_SCHEDULE_NAME: &str = "Mi Horario";

/// Genera un id corto aleatorio (9 caracteres base 36).
pub fn generate_id() -> String {
    const ALFABETO: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::rng();
    (0..9)
        .map(|_| ALFABETO[rng.random_range(0..ALFABETO.len())] as char)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dia {
    Lunes,
    Martes,
    #[serde(rename = "Miércoles", alias = "Miercoles")]
    Miercoles,
    Jueves,
    Viernes,
    #[serde(rename = "Sábado", alias = "Sabado")]
    Sabado,
    Domingo,
}

impl Dia {
    pub const ALL: [Dia; 7] = [
        Dia::Lunes,
        Dia::Martes,
        Dia::Miercoles,
        Dia::Jueves,
        Dia::Viernes,
        Dia::Sabado,
        Dia::Domingo,
    ];

    pub fn nombre(&self) -> &'static str {
        match self {
            Dia::Lunes => "Lunes",
            Dia::Martes => "Martes",
            Dia::Miercoles => "Miércoles",
            Dia::Jueves => "Jueves",
            Dia::Viernes => "Viernes",
            Dia::Sabado => "Sábado",
            Dia::Domingo => "Domingo",
        }
    }

    fn sin_acento(&self) -> &'static str {
        match self {
            Dia::Miercoles => "miercoles",
            Dia::Sabado => "sabado",
            _ => "",
        }
    }

    /// Reconoce el nombre de un día. Acepta la forma canónica, la forma sin
    /// tilde y la forma con mojibake (p.ej. "Mi茅rcoles"), comparando sólo los
    /// caracteres ASCII del nombre.
    pub fn from_nombre(raw: &str) -> Option<Dia> {
        let limpio = raw.trim().to_lowercase();
        if limpio.is_empty() {
            return None;
        }
        let ascii: String = limpio.chars().filter(|c| c.is_ascii_alphabetic()).collect();
        Dia::ALL.iter().copied().find(|d| {
            let canon = d.nombre().to_lowercase();
            let canon_ascii: String = canon.chars().filter(|c| c.is_ascii_alphabetic()).collect();
            limpio == canon || ascii == canon_ascii || (!d.sin_acento().is_empty() && ascii == d.sin_acento())
        })
    }
}

impl std::fmt::Display for Dia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.nombre())
    }
}

/// Modalidad del curso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EstadoCurso {
    #[default]
    Presencial,
    Virtual,
    Semipresencial,
    Asistido,
}

impl EstadoCurso {
    pub const ALL: [EstadoCurso; 4] = [
        EstadoCurso::Presencial,
        EstadoCurso::Virtual,
        EstadoCurso::Semipresencial,
        EstadoCurso::Asistido,
    ];
}

/// Una ocurrencia semanal de un curso.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub day: Dia,
    /// "HH:MM" en 24h, o vacío si aún no se ha ingresado
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub classroom: String,
}

fn default_color() -> String {
    DEFAULT_COURSE_COLOR.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
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
    pub is_scheduled: bool,
    #[serde(default = "default_color")]
    pub color: String,
    pub sessions: Vec<Session>,
    /// Código de la institución (sólo cursos importados)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl Schedule {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Schedule { id: id.into(), name: name.into(), courses: Vec::new() }
    }
}

/// Estado completo del store; se persiste como un único blob.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    #[serde(default)]
    pub schedules: Vec<Schedule>,
    #[serde(default)]
    pub current_schedule_id: Option<String>,
}

impl StoreState {
    /// Estado inicial: un horario por defecto, marcado como actual.
    pub fn with_default_schedule() -> Self {
        let schedule = Schedule::new(generate_id(), DEFAULT_SCHEDULE_NAME);
        StoreState {
            current_schedule_id: Some(schedule.id.clone()),
            schedules: vec![schedule],
        }
    }

    pub fn current_schedule(&self) -> Option<&Schedule> {
        let id = self.current_schedule_id.as_deref()?;
        self.schedules.iter().find(|s| s.id == id)
    }

    pub fn schedule(&self, id: &str) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.id == id)
    }
}
