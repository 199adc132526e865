use std::collections::{HashMap, HashSet};

use log::{debug, info, warn};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::algorithm::normalize::{normalize_session, NormalizedSlot};
use crate::models::{generate_id, Course, EstadoCurso, Session, DEFAULT_COURSE_COLOR};
use crate::scraping::fila::FilaHorario;

/// id de la tabla con la guía de horarios
pub const TABLE_ID: &str = "tguiaHorario";
/// id del `<div>` que envuelve la tabla; se usa si la tabla cambia de id
pub const WRAPPER_ID: &str = "t_guia_horario";

/// Contadores de una importación, útiles para informar al usuario.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResumenImportacion {
    pub tabla_encontrada: bool,
    pub filas_leidas: usize,
    pub filas_incompletas: usize,
    pub filas_horario_invalido: usize,
    pub sesiones_duplicadas: usize,
    pub cursos: usize,
}

struct Grupo {
    primera: FilaHorario,
    sesiones: Vec<(NormalizedSlot, String)>,
    vistos: HashSet<NormalizedSlot>,
}

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(s) => Some(s),
        Err(e) => {
            warn!("selector inválido '{}': {:?}", css, e);
            None
        }
    }
}

fn cell_texts(row: ElementRef<'_>, td: &Selector) -> Vec<String> {
    row.select(td).map(|c| c.text().collect::<String>()).collect()
}

/// Filas de la tabla de horarios, o `None` si el documento no la contiene.
fn filas_tabla(document: &Html) -> Option<Vec<Vec<String>>> {
    let td = selector("td")?;
    for (tabla_css, filas_css) in [
        (format!("#{}", TABLE_ID), format!("#{} tr", TABLE_ID)),
        (format!("#{} table", WRAPPER_ID), format!("#{} table tr", WRAPPER_ID)),
    ] {
        let tabla = selector(&tabla_css)?;
        if document.select(&tabla).next().is_none() {
            continue;
        }
        let filas = selector(&filas_css)?;
        return Some(document.select(&filas).map(|r| cell_texts(r, &td)).collect());
    }
    None
}

/// Parsea la guía de horarios y devuelve un curso por cada par (código, grupo).
/// Devuelve un vector vacío si la tabla no existe.
pub fn parse_tec_html(html: &str) -> Vec<Course> {
    parse_tec_html_con_resumen(html).0
}

/// Igual que `parse_tec_html` pero además entrega los contadores de la importación.
pub fn parse_tec_html_con_resumen(html: &str) -> (Vec<Course>, ResumenImportacion) {
    let document = Html::parse_document(html);
    let mut resumen = ResumenImportacion::default();

    let filas = match filas_tabla(&document) {
        Some(f) => f,
        None => {
            warn!("no se encontró la tabla #{} en el documento", TABLE_ID);
            return (Vec::new(), resumen);
        }
    };
    resumen.tabla_encontrada = true;

    // grupos en orden de aparición
    let mut grupos: Vec<Grupo> = Vec::new();
    let mut indice: HashMap<(String, String), usize> = HashMap::new();

    for cells in filas {
        resumen.filas_leidas += 1;
        let fila = match FilaHorario::from_cells(&cells) {
            Some(f) => f,
            None => {
                debug!("fila omitida: {} celdas", cells.len());
                resumen.filas_incompletas += 1;
                continue;
            }
        };
        let slot = match normalize_session(&fila.dia_hora) {
            Ok(s) => s,
            Err(e) => {
                warn!("fila {} grupo {} omitida: {}", fila.codigo, fila.grupo, e);
                resumen.filas_horario_invalido += 1;
                continue;
            }
        };

        let key = (fila.codigo.clone(), fila.grupo.clone());
        let idx = match indice.get(&key) {
            Some(&i) => i,
            None => {
                grupos.push(Grupo { primera: fila.clone(), sesiones: Vec::new(), vistos: HashSet::new() });
                indice.insert(key, grupos.len() - 1);
                grupos.len() - 1
            }
        };
        let grupo = &mut grupos[idx];
        if grupo.vistos.insert(slot.clone()) {
            grupo.sesiones.push((slot, fila.aula));
        } else {
            debug!("sesión duplicada {} {} {}", fila.codigo, slot.day, slot.start_time);
            resumen.sesiones_duplicadas += 1;
        }
    }

    let cursos: Vec<Course> = grupos.into_iter().map(grupo_a_curso).collect();
    resumen.cursos = cursos.len();
    info!(
        "importación: {} filas, {} cursos, {} omitidas, {} duplicadas",
        resumen.filas_leidas,
        resumen.cursos,
        resumen.filas_incompletas + resumen.filas_horario_invalido,
        resumen.sesiones_duplicadas
    );
    (cursos, resumen)
}

fn grupo_a_curso(g: Grupo) -> Course {
    let f = g.primera;
    let sessions = g
        .sesiones
        .into_iter()
        .map(|(slot, aula)| Session {
            id: generate_id(),
            day: slot.day,
            start_time: slot.start_time,
            end_time: slot.end_time,
            classroom: aula,
        })
        .collect();

    Course {
        id: generate_id(),
        name: f.nombre.clone(),
        campus: String::new(),
        group: f.grupo.clone(),
        professor: f.profesor.clone(),
        credits: f.creditos_num(),
        quota: f.cupo_num(),
        reserved: false,
        status: EstadoCurso::Presencial,
        is_scheduled: false,
        color: DEFAULT_COURSE_COLOR.to_string(),
        sessions,
        original_code: Some(f.codigo),
    }
}
