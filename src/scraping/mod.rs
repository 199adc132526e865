//! Importación de cursos desde la guía de horarios HTML de la institución.
//!
//! Submódulos:
//! - `fila`: mapeo posicional de una fila `<tr>` a sus 11 campos
//! - `parser`: agrupación por (código, grupo) y deduplicación de sesiones

pub mod fila;
pub mod parser;

pub use fila::{FilaHorario, EXPECTED_CELLS};
pub use parser::{parse_tec_html, parse_tec_html_con_resumen, ResumenImportacion, TABLE_ID, WRAPPER_ID};
