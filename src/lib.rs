// Biblioteca raíz del crate `horarioshift`.
// Armado de horarios personales: importación desde la guía HTML, detección de
// choques y un store persistente de horarios con sus cursos.
pub mod algorithm;
pub mod api_json;
pub mod config;
pub mod error;
pub mod models;
pub mod scraping;
pub mod server;
pub mod store;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
