// --- Armador de horarios - Archivo principal ---

use horarioshift::config::AppConfig;
use horarioshift::run_server;
use log::{error, info};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("configuración inválida: {}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };
    info!("=== Armador de Horarios (API) ===");
    run_server(config).await
}
