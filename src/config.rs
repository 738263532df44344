// ⚙️ Config - Caminhos das planilhas e fonte de desempenho
// One explicit object instead of constants scattered per script; the core
// query functions take already-loaded data and never see this.

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    /// Registry spreadsheet (Base Grupo), CSV export.
    pub cadastro_csv: PathBuf,
    /// Telemetry events spreadsheet, CSV export.
    pub telemetria_csv: PathBuf,
    /// Upstream monthly-performance API base URL.
    pub desempenho_url: String,
    /// Total timeout for the upstream fetch.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cadastro_csv: PathBuf::from("dados/base_grupo.csv"),
            telemetria_csv: PathBuf::from("dados/telemetria.csv"),
            desempenho_url: "http://localhost:8081/desempenho".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Environment overrides on top of the defaults. Unset vars keep the
    /// default; an unparsable timeout keeps the default too.
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(caminho) = std::env::var("CADASTRO_CSV") {
            config.cadastro_csv = PathBuf::from(caminho);
        }
        if let Ok(caminho) = std::env::var("TELEMETRIA_CSV") {
            config.telemetria_csv = PathBuf::from(caminho);
        }
        if let Ok(url) = std::env::var("DESEMPENHO_URL") {
            config.desempenho_url = url;
        }
        if let Ok(segundos) = std::env::var("DESEMPENHO_TIMEOUT_SECS") {
            if let Ok(segundos) = segundos.trim().parse::<u64>() {
                config.timeout = Duration::from_secs(segundos);
            }
        }

        config
    }
}
