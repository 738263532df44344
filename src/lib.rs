// Chatbot Motorista - Core Library
// Consulta de cadastro, telemetria e desempenho de motoristas por chapa/RE,
// exposta para o CLI interativo, o servidor HTTP e os testes.

pub mod chapa;
pub mod chat;
pub mod config;
pub mod desempenho;
pub mod eventos;
pub mod outcome;
pub mod registro;
pub mod resolver;
pub mod table;

// Re-export commonly used types
pub use chapa::normalizar_chapa;
pub use chat::{
    formatar_eventos, formatar_metricas, formatar_milhar, formatar_motorista_para_chat,
    formatar_numero, formatar_relatorio_completo, formatar_resultado_unificado,
};
pub use config::Config;
#[cfg(feature = "server")]
pub use desempenho::ClienteDesempenho;
pub use desempenho::{extrair_premio, juntar, resolver_desempenho, Desempenho, ResultadoUnificado};
pub use eventos::{
    buscar_metricas_do_dia, consultar_eventos_detalhados, ItemEvento, MetricasDia, ResumoEventos,
};
pub use outcome::{ConsultaErro, ConsultaResult};
pub use registro::{consultar_motorista, Motorista};
pub use resolver::resolver;
pub use table::{carregar_csv, Linha, Tabela};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
