// 📋 Outcome - Result kinds shared by every query path
// The HTTP/CLI layers decide presentation (status codes, emoji); the core
// only distinguishes "nothing found" from "something broke".

use serde::Serialize;

// ============================================================================
// ERROR TAXONOMY
// ============================================================================

/// Failure kinds a consultation can produce.
///
/// `NaoEncontrado` is an expected outcome of a well-formed query, kept in the
/// error position only so `?` composes; the other variants are faults.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "erro", content = "detalhe")]
pub enum ConsultaErro {
    /// Table loaded fine, no row matched the chapa (and date, when given).
    NaoEncontrado {
        chapa: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<String>,
    },
    /// Query date did not parse as DD/MM/YYYY.
    DataInvalida(String),
    /// Source table is missing expected columns - format drifted.
    ColunasAusentes(Vec<String>),
    /// Source itself could not be obtained (file missing, upstream down,
    /// timeout, malformed response shape).
    FonteIndisponivel(String),
}

impl std::fmt::Display for ConsultaErro {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsultaErro::NaoEncontrado { chapa, data: Some(d) } => {
                write!(f, "Nenhum registro encontrado para o RE '{}' na data {}", chapa, d)
            }
            ConsultaErro::NaoEncontrado { chapa, data: None } => {
                write!(f, "Nenhum registro encontrado para a chapa {}", chapa)
            }
            ConsultaErro::DataInvalida(d) => {
                write!(f, "Data inválida: {}. Use o formato DD/MM/YYYY", d)
            }
            ConsultaErro::ColunasAusentes(cols) => {
                write!(f, "Colunas ausentes no arquivo: {}", cols.join(", "))
            }
            ConsultaErro::FonteIndisponivel(motivo) => {
                write!(f, "Erro ao acessar a fonte de dados: {}", motivo)
            }
        }
    }
}

impl std::error::Error for ConsultaErro {}

impl ConsultaErro {
    pub fn nao_encontrado(chapa: &str) -> Self {
        ConsultaErro::NaoEncontrado { chapa: chapa.to_string(), data: None }
    }

    pub fn nao_encontrado_na_data(chapa: &str, data: &str) -> Self {
        ConsultaErro::NaoEncontrado {
            chapa: chapa.to_string(),
            data: Some(data.to_string()),
        }
    }

    /// Expected "no data" outcome, as opposed to an actual fault.
    pub fn eh_nao_encontrado(&self) -> bool {
        matches!(self, ConsultaErro::NaoEncontrado { .. })
    }
}

pub type ConsultaResult<T> = Result<T, ConsultaErro>;

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nao_encontrado() {
        let erro = ConsultaErro::nao_encontrado_na_data("19135", "02/11/2025");
        assert_eq!(
            erro.to_string(),
            "Nenhum registro encontrado para o RE '19135' na data 02/11/2025"
        );
        assert!(erro.eh_nao_encontrado());
    }

    #[test]
    fn test_display_data_invalida() {
        let erro = ConsultaErro::DataInvalida("31/02/2025".to_string());
        assert!(erro.to_string().contains("31/02/2025"));
        assert!(!erro.eh_nao_encontrado());
    }

    #[test]
    fn test_serializa_com_tag() {
        let erro = ConsultaErro::ColunasAusentes(vec!["data".to_string(), "re".to_string()]);
        let json = serde_json::to_value(&erro).unwrap();
        assert_eq!(json["erro"], "ColunasAusentes");
        assert_eq!(json["detalhe"][0], "data");
    }
}
