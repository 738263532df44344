// 📈 Desempenho - Fonte mensal de eficiência e prêmio
// Resolves a driver's monthly performance record out of the upstream JSON
// payload and joins it with the registry card. The upstream side may fail
// or have no data; neither may blank out registry fields already resolved.

use crate::chapa::normalizar_chapa;
use crate::outcome::{ConsultaErro, ConsultaResult};
use crate::registro::Motorista;
use serde::Serialize;
use serde_json::Value;

/// Key holding the record list in the upstream payload.
pub const CHAVE_REGISTROS: &str = "registros";

// ============================================================================
// PERFORMANCE RECORD
// ============================================================================

/// Monthly performance for one driver. Display fields are pre-formatted
/// strings: each one is best-effort, a bad value falls back to its raw text
/// without blocking the others.
#[derive(Debug, Clone, Serialize)]
pub struct Desempenho {
    pub referencia: String,
    pub status: String,
    pub km_rodado: String,
    pub litros_consumidos: String,
    pub km_por_litro: String,
    pub economia: String,
    /// Always present; 0.0 whenever the nested prize structure is absent.
    pub premio_total: f64,
}

/// Registry card plus the optional performance half, reported independently:
/// `desempenho == None` with no error means "no data this period";
/// `desempenho_erro == Some` means the upstream source failed.
#[derive(Debug, Clone, Serialize)]
pub struct ResultadoUnificado {
    pub motorista: Motorista,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desempenho: Option<Desempenho>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desempenho_erro: Option<String>,
}

// ============================================================================
// PAYLOAD RESOLUTION
// ============================================================================

/// Find a driver's record in the parsed upstream payload.
///
/// The payload must carry a list under `registros`; any other shape is a
/// malformed response, not a not-found.
pub fn resolver_desempenho(payload: &Value, chapa: &str) -> ConsultaResult<Desempenho> {
    let registros = payload
        .get(CHAVE_REGISTROS)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ConsultaErro::FonteIndisponivel(format!(
                "resposta de desempenho sem a lista '{}'",
                CHAVE_REGISTROS
            ))
        })?;

    let alvo = normalizar_chapa(chapa);
    if alvo.is_empty() {
        return Err(ConsultaErro::nao_encontrado(chapa));
    }

    let registro = registros
        .iter()
        .find(|r| normalizar_chapa(&texto_bruto(r.get("chapa"))) == alvo)
        .ok_or_else(|| ConsultaErro::nao_encontrado(chapa))?;

    Ok(Desempenho {
        referencia: texto_bruto(registro.get("referencia")),
        status: texto_bruto(registro.get("status")),
        km_rodado: formatar_campo(registro.get("km_rodado")),
        litros_consumidos: formatar_campo(registro.get("litros_consumidos")),
        km_por_litro: formatar_campo(registro.get("km_por_litro")),
        economia: formatar_campo(registro.get("economia")),
        premio_total: extrair_premio(registro),
    })
}

/// Prize lookup at `premio-final.dados.total`. Any absent segment or
/// mis-shaped container yields 0 - the field is required and defaulted,
/// never an error.
pub fn extrair_premio(registro: &Value) -> f64 {
    registro
        .get("premio-final")
        .and_then(|v| v.get("dados"))
        .and_then(|v| v.get("total"))
        .and_then(numero)
        .unwrap_or(0.0)
}

// ============================================================================
// JOIN
// ============================================================================

/// Combine a resolved registry card with the performance lookup.
///
/// Call this only after the registry resolved - an unknown driver never
/// reaches the upstream source. A lookup fault lands in `desempenho_erro`;
/// a plain not-found leaves both performance fields empty.
pub fn juntar<F>(motorista: Motorista, buscar_desempenho: F) -> ResultadoUnificado
where
    F: FnOnce(&str) -> ConsultaResult<Desempenho>,
{
    match buscar_desempenho(&motorista.chapa) {
        Ok(desempenho) => ResultadoUnificado {
            motorista,
            desempenho: Some(desempenho),
            desempenho_erro: None,
        },
        Err(erro) if erro.eh_nao_encontrado() => ResultadoUnificado {
            motorista,
            desempenho: None,
            desempenho_erro: None,
        },
        Err(erro) => ResultadoUnificado {
            motorista,
            desempenho: None,
            desempenho_erro: Some(erro.to_string()),
        },
    }
}

// ============================================================================
// FIELD HELPERS
// ============================================================================

fn numero(valor: &Value) -> Option<f64> {
    match valor {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn texto_bruto(valor: Option<&Value>) -> String {
    match valor {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(outro) => outro.to_string(),
    }
}

/// Best-effort display formatting: whole numbers get a thousands separator,
/// fractional ones keep two decimals, anything non-numeric passes through raw.
fn formatar_campo(valor: Option<&Value>) -> String {
    let bruto = texto_bruto(valor);
    match valor.and_then(numero) {
        Some(n) if n.fract() == 0.0 => crate::chat::formatar_milhar(n as i64),
        Some(n) => format!("{:.2}", n).replace('.', ","),
        None => bruto,
    }
}

// ============================================================================
// UPSTREAM FETCH (server feature)
// ============================================================================

#[cfg(feature = "server")]
pub use self::cliente::ClienteDesempenho;

#[cfg(feature = "server")]
mod cliente {
    use super::*;
    use crate::config::Config;

    /// HTTP client for the monthly-performance source. Timeouts come from
    /// the config; on timeout or transport error the query fails fast with
    /// `FonteIndisponivel`, no retries.
    #[derive(Clone)]
    pub struct ClienteDesempenho {
        client: reqwest::Client,
        url: String,
    }

    impl ClienteDesempenho {
        pub fn new(config: &Config) -> Self {
            let client = reqwest::Client::builder()
                .timeout(config.timeout)
                .connect_timeout(std::time::Duration::from_secs(5))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new());

            ClienteDesempenho {
                client,
                url: config.desempenho_url.clone(),
            }
        }

        /// Fetch the payload and resolve one driver's record.
        pub async fn obter_desempenho(&self, chapa: &str) -> ConsultaResult<Desempenho> {
            let payload = self.buscar_payload().await?;
            resolver_desempenho(&payload, chapa)
        }

        async fn buscar_payload(&self) -> ConsultaResult<Value> {
            let resposta = self
                .client
                .get(&self.url)
                .send()
                .await
                .map_err(|e| ConsultaErro::FonteIndisponivel(e.to_string()))?;

            let resposta = resposta.error_for_status().map_err(|e| {
                ConsultaErro::FonteIndisponivel(format!("fonte de desempenho respondeu {}", e))
            })?;

            resposta
                .json::<Value>()
                .await
                .map_err(|e| ConsultaErro::FonteIndisponivel(format!("resposta não é JSON: {}", e)))
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
