// 📊 Eventos - Agregação de telemetria por motorista e data
// Filters the telemetry table by normalized chapa + calendar date and sums
// quantity/points. Dates are bookkeeping dates, not instants: equality is by
// calendar day, no timezone involved.

use crate::chapa::normalizar_chapa;
use crate::outcome::{ConsultaErro, ConsultaResult};
use crate::table::{Linha, Tabela};
use chrono::NaiveDate;
use serde::Serialize;

/// Column names of the telemetry sheet, after header normalization.
pub const COLUNA_DATA: &str = "data";
pub const COLUNA_RE: &str = "re";
pub const COLUNA_TIPO: &str = "tipo de evento";
pub const COLUNA_EVENTO: &str = "evento";
pub const COLUNA_QUANTIDADE: &str = "quantidade";
pub const COLUNA_PONTOS: &str = "pontos";

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// One telemetry line item, in source row order.
///
/// `quantidade`/`pontos` hold the coerced numeric value; the `_bruto` twins
/// keep the raw cell text so a value that failed coercion is still listed,
/// it just contributes 0 to the totals.
#[derive(Debug, Clone, Serialize)]
pub struct ItemEvento {
    pub tipo: String,
    pub evento: String,
    pub quantidade_bruta: String,
    pub quantidade: Option<f64>,
    pub pontos_bruto: String,
    pub pontos: Option<f64>,
}

/// Aggregated telemetry for one (chapa, date) pair.
#[derive(Debug, Clone, Serialize)]
pub struct ResumoEventos {
    pub chapa: String,
    pub data: String,
    pub itens: Vec<ItemEvento>,
    pub total_quantidade: f64,
    pub total_pontos: f64,
}

/// Daily totals only (menu option 2 of the interactive flow).
#[derive(Debug, Clone, Serialize)]
pub struct MetricasDia {
    pub chapa: String,
    pub data: String,
    pub total_quantidade: f64,
    pub total_pontos: f64,
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Detailed event listing for a driver on one date.
///
/// Returns `DataInvalida` when the query date does not parse, `NaoEncontrado`
/// when the filter matches no rows, `ColunasAusentes` when the sheet schema
/// drifted.
pub fn consultar_eventos_detalhados(
    tabela: &Tabela,
    chapa: &str,
    data_input: &str,
) -> ConsultaResult<ResumoEventos> {
    tabela.exigir_colunas(&[COLUNA_DATA, COLUNA_RE, COLUNA_EVENTO, COLUNA_QUANTIDADE])?;
    let filtradas = filtrar_por_chapa_e_data(tabela, chapa, data_input)?;

    if filtradas.is_empty() {
        return Err(ConsultaErro::nao_encontrado_na_data(chapa, data_input));
    }

    let mut itens = Vec::with_capacity(filtradas.len());
    let mut total_quantidade = 0.0;
    let mut total_pontos = 0.0;

    for linha in &filtradas {
        let quantidade_bruta = celula(linha, COLUNA_QUANTIDADE);
        let pontos_bruto = celula(linha, COLUNA_PONTOS);
        let quantidade = coagir_numero(&quantidade_bruta);
        let pontos = coagir_numero(&pontos_bruto);

        total_quantidade += quantidade.unwrap_or(0.0);
        total_pontos += pontos.unwrap_or(0.0);

        itens.push(ItemEvento {
            tipo: celula(linha, COLUNA_TIPO),
            evento: celula(linha, COLUNA_EVENTO),
            quantidade_bruta,
            quantidade,
            pontos_bruto,
            pontos,
        });
    }

    Ok(ResumoEventos {
        chapa: normalizar_chapa(chapa),
        data: data_input.to_string(),
        itens,
        total_quantidade,
        total_pontos,
    })
}

/// Daily quantity/points totals for a driver on one date.
pub fn buscar_metricas_do_dia(
    tabela: &Tabela,
    chapa: &str,
    data_input: &str,
) -> ConsultaResult<MetricasDia> {
    tabela.exigir_colunas(&[COLUNA_DATA, COLUNA_RE, COLUNA_QUANTIDADE])?;
    let filtradas = filtrar_por_chapa_e_data(tabela, chapa, data_input)?;

    if filtradas.is_empty() {
        return Err(ConsultaErro::nao_encontrado_na_data(chapa, data_input));
    }

    let total_quantidade: f64 = filtradas
        .iter()
        .filter_map(|l| coagir_numero(&celula(l, COLUNA_QUANTIDADE)))
        .sum();
    let total_pontos: f64 = filtradas
        .iter()
        .filter_map(|l| coagir_numero(&celula(l, COLUNA_PONTOS)))
        .sum();

    Ok(MetricasDia {
        chapa: normalizar_chapa(chapa),
        data: data_input.to_string(),
        total_quantidade,
        total_pontos,
    })
}

// ============================================================================
// FILTERING AND COERCION
// ============================================================================

/// Shared filter of both queries: normalized chapa match AND exact calendar
/// date match. Rows whose date cell fails to parse are dropped from the set;
/// a few bad rows must not error the whole query.
fn filtrar_por_chapa_e_data<'a>(
    tabela: &'a Tabela,
    chapa: &str,
    data_input: &str,
) -> ConsultaResult<Vec<&'a Linha>> {
    let data_consulta = analisar_data_consulta(data_input)?;
    let alvo = normalizar_chapa(chapa);
    if alvo.is_empty() {
        return Ok(Vec::new());
    }

    Ok(tabela
        .linhas
        .iter()
        .filter(|linha| {
            linha
                .get(COLUNA_RE)
                .map_or(false, |re| normalizar_chapa(re) == alvo)
                && linha
                    .get(COLUNA_DATA)
                    .and_then(|d| analisar_data_linha(d))
                    .map_or(false, |d| d == data_consulta)
        })
        .collect())
}

/// Query dates are strictly DD/MM/YYYY; anything else is the caller's error.
pub fn analisar_data_consulta(data_input: &str) -> ConsultaResult<NaiveDate> {
    NaiveDate::parse_from_str(data_input.trim(), "%d/%m/%Y")
        .map_err(|_| ConsultaErro::DataInvalida(data_input.to_string()))
}

/// Row dates are tolerant: the sheets export either DD/MM/YYYY or ISO,
/// sometimes with a midnight time suffix.
fn analisar_data_linha(valor: &str) -> Option<NaiveDate> {
    let valor = valor.trim();
    let so_data = valor.split_whitespace().next().unwrap_or(valor);
    NaiveDate::parse_from_str(so_data, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(so_data, "%Y-%m-%d"))
        .ok()
}

/// Float parse for values that may arrive as formatted text ("3.0", "5").
/// Comma decimal separators from pt-BR exports are accepted too.
fn coagir_numero(valor: &str) -> Option<f64> {
    let valor = valor.trim();
    if valor.is_empty() {
        return None;
    }
    valor.parse::<f64>().or_else(|_| valor.replace(',', ".").parse::<f64>()).ok()
}

fn celula(linha: &Linha, coluna: &str) -> String {
    linha.get(coluna).cloned().unwrap_or_default()
}

// ============================================================================
// TESTS
// ============================================================================
