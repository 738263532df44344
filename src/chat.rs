// 💬 Chat - Texto formatado para o cliente de conversa
// Markdown-ish rendering of the resolved records: driver card, event table,
// daily metrics and the full report. Pure templating over already-resolved
// data, no decisions here.

use crate::desempenho::ResultadoUnificado;
use crate::eventos::{MetricasDia, ResumoEventos};
use crate::registro::Motorista;

// ============================================================================
// NUMBER FORMATTING
// ============================================================================

/// Thousands separator with '.', pt-BR style: 3549 → "3.549".
pub fn formatar_milhar(n: i64) -> String {
    // unsigned_abs: negating i64::MIN directly overflows, and saturated
    // casts from huge float cells do reach it
    let sinal = if n < 0 { "-" } else { "" };
    let digitos = n.unsigned_abs().to_string();
    let mut grupos = Vec::new();
    let bytes = digitos.as_bytes();
    let mut fim = bytes.len();
    while fim > 3 {
        grupos.push(&digitos[fim - 3..fim]);
        fim -= 3;
    }
    grupos.push(&digitos[..fim]);
    grupos.reverse();
    format!("{}{}", sinal, grupos.join("."))
}

/// Integer rendering of a possibly-float cell value: float parse, integer
/// truncation, thousands separator. A value that does not parse passes
/// through raw - it still shows up, it was just not countable.
pub fn formatar_numero(bruto: &str) -> String {
    match bruto.trim().parse::<f64>() {
        Ok(n) => formatar_milhar(n as i64),
        Err(_) => bruto.to_string(),
    }
}

// ============================================================================
// DRIVER CARD
// ============================================================================

/// Cadastral card for the chatbot answer.
pub fn formatar_motorista_para_chat(motorista: &Motorista) -> String {
    let mut texto = String::new();
    texto.push_str(&format!(
        "✅ **Dados Cadastrais (RE: {})**\n\n",
        motorista.chapa
    ));
    texto.push_str("| Campo | Valor |\n");
    texto.push_str("| :--- | :--- |\n");
    texto.push_str(&format!("| Nome | {} |\n", motorista.nome));
    texto.push_str(&format!("| Função | {} |\n", motorista.funcao));
    texto.push_str(&format!("| Turno | {} |\n", motorista.turno));
    texto.push_str(&format!("| Grupo | {} |\n", motorista.grupo));
    texto.push_str(&format!("| Admissão | {} |\n", motorista.admissao));
    texto.push_str(&format!("| Vencimento CNH | {} |\n", motorista.vencimento_cnh));
    texto.push_str(&format!("| Status | {} |\n", motorista.status));
    texto.push_str(&format!("| Supervisor | {} |\n", motorista.supervisor));
    texto.push_str(&format!("| Tempo de Casa | {} |", motorista.tempo_de_casa));
    texto
}

/// Card plus the monthly-performance block. A failed performance source adds
/// a warning line instead of removing the card; no data adds nothing.
pub fn formatar_resultado_unificado(resultado: &ResultadoUnificado) -> String {
    let mut texto = formatar_motorista_para_chat(&resultado.motorista);

    if let Some(d) = &resultado.desempenho {
        texto.push_str("\n\n📊 *DESEMPENHO MENSAL*");
        texto.push_str(&format!("\nReferência: {}", d.referencia));
        texto.push_str(&format!("\nStatus: {}", d.status));
        texto.push_str(&format!("\nKm rodado: {}", d.km_rodado));
        texto.push_str(&format!("\nKm/L: {}", d.km_por_litro));
        texto.push_str(&format!("\nPrêmio: R$ {:.2}", d.premio_total));
    } else if let Some(erro) = &resultado.desempenho_erro {
        texto.push_str(&format!("\n\n⚠️ Desempenho indisponível no momento: {}", erro));
    }

    texto
}

// ============================================================================
// EVENT TABLES
// ============================================================================

pub fn formatar_eventos(resumo: &ResumoEventos) -> String {
    let mut linhas = Vec::new();
    linhas.push(format!("👤 **Motorista (RE):** {}", resumo.chapa));
    linhas.push(format!("📅 **Data consultada:** {}", resumo.data));
    linhas.push(String::new());
    linhas.push("| Tipo de Evento | Evento | Quantidade | Pontos |".to_string());
    linhas.push("| :--- | :--- | :---: | :---: |".to_string());

    for item in &resumo.itens {
        linhas.push(format!(
            "| {} | {} | {} | {} |",
            item.tipo,
            item.evento,
            formatar_numero(&item.quantidade_bruta),
            formatar_numero(&item.pontos_bruto),
        ));
    }

    linhas.push(format!(
        "| **TOTAL** | — | **{}** | **{}** |",
        formatar_milhar(resumo.total_quantidade as i64),
        formatar_milhar(resumo.total_pontos as i64),
    ));

    linhas.join("\n")
}

pub fn formatar_metricas(metricas: &MetricasDia) -> String {
    format!(
        "👤 **Motorista (RE):** {}\n\
         📅 **Data consultada:** {}\n\n\
         | Métrica Diária | Valor |\n\
         | :--- | :---: |\n\
         | Quantidade Total | {} |\n\
         | Pontos Totais | {} |",
        metricas.chapa,
        metricas.data,
        formatar_milhar(metricas.total_quantidade as i64),
        formatar_milhar(metricas.total_pontos as i64),
    )
}

/// Full report: events + metrics for one date under an execution header.
/// The section bodies arrive pre-rendered so a not-found on one side still
/// shows the other.
pub fn formatar_relatorio_completo(
    chapa: &str,
    data_consulta: &str,
    data_execucao: &str,
    secao_eventos: &str,
    secao_metricas: &str,
) -> String {
    [
        "========================================".to_string(),
        format!("📊 **Relatório Completo para o RE: {}**", chapa),
        format!("📅 Data da Execução: {}", data_execucao),
        "========================================".to_string(),
        String::new(),
        format!("--- **Eventos e Pontos ({})** ---", data_consulta),
        secao_eventos.to_string(),
        String::new(),
        format!("--- **Resumo de Métricas ({})** ---", data_consulta),
        secao_metricas.to_string(),
    ]
    .join("\n")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::desempenho::Desempenho;
    use crate::eventos::ItemEvento;
    use std::collections::HashMap;

    fn motorista_teste() -> Motorista {
        let linha: HashMap<String, String> = [
            ("chapa", "4639"),
            ("nome", "BRUNO DIAS"),
            ("funcao", "MOTORISTA"),
            ("grupo", "garagem sul"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Motorista::da_linha(&linha, "4639")
    }

    #[test]
    fn test_formatar_milhar() {
        assert_eq!(formatar_milhar(0), "0");
        assert_eq!(formatar_milhar(999), "999");
        assert_eq!(formatar_milhar(3549), "3.549");
        assert_eq!(formatar_milhar(1234567), "1.234.567");
        assert_eq!(formatar_milhar(-4200), "-4.200");
        assert_eq!(formatar_milhar(i64::MIN), "-9.223.372.036.854.775.808");
        assert_eq!(formatar_milhar(i64::MAX), "9.223.372.036.854.775.807");
    }

    #[test]
    fn test_formatar_numero_trunca_float() {
        assert_eq!(formatar_numero("3.0"), "3");
        assert_eq!(formatar_numero("3549.7"), "3.549");
        assert_eq!(formatar_numero("indisponível"), "indisponível");
    }

    #[test]
    fn test_formatar_numero_float_extremo() {
        // saturates to i64::MIN on the cast; must render, never panic
        assert_eq!(formatar_numero("-1e300"), "-9.223.372.036.854.775.808");
        assert_eq!(formatar_numero("1e300"), "9.223.372.036.854.775.807");
    }

    #[test]
    fn test_cartao_do_motorista() {
        let texto = formatar_motorista_para_chat(&motorista_teste());
        assert!(texto.contains("RE: 4639"));
        assert!(texto.contains("| Nome | Bruno Dias |"));
        assert!(texto.contains("| Grupo | GARAGEM SUL |"));
    }

    #[test]
    fn test_unificado_com_desempenho() {
        let resultado = ResultadoUnificado {
            motorista: motorista_teste(),
            desempenho: Some(Desempenho {
                referencia: "10/2025".to_string(),
                status: "Apto".to_string(),
                km_rodado: "3.549".to_string(),
                litros_consumidos: "1.200".to_string(),
                km_por_litro: "2,96".to_string(),
                economia: "430,50".to_string(),
                premio_total: 512.75,
            }),
            desempenho_erro: None,
        };

        let texto = formatar_resultado_unificado(&resultado);
        assert!(texto.contains("DESEMPENHO MENSAL"));
        assert!(texto.contains("Prêmio: R$ 512.75"));
    }

    #[test]
    fn test_unificado_com_fonte_fora() {
        let resultado = ResultadoUnificado {
            motorista: motorista_teste(),
            desempenho: None,
            desempenho_erro: Some("timeout".to_string()),
        };

        let texto = formatar_resultado_unificado(&resultado);
        // registry card still fully present
        assert!(texto.contains("| Nome | Bruno Dias |"));
        assert!(texto.contains("Desempenho indisponível"));
    }

    #[test]
    fn test_tabela_de_eventos() {
        let resumo = ResumoEventos {
            chapa: "19135".to_string(),
            data: "01/11/2025".to_string(),
            itens: vec![ItemEvento {
                tipo: "Condução".to_string(),
                evento: "Freada brusca".to_string(),
                quantidade_bruta: "3.0".to_string(),
                quantidade: Some(3.0),
                pontos_bruto: "9".to_string(),
                pontos: Some(9.0),
            }],
            total_quantidade: 3.0,
            total_pontos: 9.0,
        };

        let texto = formatar_eventos(&resumo);
        assert!(texto.contains("| Condução | Freada brusca | 3 | 9 |"));
        assert!(texto.contains("| **TOTAL** | — | **3** | **9** |"));
    }

    #[test]
    fn test_relatorio_completo() {
        let texto = formatar_relatorio_completo(
            "19135",
            "01/11/2025",
            "05/11/2025",
            "eventos aqui",
            "métricas aqui",
        );
        assert!(texto.contains("Relatório Completo para o RE: 19135"));
        assert!(texto.contains("Data da Execução: 05/11/2025"));
        assert!(texto.contains("eventos aqui"));
        assert!(texto.contains("métricas aqui"));
    }
}
