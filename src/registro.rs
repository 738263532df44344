// 👤 Registro - Dados cadastrais do motorista
// Extracts the driver card from a resolved row of the registry table
// (Base Grupo). Missing fields render as "N/D" instead of erroring: the
// spreadsheet is hand-maintained and holes are routine.

use crate::chapa::normalizar_chapa;
use crate::outcome::ConsultaResult;
use crate::resolver::resolver;
use crate::table::{Linha, Tabela};
use serde::Serialize;

/// Identifier column of the registry table.
pub const COLUNA_CHAPA: &str = "chapa";

const NAO_DISPONIVEL: &str = "N/D";

// ============================================================================
// DRIVER RECORD
// ============================================================================

/// Cadastral data for one driver, one request's snapshot of the registry row.
#[derive(Debug, Clone, Serialize)]
pub struct Motorista {
    pub chapa: String,
    pub nome: String,
    pub funcao: String,
    pub turno: String,
    pub grupo: String,
    pub admissao: String,
    pub vencimento_cnh: String,
    pub status: String,
    pub supervisor: String,
    /// Tenure rendered as "X anos e Y meses" when the source column holds a
    /// day count; otherwise the raw value passes through.
    pub tempo_de_casa: String,
}

impl Motorista {
    /// Build the driver card from a registry row. `chapa` is stored in
    /// normalized form so every downstream consumer joins on the same key.
    pub fn da_linha(linha: &Linha, chapa: &str) -> Self {
        Motorista {
            chapa: normalizar_chapa(chapa),
            nome: titulo(campo(linha, "nome")),
            funcao: titulo(campo(linha, "funcao")),
            turno: campo(linha, "turno"),
            grupo: campo(linha, "grupo").to_uppercase(),
            admissao: campo(linha, "admissao"),
            vencimento_cnh: campo(linha, "vencimento_cnh"),
            status: campo(linha, "status"),
            supervisor: titulo(campo(linha, "supervisor")),
            tempo_de_casa: formatar_tempo_de_casa(&campo(linha, "tempo_de_casa")),
        }
    }
}

/// Resolve a chapa against the registry table and build the driver card.
pub fn consultar_motorista(tabela: &Tabela, chapa: &str) -> ConsultaResult<Motorista> {
    let linha = resolver(tabela, COLUNA_CHAPA, chapa)?;
    Ok(Motorista::da_linha(linha, chapa))
}

// ============================================================================
// FIELD HELPERS
// ============================================================================

fn campo(linha: &Linha, nome: &str) -> String {
    match linha.get(nome) {
        Some(valor) if !valor.is_empty() => valor.clone(),
        _ => NAO_DISPONIVEL.to_string(),
    }
}

/// "JOAO DA SILVA" → "Joao Da Silva", matching the chat card style.
fn titulo(valor: String) -> String {
    if valor == NAO_DISPONIVEL {
        return valor;
    }
    valor
        .split_whitespace()
        .map(|palavra| {
            let mut chars = palavra.chars();
            match chars.next() {
                Some(primeira) => {
                    primeira.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The registry stores tenure as a day count; render it as years + months.
/// A non-numeric value (already-formatted text, "N/D") passes through.
fn formatar_tempo_de_casa(valor: &str) -> String {
    match valor.parse::<f64>() {
        Ok(dias) if dias >= 0.0 => {
            let dias = dias as i64;
            let anos = dias / 365;
            let meses = (dias % 365) / 30;
            format!("{} anos e {} meses", anos, meses)
        }
        _ => valor.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Tabela;
    use std::collections::HashMap;

    fn linha_cadastro() -> HashMap<String, String> {
        [
            ("chapa", "014594"),
            ("nome", "ANA BEATRIZ SOUZA"),
            ("funcao", "MOTORISTA"),
            ("turno", "2º Turno"),
            ("grupo", "garagem norte"),
            ("admissao", "12/03/2019"),
            ("vencimento_cnh", "30/06/2027"),
            ("status", "Ativo"),
            ("supervisor", "CARLOS LIMA"),
            ("tempo_de_casa", "800"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_monta_cartao_do_motorista() {
        let motorista = Motorista::da_linha(&linha_cadastro(), "014594");
        assert_eq!(motorista.chapa, "14594");
        assert_eq!(motorista.nome, "Ana Beatriz Souza");
        assert_eq!(motorista.funcao, "Motorista");
        assert_eq!(motorista.grupo, "GARAGEM NORTE");
        assert_eq!(motorista.supervisor, "Carlos Lima");
        assert_eq!(motorista.tempo_de_casa, "2 anos e 2 meses");
    }

    #[test]
    fn test_campos_ausentes_viram_nd() {
        let mut linha = linha_cadastro();
        linha.remove("turno");
        linha.insert("status".to_string(), String::new());

        let motorista = Motorista::da_linha(&linha, "14594");
        assert_eq!(motorista.turno, "N/D");
        assert_eq!(motorista.status, "N/D");
    }

    #[test]
    fn test_tempo_de_casa_nao_numerico_passa_direto() {
        let mut linha = linha_cadastro();
        linha.insert("tempo_de_casa".to_string(), "2 anos".to_string());
        let motorista = Motorista::da_linha(&linha, "14594");
        assert_eq!(motorista.tempo_de_casa, "2 anos");
    }

    #[test]
    fn test_consultar_motorista_resolve_padding() {
        let tabela = Tabela::new("cadastro", vec![linha_cadastro()]);
        let motorista = consultar_motorista(&tabela, "14594").unwrap();
        assert_eq!(motorista.nome, "Ana Beatriz Souza");
    }

    #[test]
    fn test_consultar_motorista_nao_encontrado() {
        let tabela = Tabela::new("cadastro", vec![linha_cadastro()]);
        assert!(consultar_motorista(&tabela, "999").unwrap_err().eh_nao_encontrado());
    }
}
