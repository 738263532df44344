// 🔍 Resolver - Row lookup by normalized chapa
// One parameterized lookup instead of one near-identical query function per
// deployment snapshot; the identifier column name is supplied by the caller
// because the sources disagree ("chapa" here, "re" there).

use crate::chapa::normalizar_chapa;
use crate::outcome::{ConsultaErro, ConsultaResult};
use crate::table::{Linha, Tabela};

// ============================================================================
// RESOLUTION
// ============================================================================

/// Find the row whose identifier column, after normalization, equals the
/// normalized query chapa.
///
/// Policy for duplicate identifiers (e.g. one row per monthly snapshot):
/// first row in source order wins. Callers that need "most recent" sort the
/// table by period before calling.
///
/// An empty normalized chapa matches nothing - missing input is not a
/// wildcard.
pub fn resolver<'a>(
    tabela: &'a Tabela,
    coluna_chapa: &str,
    chapa: &str,
) -> ConsultaResult<&'a Linha> {
    tabela.exigir_colunas(&[coluna_chapa])?;

    let alvo = normalizar_chapa(chapa);
    if alvo.is_empty() {
        return Err(ConsultaErro::nao_encontrado(chapa));
    }

    tabela
        .linhas
        .iter()
        .find(|linha| {
            linha
                .get(coluna_chapa)
                .map_or(false, |valor| normalizar_chapa(valor) == alvo)
        })
        .ok_or_else(|| ConsultaErro::nao_encontrado(chapa))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Tabela;
    use std::collections::HashMap;

    fn linha(campos: &[(&str, &str)]) -> HashMap<String, String> {
        campos
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn tabela_cadastro() -> Tabela {
        Tabela::new(
            "cadastro",
            vec![
                linha(&[("chapa", "014594"), ("nome", "Ana")]),
                linha(&[("chapa", "4639"), ("nome", "Bruno")]),
                linha(&[("chapa", "4639"), ("nome", "Bruno (snapshot antigo)")]),
            ],
        )
    }

    #[test]
    fn test_resolve_com_zeros_a_esquerda() {
        // source stores "014594", query arrives as "14594"
        let tabela = tabela_cadastro();
        let registro = resolver(&tabela, "chapa", "14594").unwrap();
        assert_eq!(registro["nome"], "Ana");
    }

    #[test]
    fn test_resolve_consulta_com_zeros() {
        let tabela = tabela_cadastro();
        let registro = resolver(&tabela, "chapa", "004639").unwrap();
        assert_eq!(registro["nome"], "Bruno");
    }

    #[test]
    fn test_duplicata_primeira_linha_vence() {
        let tabela = tabela_cadastro();
        let registro = resolver(&tabela, "chapa", "4639").unwrap();
        assert_eq!(registro["nome"], "Bruno");
    }

    #[test]
    fn test_tabela_sem_linhas_retorna_nao_encontrado() {
        // a registry that loaded with headers but zero rows is well-formed;
        // any lookup against it is a plain not-found, never a schema fault
        let tabela = Tabela::com_colunas(
            "cadastro",
            vec!["chapa".to_string(), "nome".to_string()],
            vec![],
        );
        let erro = resolver(&tabela, "chapa", "14594").unwrap_err();
        assert!(erro.eh_nao_encontrado(), "esperava não-encontrado, veio {:?}", erro);
    }

    #[test]
    fn test_chapa_ausente_retorna_nao_encontrado() {
        let tabela = tabela_cadastro();
        let erro = resolver(&tabela, "chapa", "99999").unwrap_err();
        assert!(erro.eh_nao_encontrado());
    }

    #[test]
    fn test_chapa_vazia_nao_eh_coringa() {
        let tabela = Tabela::new("cadastro", vec![linha(&[("chapa", "0"), ("nome", "X")])]);
        // both "0" and "" normalize to empty; neither may match the "0" row
        assert!(resolver(&tabela, "chapa", "0").unwrap_err().eh_nao_encontrado());
        assert!(resolver(&tabela, "chapa", "  ").unwrap_err().eh_nao_encontrado());
    }

    #[test]
    fn test_coluna_ausente_eh_erro_de_schema() {
        let tabela = Tabela::new("cadastro", vec![linha(&[("nome", "Ana")])]);
        let erro = resolver(&tabela, "chapa", "14594").unwrap_err();
        assert_eq!(erro, ConsultaErro::ColunasAusentes(vec!["chapa".to_string()]));
    }
}
