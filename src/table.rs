// 📂 Tabela - Loading collaborator for the spreadsheet-backed sources
// Produces rows as plain name→value maps with lower-cased, trimmed headers,
// so resolver/aggregator code never deals with source-specific casing.

use crate::outcome::{ConsultaErro, ConsultaResult};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

// ============================================================================
// DATASET MODEL
// ============================================================================

/// One spreadsheet row: lower-cased trimmed column name → trimmed raw value.
pub type Linha = HashMap<String, String>;

/// A loaded tabular source. Row order is file order - resolution policy is
/// "first row in source order", so the loader must not reorder.
///
/// The header is kept separately from the rows: a spreadsheet with zero data
/// rows still has a schema, and lookups against it are plain not-founds,
/// not schema faults.
#[derive(Debug, Clone)]
pub struct Tabela {
    pub fonte: String,
    pub colunas: Vec<String>,
    pub linhas: Vec<Linha>,
}

impl Tabela {
    /// Build from rows alone, taking the first row's keys as the header.
    /// A table built this way with no rows has no schema at all.
    pub fn new(fonte: &str, linhas: Vec<Linha>) -> Self {
        let colunas = linhas
            .first()
            .map(|l| l.keys().cloned().collect())
            .unwrap_or_default();
        Tabela::com_colunas(fonte, colunas, linhas)
    }

    /// Build with an explicit header, the loader's constructor.
    pub fn com_colunas(fonte: &str, colunas: Vec<String>, linhas: Vec<Linha>) -> Self {
        Tabela { fonte: fonte.to_string(), colunas, linhas }
    }

    /// Schema check against the header, run before any row scan. Reports
    /// every missing column at once instead of failing on the first.
    pub fn exigir_colunas(&self, colunas: &[&str]) -> ConsultaResult<()> {
        let faltando: Vec<String> = colunas
            .iter()
            .filter(|c| !self.colunas.iter().any(|col| col.as_str() == **c))
            .map(|c| c.to_string())
            .collect();

        if faltando.is_empty() {
            Ok(())
        } else {
            Err(ConsultaErro::ColunasAusentes(faltando))
        }
    }
}

// ============================================================================
// CSV LOADER
// ============================================================================

/// Load a CSV source into a `Tabela`, normalizing header names to
/// lower-case/trimmed and trimming every cell value.
///
/// A load failure (missing file, malformed CSV) is a `FonteIndisponivel`,
/// distinct from the not-found of a successful-but-empty lookup.
pub fn carregar_csv(caminho: &Path) -> ConsultaResult<Tabela> {
    ler_csv(caminho).map_err(|e| ConsultaErro::FonteIndisponivel(format!("{:#}", e)))
}

fn ler_csv(caminho: &Path) -> Result<Tabela> {
    let mut rdr = csv::Reader::from_path(caminho)
        .with_context(|| format!("Falha ao abrir a planilha {}", caminho.display()))?;

    let cabecalho: Vec<String> = rdr
        .headers()
        .context("Falha ao ler o cabeçalho")?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut linhas = Vec::new();
    for registro in rdr.records() {
        let registro = registro.context("Falha ao ler linha da planilha")?;
        let linha: Linha = cabecalho
            .iter()
            .cloned()
            .zip(registro.iter().map(|v| v.trim().to_string()))
            .collect();
        linhas.push(linha);
    }

    Ok(Tabela::com_colunas(&caminho.display().to_string(), cabecalho, linhas))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn linha(campos: &[(&str, &str)]) -> Linha {
        campos
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_exigir_colunas_presentes() {
        let tabela = Tabela::new("teste", vec![linha(&[("chapa", "14594"), ("nome", "Ana")])]);
        assert!(tabela.exigir_colunas(&["chapa", "nome"]).is_ok());
    }

    #[test]
    fn test_exigir_colunas_faltando() {
        let tabela = Tabela::new("teste", vec![linha(&[("chapa", "14594")])]);
        let erro = tabela.exigir_colunas(&["chapa", "data", "evento"]).unwrap_err();
        assert_eq!(
            erro,
            ConsultaErro::ColunasAusentes(vec!["data".to_string(), "evento".to_string()])
        );
    }

    #[test]
    fn test_tabela_sem_cabecalho_eh_erro_de_schema() {
        let tabela = Tabela::new("teste", vec![]);
        let erro = tabela.exigir_colunas(&["chapa"]).unwrap_err();
        assert_eq!(erro, ConsultaErro::ColunasAusentes(vec!["chapa".to_string()]));
    }

    #[test]
    fn test_tabela_sem_linhas_mantem_schema() {
        // zero data rows is a well-formed table, not a format drift
        let tabela = Tabela::com_colunas(
            "teste",
            vec!["chapa".to_string(), "nome".to_string()],
            vec![],
        );
        assert!(tabela.exigir_colunas(&["chapa", "nome"]).is_ok());
    }

    #[test]
    fn test_carregar_csv_normaliza_cabecalho() {
        use std::io::Write;

        let dir = std::env::temp_dir().join("chatbot_motorista_test_csv");
        std::fs::create_dir_all(&dir).unwrap();
        let caminho = dir.join("telemetria.csv");
        let mut arquivo = std::fs::File::create(&caminho).unwrap();
        writeln!(arquivo, " Data ,RE, Evento ,Quantidade").unwrap();
        writeln!(arquivo, "01/11/2025, 019135 , Freada brusca ,3.0").unwrap();
        drop(arquivo);

        let tabela = carregar_csv(&caminho).unwrap();
        assert_eq!(tabela.linhas.len(), 1);
        let linha = &tabela.linhas[0];
        assert_eq!(linha["data"], "01/11/2025");
        assert_eq!(linha["re"], "019135");
        assert_eq!(linha["evento"], "Freada brusca");

        std::fs::remove_file(&caminho).ok();
    }

    #[test]
    fn test_carregar_csv_somente_cabecalho() {
        use std::io::Write;

        let dir = std::env::temp_dir().join("chatbot_motorista_test_csv");
        std::fs::create_dir_all(&dir).unwrap();
        let caminho = dir.join("cadastro_vazio.csv");
        let mut arquivo = std::fs::File::create(&caminho).unwrap();
        writeln!(arquivo, "chapa,nome").unwrap();
        drop(arquivo);

        let tabela = carregar_csv(&caminho).unwrap();
        assert!(tabela.linhas.is_empty());
        assert_eq!(tabela.colunas, vec!["chapa".to_string(), "nome".to_string()]);
        assert!(tabela.exigir_colunas(&["chapa"]).is_ok());

        std::fs::remove_file(&caminho).ok();
    }

    #[test]
    fn test_carregar_csv_arquivo_ausente() {
        let erro = carregar_csv(Path::new("/nao/existe/planilha.csv")).unwrap_err();
        assert!(matches!(erro, ConsultaErro::FonteIndisponivel(_)));
    }
}
