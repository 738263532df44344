// Chatbot Motorista - Consulta interativa no terminal
// Menu de telemetria por chapa/RE; cada consulta recarrega a planilha,
// não há estado entre uma pergunta e outra.

use anyhow::Result;
use chrono::Local;
use std::io::{self, Write};

use chatbot_motorista::{
    buscar_metricas_do_dia, carregar_csv, consultar_eventos_detalhados, formatar_eventos,
    formatar_metricas, formatar_relatorio_completo, Config, ConsultaErro,
};

fn main() -> Result<()> {
    println!("Olá, Seja Bem-vindo ao Sistema de Consulta de Telemetria!");

    let config = Config::from_env();
    let nome = perguntar("Digite seu nome: ")?;
    let chapa = perguntar("Digite seu número de RE: ")?;

    loop {
        let resposta = perguntar(&format!(
            "\nO que gostaria de saber hoje, {}? \n\
             [1] - Todos os Eventos e Pontos de uma DATA ESPECÍFICA.\n\
             [2] - Suas Métricas Diárias (Quantidade e Pontos) de uma DATA ESPECÍFICA.\n\
             [3] - Relatório Completo (Eventos + Métricas).\n\
             [4] - Sair\n\
             Digite a opção (1, 2, 3 ou 4): ",
            nome
        ))?;

        if !processar_resposta(&resposta, &nome, &chapa, &config)? {
            break;
        }
    }

    println!("\n✅ Sessão encerrada. Até mais, {}!", nome);
    Ok(())
}

// ============================================================================
// MENU
// ============================================================================

/// Returns false when the user asked to quit.
fn processar_resposta(resposta: &str, nome: &str, chapa: &str, config: &Config) -> Result<bool> {
    match resposta.trim() {
        "1" => {
            let Some(data) = coletar_e_validar_data(nome)? else {
                return Ok(true);
            };
            println!("\n>> {}, buscando todos os Eventos e Pontos para o dia {}...", nome, data);
            println!("\n{}\n", consultar_eventos(chapa, &data, config));
        }
        "2" => {
            let Some(data) = coletar_e_validar_data(nome)? else {
                return Ok(true);
            };
            println!("\n>> {}, buscando suas Métricas Diárias para {}...", nome, data);
            println!("\n{}\n", consultar_metricas(chapa, &data, config));
        }
        "3" => {
            let Some(data) = coletar_e_validar_data(nome)? else {
                return Ok(true);
            };
            println!("\n>> {}, buscando TODAS as suas métricas e eventos do dia {}...", nome, data);
            let relatorio = formatar_relatorio_completo(
                chapa,
                &data,
                &Local::now().format("%d/%m/%Y").to_string(),
                &consultar_eventos(chapa, &data, config),
                &consultar_metricas(chapa, &data, config),
            );
            println!("\n{}\n", relatorio);
        }
        "4" => {
            println!("\n>> Obrigado, {}! Encerrando o sistema.", nome);
            return Ok(false);
        }
        outra => {
            println!("\n>> Opção \"{}\" inválida. Escolha [1], [2], [3] ou [4].", outra);
        }
    }

    Ok(true)
}

// ============================================================================
// QUERIES
// ============================================================================

fn consultar_eventos(chapa: &str, data: &str, config: &Config) -> String {
    let resultado = carregar_csv(&config.telemetria_csv)
        .and_then(|tabela| consultar_eventos_detalhados(&tabela, chapa, data));

    match resultado {
        Ok(resumo) => formatar_eventos(&resumo),
        Err(erro) => mensagem_de_erro(erro),
    }
}

fn consultar_metricas(chapa: &str, data: &str, config: &Config) -> String {
    let resultado = carregar_csv(&config.telemetria_csv)
        .and_then(|tabela| buscar_metricas_do_dia(&tabela, chapa, data));

    match resultado {
        Ok(metricas) => formatar_metricas(&metricas),
        Err(erro) => mensagem_de_erro(erro),
    }
}

fn mensagem_de_erro(erro: ConsultaErro) -> String {
    match &erro {
        ConsultaErro::NaoEncontrado { .. } => format!("ℹ️ {}.", erro),
        ConsultaErro::DataInvalida(_) => format!("❌ {}.", erro),
        _ => format!("🚨 {}", erro),
    }
}

// ============================================================================
// INPUT
// ============================================================================

fn perguntar(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut linha = String::new();
    io::stdin().read_line(&mut linha)?;
    Ok(linha.trim().to_string())
}

/// Asks for a date and validates it (shape first, then calendar). Returns
/// None when invalid so the caller drops back to the menu.
fn coletar_e_validar_data(nome: &str) -> Result<Option<String>> {
    println!("\n--- SELEÇÃO DE DATA ---");
    let data = perguntar(&format!(
        "{}, por favor, digite a data que deseja consultar (Ex: 01/09/2025): ",
        nome
    ))?;

    if !tem_formato_de_data(&data) {
        println!("❌ Formato de data inválido. Use o formato DD/MM/YYYY.");
        return Ok(None);
    }

    match chrono::NaiveDate::parse_from_str(&data, "%d/%m/%Y") {
        Ok(_) => Ok(Some(data)),
        Err(_) => {
            println!("❌ A data '{}' é inválida. Verifique o dia, mês e ano.", data);
            Ok(None)
        }
    }
}

/// DD/MM/YYYY shape check before the calendar parse.
fn tem_formato_de_data(data: &str) -> bool {
    let bytes = data.as_bytes();
    bytes.len() == 10
        && bytes[2] == b'/'
        && bytes[5] == b'/'
        && data
            .char_indices()
            .all(|(i, c)| if i == 2 || i == 5 { c == '/' } else { c.is_ascii_digit() })
}
