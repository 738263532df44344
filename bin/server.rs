// Chatbot Motorista - Servidor HTTP
// Rotas finas sobre a biblioteca de consulta: extraem chapa e data, mapeiam
// cada tipo de resultado para um status HTTP e devolvem JSON ou texto de chat.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use tower_http::cors::CorsLayer;

use chatbot_motorista::{
    buscar_metricas_do_dia, carregar_csv, consultar_eventos_detalhados, consultar_motorista,
    formatar_eventos, formatar_metricas, formatar_relatorio_completo,
    formatar_resultado_unificado, juntar, ClienteDesempenho, Config, ConsultaErro,
    ConsultaResult, ResultadoUnificado,
};

/// Shared application state
#[derive(Clone)]
struct AppState {
    config: Config,
    desempenho: ClienteDesempenho,
}

// ============================================================================
// ERROR MAPPING
// ============================================================================

/// The core never picks status codes; this is where each result kind
/// becomes one.
fn status_para(erro: &ConsultaErro) -> StatusCode {
    match erro {
        ConsultaErro::NaoEncontrado { .. } => StatusCode::NOT_FOUND,
        ConsultaErro::DataInvalida(_) => StatusCode::BAD_REQUEST,
        ConsultaErro::ColunasAusentes(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ConsultaErro::FonteIndisponivel(_) => StatusCode::BAD_GATEWAY,
    }
}

fn responder<T: Serialize>(resultado: ConsultaResult<T>) -> Response {
    match resultado {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(erro) => responder_erro(erro),
    }
}

fn responder_erro(erro: ConsultaErro) -> Response {
    if !erro.eh_nao_encontrado() {
        eprintln!("⚠️ Consulta falhou: {}", erro);
    }
    let corpo = json!({ "mensagem": erro.to_string(), "tipo": erro });
    (status_para(&erro), Json(corpo)).into_response()
}

/// The `data` query parameter is required on the telemetry routes; its
/// absence is an input error, reported before touching any source.
fn extrair_data(params: &HashMap<String, String>) -> ConsultaResult<String> {
    params
        .get("data")
        .filter(|d| !d.trim().is_empty())
        .map(|d| d.trim().to_string())
        .ok_or_else(|| ConsultaErro::DataInvalida("(parâmetro 'data' ausente)".to_string()))
}

// ============================================================================
// API HANDLERS
// ============================================================================

/// GET / - Status + usage hint
async fn home() -> impl IntoResponse {
    Json(json!({
        "status": "online",
        "servidor": "API Chatbot Motorista",
        "instrucao": "Use /chatbot/:chapa para consultar"
    }))
}

/// GET /chatbot/:chapa - Chat-formatted driver card + monthly performance
async fn chatbot_texto(State(state): State<AppState>, Path(chapa): Path<String>) -> Response {
    match resultado_unificado(&state, &chapa).await {
        Ok(resultado) => {
            let texto = formatar_resultado_unificado(&resultado);
            (StatusCode::OK, Json(json!({ "texto": texto }))).into_response()
        }
        Err(erro) => responder_erro(erro),
    }
}

/// GET /api/motorista/:chapa - Unified registry + performance record as JSON
async fn api_motorista(State(state): State<AppState>, Path(chapa): Path<String>) -> Response {
    responder(resultado_unificado(&state, &chapa).await)
}

/// GET /api/eventos/:chapa?data=DD/MM/YYYY - Detailed event listing
async fn api_eventos(
    State(state): State<AppState>,
    Path(chapa): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    responder(extrair_data(&params).and_then(|data| {
        let tabela = carregar_csv(&state.config.telemetria_csv)?;
        consultar_eventos_detalhados(&tabela, &chapa, &data)
    }))
}

/// GET /api/metricas/:chapa?data=DD/MM/YYYY - Daily totals
async fn api_metricas(
    State(state): State<AppState>,
    Path(chapa): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    responder(extrair_data(&params).and_then(|data| {
        let tabela = carregar_csv(&state.config.telemetria_csv)?;
        buscar_metricas_do_dia(&tabela, &chapa, &data)
    }))
}

/// GET /api/relatorio/:chapa?data=DD/MM/YYYY - Full report as chat text
async fn api_relatorio(
    State(state): State<AppState>,
    Path(chapa): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let data = match extrair_data(&params) {
        Ok(data) => data,
        Err(erro) => return responder_erro(erro),
    };

    // A not-found on one section must not hide the other; each section
    // renders its own message.
    let secao_eventos = match carregar_csv(&state.config.telemetria_csv)
        .and_then(|tabela| consultar_eventos_detalhados(&tabela, &chapa, &data))
    {
        Ok(resumo) => formatar_eventos(&resumo),
        Err(erro) => erro.to_string(),
    };
    let secao_metricas = match carregar_csv(&state.config.telemetria_csv)
        .and_then(|tabela| buscar_metricas_do_dia(&tabela, &chapa, &data))
    {
        Ok(metricas) => formatar_metricas(&metricas),
        Err(erro) => erro.to_string(),
    };

    let texto = formatar_relatorio_completo(
        &chapa,
        &data,
        &chrono::Local::now().format("%d/%m/%Y").to_string(),
        &secao_eventos,
        &secao_metricas,
    );
    (StatusCode::OK, Json(json!({ "texto": texto }))).into_response()
}

/// Registry first; an unknown driver never reaches the performance source.
/// A performance-side failure degrades to a marker in the result.
async fn resultado_unificado(
    state: &AppState,
    chapa: &str,
) -> ConsultaResult<ResultadoUnificado> {
    let tabela = carregar_csv(&state.config.cadastro_csv)?;
    let motorista = consultar_motorista(&tabela, chapa)?;

    let busca = state.desempenho.obter_desempenho(&motorista.chapa).await;
    Ok(juntar(motorista, move |_| busca))
}

// ============================================================================
// MAIN SERVER
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🌐 Chatbot Motorista - Servidor HTTP");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = Config::from_env();
    println!("✓ Cadastro:   {}", config.cadastro_csv.display());
    println!("✓ Telemetria: {}", config.telemetria_csv.display());
    println!("✓ Desempenho: {}", config.desempenho_url);

    let state = AppState {
        desempenho: ClienteDesempenho::new(&config),
        config,
    };

    let api_routes = Router::new()
        .route("/motorista/:chapa", get(api_motorista))
        .route("/eventos/:chapa", get(api_eventos))
        .route("/metricas/:chapa", get(api_metricas))
        .route("/relatorio/:chapa", get(api_relatorio));

    let app = Router::new()
        .route("/", get(home))
        .route("/chatbot/:chapa", get(chatbot_texto))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = "0.0.0.0:5000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Servidor rodando em http://localhost:5000");
    println!("   Texto: http://localhost:5000/chatbot/4639");
    println!("   JSON:  http://localhost:5000/api/eventos/4639?data=01/11/2025");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
