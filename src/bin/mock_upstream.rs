use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::time::sleep;

const MEAT: &[&str] = &[
    "Pork belly brisket short ribs pancetta.",
    "Andouille ham hock spare ribs jowl.",
    "Tenderloin bresaola turkey bacon sirloin.",
    "Chuck kevin pastrami t-bone flank.",
    "Salami prosciutto cupim drumstick.",
];

const FILLER: &[&str] = &[
    "Consectetur adipisicing elit sed do eiusmod.",
    "Ut enim ad minim veniam quis nostrud.",
    "Duis aute irure dolor in reprehenderit.",
];

#[derive(Clone)]
struct ServerConfig {
    latency_ms: u64,
    error_rate: f64,
}

#[derive(Deserialize)]
struct ApiQuery {
    #[serde(rename = "type")]
    meat_type: Option<String>,
    paras: Option<usize>,
    #[serde(rename = "start-with-lorem")]
    start_with_lorem: Option<String>,
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let port = args.get(1).unwrap_or(&"3000".to_string()).parse::<u16>().unwrap();
    let latency_ms = args.get(2).unwrap_or(&"50".to_string()).parse::<u64>().unwrap();
    let error_rate = args.get(3).unwrap_or(&"0.0".to_string()).parse::<f64>().unwrap();

    let config = ServerConfig { latency_ms, error_rate };

    let app = Router::new()
        .route("/api/", get(handler))
        .with_state(config);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!(
        "Mock bacon ipsum API on localhost:{}. Latency: {}ms, Error Rate: {}",
        port, latency_ms, error_rate
    );

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn handler(
    State(config): State<ServerConfig>,
    Query(query): Query<ApiQuery>,
) -> (StatusCode, Json<Value>) {
    // Simulate latency
    let jitter = rand::thread_rng().gen_range(0..=20);
    sleep(Duration::from_millis(config.latency_ms + jitter)).await;

    // Simulate error
    if config.error_rate > 0.0 && rand::thread_rng().gen_bool(config.error_rate) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "simulated failure" })),
        );
    }

    let paras = query.paras.unwrap_or(3).clamp(1, 10);
    let with_filler = query.meat_type.as_deref() == Some("meat-and-filler");
    let start_with_lorem = query.start_with_lorem.as_deref() == Some("1");

    let mut rng = rand::thread_rng();
    let paragraphs: Vec<String> = (0..paras)
        .map(|i| {
            let mut sentences: Vec<&str> = Vec::new();
            if i == 0 && start_with_lorem {
                sentences.push("Bacon ipsum dolor amet.");
            }
            for _ in 0..rng.gen_range(3..=5) {
                let pool = if with_filler && rng.gen_bool(0.4) { FILLER } else { MEAT };
                if let Some(sentence) = pool.choose(&mut rng) {
                    sentences.push(*sentence);
                }
            }
            sentences.join(" ")
        })
        .collect();

    (StatusCode::OK, Json(json!(paragraphs)))
}
