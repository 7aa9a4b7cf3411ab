use super::broker::Broker;
use super::config::Config;
use super::session::{self, ConnectQuery};
use crate::board::DictionaryProvider;
use crate::records::RecordsStore;
use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::web;
use actix_web::App;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use serde::Deserialize;
use std::sync::Arc;

pub struct AppState {
    pub broker: Broker,
    pub dictionary: Arc<DictionaryProvider>,
    pub records: Arc<RecordsStore>,
    pub default_board_size: usize,
}

pub struct Server;

impl Server {
    pub async fn run(config: Config, dictionary: DictionaryProvider, records: RecordsStore) -> std::io::Result<()> {
        let state = web::Data::new(AppState {
            broker: Broker::new(),
            dictionary: Arc::new(dictionary),
            records: Arc::new(records),
            default_board_size: config.default_board_size,
        });
        let bind_addr = config.bind_addr.clone();
        log::info!("starting hosting server on {bind_addr}");
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(state.clone())
                .route("/health", web::get().to(health))
                .route("/connect/{lobby_id}/{player_id}", web::get().to(connect))
                .route("/api/leaderboard", web::get().to(leaderboard))
                .route("/api/player-stats", web::get().to(player_stats))
        })
        .bind(bind_addr)?
        .run()
        .await
    }
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

async fn connect(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<ConnectQuery>,
    body: web::Payload,
    req: HttpRequest,
) -> impl Responder {
    let (lobby_id, player_id) = path.into_inner();
    let query = query.into_inner();
    let remote_address = req
        .connection_info()
        .realip_remote_addr()
        .map(|addr| addr.to_string());

    let mode = query.mode.unwrap_or(crate::dto::ConnectMode::Join);
    let handle = match state
        .broker
        .resolve(&lobby_id, mode, state.dictionary.clone(), state.records.clone())
        .await
    {
        Ok(handle) => handle,
        Err(reason) => return HttpResponse::NotFound().body(reason).map_into_right_body(),
    };

    match actix_ws::handle(&req, body) {
        Ok((response, session, stream)) => {
            actix_web::rt::spawn(session::bridge(handle, player_id, query, remote_address, session, stream));
            response.map_into_left_body()
        }
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()).map_into_right_body(),
    }
}

#[derive(Deserialize)]
struct LeaderboardQuery {
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    20
}

async fn leaderboard(state: web::Data<AppState>, query: web::Query<LeaderboardQuery>) -> impl Responder {
    HttpResponse::Ok().json(state.records.leaderboard(query.limit).await)
}

async fn player_stats(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let Some(remote_address) = req.connection_info().realip_remote_addr().map(|a| a.to_string()) else {
        return HttpResponse::BadRequest().body("no remote address");
    };
    match state.records.stats(&remote_address).await {
        Some(stats) => HttpResponse::Ok().json(stats),
        None => HttpResponse::NotFound().body("no stats for this player"),
    }
}
