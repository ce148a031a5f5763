//! Battle Server
//!
//! HTTP surface for opening, joining, and playing principle-card battles,
//! plus a WebSocket watch endpoint for live sync.
//!
//! ## Submodules
//!
//! - [`dto`] — Request and response shapes for the REST surface
//! - [`handlers`] — Route handlers bridging HTTP to the [`Arena`]
//!
//! [`Arena`]: lgm_gameroom::Arena

pub mod dto;
pub mod handlers;

pub use dto::*;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use lgm_gameroom::Advocate;
use lgm_gameroom::Arena;
use lgm_gameroom::Zealot;
use lgm_judge::HttpJudge;
use lgm_judge::Judge;
use std::sync::Arc;
use tokio_postgres::Client;

async fn health(client: web::Data<Arc<Client>>) -> impl Responder {
    match client
        .execute("SELECT 1", &[])
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}

#[rustfmt::skip]
pub async fn run() -> Result<(), std::io::Error> {
    let client = lgm_database::db().await;
    lgm_database::migrate(&client).await.expect("database migration failed");
    let judge: Arc<dyn Judge> = Arc::new(HttpJudge::from_env());
    let advocate: Arc<dyn Advocate> = Arc::new(Zealot);
    let arena = web::Data::new(Arena::new(client.clone(), judge, advocate));
    let client = web::Data::new(client);
    log::info!("starting battle server");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(arena.clone())
            .app_data(client.clone())
            .route("/health", web::get().to(health))
            .service(
                web::scope("/battle")
                    .route("/open", web::post().to(handlers::open))
                    .route("/join/{code}", web::post().to(handlers::join))
                    .route("/{battle_id}", web::get().to(handlers::snapshot))
                    .route("/{battle_id}/plea", web::post().to(handlers::plea))
                    .route("/{battle_id}/pleas", web::get().to(handlers::pleas))
                    .route("/{battle_id}/watch", web::get().to(handlers::watch)),
            )
    })
    .workers(6)
    .bind(std::env::var("BIND_ADDR").expect("BIND_ADDR must be set"))?
    .run()
    .await
}
