use std::io;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};

use crate::handlers;
use crate::state::AppState;

/// Register the API routes. Callers supply `web::Data<AppState>`.
pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(handlers::documentation::json_error_handler),
    )
    .service(
        web::scope("/api/v1")
            .route(
                "/documentation",
                web::post().to(handlers::documentation::handler),
            )
            .route("/health", web::get().to(handlers::health::handler)),
    );
}

pub async fn run_server(host: &str, port: u16, state: AppState) -> io::Result<()> {
    let state = web::Data::new(state);
    log::info!("Listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .configure(app_config)
    })
    .bind((host, port))?
    .run()
    .await
}
