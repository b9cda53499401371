use actix_web::{web, App, HttpServer};
use colorpass::config::server::ServerConfig;
use colorpass::infra::state::build_state;
use colorpass::middleware::cors::cors_middleware;
use colorpass::middleware::request_trace::RequestTrace;
use colorpass::middleware::structured_logger::StructuredLogger;
use colorpass::middleware::trace_span::TraceSpan;
use colorpass::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let server = match ServerConfig::from_env() {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "Invalid server configuration");
            std::process::exit(1);
        }
    };

    // COLORPASS_DB_KIND picks the backend; bootstrap also runs migrations.
    let app_state = match build_state().build().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    let data = web::Data::new(app_state);
    info!(host = %server.host, port = server.port, "Starting colorpass backend");

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind(server.bind_addr())?
    .run()
    .await
}
