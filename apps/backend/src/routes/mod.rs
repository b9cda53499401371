use actix_web::web;

pub mod health;
pub mod rooms;

/// Register every route. `main.rs` adds the middleware stack around this;
/// tests call it directly on a bare `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.service(web::scope("/api/rooms").configure(rooms::configure_routes));
}
