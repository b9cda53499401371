use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use colorpass::middleware::request_trace::RequestTrace;
use colorpass::middleware::trace_span::TraceSpan;
use colorpass::routes;
use colorpass::state::app_state::AppState;

/// Production routes behind the tracing middleware. CORS and the access
/// logger are left out; they change no behaviour a route test can observe.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}
