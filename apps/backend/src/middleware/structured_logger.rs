//! One `request_completed` event per request.
//!
//! Besides method, path, status and latency, the event names the room the
//! request addressed (as normalized by the `RoomCode` extractor) and, for
//! failed requests, the `ErrorCode` rendered into the ProblemDetails body.
//! Server errors log at `error`, client errors at `warn`, the rest at `info`.

use std::future::{ready, Ready};
use std::time::{Duration, Instant};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::extractors::room_code::RoomCode;

/// What the completion event reports about one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    pub method: String,
    pub path: String,
    pub trace_id: String,
    pub status: StatusCode,
    pub room_id: Option<String>,
    pub error_code: Option<&'static str>,
    pub duration_us: u64,
}

impl RequestSummary {
    pub fn from_response<B>(
        res: &ServiceResponse<B>,
        trace_id: String,
        elapsed: Duration,
    ) -> Self {
        let req = res.request();
        let room_id = req.extensions().get::<RoomCode>().map(|c| c.0.clone());
        let error_code = res
            .response()
            .error()
            .and_then(|e| e.as_error::<AppError>())
            .map(|e| e.code().as_str());

        Self {
            method: req.method().to_string(),
            path: req.path().to_string(),
            trace_id,
            status: res.status(),
            room_id,
            error_code,
            duration_us: u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
        }
    }

    fn emit(&self) {
        let room_id = self.room_id.as_deref().unwrap_or("-");
        let error_code = self.error_code.unwrap_or("-");
        let status_code = self.status.as_u16();

        if self.status.is_server_error() {
            error!(http.method = %self.method, url.path = %self.path, http.status_code = status_code, room_id, error_code, duration_us = self.duration_us, trace_id = %self.trace_id, message = "request_completed");
        } else if self.status.is_client_error() {
            warn!(http.method = %self.method, url.path = %self.path, http.status_code = status_code, room_id, error_code, duration_us = self.duration_us, trace_id = %self.trace_id, message = "request_completed");
        } else {
            info!(http.method = %self.method, url.path = %self.path, http.status_code = status_code, room_id, duration_us = self.duration_us, trace_id = %self.trace_id, message = "request_completed");
        }
    }
}

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());
        let method = req.method().to_string();
        let path = req.path().to_string();

        let fut = self.service.call(req);

        Box::pin(async move {
            match fut.await {
                Ok(res) => {
                    RequestSummary::from_response(&res, trace_id, start.elapsed()).emit();
                    Ok(res)
                }
                Err(err) => {
                    // The request is gone with the error; log what was captured up front.
                    RequestSummary {
                        method,
                        path,
                        trace_id,
                        status: err.as_response_error().status_code(),
                        room_id: None,
                        error_code: err.as_error::<AppError>().map(|e| e.code().as_str()),
                        duration_us: u64::try_from(start.elapsed().as_micros())
                            .unwrap_or(u64::MAX),
                    }
                    .emit();
                    Err(err)
                }
            }
        })
    }
}
