//! Request-level logging and request IDs.

mod ids;
mod spans;

use std::time::Instant;

use salvo::{
    Request, handler,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::Instrument as _;
use tracing::{error, info, warn};

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if req.uri().path() == "/metrics" {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let started = Instant::now();

    let request_id = ids::resolve_request_id(req.header::<String>(ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());

    ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let remote_addr = req.remote_addr().to_string();
    let route = spans::route_label(&path);
    let _in_flight_request = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        request_id = %request_id,
        method = %method,
        route = %route,
        remote_addr = %remote_addr,
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let duration = started.elapsed();
    let status = ids::status_or_ok(res.status_code);
    let duration_ms = duration.as_millis();
    let threshold_ms = u128::from(settings::slow_request_threshold_ms());

    metrics::observe_request(&method, &route, status.as_u16(), duration.as_secs_f64());

    span.record("status", status.as_u16());
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        info!(status = status.as_u16(), duration_ms, "request.completed");

        if status.is_server_error() {
            error!(
                status = status.as_u16(),
                method = %method,
                path = %path,
                request_id = %request_id,
                "server error response"
            );
        } else if status.is_client_error() {
            warn!(
                status = status.as_u16(),
                method = %method,
                path = %path,
                request_id = %request_id,
                "client error response"
            );
        }

        if duration_ms > threshold_ms {
            warn!(
                method = %method,
                path = %path,
                request_id = %request_id,
                duration_ms,
                threshold_ms,
                "slow request detected"
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use salvo::{prelude::*, test::TestClient};

    use super::*;

    #[handler]
    async fn ok() -> &'static str {
        "ok"
    }

    #[tokio::test]
    async fn echoes_incoming_request_id() {
        let service = Service::new(
            Router::new()
                .hoop(request_logging)
                .push(Router::with_path("menu/categories").get(ok)),
        );

        let res = TestClient::get("http://example.com/menu/categories")
            .add_header(ids::REQUEST_ID_HEADER, "req-42", true)
            .send(&service)
            .await;

        let echoed = res
            .headers()
            .get(ids::REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok());

        assert_eq!(echoed, Some("req-42"));
    }

    #[tokio::test]
    async fn generates_request_id_when_missing() {
        let service = Service::new(
            Router::new()
                .hoop(request_logging)
                .push(Router::with_path("languages").get(ok)),
        );

        let res = TestClient::get("http://example.com/languages")
            .send(&service)
            .await;

        let generated = res
            .headers()
            .get(ids::REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        assert!(
            uuid::Uuid::parse_str(generated).is_ok(),
            "expected a generated uuid request id"
        );
    }
}
