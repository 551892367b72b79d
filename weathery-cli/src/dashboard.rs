//! Browser dashboard served over HTTP.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
};
use serde::Deserialize;
use weathery_core::{Forecaster, Report, WeatherError};

use crate::page::Page;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub zip: String,
}

pub fn router(forecaster: Arc<Forecaster>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/forecast", get(api_forecast))
        .with_state(forecaster)
}

pub async fn serve(addr: SocketAddr, forecaster: Arc<Forecaster>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Dashboard listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(forecaster))
        .await
        .context("Dashboard server stopped unexpectedly")
}

async fn index(
    State(forecaster): State<Arc<Forecaster>>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    tracing::info!(zip = %params.zip, "dashboard request");
    let today = chrono::Local::now().date_naive();
    let page = Page::load(&forecaster, &params.zip, today).await;
    Html(page.to_html())
}

async fn api_forecast(
    State(forecaster): State<Arc<Forecaster>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Report>, (StatusCode, String)> {
    forecaster
        .report(&params.zip)
        .await
        .map(Json)
        .map_err(|err| (status_for(&err), err.to_string()))
}

fn status_for(err: &WeatherError) -> StatusCode {
    match err {
        WeatherError::LocationNotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::tests::fake_forecaster;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    #[test]
    fn location_not_found_maps_to_404() {
        let err = WeatherError::LocationNotFound { query: "00000".into() };
        assert_eq!(status_for(&err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn provider_failures_map_to_bad_gateway() {
        assert_eq!(
            status_for(&WeatherError::ProviderUnavailable { status: 503 }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&WeatherError::GeocoderUnavailable { status: 429 }),
            StatusCode::BAD_GATEWAY
        );
    }

    async fn get(uri: &str, points_status: Option<u16>) -> (StatusCode, String) {
        let app = router(Arc::new(fake_forecaster(points_status)));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn api_returns_report_json() {
        let (status, body) = get("/api/forecast?zip=78155", None).await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["daily"]["table"]["Mon, 06"]["high"], "80°");
        assert_eq!(json["hourly"]["table"]["rows"][0]["temp"], "68F");
    }

    #[tokio::test]
    async fn api_unknown_zip_is_not_found() {
        let (status, body) = get("/api/forecast?zip=00000", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("'00000'"));
    }

    #[tokio::test]
    async fn api_points_failure_is_bad_gateway() {
        let (status, _) = get("/api/forecast", Some(500)).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn index_without_zip_shows_default_location() {
        let (status, body) = get("/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Showing weather for Seguin, Texas"));
        assert!(body.contains("<h2>7-day:</h2>"));
    }
}
