use crate::data::{TimetableInput, TimetableOutput};
use crate::engine;
use axum::extract::rejection::JsonRejection;
use axum::http::{Method, StatusCode, header};
use axum::{Json, Router, routing::post};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn internal_error(message: String) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody { error: message }),
    )
}

/// Any failure, malformed JSON included, maps to a 500 with an error body.
async fn generate_handler(
    payload: Result<Json<TimetableInput>, JsonRejection>,
) -> Result<Json<TimetableOutput>, (StatusCode, Json<ErrorBody>)> {
    let Json(input) = payload.map_err(|e| internal_error(e.body_text()))?;
    match engine::generate(&input) {
        Ok(output) => Ok(Json(output)),
        Err(e) => Err(internal_error(e)),
    }
}

pub fn app() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/v1/timetable/generate", post(generate_handler))
        .layer(cors)
}

pub async fn run_server() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:8080")
        .await
        .unwrap();

    println!("Server running at http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app()).await.unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn post_returns_a_generated_timetable() {
        let payload = json!({
            "courses": [{"id": "C1", "instructor": "I1", "credits": 4}],
            "venues": [{"id": "V1"}],
        });
        let response = app()
            .oneshot(
                Request::post("/v1/timetable/generate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["entries"].as_array().unwrap().len(), 2);
        assert_eq!(body["unscheduled"], json!([]));
    }

    #[tokio::test]
    async fn malformed_json_maps_to_500_with_error_body() {
        let response = app()
            .oneshot(
                Request::post("/v1/timetable/generate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn preflight_gets_the_cors_contract() {
        let response = app()
            .oneshot(
                Request::options("/v1/timetable/generate")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
            .to_str()
            .unwrap();
        assert!(methods.contains("POST"));
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "content-type");
    }
}
