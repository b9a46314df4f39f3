//! CORS middleware configuration for browser clients.
//!
//! Origins come from `CorsConfig`: a `*` entry allows any origin, otherwise
//! only the listed origins are accepted. The event stream is a plain GET, so
//! no extra headers are needed for it.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use rh_shared::config::CorsConfig;

/// Creates a CORS middleware instance from configuration
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::CACHE_CONTROL,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        log::info!("Configuring permissive CORS");
        return cors.allow_any_origin();
    }

    config
        .allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .fold(cors, |cors, origin| {
            log::info!("Adding allowed origin: {}", origin);
            cors.allowed_origin(origin)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn preflight(config: CorsConfig, origin: &str) -> StatusCode {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&config))
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/ping")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .to_request();
        test::call_service(&app, req).await.status()
    }

    #[actix_web::test]
    async fn test_any_origin_in_development() {
        let status = preflight(CorsConfig::development(), "http://localhost:3000").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_listed_origins_only() {
        let config = CorsConfig {
            allowed_origins: vec!["https://renthub.example".to_string()],
            max_age: 600,
        };

        assert_eq!(preflight(config.clone(), "https://renthub.example").await, StatusCode::OK);
        assert_ne!(preflight(config, "https://evil.example").await, StatusCode::OK);
    }
}
