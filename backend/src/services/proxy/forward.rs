use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use log::{debug, warn};
use reqwest::Method;

use super::{ProxyError, Upstream};

/// Request headers passed on to the ETL service.
const FORWARDED_REQUEST_HEADERS: [&str; 2] = ["content-type", "accept"];
/// Response headers passed back to the console.
const FORWARDED_RESPONSE_HEADERS: [&str; 2] = ["content-type", "content-disposition"];

pub(crate) async fn process(
    req: HttpRequest,
    body: web::Bytes,
    upstream: web::Data<Upstream>,
) -> Result<HttpResponse, ProxyError> {
    let tail = req.match_info().query("tail");
    let url = upstream_url(&upstream.base_url, tail, req.query_string());
    let method = Method::from_bytes(req.method().as_str().as_bytes())
        .map_err(|_| ProxyError::Method(req.method().to_string()))?;
    debug!("{} {} -> {}", method, req.path(), url);

    let mut request = upstream.client.request(method, &url);
    for name in FORWARDED_REQUEST_HEADERS {
        if let Some(value) = req.headers().get(name).and_then(|v| v.to_str().ok()) {
            request = request.header(name, value);
        }
    }
    if !body.is_empty() {
        request = request.body(body.to_vec());
    }

    let response = request.send().await.map_err(|e| {
        warn!("ETL service unreachable at {}: {}", url, e);
        ProxyError::Unreachable(e.to_string())
    })?;

    let status = StatusCode::from_u16(response.status().as_u16())
        .map_err(|e| ProxyError::Body(e.to_string()))?;
    let mut builder = HttpResponse::build(status);
    for name in FORWARDED_RESPONSE_HEADERS {
        if let Some(value) = response.headers().get(name).and_then(|v| v.to_str().ok()) {
            builder.insert_header((name, value.to_string()));
        }
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ProxyError::Body(e.to_string()))?;
    Ok(builder.body(bytes.to_vec()))
}

/// `{base}/{tail}?{query}`, with the query left out when empty.
pub(crate) fn upstream_url(base: &str, tail: &str, query: &str) -> String {
    let mut url = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        tail.trim_start_matches('/')
    );
    if !query.is_empty() {
        url.push('?');
        url.push_str(query);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::proxy::configure_routes;
    use actix_web::{test, App, HttpServer};

    #[::core::prelude::v1::test]
    fn upstream_url_joins_path_and_query() {
        assert_eq!(
            upstream_url("http://etl:8000/", "arquivos", "skip=0&limit=50"),
            "http://etl:8000/arquivos?skip=0&limit=50"
        );
        assert_eq!(
            upstream_url("http://etl:8000", "import/status/abc", ""),
            "http://etl:8000/import/status/abc"
        );
    }

    async fn fake_etl() -> std::io::Result<String> {
        let server = HttpServer::new(|| {
            App::new()
                .route(
                    "/stats",
                    web::get().to(|req: HttpRequest| async move {
                        HttpResponse::Ok().json(serde_json::json!({
                            "total_documentos": 3,
                            "total_arquivos": 5,
                            "total_operacoes": 1,
                            "query": req.query_string(),
                        }))
                    }),
                )
                .route(
                    "/restore",
                    web::post().to(|body: web::Bytes| async move {
                        HttpResponse::BadRequest()
                            .content_type("application/json")
                            .body(body)
                    }),
                )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))?;
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        Ok(format!("http://{}", addr))
    }

    #[actix_web::test]
    async fn forwards_method_query_and_status() {
        let base = fake_etl().await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Upstream::new(&base).unwrap()))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/stats?x=1").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total_arquivos"], 5);
        assert_eq!(body["query"], "x=1");

        let req = test::TestRequest::post()
            .uri("/api/restore")
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"detail":"Destino inválido"}"#)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "Destino inválido");
    }

    #[actix_web::test]
    async fn unreachable_service_is_a_bad_gateway() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(Upstream::new("http://127.0.0.1:1").unwrap()))
                .service(configure_routes()),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/stats").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["detail"].as_str().unwrap().starts_with("Serviço ETL indisponível"));
    }
}
