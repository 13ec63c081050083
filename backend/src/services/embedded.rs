//! # Embedded Console
//!
//! Serves the compiled console bundled into the binary by `build.rs`. Any
//! path that is not a bundled file gets `index.html`, so reloading the
//! browser on any console page still works.
//!
//! `trunk` fingerprints the wasm, JS and CSS it emits, so those are cached
//! for good; `index.html` must always be revalidated so a new build is
//! picked up.

use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::{HttpRequest, HttpResponse};
use include_dir::{include_dir, Dir};
use mime_guess::from_path;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

const INDEX: &str = "index.html";

fn cache_policy(file_path: &str) -> CacheControl {
    if file_path == INDEX {
        CacheControl(vec![CacheDirective::NoCache])
    } else {
        CacheControl(vec![
            CacheDirective::Public,
            CacheDirective::MaxAge(31_536_000),
            CacheDirective::Extension("immutable".to_owned(), None),
        ])
    }
}

pub async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let requested = req.path().trim_start_matches('/');
    let file_path = if requested.is_empty() { INDEX } else { requested };

    let (file_path, file) = match STATIC_DIR.get_file(file_path) {
        Some(file) => (file_path, file),
        None => match STATIC_DIR.get_file(INDEX) {
            Some(index) => (INDEX, index),
            None => {
                log::error!("console bundle has no {}", INDEX);
                return HttpResponse::NotFound().body("Not Found");
            }
        },
    };

    let mime = from_path(file_path).first_or_octet_stream();
    HttpResponse::Ok()
        .content_type(mime.as_ref())
        .insert_header(cache_policy(file_path))
        .body(file.contents())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE};
    use actix_web::{test, web, App};

    #[actix_web::test]
    async fn root_and_unknown_paths_get_the_index() {
        let app = test::init_service(App::new().default_service(web::route().to(serve_embedded))).await;

        for path in ["/", "/arquivo/42", "/logs"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
            assert_eq!(resp.status(), 200, "path {}", path);
            let content_type = resp.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap();
            assert!(content_type.starts_with("text/html"), "path {}", path);
            let cache = resp.headers().get(CACHE_CONTROL).unwrap().to_str().unwrap();
            assert_eq!(cache, "no-cache", "path {}", path);
        }
    }

    #[::core::prelude::v1::test]
    fn fingerprinted_assets_are_cached_for_good() {
        let policy = cache_policy("vault-console-3f2a9c_bg.wasm").to_string();
        assert!(policy.contains("max-age=31536000"), "{}", policy);
        assert!(policy.contains("immutable"), "{}", policy);
        assert_eq!(cache_policy(INDEX).to_string(), "no-cache");
    }
}
