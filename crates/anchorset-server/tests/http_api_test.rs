// HTTP surface tests: routing, authentication, envelopes and status mapping

mod common;

use actix_web::{App, http::StatusCode, http::header, test, web};
use serde_json::{Value, json};

use anchorset_config::{CalculatorConfig, static_config};
use anchorset_server::api;

use common::*;

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(api::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_public_config_without_store_is_the_bundle() {
    let app = init_app!(open_state(None));

    let req = test::TestRequest::get().uri("/api/config").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
    let config: CalculatorConfig = test::read_body_json(resp).await;
    assert_eq!(&config, static_config());
}

#[actix_web::test]
async fn test_admin_requires_credentials() {
    let app = init_app!(secured_state(None));

    let req = test::TestRequest::get()
        .uri("/api/admin/constants")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Basic realm=\"Calculator Admin\""
    );
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Authentication required."}));

    let req = test::TestRequest::get()
        .uri("/api/admin/constants")
        .insert_header((header::AUTHORIZATION, "Basic %%%"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid authorization header.");

    let req = test::TestRequest::get()
        .uri("/api/admin/constants")
        .insert_header(basic_auth(ADMIN_USER, "wrong"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid credentials.");

    let req = test::TestRequest::get()
        .uri("/api/admin/constants")
        .insert_header(basic_auth(ADMIN_USER, ADMIN_PASSWORD))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::to_value(&static_config().constants).unwrap());
}

#[actix_web::test]
async fn test_public_routes_skip_authentication() {
    let app = init_app!(secured_state(None));

    let req = test::TestRequest::get().uri("/api/config").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/health").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_rejected_mutation_leaves_store_untouched() {
    let app = init_app!(secured_state(Some(sqlite_store().await)));

    let req = test::TestRequest::put()
        .uri("/api/admin/constants")
        .set_json(json!({"key": "safetyFactor", "value": 9.5}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get().uri("/api/config").to_request();
    let config: CalculatorConfig = test::call_and_read_body_json(&app, req).await;
    assert_eq!(config.constants, static_config().constants);
}

#[actix_web::test]
async fn test_mutation_without_store_is_unavailable() {
    let app = init_app!(open_state(None));

    let req = test::TestRequest::put()
        .uri("/api/admin/constants")
        .set_json(json!({"key": "safetyFactor", "value": 1.2}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Store not configured."}));
}

#[actix_web::test]
async fn test_validation_runs_before_store_lookup() {
    let app = init_app!(open_state(None));

    let req = test::TestRequest::put()
        .uri("/api/admin/usage-factors")
        .set_json(json!({
            "code": "zero",
            "labelTr": "Sıfır",
            "labelEn": "Zero",
            "percentage": 0,
            "sortOrder": 1
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "percentage must be a positive number.");
}

#[actix_web::test]
async fn test_invalid_json_body() {
    let app = init_app!(open_state(Some(sqlite_store().await)));

    for (method, uri) in [
        (actix_web::http::Method::PUT, "/api/admin/anchors"),
        (actix_web::http::Method::POST, "/api/admin/products"),
        (actix_web::http::Method::DELETE, "/api/admin/cartridges"),
    ] {
        let req = test::TestRequest::default()
            .method(method)
            .uri(uri)
            .set_payload("{oops")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "Invalid JSON body."}));
    }
}

#[actix_web::test]
async fn test_catalog_lifecycle() {
    let app = init_app!(open_state(Some(sqlite_store().await)));

    let req = test::TestRequest::put()
        .uri("/api/admin/groups")
        .set_json(json!({"key": "A"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri("/api/admin/anchors")
        .set_json(json!({"group": "A", "barType": "threaded", "id": "M8", "d0": 10, "hef": 80}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["config"]["groups"]["A"]["anchors"]["threaded"][0]["id"], "M8");

    let product = json!({"code": "PX", "displayName": "PX 585", "group": "A"});
    let req = test::TestRequest::post()
        .uri("/api/admin/products")
        .set_json(&product)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["config"]["etaAssignments"]["PX"]["threaded"]["M8"], false);

    let req = test::TestRequest::post()
        .uri("/api/admin/products")
        .set_json(&product)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Product PX already exists.");

    let req = test::TestRequest::put()
        .uri("/api/admin/eta")
        .set_json(json!({"productCode": "PX", "barType": "threaded", "anchorId": "M8", "enabled": true}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/admin/eta").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["PX"]["threaded"]["M8"], true);

    let req = test::TestRequest::delete()
        .uri("/api/admin/products/PX")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let codes: Vec<&str> = body["config"]["products"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["code"].as_str())
        .collect();
    assert!(!codes.contains(&"PX"));
}

#[actix_web::test]
async fn test_not_found_mapping() {
    let app = init_app!(open_state(Some(sqlite_store().await)));

    let req = test::TestRequest::post()
        .uri("/api/admin/products")
        .set_json(json!({"code": "PZ", "displayName": "PZ", "group": "Z"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Group Z not found.");

    let req = test::TestRequest::put()
        .uri("/api/admin/products/NOPE")
        .set_json(json!({"displayName": "Nope"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Product NOPE not found.");

    let req = test::TestRequest::delete()
        .uri("/api/admin/cartridges")
        .set_json(json!({"group": "A", "nominal": 585}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Cartridge 585 ml for group A not found.");
}

#[actix_web::test]
async fn test_theme_update_merges_defaults() {
    let app = init_app!(open_state(Some(sqlite_store().await)));

    let req = test::TestRequest::put()
        .uri("/api/admin/theme")
        .set_json(json!({"brandColor": "#123456"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/admin/theme").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["brandColor"], "#123456");
    assert_eq!(
        body["pageBackground"],
        static_config().theme.page_background.as_str()
    );

    let req = test::TestRequest::put()
        .uri("/api/admin/theme")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_product_image_round_trip() {
    let app = init_app!(open_state(Some(sqlite_store().await)));
    let image_uri = "/api/assets/product-image?product=PE&nominal=585";

    let req = test::TestRequest::get().uri(image_uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/assets/PE-585-min.png"
    );

    let png: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a];
    let req = test::TestRequest::put()
        .uri("/api/admin/product-images")
        .insert_header(multipart_content_type())
        .set_payload(multipart_body(
            &[("productCode", "PE"), ("nominal", "585")],
            Some(("image/png", png)),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"ok": true}));

    let req = test::TestRequest::get().uri(image_uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
    assert_eq!(
        resp.headers().get(header::CACHE_CONTROL).unwrap(),
        "public, max-age=3600"
    );
    assert_eq!(test::read_body(resp).await.as_ref(), png);

    let req = test::TestRequest::delete()
        .uri("/api/admin/product-images?product=PE&nominal=585")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri(image_uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[actix_web::test]
async fn test_product_image_validation() {
    let app = init_app!(open_state(Some(sqlite_store().await)));

    let req = test::TestRequest::get()
        .uri("/api/assets/product-image?product=PE")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        test::read_body(resp).await.as_ref(),
        b"Missing product or nominal."
    );

    let req = test::TestRequest::put()
        .uri("/api/admin/product-images")
        .insert_header(multipart_content_type())
        .set_payload(multipart_body(&[("productCode", "PE"), ("nominal", "585")], None))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "productCode, nominal and file are required.");

    let req = test::TestRequest::delete()
        .uri("/api/admin/product-images?product=PE&nominal=-1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "nominal must be a positive number.");
}

#[actix_web::test]
async fn test_image_fallback_prefix_is_configurable() {
    let state = anchorset_server::model::AppState::new(
        configuration(&[("assets.fallback_prefix", "https://cdn.example.com/img/")]),
        None,
    );
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/assets/product-image?product=EP1000&nominal=1400")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "https://cdn.example.com/img/EP1000-1400-min.png"
    );
}

#[actix_web::test]
async fn test_health() {
    let app = init_app!(open_state(None));
    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"status": "UP", "store": "none"}));

    let app = init_app!(open_state(Some(sqlite_store().await)));
    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"status": "UP", "store": "sqlite"}));
}
