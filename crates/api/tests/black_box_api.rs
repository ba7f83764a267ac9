use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use reqwest::StatusCode;
use serde_json::{Value, json};

use storefront_api::app::render::{HtmlRenderer, JsonRenderer, Renderer};
use storefront_api::app::{AppServices, router};
use storefront_catalog::{Category, Price, Product, Size, Slug};
use storefront_infra::{CatalogStore, InMemoryCatalogStore, ProductQuery, StoreError};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(store: Arc<dyn CatalogStore>, renderer: Arc<dyn Renderer>) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = router(AppServices::new(store, renderer));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn json() -> Self {
        Self::spawn(Arc::new(fixture_store()), Arc::new(JsonRenderer)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn slug(s: &str) -> Slug {
    Slug::parse(s).unwrap()
}

/// "shoes" holds seven products, "hats" two.
fn fixture_store() -> InMemoryCatalogStore {
    let store = InMemoryCatalogStore::new();
    let shoes = Category::new("Shoes", slug("shoes"));
    let hats = Category::new("Hats", slug("hats"));
    store.upsert_category(shoes.clone());
    store.upsert_category(hats.clone());

    let s42 = Size::new("42");
    let s43 = Size::new("43");
    let m = Size::new("M");
    for size in [&s42, &s43, &m] {
        store.upsert_size(size.clone());
    }

    let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    let shoe_rows = [
        ("Red Runner", "red", 6000, &s42),
        ("Crimson Trail", "Red", 7500, &s43),
        ("Budget Red", "red", 2500, &s42),
        ("Blue Runner", "blue", 5500, &s42),
        ("Green Hiker", "green", 9000, &s43),
        ("Black Oxford", "black", 12000, &s42),
        ("White Court", "white", 4000, &s43),
    ];
    for (age, (name, color, cents, size)) in shoe_rows.into_iter().enumerate() {
        store.upsert_product(
            Product::new(
                name,
                slug(&name.to_lowercase().replace(' ', "-")),
                shoes.clone(),
                Price::from_cents(cents),
            )
            .with_color(color)
            .with_sizes([size.clone()])
            .with_description(format!("{name} shoe"))
            .created_at(t0 - ChronoDuration::hours(age as i64)),
        );
    }
    for (age, (name, color)) in [("Red Beret", "red"), ("Straw Hat", "beige")].into_iter().enumerate() {
        store.upsert_product(
            Product::new(
                name,
                slug(&name.to_lowercase().replace(' ', "-")),
                hats.clone(),
                Price::from_cents(6500),
            )
            .with_color(color)
            .with_sizes([m.clone()])
            .created_at(t0 - ChronoDuration::days(1 + age as i64)),
        );
    }
    store
}

fn names(products: &Value) -> Vec<String> {
    products
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn full_page_is_always_the_base_layout() {
    let server = TestServer::json().await;
    let client = reqwest::Client::new();

    for path in [
        "/",
        "/catalog/",
        "/catalog/shoes/?show_search=true",
        "/catalog/?reset_search=true&show_filters=true",
        "/product/red-runner/",
    ] {
        let res = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{path}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["template"], "main/base.html", "{path}");
    }
}

#[tokio::test]
async fn partial_catalog_applies_filters_and_echoes_them() {
    let server = TestServer::json().await;
    let client = reqwest::Client::new();

    let res = client
        .get(server.url("/catalog/shoes/?color=red&min_price=50"))
        .header("HX-Request", "true")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();

    assert_eq!(body["template"], "main/catalog.html");
    let ctx = &body["context"];
    assert_eq!(
        ctx["filter_params"],
        json!({"color": "red", "min_price": "50", "max_price": " ", "size": " ", "q": " "})
    );
    assert_eq!(ctx["search_query"], " ");
    assert_eq!(ctx["current_category"], "shoes");
    assert_eq!(names(&ctx["products"]), ["Red Runner", "Crimson Trail"]);
    assert_eq!(ctx["categories"].as_array().unwrap().len(), 2);
    assert_eq!(ctx["sizes"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn search_spans_all_categories_without_a_slug() {
    let server = TestServer::json().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(server.url("/catalog?q=RED"))
        .header("HX-Request", "true")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let ctx = &body["context"];
    assert_eq!(ctx["search_query"], "RED");
    assert_eq!(ctx["filter_params"]["q"], "RED");
    assert!(ctx["current_category"].is_null());
    assert_eq!(names(&ctx["products"]), ["Red Runner", "Budget Red", "Red Beret"]);
}

#[tokio::test]
async fn display_flags_pick_fragments() {
    let server = TestServer::json().await;
    let client = reqwest::Client::new();

    let partial = |path: &str| {
        client
            .get(server.url(path))
            .header("HX-Request", "true")
            .send()
    };

    let body: Value = partial("/catalog/?show_search=true&reset_search=true")
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["template"], "main/search_input.html");
    assert_eq!(body["context"]["show_search"], true);
    assert!(body["context"].get("reset_search").is_none());

    let body: Value = partial("/catalog/?reset_search=true&show_filters=true")
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["template"], "main/search_button.html");
    assert_eq!(body["context"], json!({}));

    let body: Value = partial("/catalog/shoes/?show_filters=true")
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["template"], "main/filter_modal.html");
    assert_eq!(body["context"]["current_category"], "shoes");

    let body: Value = partial("/").await.unwrap().json().await.unwrap();
    assert_eq!(body["template"], "main/home_content.html");
    assert!(body["context"]["current_category"].is_null());
}

#[tokio::test]
async fn product_detail_lists_related_products_from_the_same_category() {
    let server = TestServer::json().await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(server.url("/product/red-runner/"))
        .header("HX-Request", "true")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["template"], "main/product_detail.html");
    let ctx = &body["context"];
    assert_eq!(ctx["product"]["name"], "Red Runner");
    assert_eq!(ctx["current_category"], "shoes");

    let related = ctx["related_products"].as_array().unwrap();
    assert_eq!(related.len(), 4);
    assert!(related.iter().all(|p| p["slug"] != "red-runner"));
    assert!(related.iter().all(|p| p["category"]["slug"] == "shoes"));
    assert_eq!(
        names(&ctx["related_products"]),
        ["Crimson Trail", "Budget Red", "Blue Runner", "Green Hiker"]
    );
}

#[tokio::test]
async fn unknown_slugs_are_not_found() {
    let server = TestServer::json().await;
    let client = reqwest::Client::new();

    for path in ["/catalog/boots/", "/catalog/Not%20A%20Slug/", "/product/nope/"] {
        for partial in [false, true] {
            let mut req = client.get(server.url(path));
            if partial {
                req = req.header("HX-Request", "true");
            }
            let res = req.send().await.unwrap();
            assert_eq!(res.status(), StatusCode::NOT_FOUND, "{path} partial={partial}");
            let body: Value = res.json().await.unwrap();
            assert_eq!(body["error"], "not_found");
            assert!(body.get("template").is_none(), "{path} partial={partial}");
        }
    }
}

#[tokio::test]
async fn mixed_case_category_slugs_resolve_exactly() {
    let store = fixture_store();
    let sale = Category::new("Summer Sale", slug("Summer-Sale"));
    store.upsert_category(sale.clone());
    store.upsert_product(Product::new("Linen Cap", slug("Linen-Cap"), sale, Price::from_cents(1500)));
    let server = TestServer::spawn(Arc::new(store), Arc::new(JsonRenderer)).await;
    let client = reqwest::Client::new();

    let body: Value = client
        .get(server.url("/catalog/Summer-Sale/"))
        .header("HX-Request", "true")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["context"]["current_category"], "Summer-Sale");
    assert_eq!(names(&body["context"]["products"]), ["Linen Cap"]);

    let res = client.get(server.url("/catalog/summer-sale/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_price_is_a_bad_request() {
    let server = TestServer::json().await;
    let res = reqwest::Client::new()
        .get(server.url("/catalog/?min_price=cheap"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_filter");
}

#[tokio::test]
async fn search_reset_ignores_filters_it_never_evaluates() {
    let server = TestServer::json().await;
    let res = reqwest::Client::new()
        .get(server.url("/catalog/?reset_search=true&min_price=abc"))
        .header("HX-Request", "true")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["template"], "main/search_button.html");
    assert_eq!(body["context"], json!({}));
}

#[tokio::test]
async fn responses_vary_on_the_refresh_header() {
    let server = TestServer::json().await;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.get(server.url("/catalog/")).send().await.unwrap();
    let vary = res.headers().get("vary").unwrap().to_str().unwrap();
    assert!(vary.eq_ignore_ascii_case("hx-request"), "{vary}");
}

#[tokio::test]
async fn html_renderer_serves_markup() {
    let server = TestServer::spawn(Arc::new(fixture_store()), Arc::new(HtmlRenderer)).await;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/catalog/shoes/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("content-type").unwrap(),
        "text/html; charset=utf-8"
    );
    let html = res.text().await.unwrap();
    assert!(html.contains("Crimson Trail"));
    assert!(!html.contains("Red Beret"));
}

struct DownStore;

#[async_trait]
impl CatalogStore for DownStore {
    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn sizes(&self) -> Result<Vec<Size>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn category_by_slug(&self, _slug: &Slug) -> Result<Option<Category>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn product_by_slug(&self, _slug: &Slug) -> Result<Option<Product>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn products(&self, _query: &ProductQuery) -> Result<Vec<Product>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

#[tokio::test]
async fn store_failures_are_server_errors() {
    let server = TestServer::spawn(Arc::new(DownStore), Arc::new(JsonRenderer)).await;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/catalog/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "store_error");

    // A discarded context never reaches the store.
    let res = client
        .get(server.url("/catalog/?reset_search=true"))
        .header("HX-Request", "true")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
