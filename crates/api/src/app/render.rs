//! Turning a template + page context into a response body.

use axum::{
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use storefront_catalog::{Category, Product, Slug};

use crate::app::dto::{CatalogContext, HomeContext, PageContext, ProductDetailContext};
use crate::app::selector::Template;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template {template} cannot render this context")]
    ContextMismatch { template: Template },

    #[error("failed to serialize context: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A finished document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub content_type: &'static str,
    pub body: String,
}

impl Rendered {
    fn html(body: String) -> Self {
        Self {
            content_type: "text/html; charset=utf-8",
            body,
        }
    }
}

impl IntoResponse for Rendered {
    fn into_response(self) -> Response {
        ([(CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

pub trait Renderer: Send + Sync {
    fn render(&self, template: Template, context: &PageContext) -> Result<Rendered, RenderError>;
}

/// Emits `{"template": ..., "context": ...}` instead of markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, template: Template, context: &PageContext) -> Result<Rendered, RenderError> {
        let body = serde_json::to_string(&serde_json::json!({
            "template": template.name(),
            "context": context,
        }))?;
        Ok(Rendered {
            content_type: "application/json",
            body,
        })
    }
}

/// Server-side HTML for htmx clients.
///
/// Fragments swap into `#content`; the full layout wraps the view's default
/// fragment with the category navigation.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, template: Template, context: &PageContext) -> Result<Rendered, RenderError> {
        let body = match (template, context) {
            (Template::Base, ctx) => layout(ctx),
            (Template::HomeContent, PageContext::Home(c)) => home_content(c),
            (Template::Catalog, PageContext::Catalog(c)) => catalog_list(c),
            (Template::FilterModal, PageContext::Catalog(c)) => filter_modal(c),
            (Template::SearchInput, PageContext::Catalog(c)) => search_input(c),
            (Template::SearchButton, _) => search_button(),
            (Template::ProductDetail, PageContext::ProductDetail(c)) => product_detail(c),
            (template, _) => return Err(RenderError::ContextMismatch { template }),
        };
        Ok(Rendered::html(body))
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

fn catalog_url(category: Option<&Slug>) -> String {
    match category {
        Some(slug) => format!("/catalog/{slug}/"),
        None => "/catalog/".to_string(),
    }
}

fn nav(categories: &[Category], current: Option<&Slug>) -> String {
    let mut out = String::from("<nav><ul>");
    out.push_str(r##"<li><a href="/" hx-get="/" hx-target="#content" hx-push-url="true">Home</a></li>"##);
    for c in categories {
        let url = catalog_url(Some(&c.slug));
        let marker = if current == Some(&c.slug) {
            r#" aria-current="page""#
        } else {
            ""
        };
        out.push_str(&format!(
            r##"<li><a href="{url}" hx-get="{url}" hx-target="#content" hx-push-url="true"{marker}>{}</a></li>"##,
            escape(&c.name)
        ));
    }
    out.push_str("</ul></nav>");
    out
}

fn layout(ctx: &PageContext) -> String {
    let content = match ctx {
        PageContext::Empty {} => String::new(),
        PageContext::Home(c) => home_content(c),
        PageContext::Catalog(c) => {
            let search = if c.show_search {
                search_input(c)
            } else {
                search_button()
            };
            format!("{search}{}", catalog_list(c))
        }
        PageContext::ProductDetail(c) => product_detail(c),
    };
    format!(
        concat!(
            "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">",
            "<title>Storefront</title>",
            "<script src=\"https://unpkg.com/htmx.org@1.9.12\"></script>",
            "</head><body>{nav}<main id=\"content\">{content}</main></body></html>"
        ),
        nav = nav(ctx.categories(), ctx.current_category()),
        content = content,
    )
}

fn home_content(ctx: &HomeContext) -> String {
    let mut out = String::from(r#"<section class="home"><h1>Shop by category</h1><ul>"#);
    for c in &ctx.categories {
        let url = catalog_url(Some(&c.slug));
        out.push_str(&format!(
            r##"<li><a href="{url}" hx-get="{url}" hx-target="#content" hx-push-url="true">{}</a></li>"##,
            escape(&c.name)
        ));
    }
    out.push_str("</ul></section>");
    out
}

fn product_card(p: &Product) -> String {
    let url = format!("/product/{}/", p.slug);
    format!(
        r##"<article class="product"><a href="{url}" hx-get="{url}" hx-target="#content" hx-push-url="true"><h2>{}</h2></a><p class="price">{}</p><p class="color">{}</p></article>"##,
        escape(&p.name),
        p.price,
        escape(&p.color),
    )
}

fn catalog_list(ctx: &CatalogContext) -> String {
    let url = catalog_url(ctx.current_category.as_ref());
    let mut out = format!(
        r##"<section class="catalog"><button hx-get="{url}?show_filters=true" hx-target="#modal">Filters</button><div id="modal"></div>"##
    );
    if ctx.products.is_empty() {
        out.push_str(r#"<p class="empty">No products match.</p>"#);
    }
    for p in &ctx.products {
        out.push_str(&product_card(p));
    }
    out.push_str("</section>");
    out
}

fn filter_modal(ctx: &CatalogContext) -> String {
    let url = catalog_url(ctx.current_category.as_ref());
    let fp = &ctx.filter_params;
    let value = |v: &crate::app::dto::ParamValue| escape(v.as_value().unwrap_or_default());

    let mut sizes = String::from(r#"<option value="">Any size</option>"#);
    for s in &ctx.sizes {
        let selected = if fp.size.as_value() == Some(s.name.as_str()) {
            " selected"
        } else {
            ""
        };
        sizes.push_str(&format!(
            r#"<option value="{0}"{selected}>{0}</option>"#,
            escape(&s.name)
        ));
    }

    format!(
        concat!(
            r##"<dialog class="filters" open><form hx-get="{url}" hx-target="#content">"##,
            r#"<input type="hidden" name="q" value="{q}">"#,
            r#"<label>Color <input name="color" value="{color}"></label>"#,
            r#"<label>Min price <input name="min_price" inputmode="decimal" value="{min}"></label>"#,
            r#"<label>Max price <input name="max_price" inputmode="decimal" value="{max}"></label>"#,
            r#"<label>Size <select name="size">{sizes}</select></label>"#,
            r#"<button type="submit">Apply</button></form></dialog>"#
        ),
        url = url,
        q = value(&fp.q),
        color = value(&fp.color),
        min = value(&fp.min_price),
        max = value(&fp.max_price),
        sizes = sizes,
    )
}

fn search_input(ctx: &CatalogContext) -> String {
    let url = catalog_url(ctx.current_category.as_ref());
    format!(
        concat!(
            r##"<form class="search" hx-get="{url}" hx-target="#content">"##,
            r#"<input type="search" name="q" value="{q}" autofocus>"#,
            r##"<button type="button" hx-get="{url}?reset_search=true" hx-target="closest form" hx-swap="outerHTML">Cancel</button>"##,
            "</form>"
        ),
        url = url,
        q = escape(ctx.search_query.as_value().unwrap_or_default()),
    )
}

fn search_button() -> String {
    r#"<button class="search" hx-get="/catalog/?show_search=true" hx-swap="outerHTML">Search</button>"#
        .to_string()
}

fn product_detail(ctx: &ProductDetailContext) -> String {
    let p = &ctx.product;
    let sizes = p
        .sizes
        .iter()
        .map(|s| format!("<li>{}</li>", escape(&s.name)))
        .collect::<String>();
    let related = ctx.related_products.iter().map(product_card).collect::<String>();
    format!(
        concat!(
            r#"<section class="product-detail"><h1>{name}</h1>"#,
            r#"<p class="category">{category}</p><p class="price">{price}</p>"#,
            r#"<p class="color">{color}</p><p>{description}</p><ul class="sizes">{sizes}</ul>"#,
            r#"</section><section class="related"><h2>You may also like</h2>{related}</section>"#
        ),
        name = escape(&p.name),
        category = escape(&p.category.name),
        price = p.price,
        color = escape(&p.color),
        description = escape(&p.description),
        sizes = sizes,
        related = related,
    )
}
