//! Choose between the full layout and one of the fragments.

use crate::app::dto::CatalogParams;
use crate::context::RequestOrigin;

/// Every document the storefront can answer with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Template {
    Base,
    HomeContent,
    Catalog,
    FilterModal,
    SearchInput,
    SearchButton,
    ProductDetail,
}

impl Template {
    pub fn name(self) -> &'static str {
        match self {
            Template::Base => "main/base.html",
            Template::HomeContent => "main/home_content.html",
            Template::Catalog => "main/catalog.html",
            Template::FilterModal => "main/filter_modal.html",
            Template::SearchInput => "main/search_input.html",
            Template::SearchButton => "main/search_button.html",
            Template::ProductDetail => "main/product_detail.html",
        }
    }
}

impl core::fmt::Display for Template {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ViewKind {
    Index,
    Catalog,
    ProductDetail,
}

impl ViewKind {
    /// Fragment answered to a partial refresh when no flag applies.
    pub fn default_fragment(self) -> Template {
        match self {
            ViewKind::Index => Template::HomeContent,
            ViewKind::Catalog => Template::Catalog,
            ViewKind::ProductDetail => Template::ProductDetail,
        }
    }
}

/// Display toggles sent by the catalog page. Each is on only for the literal
/// value `"true"`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DisplayFlags {
    pub show_search: bool,
    pub reset_search: bool,
    pub show_filters: bool,
}

impl DisplayFlags {
    pub fn from_params(params: &CatalogParams) -> Self {
        let on = |v: &Option<String>| v.as_deref() == Some("true");
        Self {
            show_search: on(&params.show_search),
            reset_search: on(&params.reset_search),
            show_filters: on(&params.show_filters),
        }
    }
}

/// What happens to the computed context.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContextPolicy {
    Keep,
    /// Render with an empty context; the view need not build one.
    Discard,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Selection {
    pub template: Template,
    pub context: ContextPolicy,
}

impl Selection {
    fn keep(template: Template) -> Self {
        Self {
            template,
            context: ContextPolicy::Keep,
        }
    }
}

/// Exactly one branch fires, checked in this order:
/// full page, `show_search`, `reset_search`, `show_filters`, default fragment.
pub fn select(origin: RequestOrigin, view: ViewKind, flags: DisplayFlags) -> Selection {
    if !origin.is_partial() {
        return Selection::keep(Template::Base);
    }
    if flags.show_search {
        return Selection::keep(Template::SearchInput);
    }
    if flags.reset_search {
        return Selection {
            template: Template::SearchButton,
            context: ContextPolicy::Discard,
        };
    }
    if flags.show_filters {
        return Selection::keep(Template::FilterModal);
    }
    Selection::keep(view.default_fragment())
}
