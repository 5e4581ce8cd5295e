//! Catalog controller: owns the selection state and re-derives the visible
//! slice after every event.
//!
//! Every mutator runs the full filter → sort → paginate pipeline, republishes
//! the canonical query string and notifies listeners. Filter changes return
//! to page 1; sort, page and language changes keep the current page (clamped
//! into the new page range).

use crate::catalog::{
    CatalogStore, Category, Language, NameResolver, Product, Suggestions, MAX_RELATED,
    MAX_SUGGESTIONS,
};
use crate::config::Config;
use crate::filters::{self, FilterState, RatingTier};
use crate::pagination::{self, PageItem, Paginator};
use crate::query::{self, QueryState};
use crate::sort::{self, SortKey};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

/// Render data published after every recompute.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    /// Products on the current page
    pub visible_products: Vec<Arc<Product>>,
    /// Number of products matching the filters
    pub total_count: usize,
    pub current_page: usize,
    /// Zero when nothing matches
    pub total_pages: usize,
    pub page_window: Vec<PageItem>,
    /// Canonical query string for the current selection
    pub query: String,
    pub language: Language,
    pub sort: SortKey,
}

impl CatalogView {
    /// Returns true when no product matches the current filters.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

/// Address-bar collaborator that receives the canonical query string.
pub trait QueryHistory {
    /// Returns the query of the current entry, if there is one.
    fn current(&self) -> Option<String>;

    /// Replaces the current history entry without adding a new one.
    fn replace(&mut self, query: &str);
}

/// In-memory [`QueryHistory`]. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Rc<RefCell<Vec<String>>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with one entry, as a page opened from a bookmarked URL would.
    pub fn with_entry(query: impl Into<String>) -> Self {
        let history = Self::new();
        history.entries.borrow_mut().push(query.into());
        history
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl QueryHistory for MemoryHistory {
    fn current(&self) -> Option<String> {
        self.entries.borrow().last().cloned()
    }

    fn replace(&mut self, query: &str) {
        let mut entries = self.entries.borrow_mut();
        match entries.last_mut() {
            Some(last) => *last = query.to_string(),
            None => entries.push(query.to_string()),
        }
    }
}

/// Callback invoked with the new view after every recompute.
pub type StateListener = Box<dyn FnMut(&CatalogView)>;

/// Tunables for a catalog session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    pub page_size: usize,
    pub max_visible_pages: usize,
    /// Language consulted when a name is missing in the active one
    pub fallback_language: Language,
    /// Name used when no language in the chain has one
    pub placeholder_name: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            page_size: pagination::DEFAULT_PAGE_SIZE,
            max_visible_pages: pagination::DEFAULT_MAX_VISIBLE,
            fallback_language: Language::DEFAULT,
            placeholder_name: String::new(),
        }
    }
}

impl From<&Config> for CatalogSettings {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            max_visible_pages: config.max_visible_pages,
            fallback_language: config.fallback_language,
            placeholder_name: config.placeholder_name.clone(),
        }
    }
}

/// Sole owner of one catalog session's filter, sort and page state.
pub struct CatalogController {
    store: CatalogStore,
    settings: CatalogSettings,
    language: Language,
    filters: FilterState,
    sort: SortKey,
    current_page: usize,
    view: CatalogView,
    listeners: Vec<StateListener>,
    history: Option<Box<dyn QueryHistory>>,
}

impl CatalogController {
    /// Creates a controller over a loaded store with default selections.
    pub fn new(store: CatalogStore, settings: CatalogSettings, language: Language) -> Self {
        let mut controller = Self {
            store,
            settings,
            language,
            filters: FilterState::default(),
            sort: SortKey::Default,
            current_page: 1,
            view: CatalogView {
                visible_products: Vec::new(),
                total_count: 0,
                current_page: 1,
                total_pages: 0,
                page_window: Vec::new(),
                query: String::new(),
                language,
                sort: SortKey::Default,
            },
            listeners: Vec::new(),
            history: None,
        };
        controller.recompute();
        controller
    }

    /// Attaches the address-bar collaborator.
    ///
    /// A non-blank current entry seeds the selection first, so a bookmarked
    /// URL survives; the entry is then rewritten in canonical form.
    pub fn with_history(mut self, history: impl QueryHistory + 'static) -> Self {
        if let Some(query) = history.current().filter(|q| !q.trim().is_empty()) {
            debug!("Seeding selection from history entry {:?}", query);
            self.apply_query(&query);
        }

        let mut history = Box::new(history);
        history.replace(&self.view.query);
        self.history = Some(history);
        self
    }

    /// Registers a listener called after every recompute.
    pub fn on_state_change(&mut self, listener: impl FnMut(&CatalogView) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Seeds the selection from a query string, replacing the current one.
    pub fn apply_query(&mut self, query: &str) {
        let parsed = QueryState::parse(query);
        self.filters = query::deserialize(&parsed);
        self.sort = parsed.sort_key();
        self.filters_changed();
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.filters.set_category(category);
        self.filters_changed();
    }

    /// Selects or deselects a brand, ignoring case.
    pub fn toggle_brand(&mut self, brand: &str) {
        self.filters.toggle_brand(brand);
        self.filters_changed();
    }

    pub fn set_price_bounds(&mut self, min: Option<f64>, max: Option<f64>) {
        self.filters.set_price_bounds(min, max);
        self.filters_changed();
    }

    pub fn toggle_rating_tier(&mut self, tier: RatingTier) {
        self.filters.toggle_rating_tier(tier);
        self.filters_changed();
    }

    pub fn set_in_stock_only(&mut self, enabled: bool) {
        self.filters.set_in_stock_only(enabled);
        self.filters_changed();
    }

    pub fn set_search_text(&mut self, text: &str) {
        self.filters.set_search_text(text);
        self.filters_changed();
    }

    /// Returns filters and sort to their defaults.
    pub fn reset_filters(&mut self) {
        self.filters.reset();
        self.sort = SortKey::Default;
        self.filters_changed();
    }

    /// Changes the ordering without leaving the current page.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.recompute();
    }

    /// Navigates to a 1-indexed page.
    ///
    /// Returns false and changes nothing when the page is out of range.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let last = self.view.total_pages.max(1);
        if page == 0 || page > last {
            debug!("Rejected navigation to page {} of {}", page, self.view.total_pages);
            return false;
        }

        self.current_page = page;
        self.recompute();
        true
    }

    /// Handles a language change. Selections are kept; name search and name
    /// ordering follow the new language.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.recompute();
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Returns the canonical query string for the current selection.
    pub fn query_string(&self) -> &str {
        &self.view.query
    }

    /// Returns live search suggestions in the active language. Selections are
    /// not consulted and nothing is published.
    pub fn suggest(&self, text: &str) -> Suggestions {
        self.store.suggest(text, &self.names(), MAX_SUGGESTIONS)
    }

    /// Returns up to [`MAX_RELATED`] products sharing the category of `id`.
    pub fn related(&self, id: &str) -> Vec<Arc<Product>> {
        self.store.related(id, MAX_RELATED)
    }

    fn names(&self) -> NameResolver {
        NameResolver::new(
            [self.language, self.settings.fallback_language],
            self.settings.placeholder_name.clone(),
        )
    }

    fn filters_changed(&mut self) {
        self.current_page = 1;
        self.recompute();
    }

    fn recompute(&mut self) {
        let names = self.names();
        let filtered = filters::apply(self.store.all(), &self.filters, &names);
        let results = sort::sort(&filtered, self.sort, &names);

        let paginator = Paginator::new(self.settings.page_size);
        let total_pages = paginator.total_pages(results.len());
        self.current_page = paginator.clamp_page(self.current_page, results.len());

        let visible_products =
            paginator.slice(&results, self.current_page).map(<[_]>::to_vec).unwrap_or_default();

        self.view = CatalogView {
            visible_products,
            total_count: results.len(),
            current_page: self.current_page,
            total_pages,
            page_window: pagination::page_window(
                self.current_page,
                total_pages,
                self.settings.max_visible_pages,
            ),
            query: query::serialize(&self.filters, self.sort).to_query_string(),
            language: self.language,
            sort: self.sort,
        };

        debug!(
            "Catalog view: {} matches, page {}/{}, query '{}'",
            self.view.total_count, self.view.current_page, self.view.total_pages, self.view.query
        );

        if let Some(history) = self.history.as_mut() {
            history.replace(&self.view.query);
        }
        for listener in self.listeners.iter_mut() {
            listener(&self.view);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PageItem::{Ellipsis, Page};

    fn make_store(count: usize) -> CatalogStore {
        let products = (0..count)
            .map(|i| {
                let category = if i % 2 == 0 { Category::Phones } else { Category::Laptops };
                Product::new(format!("p{:02}", i), category, "Brand", (count - i) as f64 * 10.0)
                    .with_name(Language::Uk, format!("Товар {:02}", i))
                    .with_name(Language::En, format!("Item {:02}", i))
                    .with_rating(3.0 + (i % 3) as f64, 1)
            })
            .collect();
        CatalogStore::with_products(products)
    }

    fn controller(count: usize) -> CatalogController {
        CatalogController::new(make_store(count), CatalogSettings::default(), Language::Uk)
    }

    #[test]
    fn test_initial_view() {
        let ctrl = controller(30);
        let view = ctrl.view();
        assert_eq!(view.total_count, 30);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.visible_products.len(), 12);
        assert_eq!(view.visible_products[0].id, "p00");
        assert_eq!(view.page_window, vec![Page(1), Page(2), Page(3)]);
        assert_eq!(view.query, "");
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut ctrl = controller(30);
        assert!(ctrl.go_to_page(3));
        ctrl.set_in_stock_only(true);
        assert_eq!(ctrl.current_page(), 1);
    }

    #[test]
    fn test_sort_change_keeps_page() {
        let mut ctrl = controller(30);
        assert!(ctrl.go_to_page(2));
        ctrl.set_sort(SortKey::PriceAscending);
        assert_eq!(ctrl.current_page(), 2);
        assert_eq!(ctrl.view().visible_products[0].id, "p17");
        assert_eq!(ctrl.query_string(), "sort=price-asc");
    }

    #[test]
    fn test_out_of_range_page_is_noop() {
        let mut ctrl = controller(30);
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        ctrl.on_state_change(move |_| *counter.borrow_mut() += 1);

        assert!(!ctrl.go_to_page(0));
        assert!(!ctrl.go_to_page(4));
        assert_eq!(ctrl.current_page(), 1);
        assert_eq!(*calls.borrow(), 0);

        assert!(ctrl.go_to_page(3));
        assert_eq!(ctrl.view().visible_products.len(), 6);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_empty_result_state() {
        let mut ctrl = controller(30);
        ctrl.set_search_text("no such product");

        let view = ctrl.view();
        assert!(view.is_empty());
        assert!(view.visible_products.is_empty());
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.current_page, 1);
        assert!(view.page_window.is_empty());
    }

    #[test]
    fn test_listener_receives_every_recompute() {
        let mut ctrl = controller(30);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        ctrl.on_state_change(move |view| sink.borrow_mut().push(view.total_count));

        ctrl.set_category(Some(Category::Phones));
        ctrl.set_sort(SortKey::NameDescending);
        ctrl.set_language(Language::En);

        assert_eq!(*seen.borrow(), vec![15, 15, 15]);
    }

    #[test]
    fn test_history_replaced_not_pushed() {
        let history = MemoryHistory::with_entry("category=phones");
        let mut ctrl = controller(30).with_history(history.clone());
        assert_eq!(history.current().as_deref(), Some("category=phones"));

        ctrl.set_category(Some(Category::Laptops));
        ctrl.toggle_brand("Brand");
        ctrl.set_sort(SortKey::RatingDescending);

        assert_eq!(history.len(), 1);
        assert_eq!(
            history.current().as_deref(),
            Some("category=laptops&brands=brand&sort=rating")
        );
    }

    #[test]
    fn test_history_entry_seeds_selection() {
        let history = MemoryHistory::with_entry("?category=smartphones&sort=price-asc&page=3");
        let ctrl = controller(30).with_history(history.clone());

        assert_eq!(ctrl.filters().category, Some(Category::Phones));
        assert_eq!(ctrl.sort(), SortKey::PriceAscending);
        assert_eq!(ctrl.current_page(), 1);
        assert_eq!(ctrl.view().total_count, 15);
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().as_deref(), Some("category=phones&sort=price-asc"));
    }

    #[test]
    fn test_blank_history_entry_keeps_selection() {
        let mut ctrl = controller(30);
        ctrl.set_in_stock_only(true);
        let history = MemoryHistory::with_entry("  ");
        let ctrl = ctrl.with_history(history.clone());

        assert!(ctrl.filters().in_stock_only);
        assert_eq!(history.current().as_deref(), Some("inStock=1"));

        let empty = MemoryHistory::new();
        let _ctrl = controller(30).with_history(empty.clone());
        assert_eq!(empty.current().as_deref(), Some(""));
    }

    #[test]
    fn test_suggest_uses_active_language() {
        let mut ctrl = controller(30);
        assert!(ctrl.suggest("item").products.is_empty());

        ctrl.set_category(Some(Category::Laptops));
        ctrl.set_language(Language::En);
        let suggestions = ctrl.suggest("item");
        assert_eq!(suggestions.products.len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions.products[0].id, "p00");
        assert!(suggestions.has_more);
    }

    #[test]
    fn test_related_products() {
        let ctrl = controller(30);
        let related = ctrl.related("p02");
        let ids: Vec<&str> = related.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p00", "p04", "p06", "p08"]);
    }

    #[test]
    fn test_apply_query_seeds_state() {
        let mut ctrl = controller(30);
        ctrl.go_to_page(2);
        ctrl.apply_query("?category=smartphones&sort=price-desc&page=2&bogus=1");

        assert_eq!(ctrl.filters().category, Some(Category::Phones));
        assert_eq!(ctrl.sort(), SortKey::PriceDescending);
        assert_eq!(ctrl.current_page(), 1);
        assert_eq!(ctrl.view().total_count, 15);
        assert_eq!(ctrl.query_string(), "category=phones&sort=price-desc");
    }

    #[test]
    fn test_apply_query_replaces_previous_selection() {
        let mut ctrl = controller(30);
        ctrl.set_in_stock_only(true);
        ctrl.apply_query("search=item");
        assert!(!ctrl.filters().in_stock_only);
        assert_eq!(ctrl.filters().search_text, "item");
    }

    #[test]
    fn test_reset_filters_restores_defaults() {
        let mut ctrl = controller(30);
        ctrl.set_category(Some(Category::Phones));
        ctrl.toggle_rating_tier(RatingTier::Five);
        ctrl.set_sort(SortKey::NameAscending);
        ctrl.reset_filters();

        assert!(ctrl.filters().is_default());
        assert_eq!(ctrl.sort(), SortKey::Default);
        assert_eq!(ctrl.view().total_count, 30);
        assert_eq!(ctrl.query_string(), "");
    }

    #[test]
    fn test_language_change_refilters_search() {
        let mut ctrl = controller(30);
        ctrl.set_search_text("item");
        assert_eq!(ctrl.view().total_count, 0);

        ctrl.set_language(Language::En);
        assert_eq!(ctrl.view().total_count, 30);
        assert_eq!(ctrl.filters().search_text, "item");
        assert_eq!(ctrl.view().language, Language::En);
    }

    #[test]
    fn test_language_change_clamps_page() {
        let mut ctrl = controller(30);
        ctrl.set_language(Language::En);
        ctrl.set_search_text("item");
        assert!(ctrl.go_to_page(3));

        ctrl.set_language(Language::Uk);
        assert_eq!(ctrl.current_page(), 1);
        assert_eq!(ctrl.view().total_pages, 0);
    }

    #[test]
    fn test_page_window_for_many_pages() {
        let mut ctrl = controller(120);
        assert!(ctrl.go_to_page(5));
        assert_eq!(
            ctrl.view().page_window,
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6), Page(7), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_custom_page_size() {
        let settings = CatalogSettings { page_size: 5, ..CatalogSettings::default() };
        let ctrl = CatalogController::new(make_store(12), settings, Language::Uk);
        assert_eq!(ctrl.view().total_pages, 3);
        assert_eq!(ctrl.view().visible_products.len(), 5);
    }

    #[test]
    fn test_memory_history_replace_on_empty() {
        let mut history = MemoryHistory::new();
        assert!(history.is_empty());
        history.replace("sort=rating");
        history.replace("sort=name-asc");
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().as_deref(), Some("sort=name-asc"));
    }
}
