//! The catalog state manager.

use chrono::{DateTime, Utc};

use stockdeck_catalog::{
    Filters, Page, Product, ProductDraft, ProductId, ProductPatch, QueryCriteria, apply,
    page_window, paginate,
};
use stockdeck_store::ProductStore;

use crate::error::{MutationOp, SessionError};

/// Page size used when the embedding shell does not pick one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Owns the catalog mirror, the query criteria and the derived view.
///
/// Every mutation of the catalog, the search term or the filter set
/// synchronously recomputes the filtered sequence and resets the current
/// page to 1; changing only the page never touches the filtered
/// sequence. All mutating methods take `&mut self` and await their
/// round-trip before returning, so no two mutations can interleave.
pub struct CatalogSession<S> {
    store: S,
    catalog: Vec<Product>,
    criteria: QueryCriteria,
    filtered: Vec<Product>,
    page_size: usize,
    current_page: usize,
    loading: bool,
    last_loaded: Option<DateTime<Utc>>,
    error: Option<SessionError>,
}

impl<S> CatalogSession<S> {
    pub fn new(store: S) -> Self {
        Self::with_page_size(store, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(store: S, page_size: usize) -> Self {
        Self {
            store,
            catalog: Vec::new(),
            criteria: QueryCriteria::default(),
            filtered: Vec::new(),
            page_size: page_size.max(1),
            current_page: 1,
            loading: false,
            last_loaded: None,
            error: None,
        }
    }

    /// The full mirrored catalog, in server order.
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// The filtered sequence the current page slices into.
    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    /// Products on the current page.
    pub fn page_products(&self) -> &[Product] {
        self.page().slice(&self.filtered)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.page().total_pages
    }

    /// Page numbers for the navigation buttons (at most five).
    pub fn page_numbers(&self) -> Vec<usize> {
        page_window(self.current_page, self.total_pages())
    }

    pub fn criteria(&self) -> &QueryCriteria {
        &self.criteria
    }

    /// True only while the initial `load` round-trip is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// When the catalog was last replaced from the store.
    pub fn last_loaded(&self) -> Option<DateTime<Utc>> {
        self.last_loaded
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Update the search term and recompute the view.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.search = term.into();
        self.refresh_view();
    }

    /// Replace the filter set and recompute the view.
    pub fn set_filters(&mut self, filters: Filters) {
        self.criteria.filters = filters;
        self.refresh_view();
    }

    /// Jump to a page; out-of-range requests clamp. Never alters the
    /// filtered sequence.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = paginate(self.filtered.len(), self.page_size, page).effective_page;
    }

    /// Advance a page; a no-op on the last page.
    pub fn next_page(&mut self) {
        self.set_page(self.current_page + 1);
    }

    /// Go back a page; a no-op on the first page.
    pub fn prev_page(&mut self) {
        self.set_page(self.current_page.saturating_sub(1));
    }

    fn page(&self) -> Page {
        paginate(self.filtered.len(), self.page_size, self.current_page)
    }

    /// Recompute the derived view. Invoked synchronously after every
    /// mutation of catalog, search term or filters.
    fn refresh_view(&mut self) {
        self.filtered = apply(&self.catalog, &self.criteria);
        self.current_page = 1;
    }
}

impl<S: ProductStore> CatalogSession<S> {
    /// Populate the catalog from the store.
    ///
    /// On success the catalog is replaced wholesale (deduplicated by id,
    /// first occurrence wins) and any sticky error clears. On failure the
    /// catalog stays empty and a blocking load error is set. Retrying is
    /// just calling `load` again.
    pub async fn load(&mut self) -> Result<(), SessionError> {
        self.loading = true;
        let result = self.store.list().await;
        self.loading = false;

        match result {
            Ok(products) => {
                self.catalog = dedup_by_id(products);
                self.last_loaded = Some(Utc::now());
                self.error = None;
                self.refresh_view();
                tracing::debug!(count = self.catalog.len(), "catalog loaded");
                Ok(())
            }
            Err(err) => {
                self.catalog.clear();
                self.refresh_view();
                tracing::error!(%err, "catalog load failed");
                Err(self.set_error(SessionError::Load(err.to_string())))
            }
        }
    }

    /// Create a product. Only the server-returned canonical record is
    /// prepended; on failure the catalog is untouched and the caller's
    /// draft/input state stays valid.
    pub async fn create(&mut self, draft: &ProductDraft) -> Result<(), SessionError> {
        match self.store.create(draft).await {
            Ok(product) => {
                // Front-insert locally; the server stays authoritative
                // for id and normalization.
                self.catalog.retain(|p| p.id != product.id);
                self.catalog.insert(0, product);
                self.error = None;
                self.refresh_view();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "product create failed");
                Err(self.set_error(SessionError::Mutation {
                    op: MutationOp::Create,
                    message: err.to_string(),
                }))
            }
        }
    }

    /// Update a product; the matching entry is replaced with the
    /// server-returned canonical record. On failure the entry is left
    /// untouched, so an in-progress edit draft survives.
    pub async fn update(&mut self, id: &ProductId, patch: &ProductPatch) -> Result<(), SessionError> {
        match self.store.update(id, patch).await {
            Ok(product) => {
                if let Some(slot) = self.catalog.iter_mut().find(|p| p.id == *id) {
                    *slot = product;
                }
                self.error = None;
                self.refresh_view();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%id, %err, "product update failed");
                Err(self.set_error(SessionError::Mutation {
                    op: MutationOp::Update,
                    message: err.to_string(),
                }))
            }
        }
    }

    /// Delete a product. Removal is local only after the store confirms.
    /// Any confirmation prompt is the embedding shell's concern; once
    /// invoked, deletion is unconditional.
    pub async fn delete(&mut self, id: &ProductId) -> Result<(), SessionError> {
        match self.store.delete(id).await {
            Ok(()) => {
                self.catalog.retain(|p| p.id != *id);
                self.error = None;
                self.refresh_view();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%id, %err, "product delete failed");
                Err(self.set_error(SessionError::Mutation {
                    op: MutationOp::Delete,
                    message: err.to_string(),
                }))
            }
        }
    }

    fn set_error(&mut self, err: SessionError) -> SessionError {
        self.error = Some(err.clone());
        err
    }
}

/// Drop later duplicates so no two entries share an id.
fn dedup_by_id(products: Vec<Product>) -> Vec<Product> {
    let mut seen: Vec<ProductId> = Vec::with_capacity(products.len());
    let mut out = Vec::with_capacity(products.len());
    for product in products {
        if seen.contains(&product.id) {
            tracing::warn!(id = %product.id, "duplicate id in store response, keeping first");
            continue;
        }
        seen.push(product.id.clone());
        out.push(product);
    }
    out
}
