//! Catalog list controller.
//!
//! Holds the last fetched snapshot plus the search term and current page, and
//! derives the visible page on demand. The controller is driven through
//! `&mut self`, so only the completion of a load or a delete rewrites the
//! snapshot and two loads can never interleave. Any change to the snapshot or
//! the search term puts the view back on page 1.

use gamedeck_core::{Product, ProductId};
use tracing::{debug, info};

use crate::api::{ApiError, CatalogApi};
use crate::confirm::{Confirmation, Confirmer, DELETE_PROMPT};
use crate::notify::{Notification, Notifications};
use crate::view::{self, PageView};

pub const LOAD_FAILED: &str = "Failed to load products.";
pub const DELETE_SUCCEEDED: &str = "Product deleted successfully!";
pub const DELETE_FAILED: &str = "Failed to delete product.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Declined or cancelled at the prompt; no request was sent.
    NotConfirmed(Confirmation),
    Failed(ApiError),
}

pub struct CatalogController<A> {
    api: A,
    snapshot: Vec<Product>,
    search: String,
    page: usize,
    loading: bool,
    notifications: Notifications,
}

impl<A: CatalogApi> CatalogController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            snapshot: Vec::new(),
            search: String::new(),
            page: 1,
            loading: false,
            notifications: Notifications::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn snapshot(&self) -> &[Product] {
        &self.snapshot
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn view(&self) -> PageView {
        view::derive_page(&self.snapshot, &self.search, self.page)
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    /// Replace the snapshot with a fresh list and return to page one.
    /// On failure the previous snapshot stays in place.
    pub async fn refresh(&mut self) -> Result<usize, ApiError> {
        self.loading = true;
        let result = self.api.list().await;
        self.loading = false;

        match result {
            Ok(products) => {
                debug!(
                    event_name = "catalog.controller.loaded",
                    count = products.len(),
                    "catalog snapshot replaced"
                );
                self.snapshot = products;
                self.page = 1;
                Ok(self.snapshot.len())
            }
            Err(error) => {
                self.notifications.push(Notification::error(LOAD_FAILED));
                Err(error)
            }
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.page = view::clamp_page(page, self.total_pages());
        self.page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> usize {
        self.go_to_page(self.page.saturating_sub(1))
    }

    /// Ask first, then delete. The record leaves the snapshot only after the
    /// store acknowledged the delete, and the view returns to page 1.
    pub async fn delete_with_confirmation(
        &mut self,
        id: ProductId,
        confirmer: &dyn Confirmer,
    ) -> DeleteOutcome {
        let answer = confirmer.confirm(DELETE_PROMPT).await;
        if !answer.is_confirmed() {
            debug!(event_name = "catalog.controller.delete_skipped", product_id = %id, ?answer);
            return DeleteOutcome::NotConfirmed(answer);
        }

        match self.api.delete(id).await {
            Ok(()) => {
                self.snapshot.retain(|product| product.id != id);
                self.page = 1;
                info!(
                    event_name = "catalog.controller.deleted",
                    product_id = %id,
                    "product removed"
                );
                self.notifications.push(Notification::success(DELETE_SUCCEEDED));
                DeleteOutcome::Deleted
            }
            Err(error) => {
                self.notifications.push(Notification::error(DELETE_FAILED));
                DeleteOutcome::Failed(error)
            }
        }
    }

    fn total_pages(&self) -> usize {
        view::page_count(view::filter(&self.snapshot, &self.search).len())
    }
}
