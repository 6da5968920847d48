//! Client side of the catalog: the HTTP API binding, the list controller
//! with its derived search/pagination view, and the editor and detail flows.

pub mod api;
pub mod confirm;
pub mod controller;
pub mod details;
pub mod editor;
pub mod memory;
pub mod notify;
pub mod view;

pub use api::{ApiError, CatalogApi, HttpCatalogApi};
pub use confirm::{Confirmation, Confirmer, FixedAnswer, DELETE_PROMPT};
pub use controller::{CatalogController, DeleteOutcome};
pub use details::ProductDetails;
pub use editor::{EditorMode, FormField, ProductEditor, ProductForm};
pub use memory::InMemoryCatalogApi;
pub use notify::{Notification, NotificationLevel, Notifications};
pub use view::{derive_page, PageView, PAGE_SIZE};
