use gamedeck_core::{Product, ProductDraft, ProductId};
use serde::Serialize;
use tracing::info;

use crate::api::{ApiError, CatalogApi};
use crate::notify::{Notification, Notifications};

pub const FETCH_FAILED: &str = "Failed to fetch product.";
pub const CREATE_SUCCEEDED: &str = "Product created successfully!";
pub const UPDATE_SUCCEEDED: &str = "Product updated successfully!";
pub const SAVE_FAILED: &str = "Failed to save product.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(ProductId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Name,
    Detail,
    CoverImage,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProductForm {
    pub name: String,
    pub detail: String,
    pub coverimage: String,
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone().unwrap_or_default(),
            detail: product.detail.clone().unwrap_or_default(),
            coverimage: product.coverimage.clone().unwrap_or_default(),
        }
    }
}

impl ProductForm {
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft::new(self.name.clone(), self.detail.clone(), self.coverimage.clone())
    }
}

/// Create/edit form. Submitting always sends all three fields.
#[derive(Debug)]
pub struct ProductEditor {
    mode: EditorMode,
    form: ProductForm,
    saving: bool,
    load_error: Option<ApiError>,
    notifications: Notifications,
}

impl ProductEditor {
    pub fn for_create() -> Self {
        Self {
            mode: EditorMode::Create,
            form: ProductForm::default(),
            saving: false,
            load_error: None,
            notifications: Notifications::default(),
        }
    }

    /// Open an existing record. If the fetch fails the form stays empty, an
    /// error notice is queued and the error is kept for `load_error`.
    pub async fn load<A: CatalogApi + ?Sized>(api: &A, id: ProductId) -> Self {
        let mut editor = Self { mode: EditorMode::Edit(id), ..Self::for_create() };
        match api.get(id).await {
            Ok(product) => editor.form = ProductForm::from(&product),
            Err(error) => {
                editor.notifications.push(Notification::error(FETCH_FAILED));
                editor.load_error = Some(error);
            }
        }
        editor
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn load_error(&self) -> Option<&ApiError> {
        self.load_error.as_ref()
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.form.name = value,
            FormField::Detail => self.form.detail = value,
            FormField::CoverImage => self.form.coverimage = value,
        }
    }

    pub async fn submit<A: CatalogApi + ?Sized>(&mut self, api: &A) -> Result<Product, ApiError> {
        self.saving = true;
        let draft = self.form.to_draft();
        let result = match self.mode {
            EditorMode::Create => api.create(&draft).await,
            EditorMode::Edit(id) => api.update(id, &draft).await,
        };
        self.saving = false;

        match result {
            Ok(product) => {
                let message = match self.mode {
                    EditorMode::Create => CREATE_SUCCEEDED,
                    EditorMode::Edit(_) => UPDATE_SUCCEEDED,
                };
                info!(
                    event_name = "catalog.editor.saved",
                    product_id = %product.id,
                    "product saved"
                );
                self.notifications.push(Notification::success(message));
                Ok(product)
            }
            Err(error) => {
                self.notifications.push(Notification::error(SAVE_FAILED));
                Err(error)
            }
        }
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }
}
