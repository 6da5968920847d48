//! Catalog commands. Each one drives the same controller and editor flows an
//! interactive front end would, against the configured HTTP API.

use std::future::Future;
use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use gamedeck_client::{
    ApiError, CatalogApi, CatalogController, Confirmation, Confirmer, DeleteOutcome, FixedAnswer,
    FormField, HttpCatalogApi, Notification, ProductDetails, ProductEditor,
};
use gamedeck_core::ProductId;
use serde_json::json;

use crate::commands::{build_runtime, load_config, CommandResult};

/// Field values from the command line. `None` leaves the form value as loaded.
#[derive(Clone, Debug, Default)]
pub struct FieldEdits {
    pub name: Option<String>,
    pub detail: Option<String>,
    pub coverimage: Option<String>,
}

impl FieldEdits {
    fn apply(self, editor: &mut ProductEditor) {
        let fields = [
            (FormField::Name, self.name),
            (FormField::Detail, self.detail),
            (FormField::CoverImage, self.coverimage),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                editor.set_field(field, value);
            }
        }
    }
}

/// Reads a yes/no answer from stdin; the prompt goes to stderr so stdout stays JSON.
pub struct StdinConfirmer;

#[async_trait]
impl Confirmer for StdinConfirmer {
    async fn confirm(&self, prompt: &str) -> Confirmation {
        let prompt = prompt.to_string();
        tokio::task::spawn_blocking(move || {
            eprint!("{prompt} [y/N] ");
            let _ = io::stderr().flush();
            let mut answer = String::new();
            match io::stdin().lock().read_line(&mut answer) {
                Ok(0) | Err(_) => Confirmation::Cancelled,
                Ok(_) => parse_answer(&answer),
            }
        })
        .await
        .unwrap_or(Confirmation::Cancelled)
    }
}

fn parse_answer(answer: &str) -> Confirmation {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Confirmation::Confirmed,
        _ => Confirmation::Declined,
    }
}

pub fn list(search: String, page: usize) -> CommandResult {
    with_http_api("list", |api| list_with(api, search, page))
}

pub fn show(id: ProductId) -> CommandResult {
    with_http_api("show", |api| async move { show_with(&api, id).await })
}

pub fn add(fields: FieldEdits) -> CommandResult {
    with_http_api("add", |api| async move { add_with(&api, fields).await })
}

pub fn edit(id: ProductId, fields: FieldEdits) -> CommandResult {
    with_http_api("edit", |api| async move { edit_with(&api, id, fields).await })
}

pub fn delete(id: ProductId, assume_yes: bool) -> CommandResult {
    with_http_api("delete", |api| async move {
        if assume_yes {
            delete_with(api, id, &FixedAnswer(Confirmation::Confirmed)).await
        } else {
            delete_with(api, id, &StdinConfirmer).await
        }
    })
}

fn with_http_api<F, Fut>(command: &str, action: F) -> CommandResult
where
    F: FnOnce(HttpCatalogApi) -> Fut,
    Fut: Future<Output = CommandResult>,
{
    let config = match load_config(command) {
        Ok(config) => config,
        Err(result) => return result,
    };
    let runtime = match build_runtime(command) {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };

    runtime.block_on(action(HttpCatalogApi::from_config(&config.client)))
}

pub async fn list_with<A: CatalogApi>(api: A, search: String, page: usize) -> CommandResult {
    let mut controller = CatalogController::new(api);
    if let Err(error) = controller.refresh().await {
        return api_failure("list", &error, controller.take_notifications());
    }

    controller.set_search(search);
    controller.go_to_page(page);
    let view = controller.view();
    let message = format!(
        "page {} of {} ({} matching)",
        view.page,
        view.total_pages.max(1),
        view.filtered_count
    );

    CommandResult::success_with_data("list", message, Some(json!(view)))
}

pub async fn show_with<A: CatalogApi + ?Sized>(api: &A, id: ProductId) -> CommandResult {
    match ProductDetails::load(api, id).await {
        ProductDetails::Loaded(product) => {
            let data = json!({
                "id": product.id,
                "name": product.display_name(),
                "detail": product.detail,
                "coverimage": product.cover_image(),
            });
            CommandResult::success_with_data("show", product.display_name(), Some(data))
        }
        ProductDetails::NotFound => {
            let message = format!("Games with id {id} not found");
            CommandResult::failure("show", "not_found", message, 4)
        }
        ProductDetails::Failed(message) => {
            CommandResult::failure("show", "api_request", message, 6)
        }
    }
}

pub async fn add_with<A: CatalogApi + ?Sized>(api: &A, fields: FieldEdits) -> CommandResult {
    let mut editor = ProductEditor::for_create();
    fields.apply(&mut editor);
    submit("add", api, editor).await
}

pub async fn edit_with<A: CatalogApi + ?Sized>(
    api: &A,
    id: ProductId,
    fields: FieldEdits,
) -> CommandResult {
    let mut editor = ProductEditor::load(api, id).await;
    let fetch_notices = editor.take_notifications();
    if let Some(error) = editor.load_error() {
        return api_failure("edit", error, fetch_notices);
    }

    fields.apply(&mut editor);
    submit("edit", api, editor).await
}

async fn submit<A: CatalogApi + ?Sized>(
    command: &str,
    api: &A,
    mut editor: ProductEditor,
) -> CommandResult {
    match editor.submit(api).await {
        Ok(product) => {
            let message = first_message(editor.take_notifications());
            CommandResult::success_with_data(command, message, Some(json!(product)))
        }
        Err(error) => api_failure(command, &error, editor.take_notifications()),
    }
}

pub async fn delete_with<A: CatalogApi>(
    api: A,
    id: ProductId,
    confirmer: &dyn Confirmer,
) -> CommandResult {
    let mut controller = CatalogController::new(api);
    match controller.delete_with_confirmation(id, confirmer).await {
        DeleteOutcome::Deleted => {
            CommandResult::success("delete", first_message(controller.take_notifications()))
        }
        DeleteOutcome::NotConfirmed(answer) => CommandResult::success(
            "delete",
            format!("delete not confirmed ({answer:?}); nothing was sent"),
        ),
        DeleteOutcome::Failed(error) => {
            api_failure("delete", &error, controller.take_notifications())
        }
    }
}

fn first_message(notifications: Vec<Notification>) -> String {
    notifications.into_iter().next().map(|notice| notice.message).unwrap_or_default()
}

fn api_failure(command: &str, error: &ApiError, notifications: Vec<Notification>) -> CommandResult {
    let (error_class, exit_code) = match error {
        ApiError::NotFound(_) => ("not_found", 4),
        ApiError::Transport(_) => ("api_unreachable", 5),
        ApiError::Status { .. } | ApiError::Decode(_) => ("api_request", 6),
    };
    let notice = first_message(notifications);
    let message = if notice.is_empty() { error.to_string() } else { format!("{notice} ({error})") };
    CommandResult::failure(command, error_class, message, exit_code)
}
