//! All API endpoint setup

use axum::Router;
use axum::routing::get;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use request::Form;
pub use request::PathParameters;
pub use request::parse_text;
pub use response::Error;
pub use response::ErrorBody;
pub use response::Success;

use crate::storage::Storage;

mod health;
mod notes;
mod request;
mod response;

/// Where the OpenAPI document is served
pub const OPENAPI_PATH: &str = "/openapi.json";

/// Where the Swagger UI is served
pub const DOCS_PATH: &str = "/docs";

/// OpenAPI document for all API routes
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Personal Notes API",
        description = "A simple notes service with CRUD operations, scoped to the owner in the `X-User-Id` header."
    ),
    paths(
        health::check,
        notes::list,
        notes::create,
        notes::single,
        notes::update,
        notes::delete,
    ),
    components(schemas(
        health::Health,
        notes::NoteResponse,
        notes::CreateNoteForm,
        notes::UpdateNoteForm,
        ErrorBody,
    )),
    tags(
        (name = "Health", description = "Service health and operational endpoints"),
        (name = "Notes", description = "Create, read, update and delete notes")
    )
)]
pub struct ApiDoc;

/// Get the Axum router for all API routes
pub fn router<S: Storage>() -> Router {
    let notes = Router::new()
        .route("/", get(notes::list::<S>).post(notes::create::<S>))
        .route(
            "/{note}",
            get(notes::single::<S>)
                .put(notes::update::<S>)
                .patch(notes::update::<S>)
                .delete(notes::delete::<S>),
        );

    Router::new()
        .route("/", get(health::check))
        .nest("/notes", notes)
        .merge(SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
        .fallback(fallback)
}

/// Anything that is not a known route
async fn fallback() -> Error {
    Error::not_found("Not found")
}
