use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::books::list_books,
        api::books::create_book,
        // Remaining endpoints are documented as they stabilize
    ),
    tags(
        (name = "libretto", description = "Book and publisher catalog API")
    )
)]
pub struct ApiDoc;
