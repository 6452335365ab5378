use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use common::errors::{ErrorKind, ErrorResponse};
use common::models::WeatherSnapshot;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::get_weather,
    ),
    components(schemas(
        WeatherSnapshot,
        ErrorResponse,
        ErrorKind,
    )),
    tags(
        (name = "weather", description = "Current weather lookups"),
    ),
)]
struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
