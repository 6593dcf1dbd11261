use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::recipe::list_recipes,
            handlers::recipe::create_recipe
        ))
        .routes(routes!(handlers::recipe::get_recipe))
        .routes(routes!(handlers::recipe::scale_recipe))
}
