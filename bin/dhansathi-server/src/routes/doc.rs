use utoipa::OpenApi;

use crate::routes::{chat, health, tutorials};

#[derive(OpenApi)]
#[openapi(info(
    title = "dhansathi-server",
    description = "Dhansathi financial mentor chat API"
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(chat::ChatApi::openapi());
    root.merge(tutorials::TutorialApi::openapi());
    root
}
