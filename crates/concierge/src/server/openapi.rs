use utoipa::OpenApi;

use crate::server::chat::{ChatRequest, ChatResponse};
use crate::server::error::ApiErrorResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Concierge API",
        version = "0.1.0",
        description = "Conversational backend with AI-orchestrated tool calling"
    ),
    paths(crate::server::chat::chat),
    components(schemas(ChatRequest, ChatResponse, ApiErrorResponse))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_includes_chat_path() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/chat"));
    }
}
