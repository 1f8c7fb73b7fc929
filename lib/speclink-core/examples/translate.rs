use http::Method;
use http::uri::Scheme;
use speclink_core::{ApiClient, Dto, OpenApiDocument, tag_path};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().pretty().init();

    let document = OpenApiDocument::from_json_str(include_str!("../fixtures/user_api.json"))?;

    let client = ApiClient::builder()
        .with_scheme(Scheme::HTTP)
        .with_host("localhost")
        .with_port(3000)
        .with_document(document)
        .build()?;

    // Translation only, nothing is sent
    let dto = Dto::new()
        .with(tag_path("id"), 42)
        .with("filter", "name eq 'test'")
        .with("page", 1)
        .with("size", 20);
    let request = client.request(&Method::GET, "/api/v1/user/{id}", &dto)?;
    info!(url = %request.url, accept = ?request.headers.accept, "get_one");

    let dto = Dto::new().with("name", "test").with("age", 10);
    let request = client.request(&Method::POST, "/api/v1/user/", &dto)?;
    info!(body = %serde_json::to_string(&request.body)?, "create_user");

    // Needs a server listening on localhost:3000
    if std::env::args().any(|arg| arg == "--send") {
        let created = client.post("/api/v1/user/", &dto).await?;
        info!(%created, "user created");
    }

    Ok(())
}
