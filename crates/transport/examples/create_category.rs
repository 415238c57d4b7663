//! Gate an action behind capabilities, then send it with metadata attached.
//!
//! Run with: cargo run --example create_category
//!
//! Posts to httpbin, which echoes the body back, so the injected
//! `metaInfo` envelope is visible in the output.

use access::{Gate, Session};
use transport::{ApiClient, ClientInfo, Source};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Session as resolved after login
    let mut session = Session::new();
    session.authenticate(["category:view", "category:create"].into_iter().collect());

    let create_category = Gate::new(["category:view", "category:create"]);
    if !session.permits(&create_category) {
        println!("create-category is hidden for this user");
        return Ok(());
    }

    let info = ClientInfo::new("412", "3.9.1", "b2fe6a1c-4f0e-4f3a")
        .with_source(Source::Website)
        .with_device_name("dev-laptop");

    let client = ApiClient::builder("https://httpbin.org")
        .metadata(info)
        .build();

    println!("Creating category...");
    let echoed = client
        .post("/anything/categories", &serde_json::json!({ "name": "Shoes" }))
        .await?;

    // httpbin echoes the request body under "json"
    println!("Server saw body:");
    println!("{}", serde_json::to_string_pretty(&echoed["json"])?);

    Ok(())
}
