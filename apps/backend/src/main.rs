#[tokio::main]
async fn main() -> anyhow::Result<()> {
    langrise_backend::run().await
}
