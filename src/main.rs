#[tokio::main]
async fn main() -> anyhow::Result<()> {
    todos::app::run().await
}
