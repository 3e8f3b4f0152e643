#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pubmeta_server::start().await
}
