#[tokio::main]
async fn main() -> anyhow::Result<()> {
    nlq_server::start().await
}
