#[tokio::main]
async fn main() -> anyhow::Result<()> {
    possap_assist_server::start().await
}
