use log_submitter::app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::main().await
}
