#[tokio::main]
async fn main() -> anyhow::Result<()> {
    funbox_bot::run_bot().await
}
