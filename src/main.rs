#[tokio::main]
async fn main() -> anyhow::Result<()> {
    todo_rs::cli::run().await
}
