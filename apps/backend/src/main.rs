#[tokio::main]
async fn main() -> anyhow::Result<()> {
    vocab_trainer_web::run().await
}
