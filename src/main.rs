#[tokio::main]
async fn main() -> anyhow::Result<()> {
    onboarding_emotion_lib::run().await
}
