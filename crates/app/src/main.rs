use telegram_bot::UserId;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "registro={level},telegram_bot={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let allowed_users: Vec<UserId> = settings
        .telegram
        .allowed_users
        .iter()
        .copied()
        .map(UserId)
        .collect();

    let bot = telegram_bot::Bot::builder()
        .token(&settings.telegram.token)
        .allowed_users(allowed_users)
        .build();

    tracing::info!("Expense tracker bot starting");
    bot.run().await;

    Ok(())
}
