use masomohub::{app, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    masomohub::init_tracing("masomohub=debug,axum=info,tower_http=info");

    let app_state = AppState::init().await?;

    if let Err(e) = sqlx::migrate!("./migrations").run(&app_state.db).await {
        tracing::warn!(error = %e, "migration failed; continuing");
    }

    let router = app::build_app(app_state.clone());
    app::serve(router).await?;

    app_state.db.close().await;
    tracing::info!("database pool closed");
    Ok(())
}
