use ficago_backend_rs::{
    app::App,
    jobs,
    modules::plan,
    types::{Config, Context, ToContext},
};
use std::sync::Arc;
use tracing_subscriber::prelude::*;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    init_tracing();

    let ctx: Arc<Context> = Arc::new(Config::default().to_context().await);

    plan::seeder::seed(ctx.clone()).await;

    let app = App::new(ctx.clone());

    let http = async {
        if app.serve().await.is_err() {
            std::process::exit(1);
        }
    };
    let job_monitor = async {
        if let Err(err) = jobs::monitor(ctx.clone()).await.run().await {
            tracing::error!("Job monitor stopped: {}", err);
        }
    };

    tokio::join!(http, job_monitor);
}
