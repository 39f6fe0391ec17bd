use blogly::Config;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    blogly::init_tracing();

    blogly::start(Config::parse()).await
}
