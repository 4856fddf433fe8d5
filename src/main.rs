use clap::Parser;

use violetvibes::bootstrap::init_tracing_subscriber;
use violetvibes::cli::{run, user_message, Cli};

#[tokio::main]
async fn main() {
    // RUST_LOG and API_URL may come from a local .env file
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(err) = init_tracing_subscriber(cli.log_dir.as_deref()) {
        eprintln!("Failed to initialize tracing: {err:#}");
    }

    if let Err(err) = run(cli).await {
        eprintln!("{}", user_message(&err));
        std::process::exit(1);
    }
}
