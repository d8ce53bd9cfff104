use dayplan::commands::Cli;
use dayplan::libs::messages::macros::is_debug_mode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    if is_debug_mode() {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "dayplan=debug".into()))
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    Cli::menu()
}
