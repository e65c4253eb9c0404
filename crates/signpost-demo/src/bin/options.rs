//! signpost-options: option routes only, so an unmatched command line falls
//! through to the built-in usage listing.
//!
//! ```text
//! signpost-options --name Ann -v
//! signpost-options            # prints usage, exits 0
//! ```

use signpost::{App, StateExt};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut app = App::builder().option("log.destination", "stderr").build()?;

    app.command("help", |ctx| ctx.exit_with_usage())?
        .with_short_option("h")?
        .with_help("Show this listing");

    app.command("name:", |ctx| {
        println!("Hello {}", ctx.value().unwrap_or_default());
        Ok(())
    })?
    .with_short_option("n:")?
    .with_help("Greet someone");

    app.command("verbose", |ctx| {
        ctx.logger().info("verbose output requested");
        println!("Verbose");
        Ok(())
    })?
    .with_short_option("v")?
    .with_help("Say more");

    tracing::debug!(routes = app.routes().len(), "dispatching");
    if let Some(report) = app.run_reporting()? {
        print!("{report}");
    }
    Ok(())
}
