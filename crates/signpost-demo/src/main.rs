//! signpost-demo: every route kind in one small program.
//!
//! ```text
//! signpost-demo --hello-world Bob
//! signpost-demo -h
//! printf 'a\nb\n' | signpost-demo
//! RUST_LOG=debug signpost-demo --hello-world=Alice
//! ```

use std::io::IsTerminal;
use std::path::PathBuf;

use signpost::{App, StateExt};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn views_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("views")
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut app = App::builder()
        .option("debug", true)
        .option("log.destination", "stderr")
        .option("template.path", views_dir().to_string_lossy().into_owned())
        .config_file("signpost-demo.ini")
        .build()?;
    tracing::debug!(options = app.options().len(), "demo app built");

    app.command("help", |ctx| ctx.exit_with_usage())?
        .with_short_option("h")?
        .with_help("This Help text");

    app.command("hello-world:", |ctx| {
        println!("Hello {}", ctx.value().unwrap_or_default());
        Ok(())
    })?
    .with_help("Hello world example");

    app.always(|ctx| {
        ctx.logger().notice("Hello World Logging");
        ctx.view_mut().set("name", "value")?;
        println!("{}", ctx.view().render("greeting.txt")?);
        Ok(())
    });

    if !std::io::stdin().is_terminal() {
        app.stdin(|ctx| {
            while let Some(line) = ctx.read_line()? {
                println!("stdin: {line}");
            }
            Ok(())
        })?;
    }

    tracing::debug!(routes = app.routes().len(), "dispatching");
    if let Some(report) = app.run_reporting()? {
        print!("{report}");
    }
    Ok(())
}
