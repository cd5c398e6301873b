use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use menuserve::config::{AppState, Config};
use menuserve::registry::Registry;
use menuserve::server::signal::{start_signal_handler, SignalHandler};
use menuserve::{logger, menu, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    let registry = Registry::builtin();
    menu::print_menu(&registry);

    let root = match menu::select_root(&registry, &mut io::stdin().lock()) {
        Ok(root) => root,
        Err(err) => {
            println!("{err}");
            return Ok(());
        }
    };

    println!("Starting server with root directory: {}", root.display());

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.performance.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg, root))
}

async fn async_main(cfg: Config, root: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], server::PORT));
    let listener = server::create_listener(addr)?;

    let state = Arc::new(AppState::new(cfg, root));
    let signals = Arc::new(SignalHandler::new());
    start_signal_handler(Arc::clone(&signals));

    logger::log_server_start(&addr, &state);

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::serve(listener, state, Arc::clone(&signals.shutdown)))
        .await
}
