use std::sync::Arc;

mod assets;
mod config;
mod detect;
mod handler;
mod http;
mod logger;
mod reports;
mod routing;
mod server;

#[cfg(test)]
mod testing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional config path (without extension) as the first argument
    let cfg = match std::env::args().nth(1) {
        Some(path) => config::Config::load_from(&path)?,
        None => config::Config::load()?,
    };

    logger::init(&cfg)?;

    // Create Tokio runtime, thread count from the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(config::AppState::new(&cfg)?);
    let routes = state.routes.clone();

    let server = server::init_app(state)?;
    logger::log_server_start(&server.local_addr(), &cfg, &routes);

    let signal_result = server::wait_for_shutdown().await;
    server.kill_server().await;
    signal_result?;

    Ok(())
}
