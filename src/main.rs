mod config;
mod err;
mod http;
mod opt;
mod redirect;
mod routes;
mod server;
mod table;
mod tcp;

#[tokio::main]
async fn main() -> Result<(), err::DisplayError> {
    let dotenv = dotenvy::dotenv();

    let options = opt::Options::parse_valid();

    env_logger::Builder::new()
        .filter_level(match options.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    match dotenv {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => log::warn!("Ignoring .env: {}", e),
    }

    server::main(options).await?;

    Ok(())
}
