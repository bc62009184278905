use crate::err::Error;
use crate::http;
use crate::opt::Options;
use crate::routes::{respond_to_request, State};
use crate::table::RedirectTable;
use hyper::body::Incoming;
use tokio::net::TcpListener;

pub async fn main(options: Options) -> Result<(), Error> {
    let listen = options.listen();
    let Options { base, mappings, .. } = options;

    log::info!("Starting redirect service with base URL: {}", base);
    for pair in mappings.chunks_exact(2) {
        log::info!("  {} -> {}{}", pair[0], base, pair[1]);
    }

    let table = RedirectTable::build(&base, &mappings);
    let state = State::new(&table)?;
    log::debug!("Registered {} redirects", table.len());

    log::info!("Binding to: {}", listen);
    let listener = TcpListener::bind(listen).await?;

    http::serve(listener, state, respond_to_request::<Incoming>).await?;

    Ok(())
}
