use crate::err::{AppliesTo, IoErrorExt};
use std::io;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};

pub async fn accept(listener: &TcpListener) -> Result<(TcpStream, SocketAddr), io::Error> {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                stream.set_nodelay(true)?;
                return Ok((stream, addr));
            }
            Err(e) => match e.applies_to() {
                AppliesTo::Connection => log::debug!("Aborted connection dropped: {}", e),
                AppliesTo::Listener => return Err(e),
            },
        }
    }
}
