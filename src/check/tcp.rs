// src/check/tcp.rs
//! TCP check - connect, then hang up straight away

use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::{net::TcpStream, time::timeout};

use crate::{
    error::{Result, ServiceCheckError},
    log_debug,
};

pub const TCP_TIMEOUT: Duration = Duration::from_millis(2500);

pub async fn probe(host: &str, port: u16) -> Result<()> {
    match connect_within(TCP_TIMEOUT, TcpStream::connect((host, port))).await {
        Ok(stream) => {
            drop(stream);
            log_debug!("TCP check for {}:{} connected successfully.", host, port);
            Ok(())
        }
        Err(e @ ServiceCheckError::Timeout(_)) => {
            log_debug!("TCP check for {}:{} timed out.", host, port);
            Err(e)
        }
        Err(e) => {
            log_debug!("TCP check for {}:{} could not connect.", host, port);
            Err(e)
        }
    }
}

async fn connect_within<F, S>(limit: Duration, connect: F) -> Result<S>
where
    F: Future<Output = io::Result<S>>,
{
    match timeout(limit, connect).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(ServiceCheckError::Timeout(limit)),
    }
}
