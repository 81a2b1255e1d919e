use std::convert::Infallible;
use std::path::PathBuf;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::http::connection::Connection;
use crate::routes::Router;

/// Binds `addr` and serves files under `root` until a fatal error.
///
/// Only a bind failure ends this; it is returned with the address attached.
pub async fn run(addr: &str, root: impl Into<PathBuf>) -> anyhow::Result<Infallible> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    info!("Listening on {}", addr);

    let router = Router::new(root);
    let never = serve(listener, router).await;
    info!("Listener on {} closed", addr);
    never
}

/// Accepts connections on an already bound listener forever, one task each.
///
/// Accept errors are logged and the loop carries on.
pub async fn serve(listener: TcpListener, router: Router) -> anyhow::Result<Infallible> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("Error accepting connection: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let router = router.clone();
        tokio::spawn(async move {
            let conn = Connection::new(socket, router);
            if let Err(e) = conn.run().await {
                error!("Connection error from {}: {:#}", peer, e);
            }
        });
    }
}
