pub mod api;

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use log::info;
use tokio::net::TcpListener;

use crate::session::SessionStore;

pub struct Server {
    addr: String,
    store: Arc<SessionStore>,
}

impl Server {
    pub fn new(addr: String, store: Arc<SessionStore>) -> Self {
        Self { addr, store }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let addr = self.addr.parse::<SocketAddr>()?;
        let app = api::router(api::AppState {
            store: Arc::clone(&self.store),
        });

        let listener = TcpListener::bind(addr).await?;
        info!("HTTP server listening on: http://{}", addr);
        axum::serve(listener, app.into_make_service()).await?;

        Ok(())
    }
}
