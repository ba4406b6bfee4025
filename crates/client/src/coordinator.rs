//! Background coordinator for open requests.
//!
//! UI contexts never touch pages directly. They send a [`Request`] over a
//! channel; the coordinator opens the page and runs the scroll restorer in
//! its own task. Each restoration is independent and ends on its own when
//! the attempt cap is reached, so nothing needs to cancel it.

use std::sync::Arc;

use readlater_core::{Error, Request, RestorePolicy, RestoreState, ScrollRestorer};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::opener::{OpenError, PageOpener};
use crate::url::page_url;

/// Opens pages and restores their scroll offset.
#[derive(Clone)]
pub struct Coordinator {
    opener: Arc<dyn PageOpener>,
    policy: RestorePolicy,
}

impl Coordinator {
    pub fn new(opener: Arc<dyn PageOpener>, policy: RestorePolicy) -> Self {
        Self { opener, policy }
    }

    /// Handle one request to completion.
    pub async fn handle(&self, request: Request) -> Result<RestoreState, OpenError> {
        match request {
            Request::Open { url, scroll } => {
                let url = page_url(&url)?;
                let surface = self.opener.open(&url).await?;
                let state = ScrollRestorer::new(scroll, self.policy).run(surface.as_ref()).await;
                tracing::info!(%url, scroll, ?state, "page opened");
                Ok(state)
            }
        }
    }

    /// Run the coordinator on its own task, returning the sending side of
    /// its request channel.
    ///
    /// The task ends once every [`OpenSender`] has been dropped.
    pub fn spawn(self, buffer: usize) -> (OpenSender, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<Request>(buffer);
        let handle = tokio::spawn(async move {
            while let Some(request) = rx.recv().await {
                let this = self.clone();
                tokio::spawn(async move {
                    if let Err(e) = this.handle(request).await {
                        tracing::warn!(error = %e, "open request failed");
                    }
                });
            }
            tracing::debug!("coordinator stopped");
        });
        (OpenSender { tx }, handle)
    }
}

/// Sending side of the coordinator channel, held by UI contexts.
#[derive(Debug, Clone)]
pub struct OpenSender {
    tx: mpsc::Sender<Request>,
}

impl OpenSender {
    /// Queue a request. Returns once the coordinator has accepted it, not
    /// once the page is open.
    pub async fn send(&self, request: Request) -> Result<(), Error> {
        self.tx
            .send(request)
            .await
            .map_err(|_| Error::OpenFailed("coordinator is not running".into()))
    }
}
