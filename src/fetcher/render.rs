//! Rendered-page acquisition.
//!
//! Some pop-report pages only carry their card list after client-side
//! rendering, so acquisition can be backed by a browser collaborator. The
//! collaborator is modelled as a pair of traits returning plain HTML text;
//! nothing rendering-engine-specific crosses this boundary.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Instant, sleep, timeout};
use tracing::{debug, instrument};
use url::Url;

use crate::fetcher::errors::FetchError;

/// Poll interval while waiting for the card list to appear.
const CONTENT_POLL_INTERVAL: Duration = Duration::from_millis(250);
/// Fixed settle delay so interstitial/challenge pages can resolve first.
const CHALLENGE_SETTLE: Duration = Duration::from_secs(2);

/// One open page in a rendering collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageSession: Send {
    async fn goto(&mut self, url: &Url) -> anyhow::Result<()>;
    /// Current serialized DOM.
    async fn content(&mut self) -> anyhow::Result<String>;
    async fn close(&mut self);
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn open(&self) -> anyhow::Result<Box<dyn PageSession>>;
}

/// Acquires a fully rendered copy of `url`.
///
/// The whole navigate-settle-poll sequence shares one `budget`; exceeding it
/// fails with [`FetchError::RenderTimeout`]. The session is closed on every
/// exit path, including timeouts.
#[instrument(skip(renderer), fields(url = %url))]
pub async fn render(
    renderer: &dyn PageRenderer,
    url: &Url,
    budget: Duration,
) -> Result<String, FetchError> {
    let started = Instant::now();

    let mut session = timeout(budget, renderer.open())
        .await
        .map_err(|_| FetchError::RenderTimeout(budget))?
        .map_err(|e| FetchError::Render(e.to_string()))?;

    let remaining = budget.saturating_sub(started.elapsed());
    let outcome = timeout(remaining, drive(session.as_mut(), url)).await;
    session.close().await;

    match outcome {
        Ok(result) => result,
        Err(_) => Err(FetchError::RenderTimeout(budget)),
    }
}

async fn drive(session: &mut dyn PageSession, url: &Url) -> Result<String, FetchError> {
    session
        .goto(url)
        .await
        .map_err(|e| FetchError::Render(e.to_string()))?;

    sleep(CHALLENGE_SETTLE).await;

    loop {
        let html = session
            .content()
            .await
            .map_err(|e| FetchError::Render(e.to_string()))?;
        if content_ready(&html) {
            return Ok(html);
        }
        debug!("rendered page not ready yet, polling again");
        sleep(CONTENT_POLL_INTERVAL).await;
    }
}

/// A population marker means the card list has rendered.
fn content_ready(html: &str) -> bool {
    html.to_ascii_lowercase().contains("population")
}
