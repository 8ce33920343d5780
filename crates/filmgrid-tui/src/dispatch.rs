//! Fetch dispatcher.

use std::sync::Arc;

use filmgrid_api::tmdb::{MovieApi, SearchMovieParams};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::search::{FetchTicket, SearchEvent};

/// Runs fetches for tickets and reports each outcome as a [`SearchEvent`].
///
/// One task per ticket. Superseded tasks are left to finish; the
/// controller drops their results by generation.
#[derive(Debug)]
pub struct Dispatcher<A> {
    api: Arc<A>,
    template: SearchMovieParams,
    tx: mpsc::UnboundedSender<SearchEvent>,
}

impl<A> Dispatcher<A>
where
    A: MovieApi + Sync + 'static,
{
    /// Creates a dispatcher and the receiver its results arrive on.
    ///
    /// `template` supplies the filters (language, region, adult flag)
    /// applied to every request.
    #[must_use]
    pub fn new(
        api: Arc<A>,
        template: SearchMovieParams,
    ) -> (Self, mpsc::UnboundedReceiver<SearchEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { api, template, tx }, rx)
    }

    /// Spawns the fetch for `ticket`.
    pub fn dispatch(&self, ticket: FetchTicket) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let params = self.template.for_request(ticket.query.clone(), ticket.page);
        let tx = self.tx.clone();

        tracing::debug!(
            query = %ticket.query,
            page = ticket.page,
            generation = ticket.generation,
            "dispatching search"
        );

        tokio::spawn(async move {
            let event = match api.search_movie(&params).await {
                Ok(page) => SearchEvent::FetchSucceeded { ticket, page },
                Err(error) => SearchEvent::FetchFailed { ticket, error },
            };
            if tx.send(event).is_err() {
                tracing::debug!("search receiver closed; dropping fetch result");
            }
        })
    }
}
