//! Hosts a [`ListingController`] on a single event loop.
//!
//! Commands are handled one at a time. Every issued query runs as its own
//! task and is never cancelled; its outcome is joined back on the loop and
//! folded there, where the controller drops anything superseded. A query
//! task that panics settles as a failure for its own sequence tag.

use std::sync::Arc;

use shared::{domain::Product, error::ReportedFailure, protocol::PageResult};
use tokio::{sync::broadcast, task::JoinSet};
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartTotals},
    catalog::CatalogQueries,
    error::{StorefrontError, StorefrontResult},
    listing::{FoldOutcome, IssuedQuery, ListingController, ListingState},
    route::RouteParams,
    types::{ListingRequest, QuerySeq},
};

const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub enum ListingCommand {
    Navigate(RouteParams),
    ChangePageSize(u32),
    ChangePage(u32),
    AddToCart(Product),
}

#[derive(Debug, Clone)]
pub enum ListingEvent {
    QueryIssued {
        seq: QuerySeq,
        request: ListingRequest,
    },
    StateUpdated(ListingState),
    StaleResultDiscarded {
        seq: QuerySeq,
    },
    Failed(ReportedFailure),
    CartUpdated(CartTotals),
}

type QueryOutcome = (QuerySeq, StorefrontResult<PageResult<Product>>);

pub struct ListingEventLoop {
    controller: ListingController,
    cart: Cart,
    catalog: Arc<dyn CatalogQueries>,
    queries: JoinSet<QueryOutcome>,
    events: broadcast::Sender<ListingEvent>,
}

impl ListingEventLoop {
    pub fn new(catalog: Arc<dyn CatalogQueries>, controller: ListingController) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            controller,
            cart: Cart::new(),
            catalog,
            queries: JoinSet::new(),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ListingEvent> {
        self.events.subscribe()
    }

    pub fn controller(&self) -> &ListingController {
        &self.controller
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn into_parts(self) -> (ListingController, Cart) {
        (self.controller, self.cart)
    }

    /// Runs until `commands` ends and every query it caused has settled.
    /// Pending commands are taken before pending results.
    pub async fn run<S>(&mut self, mut commands: S)
    where
        S: Stream<Item = ListingCommand> + Unpin,
    {
        let mut commands_open = true;
        loop {
            tokio::select! {
                biased;
                command = commands.next(), if commands_open => match command {
                    Some(command) => self.handle_command(command),
                    None => commands_open = false,
                },
                Some(joined) = self.queries.join_next(), if !self.queries.is_empty() => {
                    match joined {
                        Ok((seq, result)) => self.handle_outcome(seq, result),
                        Err(err) => warn!(error = %err, "listing query supervisor failed"),
                    }
                }
                else => break,
            }
        }
        debug!("listing event loop finished");
    }

    fn handle_command(&mut self, command: ListingCommand) {
        let issued = match command {
            ListingCommand::Navigate(params) => self.controller.on_navigation(&params),
            ListingCommand::ChangePageSize(size) => self.controller.on_page_size_change(size),
            ListingCommand::ChangePage(page) => self.controller.on_page_change(page),
            ListingCommand::AddToCart(product) => {
                let totals = self.controller.on_add_to_cart(&product, &mut self.cart);
                self.publish(ListingEvent::CartUpdated(totals));
                return;
            }
        };

        match issued {
            Ok(issued) => self.dispatch(issued),
            Err(err) => self.publish(ListingEvent::Failed(err.report())),
        }
    }

    fn dispatch(&mut self, issued: IssuedQuery) {
        self.publish(ListingEvent::QueryIssued {
            seq: issued.seq,
            request: issued.request.clone(),
        });

        let catalog = Arc::clone(&self.catalog);
        let IssuedQuery { seq, request } = issued;
        // A panicking fetch still settles as an outcome for `seq`.
        self.queries.spawn(async move {
            let query = tokio::spawn(async move { catalog.fetch(&request).await });
            let result = match query.await {
                Ok(result) => result,
                Err(err) => Err(StorefrontError::QueryTask(err)),
            };
            (seq, result)
        });
    }

    fn handle_outcome(&mut self, seq: QuerySeq, result: StorefrontResult<PageResult<Product>>) {
        let fold = match result {
            Ok(page) => self.controller.on_query_result(seq, page),
            Err(err) => self.controller.on_query_failure(seq, &err),
        };

        match fold {
            FoldOutcome::Applied => {
                self.publish(ListingEvent::StateUpdated(self.controller.state().clone()))
            }
            FoldOutcome::Reported => {
                if let Some(failure) = self.controller.failure() {
                    self.publish(ListingEvent::Failed(failure.clone()));
                }
            }
            FoldOutcome::Stale => self.publish(ListingEvent::StaleResultDiscarded { seq }),
        }
    }

    fn publish(&self, event: ListingEvent) {
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/event_loop_tests.rs"]
mod tests;
