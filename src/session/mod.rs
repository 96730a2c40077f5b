//! The search box: one submitted line, one query, one rendered list.
//!
//! [`SearchBox`] holds explicit handles to the API and to the sink. It keeps
//! no state between queries; each submission runs to completion before the
//! next line is read.

use std::time::Instant;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::client::{ClientError, SearchApi};
use crate::render::{Projector, ResultSink};

/// Errors from a single search box submission
#[derive(Debug, thiserror::Error)]
pub enum SearchBoxError {
    /// The search API call failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Writing to the sink failed
    #[error("Render error: {0}")]
    Render(#[from] std::io::Error),
}

/// Counters for a finished [`SearchBox::run`] loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub submitted: usize,
    pub failed: usize,
}

/// Hooks the CLI uses to draw chrome around each query.
pub trait SessionObserver {
    /// Called before waiting for the next line
    fn prompt(&mut self) {}

    /// Called when a query is sent
    fn started(&mut self, _query: &str) {}

    /// Called after a query finished, successfully or not
    fn finished(
        &mut self,
        _query: &str,
        _outcome: &Result<usize, SearchBoxError>,
        _started: Instant,
    ) {
    }
}

/// Observer that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SessionObserver for Silent {}

/// A search box bound to an API and a result sink.
#[derive(Debug)]
pub struct SearchBox<A, S> {
    api: A,
    sink: S,
    projector: Projector,
}

impl<A: SearchApi, S: ResultSink> SearchBox<A, S> {
    pub fn new(api: A, sink: S, projector: Projector) -> Self {
        Self {
            api,
            sink,
            projector,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give back the sink, e.g. to inspect what was written
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run one query: search, project every result, render the list.
    ///
    /// Returns the number of rendered items. On failure nothing is rendered.
    pub async fn submit(&mut self, query: &str) -> Result<usize, SearchBoxError> {
        let results = self.api.search(query).await?;
        let items = self.projector.project_all(&results);
        self.sink.render(query, &items)?;

        let rendered = items.len();
        tracing::debug!(query, rendered, "rendered results");
        Ok(rendered)
    }

    /// Read lines until EOF, submitting each non-blank line as a query.
    ///
    /// Failed queries are logged and the loop carries on.
    pub async fn run<R, O>(&mut self, input: R, observer: &mut O) -> std::io::Result<RunSummary>
    where
        R: AsyncBufRead + Unpin,
        O: SessionObserver,
    {
        let mut lines = input.lines();
        let mut summary = RunSummary::default();

        loop {
            observer.prompt();
            let Some(line) = lines.next_line().await? else {
                break;
            };

            let query = line.trim_end_matches('\r');
            if query.trim().is_empty() {
                continue;
            }

            observer.started(query);
            let started = Instant::now();
            let outcome = self.submit(query).await;
            summary.submitted += 1;

            if let Err(e) = &outcome {
                summary.failed += 1;
                tracing::warn!(query, error = %e, "search failed");
            }
            observer.finished(query, &outcome, started);
        }

        Ok(summary)
    }
}
