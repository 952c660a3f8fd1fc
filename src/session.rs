//! Pagination state for one browsing UI.
//!
//! Each page request is described by a [`PageTicket`] tagged with a
//! monotonically increasing sequence number. Only the completion of the most
//! recently issued ticket is applied, so a slow response for an old page or
//! an old source can never overwrite newer state.

use serde::Serialize;

use crate::error::{ApiError, SourceError};
use crate::pokemon::{PokemonListItem, PokemonPage};
use crate::sources::ApiSource;

pub const DEFAULT_PAGE_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    pub seq: u64,
    pub source: ApiSource,
    pub offset: usize,
    pub limit: usize,
}

/// Serializable view of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub source: ApiSource,
    pub offset: usize,
    pub page_size: usize,
    pub pokemon: Vec<PokemonListItem>,
    pub has_next: bool,
    pub has_previous: bool,
    pub total_count: usize,
    pub loading: bool,
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone)]
pub struct BrowseSession {
    source: ApiSource,
    offset: usize,
    page_size: usize,
    items: Vec<PokemonListItem>,
    has_next: bool,
    has_previous: bool,
    total_count: usize,
    error: Option<ApiError>,
    seq: u64,
    pending: Option<u64>,
}

impl BrowseSession {
    pub fn new(source: ApiSource, page_size: usize) -> Self {
        Self {
            source,
            offset: 0,
            page_size: page_size.max(1),
            items: Vec::new(),
            has_next: false,
            has_previous: false,
            total_count: 0,
            error: None,
            seq: 0,
            pending: None,
        }
    }

    pub fn source(&self) -> ApiSource {
        self.source
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn items(&self) -> &[PokemonListItem] {
        &self.items
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    fn issue(&mut self, offset: usize) -> PageTicket {
        self.seq += 1;
        self.pending = Some(self.seq);
        PageTicket {
            seq: self.seq,
            source: self.source,
            offset,
            limit: self.page_size,
        }
    }

    pub fn begin_reload(&mut self) -> PageTicket {
        self.issue(self.offset)
    }

    pub fn begin_next(&mut self) -> PageTicket {
        self.issue(self.offset + self.page_size)
    }

    pub fn begin_previous(&mut self) -> PageTicket {
        self.issue(self.offset.saturating_sub(self.page_size))
    }

    /// Switches source and restarts listing from the first page. Any ticket
    /// issued before the switch becomes stale.
    pub fn switch_source(&mut self, source: ApiSource) -> PageTicket {
        self.source = source;
        self.offset = 0;
        self.items.clear();
        self.has_next = false;
        self.has_previous = false;
        self.total_count = 0;
        self.error = None;
        self.issue(0)
    }

    pub fn is_current(&self, ticket: &PageTicket) -> bool {
        ticket.seq == self.seq && ticket.source == self.source
    }

    /// Applies a completed request. Returns `false` and changes nothing when
    /// the ticket has been superseded.
    pub fn complete(
        &mut self,
        ticket: PageTicket,
        result: Result<PokemonPage, SourceError>,
    ) -> bool {
        if !self.is_current(&ticket) {
            tracing::debug!(
                "Discarding stale page response (seq {} < {})",
                ticket.seq,
                self.seq
            );
            return false;
        }
        self.pending = None;
        match result {
            Ok(page) => {
                self.offset = ticket.offset;
                self.items = page.results;
                self.has_next = page.next_available;
                self.has_previous = page.previous_available;
                self.total_count = page.total_count;
                self.error = None;
            }
            Err(e) => {
                tracing::error!("Error fetching Pokemon list: {}", e);
                self.error = Some(e.to_api_error());
            }
        }
        true
    }

    /// Clears the loading flag for a request that will never complete, such
    /// as one whose client went away. Stale tickets are ignored.
    pub fn abandon(&mut self, ticket: PageTicket) -> bool {
        if !self.is_current(&ticket) || self.pending != Some(ticket.seq) {
            return false;
        }
        tracing::debug!("Abandoned page request seq {}", ticket.seq);
        self.pending = None;
        true
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            source: self.source,
            offset: self.offset,
            page_size: self.page_size,
            pokemon: self.items.clone(),
            has_next: self.has_next,
            has_previous: self.has_previous,
            total_count: self.total_count,
            loading: self.pending.is_some(),
            error: self.error.clone(),
        }
    }
}

impl Default for BrowseSession {
    fn default() -> Self {
        Self::new(ApiSource::default(), DEFAULT_PAGE_SIZE)
    }
}
