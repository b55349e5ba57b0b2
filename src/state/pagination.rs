//! Page cursor for a bound thread.

use crate::models::Pagination;

/// Tracks the last page requested for the bound thread.
///
/// Page 0 means only the server's default page has been loaded. The cursor
/// only moves forward while a thread stays bound; [`reset`](Self::reset)
/// is called when a new thread is opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationCursor {
    current_page: u32,
    last_page: Option<u32>,
}

impl PaginationCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Last page reported by the server, if any.
    pub fn last_page(&self) -> Option<u32> {
        self.last_page
    }

    /// Back to page 0, forgetting the server's page count.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True once the cursor has reached the last page the server reported.
    ///
    /// The initial load fetches the first page, so cursor 0 counts as
    /// having seen page 1.
    pub fn is_exhausted(&self) -> bool {
        match self.last_page {
            Some(last) => self.current_page.max(1) >= last,
            None => false,
        }
    }

    /// Move to the next page and return it.
    pub fn advance(&mut self) -> u32 {
        self.current_page = self.current_page.saturating_add(1);
        self.current_page
    }

    /// Undo an [`advance`](Self::advance) whose fetch failed.
    pub fn rollback(&mut self, to: u32) {
        if to < self.current_page {
            self.current_page = to;
        }
    }

    /// Record the server's page count from a response.
    pub fn observe(&mut self, pagination: Option<&Pagination>) {
        if let Some(p) = pagination {
            if p.last_page > 0 {
                self.last_page = Some(p.last_page);
            }
        }
    }
}
