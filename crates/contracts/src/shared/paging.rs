//! Paged, search-parameterized option lookups (geo areas, organizations, ...)
//!
//! The lookup itself is done by the caller; this state machine decides which
//! request to issue next and which responses may be applied. Page 1 replaces
//! the list, later pages append. Responses belonging to a superseded search or
//! to a request that is no longer in flight are dropped.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// `{page, pageSize, search}` triple sent to the options endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsQuery {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// One page of options as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsPage<T> {
    pub results: Vec<T>,
    pub total_count: usize,
}

/// Handle for an issued request; must be presented back with its response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionsTicket {
    generation: u64,
    pub query: OptionsQuery,
}

#[derive(Debug, Clone)]
pub struct PagedOptions<T> {
    items: Vec<T>,
    total_count: Option<usize>,
    page_size: u32,
    search: Option<String>,
    generation: u64,
    last_page: u32,
    in_flight: Option<OptionsTicket>,
}

impl<T> PagedOptions<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total_count: None,
            page_size: page_size.max(1),
            search: None,
            generation: 0,
            last_page: 0,
            in_flight: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Whether `search` is the current search and its results are loaded or on the way
    pub fn repeats(&self, search: Option<&str>) -> bool {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        self.search_text() == search && (self.is_pending() || !self.items.is_empty())
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn has_more(&self) -> bool {
        match self.total_count {
            Some(total) => self.items.len() < total,
            None => false,
        }
    }

    /// Start a new search from page 1. Any request still in flight becomes stale.
    pub fn search(&mut self, search: Option<String>) -> OptionsTicket {
        self.search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self.generation += 1;
        self.last_page = 0;
        self.issue(1)
    }

    /// Next page of the current search, if there is one and nothing is pending
    pub fn load_more(&mut self) -> Option<OptionsTicket> {
        if self.in_flight.is_some() || !self.has_more() {
            return None;
        }
        Some(self.issue(self.last_page + 1))
    }

    /// Apply a response. Returns `false` when the response was dropped as stale.
    pub fn receive(&mut self, ticket: &OptionsTicket, page: OptionsPage<T>) -> bool {
        if self.in_flight.as_ref() != Some(ticket) {
            log::debug!(
                "dropping stale options page {} (search {:?})",
                ticket.query.page,
                ticket.query.search
            );
            return false;
        }
        self.in_flight = None;
        if ticket.query.page <= 1 {
            self.items = page.results;
        } else {
            self.items.extend(page.results);
        }
        self.total_count = Some(page.total_count);
        self.last_page = ticket.query.page;
        true
    }

    /// Mark an issued request as failed so a retry can be issued
    pub fn fail(&mut self, ticket: &OptionsTicket) {
        if self.in_flight.as_ref() == Some(ticket) {
            self.in_flight = None;
        }
    }

    fn issue(&mut self, page: u32) -> OptionsTicket {
        let ticket = OptionsTicket {
            generation: self.generation,
            query: OptionsQuery {
                page,
                page_size: self.page_size,
                search: self.search.clone(),
            },
        };
        self.in_flight = Some(ticket.clone());
        ticket
    }
}

impl<T> Default for PagedOptions<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(results: &[&str], total: usize) -> OptionsPage<String> {
        OptionsPage {
            results: results.iter().map(|s| s.to_string()).collect(),
            total_count: total,
        }
    }

    #[test]
    fn test_first_page_replaces_and_more_appends() {
        let mut options = PagedOptions::new(2);
        let first = options.search(None);
        assert_eq!(first.query.page, 1);
        assert!(options.receive(&first, page(&["a", "b"], 3)));
        assert!(options.has_more());

        let second = options.load_more().unwrap();
        assert_eq!(second.query.page, 2);
        assert!(options.receive(&second, page(&["c"], 3)));
        assert_eq!(options.items(), &["a", "b", "c"]);
        assert!(!options.has_more());
        assert!(options.load_more().is_none());
    }

    #[test]
    fn test_superseded_search_response_is_dropped() {
        let mut options = PagedOptions::new(10);
        let old = options.search(Some("nep".into()));
        let new = options.search(Some("nepal".into()));

        // the newer response arrives first, the older one afterwards
        assert!(options.receive(&new, page(&["Nepal"], 1)));
        assert!(!options.receive(&old, page(&["Nepal", "Nepalgunj"], 2)));
        assert_eq!(options.items(), &["Nepal"]);
        assert_eq!(options.search_text(), Some("nepal"));
    }

    #[test]
    fn test_same_search_is_a_repeat_only_while_results_stand() {
        let mut options = PagedOptions::new(10);
        let first = options.search(Some("nepal".into()));
        assert!(options.repeats(Some(" nepal ")));
        options.fail(&first);
        assert!(!options.repeats(Some("nepal")));

        let retry = options.search(Some("nepal".into()));
        options.receive(&retry, page(&["Nepal"], 1));
        assert!(options.repeats(Some("nepal")));
        assert!(!options.repeats(Some("india")));
        assert!(!options.repeats(None));
    }

    #[test]
    fn test_load_more_waits_for_pending_request() {
        let mut options = PagedOptions::new(1);
        let first = options.search(None);
        assert!(options.load_more().is_none());
        options.receive(&first, page(&["a"], 5));
        let second = options.load_more().unwrap();
        assert!(options.load_more().is_none());
        options.fail(&second);
        assert_eq!(options.load_more().unwrap().query.page, 2);
    }

    #[test]
    fn test_blank_search_is_none() {
        let mut options: PagedOptions<String> = PagedOptions::default();
        let ticket = options.search(Some("   ".into()));
        assert_eq!(ticket.query.search, None);
        assert_eq!(ticket.query.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_query_wire_shape() {
        let query = OptionsQuery { page: 2, page_size: 20, search: Some("kat".into()) };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, serde_json::json!({"page": 2, "pageSize": 20, "search": "kat"}));
    }
}
