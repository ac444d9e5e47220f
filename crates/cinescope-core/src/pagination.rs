use serde::Serialize;

/// TMDB refuses page numbers above this
pub const MAX_PAGES: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub current: u32,
    pub total: u32,
}

impl PageInfo {
    pub fn new(current: u32, total_pages: u32) -> Self {
        Self {
            current: current.max(1),
            total: total_pages.clamp(1, MAX_PAGES),
        }
    }

    pub fn single() -> Self {
        Self::new(1, 1)
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    pub fn previous(&self) -> Option<u32> {
        self.has_previous().then(|| self.current - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.current + 1)
    }
}

/// Parse a user supplied page number; anything unusable means page 1
pub fn parse_page(raw: &str) -> u32 {
    raw.trim().parse::<u32>().ok().filter(|p| *p > 0).unwrap_or(1)
}
