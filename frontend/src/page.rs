use log::info;
use web_sys::{Document, Element};

use crate::dom::query_all;

pub const SECTIONS_SELECTOR: &str = "section, footer";
pub const NAV_LINKS_SELECTOR: &str = ".nav-links a";
pub const MEMBER_SELECTOR: &str = ".member";

/// Page structure queried once at start and shared read-only by the
/// highlighter and the diagnostics.
pub struct PageSnapshot {
    pub sections: Vec<Element>,
    pub nav_links: Vec<Element>,
    pub members: Vec<Element>,
}

impl PageSnapshot {
    pub fn capture(document: &Document) -> Self {
        Self {
            sections: query_all(document, SECTIONS_SELECTOR),
            nav_links: query_all(document, NAV_LINKS_SELECTOR),
            members: query_all(document, MEMBER_SELECTOR),
        }
    }

    pub fn counts(&self) -> PageCounts {
        PageCounts {
            sections: self.sections.len(),
            members: self.members.len(),
            nav_items: self.nav_links.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCounts {
    pub sections: usize,
    pub members: usize,
    pub nav_items: usize,
}

impl PageCounts {
    pub fn summary_lines(&self, site_name: &str) -> Vec<String> {
        let banner = format!("=== {} ===", site_name);
        let rule = "=".repeat(banner.chars().count());
        vec![
            banner,
            format!("Sections Found: {}", self.sections),
            format!("Members Found: {}", self.members),
            format!("Navigation Items: {}", self.nav_items),
            rule,
        ]
    }
}

pub fn log_page_info(snapshot: &PageSnapshot, site_name: &str) {
    for line in snapshot.counts().summary_lines(site_name) {
        info!("{}", line);
    }
}
