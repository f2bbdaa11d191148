//! The closed set of application pages and the validator that maps route
//! data onto it.
//!
//! # Example
//!
//! ```
//! use gpui_talks_shell::{validate_page, PageId};
//!
//! assert_eq!(validate_page(None), PageId::Home);
//! assert_eq!(validate_page(Some("")), PageId::Home);
//! assert_eq!(validate_page(Some("sponsors")), PageId::Sponsors);
//! assert_eq!(validate_page(Some("nonexistent")), PageId::Lost);
//! ```

use std::fmt;
use std::str::FromStr;

/// A known page of the shell. [`PageId::Lost`] is the not-found fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Home,
    Favourites,
    Talk,
    Privacy,
    Terms,
    Sponsors,
    Lost,
}

impl PageId {
    /// Every page, in navigation-menu order.
    pub const ALL: [PageId; 7] = [
        PageId::Home,
        PageId::Favourites,
        PageId::Talk,
        PageId::Privacy,
        PageId::Terms,
        PageId::Sponsors,
        PageId::Lost,
    ];

    /// The route name of the page, as it appears in `params.page`.
    pub const fn as_str(self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::Favourites => "favourites",
            PageId::Talk => "talk",
            PageId::Privacy => "privacy",
            PageId::Terms => "terms",
            PageId::Sponsors => "sponsors",
            PageId::Lost => "lost",
        }
    }

    /// Canonical URL for links to this page.
    ///
    /// `Talk` needs an id and has no canonical URL of its own, so it points
    /// at `/talk` which resolves through the one-segment route.
    pub fn href(self) -> String {
        format!("/{}", self.as_str())
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`PageId::from_str`] for names outside the enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPage(pub String);

impl fmt::Display for UnknownPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown page: {}", self.0)
    }
}

impl std::error::Error for UnknownPage {}

impl FromStr for PageId {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageId::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

/// Map a candidate page name to a [`PageId`]. Total: never fails.
///
/// - absent or empty → [`PageId::Home`]
/// - a known name (case-sensitive) → that page
/// - anything else → [`PageId::Lost`]
pub fn validate_page(candidate: Option<&str>) -> PageId {
    match candidate {
        None | Some("") => PageId::Home,
        Some(name) => name.parse().unwrap_or(PageId::Lost),
    }
}
