//! Navigation menu state
//!
//! `NavMenu` is the burger toggle; `SectionTracker` picks the active link
//! from IntersectionObserver batches.

/// Where keyboard focus goes after a menu change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// First link inside the menu
    FirstLink,
    /// The toggle button
    Toggle,
}

/// Result of a menu transition, applied to the DOM by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuChange {
    pub open: bool,
    pub focus: Focus,
}

impl MenuChange {
    /// Value for the toggle's `aria-expanded`
    pub fn aria_expanded(&self) -> &'static str {
        if self.open { "true" } else { "false" }
    }
}

/// Burger menu open/closed state
#[derive(Debug, Clone, Default)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Toggle button pressed
    pub fn toggle(&mut self) -> MenuChange {
        self.open = !self.open;
        MenuChange {
            open: self.open,
            focus: if self.open {
                Focus::FirstLink
            } else {
                Focus::Toggle
            },
        }
    }

    /// A menu link was followed; closes an open menu
    pub fn link_activated(&mut self) -> Option<MenuChange> {
        if !self.open {
            return None;
        }
        self.open = false;
        Some(MenuChange {
            open: false,
            focus: Focus::Toggle,
        })
    }
}

/// Keys that activate a focused link like a click
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

/// Tracks which section's link is highlighted
#[derive(Debug, Clone, Default)]
pub struct SectionTracker {
    /// Section ids that have a matching `href="#id"` link
    linked: Vec<String>,
    active: Option<String>,
}

impl SectionTracker {
    pub fn new<I, T>(linked: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            linked: linked.into_iter().map(Into::into).collect(),
            active: None,
        }
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Apply one observer batch of `(section_id, is_intersecting)` entries.
    ///
    /// Each intersecting entry clears the current highlight and highlights
    /// its own link if it has one, so the last one in the batch wins.
    pub fn observe<'a>(&mut self, entries: impl IntoIterator<Item = (&'a str, bool)>) -> Option<&str> {
        for (id, intersecting) in entries {
            if !intersecting {
                continue;
            }
            self.active = self
                .linked
                .iter()
                .any(|l| l == id)
                .then(|| id.to_string());
        }
        self.active()
    }

    /// Whether the link pointing at `href` should carry the active class
    pub fn is_active_href(&self, href: &str) -> bool {
        match (&self.active, href.strip_prefix('#')) {
            (Some(active), Some(id)) => active == id,
            _ => false,
        }
    }
}
