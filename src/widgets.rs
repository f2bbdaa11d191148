//! GPUI components for the shell.
//!
//! - [`PageOutlet`] / [`page_outlet`] renders the active page's module with
//!   the current [`PageProps`](crate::PageProps). Until the page's module is
//!   activated the region is empty.
//! - [`NavLink`] / [`nav_link`] is a clickable link that navigates through
//!   [`Shell::navigate`] and highlights itself when its page is current.

use crate::context::{GlobalShell, Shell};
use crate::page::PageId;
use crate::trace_log;
use gpui::*;

// ============================================================================
// PageOutlet
// ============================================================================

/// Renders the active page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageOutlet;

impl PageOutlet {
    pub fn new() -> Self {
        Self
    }
}

impl Render for PageOutlet {
    fn render(&mut self, window: &mut Window, cx: &mut Context<'_, Self>) -> impl IntoElement {
        page_outlet(window, cx)
    }
}

/// Functional form of [`PageOutlet`].
pub fn page_outlet(window: &mut Window, cx: &mut App) -> AnyElement {
    // Clone out of the global so the module can borrow `cx` mutably.
    let resolved = {
        let Some(shell) = cx.try_global::<GlobalShell>() else {
            return div().into_any_element();
        };
        shell
            .current_module()
            .cloned()
            .map(|module| (module, shell.state().props()))
    };

    match resolved {
        Some((module, props)) => module.render(&props, window, cx),
        None => {
            trace_log!("page_outlet: no active page module yet");
            div().into_any_element()
        }
    }
}

// ============================================================================
// NavLink
// ============================================================================

/// A link to a page of the shell.
///
/// ```ignore
/// NavLink::new(PageId::Favourites)
///     .child("Favourites")
///     .active_class(|div| div.bg(gpui::rgb(0xe3f2fd)))
///     .build(cx)
/// ```
pub struct NavLink {
    page: PageId,
    href: SharedString,
    class: Option<Box<dyn Fn(Div) -> Div>>,
    active_class: Option<Box<dyn Fn(Div) -> Div>>,
    children: Vec<AnyElement>,
}

impl NavLink {
    /// Link to the canonical URL of `page`.
    pub fn new(page: PageId) -> Self {
        Self {
            page,
            href: page.href().into(),
            class: None,
            active_class: None,
            children: Vec::new(),
        }
    }

    /// Link to a specific URL that resolves to `page`, e.g. `/talk/3`.
    pub fn to(page: PageId, href: impl Into<SharedString>) -> Self {
        Self {
            href: href.into(),
            ..Self::new(page)
        }
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn child(mut self, child: impl IntoElement) -> Self {
        self.children.push(child.into_any_element());
        self
    }

    /// Styling applied whether or not the link is active.
    pub fn class(mut self, style: impl Fn(Div) -> Div + 'static) -> Self {
        self.class = Some(Box::new(style));
        self
    }

    /// Styling applied when the link's page is the current page, on top of
    /// [`class`](Self::class).
    pub fn active_class(mut self, style: impl Fn(Div) -> Div + 'static) -> Self {
        self.active_class = Some(Box::new(style));
        self
    }

    pub fn is_active(&self, cx: &App) -> bool {
        cx.try_global::<GlobalShell>()
            .and_then(|shell| shell.state().page())
            == Some(self.page)
    }

    pub fn build<V: 'static>(self, cx: &mut Context<'_, V>) -> Div {
        let is_active = self.is_active(cx);
        let href = self.href.clone();

        let link = div().cursor_pointer().on_mouse_down(
            MouseButton::Left,
            cx.listener(move |_view, _event, _window, cx| {
                Shell::navigate(cx, href.to_string());
            }),
        );

        self.styled(link, is_active)
    }

    fn styled(self, mut link: Div, is_active: bool) -> Div {
        if let Some(class) = self.class {
            link = class(link);
        }
        if is_active {
            if let Some(active_fn) = self.active_class {
                link = active_fn(link);
            }
        }

        for child in self.children {
            link = link.child(child);
        }

        link
    }
}

/// Text link with the built-in active colour.
pub fn nav_link<V: 'static>(
    cx: &mut Context<'_, V>,
    page: PageId,
    label: impl Into<SharedString>,
) -> Div {
    let label: SharedString = label.into();
    NavLink::new(page)
        .class(|link| {
            link.text_color(rgb(0x333333))
                .hover(|this| this.text_color(rgb(0x2196f3)))
        })
        .active_class(|link| link.text_color(rgb(0x2196f3)))
        .child(label)
        .build(cx)
}
