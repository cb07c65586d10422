//! Interactive state of the storefront as an explicit command dispatcher.
//!
//! Tiles, modal controls, sidebar and keyboard all emit [`Command`]s; the
//! [`UiController`] applies them and reports what changed as an [`Effect`].

use std::collections::BTreeMap;

use crate::catalog::CatalogStore;
use crate::category::Category;
use crate::detail::{present, DetailView};
use crate::grid::{render_grid, GridView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(String),
}

impl Key {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }
}

/// Where a click inside a modal landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The modal's own backdrop.
    Root,
    /// Anything inside the modal content.
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ShowDetail { category: Category, id: String },
    CloseModal(Category),
    BackgroundClick { modal: Category, target: ClickTarget },
    KeyDown(Key),
    /// Carousel controls are handled here and never reach the modal's
    /// background-click handling.
    CarouselNext(Category),
    CarouselPrev(Category),
    ToggleSidebar,
    ToggleSubmenu(usize),
    ToggleSection(Category),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Nothing,
    ModalOpened(Category),
    ModalsClosed(Vec<Category>),
    InlineError { category: Category, message: String },
    CarouselMoved { category: Category, index: usize },
    GridPopulated(Category),
    ChromeChanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(Box<DetailView>),
}

impl ModalState {
    pub fn is_open(&self) -> bool { matches!(self, ModalState::Open(_)) }
}

/// Visual classes derived from the sidebar state. The submenu flag is applied
/// to the sidebar container and the document root together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Chrome {
    pub container_expanded: bool,
    pub container_submenu_expanded: bool,
    pub root_menu_expanded: bool,
    pub root_submenu_expanded: bool,
}

pub struct UiController {
    modals: BTreeMap<Category, ModalState>,
    sections: BTreeMap<Category, bool>,
    grids: BTreeMap<Category, GridView>,
    inline_errors: BTreeMap<Category, String>,
    sidebar_open: bool,
    submenus: Vec<bool>,
}

impl UiController {
    pub fn new(submenu_count: usize) -> Self {
        Self {
            modals: Category::ALL.into_iter().map(|c| (c, ModalState::Closed)).collect(),
            sections: Category::ALL.into_iter().map(|c| (c, false)).collect(),
            grids: BTreeMap::new(),
            inline_errors: BTreeMap::new(),
            sidebar_open: false,
            submenus: vec![false; submenu_count],
        }
    }

    /// Render every category's grid from the loaded store.
    pub fn populate_grids(&mut self, store: &CatalogStore) {
        for c in Category::ALL {
            self.grids.insert(c, render_grid(c, store.media(c)));
        }
    }

    /// `None` while the category's grid still shows its loading state.
    pub fn grid(&self, category: Category) -> Option<&GridView> { self.grids.get(&category) }

    pub fn modal(&self, category: Category) -> &ModalState {
        self.modals.get(&category).unwrap_or(&ModalState::Closed)
    }

    pub fn open_modals(&self) -> Vec<Category> {
        self.modals.iter().filter(|(_, m)| m.is_open()).map(|(c, _)| *c).collect()
    }

    pub fn inline_error(&self, category: Category) -> Option<&str> {
        self.inline_errors.get(&category).map(String::as_str)
    }

    pub fn section_expanded(&self, category: Category) -> bool {
        self.sections.get(&category).copied().unwrap_or(false)
    }

    pub fn sidebar_open(&self) -> bool { self.sidebar_open }

    pub fn submenus(&self) -> &[bool] { &self.submenus }

    pub fn any_submenu_open(&self) -> bool { self.submenus.iter().any(|o| *o) }

    pub fn chrome(&self) -> Chrome {
        let submenu = self.sidebar_open && self.any_submenu_open();
        Chrome {
            container_expanded: self.sidebar_open,
            container_submenu_expanded: submenu,
            root_menu_expanded: self.sidebar_open,
            root_submenu_expanded: submenu,
        }
    }

    pub fn dispatch(&mut self, store: &CatalogStore, cmd: Command) -> Effect {
        tracing::debug!(?cmd, "dispatch");
        match cmd {
            Command::ShowDetail { category, id } => self.show_detail(store, category, &id),
            Command::CloseModal(category) => self.close(&[category]),
            Command::BackgroundClick { modal, target: ClickTarget::Root } => self.close(&[modal]),
            Command::BackgroundClick { target: ClickTarget::Content, .. } => Effect::Nothing,
            Command::KeyDown(Key::Escape) => {
                let open = self.open_modals();
                self.close(&open)
            }
            Command::KeyDown(Key::Other(_)) => Effect::Nothing,
            Command::CarouselNext(category) => self.step_carousel(category, true),
            Command::CarouselPrev(category) => self.step_carousel(category, false),
            Command::ToggleSidebar => {
                self.sidebar_open = !self.sidebar_open;
                if !self.sidebar_open {
                    self.submenus.iter_mut().for_each(|s| *s = false);
                }
                Effect::ChromeChanged
            }
            Command::ToggleSubmenu(index) => {
                let Some(open) = self.submenus.get(index).map(|o| !o) else { return Effect::Nothing };
                if open {
                    self.submenus.iter_mut().for_each(|s| *s = false);
                }
                self.submenus[index] = open;
                Effect::ChromeChanged
            }
            Command::ToggleSection(category) => {
                let expanded = self.sections.entry(category).or_insert(false);
                *expanded = !*expanded;
                if *expanded && !self.grids.contains_key(&category) {
                    tracing::info!(%category, "section opened with empty grid, repopulating");
                    self.grids.insert(category, render_grid(category, store.media(category)));
                    return Effect::GridPopulated(category);
                }
                Effect::Nothing
            }
        }
    }

    fn show_detail(&mut self, store: &CatalogStore, category: Category, id: &str) -> Effect {
        match store.lookup(category, id) {
            Ok(entry) => {
                let view = present(category, entry);
                self.modals.insert(category, ModalState::Open(Box::new(view)));
                self.inline_errors.remove(&category);
                Effect::ModalOpened(category)
            }
            Err(e) => {
                tracing::error!(error = %e, "detail lookup failed");
                let message = e.user_message();
                self.inline_errors.insert(category, message.clone());
                Effect::InlineError { category, message }
            }
        }
    }

    fn close(&mut self, categories: &[Category]) -> Effect {
        let mut closed = Vec::new();
        for c in categories {
            if let Some(m) = self.modals.get_mut(c) {
                if m.is_open() {
                    *m = ModalState::Closed;
                    closed.push(*c);
                }
            }
        }
        if closed.is_empty() { Effect::Nothing } else { Effect::ModalsClosed(closed) }
    }

    fn step_carousel(&mut self, category: Category, forward: bool) -> Effect {
        let Some(ModalState::Open(view)) = self.modals.get_mut(&category) else { return Effect::Nothing };
        let index = if forward { view.carousel.next() } else { view.carousel.prev() };
        Effect::CarouselMoved { category, index }
    }
}
