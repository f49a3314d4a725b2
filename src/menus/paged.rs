//! Paginated menu over an arbitrary collection of elements.
//!
//! The last two rows are reserved for controls. Elements fill the remaining
//! slots in source order, one page at a time.

use crate::host::{Click, UserId};
use crate::item::Item;
use crate::menu::{Menu, MenuCommand, MenuCore, OpenRequest, ROW_WIDTH, SlotGrid};
use anyhow::Result;
use log::debug;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

const FIRST_PAGE: usize = 1;
const CONTROL_SLOTS: usize = ROW_WIDTH * 2;
const MIN_ROWS: usize = 3;

/// Supplies the elements of a [`PagedMenu`] and reacts to their selection
pub trait PageSource: Send {
    type Element: Clone + PartialEq;

    /// Recover the element behind a clicked item, if any
    fn to_element(&self, item: &Item) -> Option<Self::Element>;

    /// Item shown for an element; the empty item hides it
    fn to_item(&self, element: &Self::Element) -> Item;

    /// Current elements for a user, in display order
    fn source(&self, user: UserId) -> Vec<Self::Element>;

    fn on_select(
        &self,
        click: &Click,
        element: Self::Element,
        attachment: Option<&Value>,
    ) -> MenuCommand;
}

pub struct PagedMenu<S: PageSource> {
    core: MenuCore,
    source: S,
    pages: HashMap<UserId, usize>,
    max_rows: Option<usize>,
}

impl<S: PageSource> PagedMenu<S> {
    pub fn new(title: &str, source: S) -> Self {
        Self {
            core: MenuCore::new(title),
            source,
            pages: HashMap::new(),
            max_rows: None,
        }
    }

    /// Override the configured row limit for this menu
    pub fn with_max_rows(mut self, rows: usize) -> Self {
        self.max_rows = Some(rows);
        self
    }

    pub fn main_menu(mut self) -> Self {
        self.core.set_main_menu(true);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
            .unwrap_or(self.core.config().pagination.max_rows)
            .max(MIN_ROWS)
    }

    /// Source elements that render to a visible item
    pub fn elements(&self, user: UserId) -> Vec<S::Element> {
        self.source
            .source(user)
            .into_iter()
            .filter(|element| !self.source.to_item(element).is_empty())
            .collect()
    }

    fn size_for(&self, count: usize) -> usize {
        let wanted = (count / ROW_WIDTH + 1) * ROW_WIDTH + CONTROL_SLOTS;
        wanted.min(self.max_rows() * ROW_WIDTH)
    }

    /// Slots per page available to elements
    pub fn usable_slots(&self, user: UserId) -> usize {
        self.size(user) - CONTROL_SLOTS
    }

    /// Elements of every page, keyed by page number starting at 1.
    ///
    /// An element is placed once, on the first page it fits.
    pub fn page_map(&self, user: UserId) -> BTreeMap<usize, Vec<S::Element>> {
        let elements = self.elements(user);
        let usable = self.size_for(elements.len()) - CONTROL_SLOTS;
        paginate(elements, usable)
    }

    pub fn current_page(&self, user: UserId) -> usize {
        self.pages.get(&user).copied().unwrap_or(FIRST_PAGE)
    }

    fn previous_button(&self) -> Item {
        self.core.tag(&self.core.config().controls.previous_page.build())
    }

    fn next_button(&self) -> Item {
        self.core.tag(&self.core.config().controls.next_page.build())
    }

    fn page_info(&self, page: usize) -> Item {
        let style = &self.core.config().controls.page_info;
        let name = style.name.replace("{page}", &page.to_string());
        self.core.tag(&style.build_named(&name))
    }

    fn turn_to(&mut self, user: UserId, page: usize) -> MenuCommand {
        if !self.page_map(user).contains_key(&page) {
            debug!("{} asked for missing page {} of {}", user, page, self.core.id());
            return MenuCommand::message(self.core.config().messages.missing_page.clone());
        }

        self.pages.insert(user, page);
        MenuCommand::Redraw
    }
}

fn paginate<E: Clone + PartialEq>(elements: Vec<E>, usable: usize) -> BTreeMap<usize, Vec<E>> {
    let mut unique: Vec<E> = Vec::with_capacity(elements.len());

    for element in elements {
        if !unique.contains(&element) {
            unique.push(element);
        }
    }

    unique
        .chunks(usable.max(1))
        .enumerate()
        .map(|(index, page)| (index + FIRST_PAGE, page.to_vec()))
        .collect()
}

impl<S: PageSource> Menu for PagedMenu<S> {
    fn core(&self) -> &MenuCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut MenuCore {
        &mut self.core
    }

    fn size(&self, user: UserId) -> usize {
        self.size_for(self.elements(user).len())
    }

    fn items(&self, user: UserId) -> Vec<Item> {
        self.elements(user)
            .iter()
            .map(|element| self.source.to_item(element))
            .collect()
    }

    fn render(&self, user: UserId) -> SlotGrid {
        let elements = self.elements(user);
        let size = self.size_for(elements.len());
        let page = self.current_page(user);
        let mut pages = paginate(elements, size - CONTROL_SLOTS);
        let mut grid = SlotGrid::new(self.core.title(), size);

        for element in pages.remove(&page).unwrap_or_default() {
            grid.add_item(self.core.tag(&self.source.to_item(&element)));
        }

        grid.set(size - ROW_WIDTH, self.previous_button());
        grid.set(size - 5, self.page_info(page));
        grid.set(size - 2, self.core.back_button());
        grid.set(size - 1, self.next_button());
        grid
    }

    fn open(&mut self, user: UserId, request: OpenRequest) -> Result<SlotGrid> {
        self.core.open(user, request.attachment);
        self.pages.insert(user, FIRST_PAGE);
        Ok(self.render(user))
    }

    fn handle(&mut self, click: &Click) -> MenuCommand {
        let user = click.user;
        let page = self.current_page(user);

        if click.item.is_similar(&self.previous_button()) {
            return match page.checked_sub(1) {
                Some(previous) => self.turn_to(user, previous),
                None => MenuCommand::None,
            };
        }

        if click.item.is_similar(&self.next_button()) {
            return self.turn_to(user, page + 1);
        }

        if click.item.is_similar(&self.page_info(page)) {
            return MenuCommand::None;
        }

        match self.source.to_element(&click.item) {
            Some(element) => self
                .source
                .on_select(click, element, self.core.attachment(user)),
            None => MenuCommand::None,
        }
    }

    fn close(&mut self, user: UserId) {
        self.pages.remove(&user);
        self.core.close(user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::View;
    use crate::item::ItemBuilder;
    use serde_json::json;

    /// Numbers shown as paper named after themselves; zero is hidden
    struct Numbers(Vec<u32>);

    impl PageSource for Numbers {
        type Element = u32;

        fn to_element(&self, item: &Item) -> Option<u32> {
            item.display_name.as_deref()?.parse().ok()
        }

        fn to_item(&self, element: &u32) -> Item {
            if *element == 0 {
                return Item::empty();
            }
            ItemBuilder::new("PAPER").display_name(&element.to_string()).build()
        }

        fn source(&self, _user: UserId) -> Vec<u32> {
            self.0.clone()
        }

        fn on_select(&self, _click: &Click, element: u32, attachment: Option<&Value>) -> MenuCommand {
            MenuCommand::message(format!("{} {:?}", element, attachment))
        }
    }

    fn menu_of(count: u32, max_rows: usize) -> PagedMenu<Numbers> {
        PagedMenu::new("Numbers", Numbers((1..=count).collect())).with_max_rows(max_rows)
    }

    fn click(grid: &SlotGrid, user: UserId, slot: usize) -> Click {
        let view = View::new(user, grid.title(), grid.size());
        Click::new(user, view, grid.get(slot).cloned().unwrap()).at_slot(slot)
    }

    #[test]
    fn test_size_reserves_two_control_rows() {
        let user = UserId::new();

        assert_eq!(menu_of(0, 6).size(user), 27);
        assert_eq!(menu_of(8, 6).size(user), 27);
        assert_eq!(menu_of(9, 6).size(user), 36);
        assert_eq!(menu_of(25, 6).size(user), 45);
        assert_eq!(menu_of(100, 6).size(user), 54);
        assert_eq!(menu_of(25, 4).size(user), 36);
    }

    #[test]
    fn test_row_limit_has_a_floor() {
        assert_eq!(menu_of(100, 1).size(UserId::new()), 27);
        assert_eq!(menu_of(100, 1).usable_slots(UserId::new()), 9);
    }

    #[test]
    fn test_twenty_five_elements_over_eighteen_slots() {
        let menu = menu_of(25, 4);
        let pages = menu.page_map(UserId::new());

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[&1], (1..=18).collect::<Vec<_>>());
        assert_eq!(pages[&2], (19..=25).collect::<Vec<_>>());
    }

    #[test]
    fn test_pages_partition_unique_visible_elements() {
        let source = Numbers(vec![1, 2, 0, 2, 3, 4, 5, 6, 7, 8, 9, 10, 1, 11, 0, 12]);
        let menu = PagedMenu::new("Numbers", source).with_max_rows(3);
        let pages = menu.page_map(UserId::new());

        let flattened: Vec<u32> = pages.values().flatten().copied().collect();
        assert_eq!(flattened, (1..=12).collect::<Vec<_>>());
        assert_eq!(pages.len(), 12usize.div_ceil(9));
        assert!(pages.values().all(|page| page.len() <= 9));
    }

    #[test]
    fn test_render_layout() {
        let mut menu = menu_of(25, 4);
        let user = UserId::new();
        let grid = menu.open(user, OpenRequest::new()).unwrap();

        assert_eq!(grid.size(), 36);
        assert_eq!(grid.get(0).unwrap().display_name.as_deref(), Some("1"));
        assert_eq!(grid.get(17).unwrap().display_name.as_deref(), Some("18"));
        assert!(grid.get(18).is_none());
        assert_eq!(grid.get(27), Some(&menu.previous_button()));
        assert_eq!(grid.get(31), Some(&menu.page_info(1)));
        assert_eq!(grid.get(34), Some(&menu.core().back_button()));
        assert_eq!(grid.get(35), Some(&menu.next_button()));
        assert_eq!(
            grid.get(31).unwrap().display_name.as_deref(),
            Some("§aPage Number:§e 1")
        );
        assert!(grid.iter().all(|(_, item)| menu.core().verify(item)));
    }

    #[test]
    fn test_page_flipping() {
        let mut menu = menu_of(25, 4);
        let user = UserId::new();
        let grid = menu.open(user, OpenRequest::new()).unwrap();

        assert!(matches!(menu.handle(&click(&grid, user, 35)), MenuCommand::Redraw));
        assert_eq!(menu.current_page(user), 2);

        let grid = menu.render(user);
        assert_eq!(grid.get(0).unwrap().display_name.as_deref(), Some("19"));
        assert_eq!(grid.iter().filter(|(slot, _)| *slot < 18).count(), 7);

        match menu.handle(&click(&grid, user, 35)) {
            MenuCommand::Message(text) => assert_eq!(text, "&cThis page does not exist."),
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(menu.current_page(user), 2);

        assert!(matches!(menu.handle(&click(&grid, user, 27)), MenuCommand::Redraw));
        assert_eq!(menu.current_page(user), 1);

        assert!(matches!(
            menu.handle(&click(&grid, user, 27)),
            MenuCommand::Message(_)
        ));
        assert_eq!(menu.current_page(user), 1);
    }

    #[test]
    fn test_page_info_click_is_ignored() {
        let mut menu = menu_of(5, 6);
        let user = UserId::new();
        let grid = menu.open(user, OpenRequest::new()).unwrap();

        assert!(matches!(menu.handle(&click(&grid, user, 22)), MenuCommand::None));
    }

    #[test]
    fn test_element_selection_gets_attachment() {
        let mut menu = menu_of(5, 6);
        let user = UserId::new();
        let grid = menu
            .open(user, OpenRequest::new().attachment(Some(json!(42))))
            .unwrap();

        match menu.handle(&click(&grid, user, 2)) {
            MenuCommand::Message(text) => assert_eq!(text, "3 Some(Number(42))"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_close_forgets_page() {
        let mut menu = menu_of(25, 4);
        let user = UserId::new();
        let grid = menu.open(user, OpenRequest::new()).unwrap();
        menu.handle(&click(&grid, user, 35));

        menu.close(user);
        assert_eq!(menu.current_page(user), 1);
        assert!(!menu.core().is_open(user));
    }
}
