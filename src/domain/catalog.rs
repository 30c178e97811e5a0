//! Menu search, price sorting and order history ordering.

use std::cmp::Ordering;
use std::fmt;

use crate::domain::entities::{FoodItem, Order};

/// Case-insensitive substring match; a blank query matches everything.
#[must_use]
pub fn matches_title(title: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || title.to_lowercase().contains(&query.to_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "ascending"),
            Self::Descending => write!(f, "descending"),
        }
    }
}

/// Sort button state: each press sorts in the pending direction, then flips it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortToggle {
    next: SortDirection,
}

impl SortToggle {
    #[must_use]
    pub const fn starting(direction: SortDirection) -> Self {
        Self { next: direction }
    }

    /// Direction the next press will sort in.
    #[must_use]
    pub const fn next_direction(&self) -> SortDirection {
        self.next
    }

    /// Stable-sorts `items` by `compare` in the pending direction and flips.
    ///
    /// Returns the direction that was applied.
    pub fn apply<T, F>(&mut self, items: &mut [T], mut compare: F) -> SortDirection
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let applied = self.next;
        match applied {
            SortDirection::Ascending => items.sort_by(|a, b| compare(a, b)),
            SortDirection::Descending => items.sort_by(|a, b| compare(b, a)),
        }
        self.next = applied.reversed();
        applied
    }
}

/// Searchable, sortable view over the loaded menu.
#[derive(Debug, Clone, Default)]
pub struct MenuView {
    items: Vec<FoodItem>,
    visible: Vec<FoodItem>,
    query: String,
    price_sort: SortToggle,
}

impl MenuView {
    #[must_use]
    pub fn new(items: Vec<FoodItem>) -> Self {
        Self {
            visible: items.clone(),
            items,
            query: String::new(),
            price_sort: SortToggle::default(),
        }
    }

    /// Items currently shown.
    #[must_use]
    pub fn visible(&self) -> &[FoodItem] {
        &self.visible
    }

    /// Every loaded item regardless of the query.
    #[must_use]
    pub fn all(&self) -> &[FoodItem] {
        &self.items
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn find(&self, id: crate::domain::entities::FoodItemId) -> Option<&FoodItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Replaces the search query and recomputes the view from all items.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
    }

    /// Sorts the visible items by price and toggles the direction.
    pub fn sort_by_price(&mut self) -> SortDirection {
        self.price_sort
            .apply(&mut self.visible, |a, b| a.price.cmp(&b.price))
    }

    /// Sorts by price in a fixed direction; the next toggle goes the other way.
    pub fn sort_by_price_in(&mut self, direction: SortDirection) -> SortDirection {
        self.price_sort = SortToggle::starting(direction);
        self.sort_by_price()
    }

    /// Pending direction of the price sort button.
    #[must_use]
    pub const fn next_price_direction(&self) -> SortDirection {
        self.price_sort.next_direction()
    }

    /// Replaces an item by id after a successful write.
    pub fn patch(&mut self, item: FoodItem) {
        for list in [&mut self.items, &mut self.visible] {
            if let Some(slot) = list.iter_mut().find(|i| i.id == item.id) {
                *slot = item.clone();
            }
        }
    }

    /// Appends a newly created item.
    pub fn push(&mut self, item: FoodItem) {
        self.items.push(item);
        self.refilter();
    }

    fn refilter(&mut self) {
        self.visible = self
            .items
            .iter()
            .filter(|item| matches_title(&item.title, &self.query))
            .cloned()
            .collect();
    }
}

/// Order history with the date sort button.
#[derive(Debug, Clone, Default)]
pub struct HistoryView {
    orders: Vec<Order>,
    date_sort: SortToggle,
}

impl HistoryView {
    #[must_use]
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders,
            date_sort: SortToggle::default(),
        }
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Sorts by creation time and toggles the direction.
    pub fn sort_by_date(&mut self) -> SortDirection {
        self.date_sort
            .apply(&mut self.orders, |a, b| a.created_at.cmp(&b.created_at))
    }

    pub fn sort_by_date_in(&mut self, direction: SortDirection) -> SortDirection {
        self.date_sort = SortToggle::starting(direction);
        self.sort_by_date()
    }
}
