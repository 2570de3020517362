//! Revealable items and the append-only revealed set

use itertools::Itertools;
use serde::Serialize;

/// Something the player has to uncover: a player slot, an orbit element or
/// a club of a trajectory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    /// Identity used for deduplication
    pub id: String,
    /// Name the server reveals by
    pub name: String,
    /// Position code, element kind or country
    pub category: String,
    /// Secondary fact disclosed by hints (nationality, period, ...)
    pub detail: Option<String>,
    /// Image reference as received from the API
    pub image: Option<String>,
}

/// How an item came to be revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RevealCause {
    /// A correct guess named it
    Guess,
    /// A wrong guess uncovered it as consolation
    Consolation,
    /// The player spent a life on it
    Paid,
    /// The player gave up
    Surrender,
}

/// The items of a session and which of them are revealed
///
/// Reveals are append-only: nothing is ever hidden again, and each item is
/// revealed at most once.
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    items: Vec<Item>,
    revealed: Vec<Option<RevealCause>>,
    order: Vec<usize>,
}

fn normalize(name: &str) -> String {
    name.split_whitespace().join(" ").to_lowercase()
}

impl Board {
    /// Creates a board with every item hidden
    pub fn new(items: Vec<Item>) -> Self {
        let revealed = vec![None; items.len()];
        Self {
            items,
            revealed,
            order: Vec::new(),
        }
    }

    /// All items in their original order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items
    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Number of revealed items
    pub fn revealed_count(&self) -> usize {
        self.order.len()
    }

    /// Number of items revealed by the given cause
    pub fn revealed_by(&self, cause: RevealCause) -> usize {
        self.revealed
            .iter()
            .filter(|state| **state == Some(cause))
            .count()
    }

    /// Whether the item at `index` is revealed
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).is_some_and(Option::is_some)
    }

    /// Why the item at `index` was revealed, if it was
    pub fn cause(&self, index: usize) -> Option<RevealCause> {
        self.revealed.get(index).copied().flatten()
    }

    /// Whether every item is revealed
    pub fn all_revealed(&self) -> bool {
        self.order.len() == self.items.len()
    }

    /// Revealed items in the order they were revealed
    pub fn revealed_items(&self) -> impl Iterator<Item = &Item> {
        self.order.iter().map(|&index| &self.items[index])
    }

    /// Hidden items with their indices
    pub fn hidden(&self) -> impl Iterator<Item = (usize, &Item)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.is_revealed(*index))
    }

    /// Index of the item whose id or name matches `name`
    pub fn find(&self, name: &str) -> Option<usize> {
        let wanted = normalize(name);
        self.items
            .iter()
            .position(|item| item.id == name || normalize(&item.name) == wanted)
    }

    /// Reveals the item at `index`
    ///
    /// Returns `true` only if the item was hidden before.
    pub fn reveal(&mut self, index: usize, cause: RevealCause) -> bool {
        let Some(state) = self.revealed.get_mut(index) else {
            return false;
        };
        if state.is_some() {
            return false;
        }
        *state = Some(cause);
        self.order.push(index);
        true
    }

    /// Reveals the first hidden item in original order
    pub fn reveal_next(&mut self, cause: RevealCause) -> Option<usize> {
        let index = self.hidden().map(|(index, _)| index).next()?;
        self.reveal(index, cause);
        Some(index)
    }

    /// Reveals every hidden item, returning how many were hidden
    pub fn reveal_all(&mut self, cause: RevealCause) -> usize {
        (0..self.items.len())
            .filter(|&index| self.reveal(index, cause))
            .count()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn item(id: &str, name: &str, category: &str) -> Item {
        Item {
            id: id.to_owned(),
            name: name.to_owned(),
            category: category.to_owned(),
            detail: None,
            image: None,
        }
    }

    fn board() -> Board {
        Board::new(vec![
            item("0", "Marco Ruben", "CT"),
            item("1", "Ignacio Malcorra", "MI"),
            item("2", "Jorge Broun", "PO"),
        ])
    }

    #[test]
    fn test_new_board_is_hidden() {
        let board = board();
        assert_eq!(board.total(), 3);
        assert_eq!(board.revealed_count(), 0);
        assert_eq!(board.hidden().count(), 3);
        assert!(!board.all_revealed());
    }

    #[test]
    fn test_reveal_is_idempotent() {
        let mut board = board();
        assert!(board.reveal(1, RevealCause::Guess));
        assert!(!board.reveal(1, RevealCause::Surrender));
        assert_eq!(board.revealed_count(), 1);
        assert_eq!(board.cause(1), Some(RevealCause::Guess));
        assert!(!board.reveal(7, RevealCause::Guess));
    }

    #[test]
    fn test_find_ignores_case_and_spacing() {
        let board = board();
        assert_eq!(board.find("marco  ruben"), Some(0));
        assert_eq!(board.find("JORGE BROUN"), Some(2));
        assert_eq!(board.find("1"), Some(1));
        assert_eq!(board.find("Lo Celso"), None);
    }

    #[test]
    fn test_reveal_next_follows_original_order() {
        let mut board = board();
        board.reveal(0, RevealCause::Guess);
        assert_eq!(board.reveal_next(RevealCause::Paid), Some(1));
        assert_eq!(board.reveal_next(RevealCause::Consolation), Some(2));
        assert_eq!(board.reveal_next(RevealCause::Paid), None);
        assert!(board.all_revealed());
    }

    #[test]
    fn test_reveal_all_keeps_earlier_causes() {
        let mut board = board();
        board.reveal(2, RevealCause::Guess);
        assert_eq!(board.reveal_all(RevealCause::Surrender), 2);
        assert_eq!(board.revealed_by(RevealCause::Guess), 1);
        assert_eq!(board.revealed_by(RevealCause::Surrender), 2);
        let order: Vec<_> = board.revealed_items().map(|item| item.id.as_str()).collect();
        assert_eq!(order, ["2", "0", "1"]);
    }
}
