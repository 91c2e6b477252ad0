//! Ordered list helpers for editor-managed items (rows, cells, options, ...)
//!
//! Invariant kept by every mutating helper: `order` equals the array index,
//! i.e. orders form a dense `0..n-1` sequence.

/// An item of an ordered editor list
pub trait ListItem {
    /// Stable identity of the item inside its list
    fn item_key(&self) -> &str;
    fn order(&self) -> i32;
    fn set_order(&mut self, order: i32);
}

/// Copy of `items` sorted by `order` (stable for equal orders)
pub fn sort_by_order<T: ListItem + Clone>(items: &[T]) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| item.order());
    sorted
}

/// Renumber orders to match positions
pub fn reorder<T: ListItem>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_order(index as i32);
    }
}

/// Append `item` unless the list already holds `limit` items
pub fn push_item<T: ListItem>(items: &mut Vec<T>, mut item: T, limit: usize) -> bool {
    if items.len() >= limit {
        return false;
    }
    item.set_order(items.len() as i32);
    items.push(item);
    true
}

/// Remove the item with `key` and renumber the rest
pub fn remove_item<T: ListItem>(items: &mut Vec<T>, key: &str) -> Option<T> {
    let index = items.iter().position(|item| item.item_key() == key)?;
    let removed = items.remove(index);
    reorder(items);
    Some(removed)
}

/// Move an item from one position to another and renumber
pub fn move_item<T: ListItem>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    reorder(items);
    true
}

pub fn find_item<'a, T: ListItem>(items: &'a [T], key: &str) -> Option<&'a T> {
    items.iter().find(|item| item.item_key() == key)
}

pub fn find_item_mut<'a, T: ListItem>(items: &'a mut [T], key: &str) -> Option<&'a mut T> {
    items.iter_mut().find(|item| item.item_key() == key)
}

/// `true` when orders are exactly `0..n-1` in array order
pub fn is_dense<T: ListItem>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(index, item)| item.order() == index as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        key: String,
        order: i32,
    }

    impl ListItem for Item {
        fn item_key(&self) -> &str {
            &self.key
        }
        fn order(&self) -> i32 {
            self.order
        }
        fn set_order(&mut self, order: i32) {
            self.order = order;
        }
    }

    fn item(key: &str) -> Item {
        Item { key: key.into(), order: -1 }
    }

    #[test]
    fn test_push_respects_limit() {
        let mut items = Vec::new();
        assert!(push_item(&mut items, item("a"), 2));
        assert!(push_item(&mut items, item("b"), 2));
        assert!(!push_item(&mut items, item("c"), 2));
        assert_eq!(items.len(), 2);
        assert!(is_dense(&items));
    }

    #[test]
    fn test_remove_renumbers() {
        let mut items = Vec::new();
        for key in ["a", "b", "c", "d"] {
            push_item(&mut items, item(key), 10);
        }
        assert!(remove_item(&mut items, "b").is_some());
        assert!(is_dense(&items));
        let keys: Vec<_> = items.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "c", "d"]);
        assert!(remove_item(&mut items, "zzz").is_none());
    }

    #[test]
    fn test_move_and_sort() {
        let mut items = Vec::new();
        for key in ["a", "b", "c"] {
            push_item(&mut items, item(key), 10);
        }
        assert!(move_item(&mut items, 2, 0));
        assert!(is_dense(&items));
        assert_eq!(items[0].key, "c");
        assert!(!move_item(&mut items, 5, 0));

        let shuffled = vec![
            Item { key: "x".into(), order: 2 },
            Item { key: "y".into(), order: 0 },
        ];
        let sorted = sort_by_order(&shuffled);
        assert_eq!(sorted[0].key, "y");
    }
}
