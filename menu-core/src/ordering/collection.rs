//! Local mirror of an ordered list

use shared::models::{Category, Product, SliderItem};

use super::gesture::{DragEvent, DragGesture, Reorder};

/// An entity shown in a user-chosen order
pub trait OrderedEntity {
    fn id(&self) -> &str;

    /// Stored position; `None` when position is the array index alone
    fn sort_order(&self) -> Option<i32> {
        None
    }

    fn set_sort_order(&mut self, _position: i32) {}
}

impl OrderedEntity for Category {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_order(&self) -> Option<i32> {
        Some(self.sort_order)
    }

    fn set_sort_order(&mut self, position: i32) {
        self.sort_order = position;
    }
}

impl OrderedEntity for Product {
    fn id(&self) -> &str {
        &self.id
    }

    fn sort_order(&self) -> Option<i32> {
        Some(self.sort_order)
    }

    fn set_sort_order(&mut self, position: i32) {
        self.sort_order = position;
    }
}

impl OrderedEntity for SliderItem {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Single-element move: remove at `from`, insert at `to`.
///
/// Out-of-range indices leave the list untouched and return false.
pub fn move_item<T>(list: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= list.len() || to >= list.len() {
        return false;
    }
    if from != to {
        let item = list.remove(from);
        list.insert(to, item);
    }
    true
}

fn position(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

/// Items of one parent scope, in display order, plus the drag gesture
/// driving them.
#[derive(Debug, Clone)]
pub struct OrderedCollection<T> {
    items: Vec<T>,
    gesture: DragGesture,
}

impl<T: OrderedEntity> OrderedCollection<T> {
    /// Build from rows, sorted by stored position. Ties keep input order.
    pub fn new(mut items: Vec<T>) -> Self {
        items.sort_by_key(|item| item.sort_order().unwrap_or(0));
        Self {
            items,
            gesture: DragGesture::default(),
        }
    }

    pub fn with_activation_distance(mut self, distance: f64) -> Self {
        self.gesture = DragGesture::new(distance);
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn gesture(&self) -> &DragGesture {
        &self.gesture
    }

    /// Move `active_id` to the index currently held by `over_id`.
    ///
    /// On success the local positions are renumbered to array index and the
    /// full id order to persist is returned. Unknown ids or `active == over`
    /// change nothing.
    pub fn apply_move(&mut self, active_id: &str, over_id: &str) -> Option<Vec<String>> {
        if active_id == over_id {
            return None;
        }
        let from = self.index_of(active_id)?;
        let to = self.index_of(over_id)?;
        move_item(&mut self.items, from, to);
        self.renumber();
        Some(self.ids())
    }

    /// Feed a pointer event; a completed drag applies its move
    pub fn handle(&mut self, event: DragEvent) -> Option<Vec<String>> {
        let Reorder { active_id, over_id } = self.gesture.handle(event)?;
        self.apply_move(&active_id, &over_id)
    }

    /// Append at the end; returns the position it took
    pub fn push(&mut self, mut item: T) -> i32 {
        let at = position(self.items.len());
        item.set_sort_order(at);
        self.items.push(item);
        at
    }

    /// Drop an item. Siblings keep their stored positions.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.index_of(id)?;
        Some(self.items.remove(index))
    }

    /// Replace an item in place, keeping its slot
    pub fn replace(&mut self, item: T) -> bool {
        match self.index_of(item.id()) {
            Some(index) => {
                self.items[index] = item;
                true
            }
            None => false,
        }
    }

    fn renumber(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.set_sort_order(position(index));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, sort_order: i32) -> Category {
        Category {
            id: id.into(),
            business_id: "b1".into(),
            name: id.to_uppercase(),
            image: None,
            sort_order,
            is_active: true,
        }
    }

    fn abcd() -> OrderedCollection<Category> {
        OrderedCollection::new(vec![
            category("a", 0),
            category("b", 1),
            category("c", 2),
            category("d", 3),
        ])
    }

    #[test]
    fn test_move_item_is_a_move_not_a_swap() {
        let mut list = vec!["A", "B", "C", "D"];
        assert!(move_item(&mut list, 0, 2));
        assert_eq!(list, ["B", "C", "A", "D"]);

        assert!(move_item(&mut list, 3, 0));
        assert_eq!(list, ["D", "B", "C", "A"]);
    }

    #[test]
    fn test_move_item_out_of_range() {
        let mut list = vec![1, 2];
        assert!(!move_item(&mut list, 0, 5));
        assert_eq!(list, [1, 2]);
    }

    #[test]
    fn test_new_sorts_by_position() {
        let collection =
            OrderedCollection::new(vec![category("x", 2), category("y", 0), category("z", 1)]);
        assert_eq!(collection.ids(), ["y", "z", "x"]);
    }

    #[test]
    fn test_apply_move_renumbers() {
        let mut collection = abcd();
        let ids = collection.apply_move("a", "c").unwrap();
        assert_eq!(ids, ["b", "c", "a", "d"]);
        let positions: Vec<i32> = collection.items().iter().map(|c| c.sort_order).collect();
        assert_eq!(positions, [0, 1, 2, 3]);
        assert_eq!(collection.get("a").unwrap().sort_order, 2);
    }

    #[test]
    fn test_apply_move_ignores_unknown_and_self() {
        let mut collection = abcd();
        assert!(collection.apply_move("a", "a").is_none());
        assert!(collection.apply_move("a", "zzz").is_none());
        assert_eq!(collection.ids(), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_drag_events_drive_moves() {
        let mut collection = abcd().with_activation_distance(4.0);
        collection.handle(DragEvent::PointerDown {
            id: "d".into(),
            x: 0.0,
            y: 300.0,
        });
        collection.handle(DragEvent::PointerMove { x: 0.0, y: 10.0 });
        let ids = collection
            .handle(DragEvent::PointerUp {
                over: Some("a".into()),
            })
            .unwrap();
        assert_eq!(ids, ["d", "a", "b", "c"]);
    }

    #[test]
    fn test_push_and_remove_do_not_renumber_siblings() {
        let mut collection = abcd();
        assert_eq!(collection.push(category("e", 99)), 4);
        collection.remove("b").unwrap();
        let positions: Vec<i32> = collection.items().iter().map(|c| c.sort_order).collect();
        assert_eq!(positions, [0, 2, 3, 4]);
    }

    #[test]
    fn test_slider_items_order_by_index() {
        let slide = |id: &str| SliderItem {
            id: id.into(),
            title: id.into(),
            subtitle: None,
            image: format!("{id}.jpg"),
            link: None,
            is_active: true,
        };
        let mut slides = OrderedCollection::new(vec![slide("s1"), slide("s2"), slide("s3")]);
        assert_eq!(slides.apply_move("s3", "s1").unwrap(), ["s3", "s1", "s2"]);
    }
}
