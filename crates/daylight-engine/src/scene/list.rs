use super::{DrawCmd, SortKey, ZIndex};

/// A recorded draw command and its paint-order key.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Draw stream for one frame.
///
/// `push` is O(1); paint-order iteration sorts an index buffer that is kept
/// across frames, so a warmed-up list does not allocate.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops recorded items, keeping capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.sorted_indices.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let key = SortKey::new(z, self.next_order);
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { key, cmd });
        self.sorted_dirty = true;
    }

    /// Items back-to-front.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.sorted_indices.clear();
            self.sorted_indices.extend(0..self.items.len());
            let items = &self.items;
            self.sorted_indices.sort_unstable_by_key(|&i| items[i].key);
            self.sorted_dirty = false;
        }
        self.sorted_indices.iter().map(|&i| &self.items[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    fn z_of_paint_order(dl: &mut DrawList) -> Vec<(i32, u32)> {
        dl.iter_in_paint_order().map(|it| (it.key.z.0, it.key.order)).collect()
    }

    fn dot(dl: &mut DrawList, z: i32) {
        dl.push_rect(ZIndex(z), Vec2::zero(), Vec2::new(1.0, 1.0), Color::WHITE);
    }

    #[test]
    fn paints_by_z_then_insertion() {
        let mut dl = DrawList::new();
        dot(&mut dl, 2);
        dot(&mut dl, 0);
        dot(&mut dl, 2);
        dot(&mut dl, 1);
        assert_eq!(z_of_paint_order(&mut dl), [(0, 1), (1, 3), (2, 0), (2, 2)]);
    }

    #[test]
    fn clear_resets_order() {
        let mut dl = DrawList::new();
        dot(&mut dl, 0);
        dl.clear();
        assert!(dl.items().is_empty());
        dot(&mut dl, 5);
        assert_eq!(z_of_paint_order(&mut dl), [(5, 0)]);
    }

    #[test]
    fn resorts_after_new_pushes() {
        let mut dl = DrawList::new();
        dot(&mut dl, 1);
        let _ = z_of_paint_order(&mut dl);
        dot(&mut dl, 0);
        assert_eq!(z_of_paint_order(&mut dl), [(0, 1), (1, 0)]);
    }
}
