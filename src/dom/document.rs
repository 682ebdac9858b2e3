//! Document model - generational element arena.
//!
//! An abstract page: elements with a tag, own text, bounding rect, style
//! strings and a class list, linked parent/child. Ids are generational so
//! stale references held by the engine can be detected with an explicit
//! liveness check instead of weak pointers.
//!
//! Structural changes bump a mutation counter; the engine's coarse
//! observer reads it to notice dynamic content without per-change
//! callbacks.
//!
//! # API
//!
//! - `append` - Create an element under a parent (or as a root)
//! - `remove` - Detach an element and its whole subtree
//! - `contains` - Liveness check for a (possibly stale) id
//! - `element_from_point` - Topmost element at a coordinate
//! - `text_content` - Own + descendant text in document order
//! - `mutation_count` - Monotonic structural-change counter

use crate::types::{ElementId, GazePoint, Rect};

use super::style::ComputedStyle;

// =============================================================================
// Element Data
// =============================================================================

#[derive(Debug, Clone)]
struct ElementData {
    tag: String,
    text: String,
    rect: Rect,
    style: ComputedStyle,
    classes: Vec<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    data: Option<ElementData>,
}

// =============================================================================
// Document
// =============================================================================

/// The element arena. One per page.
#[derive(Debug, Default)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    roots: Vec<ElementId>,
    mutations: u64,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    /// Create an element and attach it under `parent` (or as a root when
    /// `parent` is `None`). Returns the new element's id.
    ///
    /// The element starts with the default computed style; use
    /// [`set_style`](Self::set_style) to seed measured values.
    pub fn append(
        &mut self,
        parent: Option<ElementId>,
        tag: &str,
        text: &str,
        rect: Rect,
    ) -> ElementId {
        let data = ElementData {
            tag: tag.to_ascii_lowercase(),
            text: text.to_string(),
            rect,
            style: ComputedStyle::default(),
            classes: Vec::new(),
            parent: parent.filter(|id| self.contains(*id)),
            children: Vec::new(),
        };

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        let id = ElementId {
            index,
            generation: slot.generation,
        };
        let resolved_parent = data.parent;
        slot.data = Some(data);

        match resolved_parent {
            Some(parent_id) => {
                if let Some(parent_data) = self.data_mut(parent_id) {
                    parent_data.children.push(id);
                }
            }
            None => self.roots.push(id),
        }

        self.mutations += 1;
        id
    }

    /// Detach an element and its entire subtree.
    ///
    /// Every removed slot's generation is bumped, so ids held elsewhere
    /// go dead rather than aliasing later elements.
    pub fn remove(&mut self, id: ElementId) {
        if !self.contains(id) {
            return;
        }

        // Unlink from parent or root list first
        let parent = self.data(id).and_then(|data| data.parent);
        match parent {
            Some(parent_id) => {
                if let Some(parent_data) = self.data_mut(parent_id) {
                    parent_data.children.retain(|child| *child != id);
                }
            }
            None => self.roots.retain(|root| *root != id),
        }

        self.remove_subtree(id);
        self.mutations += 1;
    }

    fn remove_subtree(&mut self, id: ElementId) {
        let children = match self.data(id) {
            Some(data) => data.children.clone(),
            None => return,
        };
        for child in children {
            self.remove_subtree(child);
        }

        let slot = &mut self.slots[id.index as usize];
        slot.data = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
    }

    /// Check whether an id still refers to a live, attached element.
    pub fn contains(&self, id: ElementId) -> bool {
        self.slots
            .get(id.index as usize)
            .is_some_and(|slot| slot.generation == id.generation && slot.data.is_some())
    }

    /// Get an element's parent, if it has one.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.data(id).and_then(|data| data.parent)
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.data.is_some()).count()
    }

    /// True when the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // -------------------------------------------------------------------------
    // Content
    // -------------------------------------------------------------------------

    /// Get an element's tag (always lowercase).
    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.data(id).map(|data| data.tag.as_str())
    }

    /// Replace an element's own text.
    pub fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(data) = self.data_mut(id) {
            data.text = text.to_string();
            self.mutations += 1;
        }
    }

    /// Aggregate text content: the element's own text followed by every
    /// descendant's, in document order.
    pub fn text_content(&self, id: ElementId) -> Option<String> {
        let data = self.data(id)?;
        let mut out = data.text.clone();
        for child in &data.children {
            if let Some(child_text) = self.text_content(*child) {
                out.push_str(&child_text);
            }
        }
        Some(out)
    }

    /// Get an element's bounding rect.
    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        self.data(id).map(|data| data.rect)
    }

    /// Move/resize an element.
    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        if let Some(data) = self.data_mut(id) {
            data.rect = rect;
        }
    }

    // -------------------------------------------------------------------------
    // Style
    // -------------------------------------------------------------------------

    /// Read an element's current style.
    pub fn style(&self, id: ElementId) -> Option<&ComputedStyle> {
        self.data(id).map(|data| &data.style)
    }

    /// Seed an element's style (the "measured" computed values).
    pub fn set_style(&mut self, id: ElementId, style: ComputedStyle) {
        if let Some(data) = self.data_mut(id) {
            data.style = style;
        }
    }

    /// Write a single font-size value.
    pub fn set_font_size(&mut self, id: ElementId, value: impl Into<String>) {
        if let Some(data) = self.data_mut(id) {
            data.style.font_size = value.into();
        }
    }

    /// Write a single line-height value.
    pub fn set_line_height(&mut self, id: ElementId, value: impl Into<String>) {
        if let Some(data) = self.data_mut(id) {
            data.style.line_height = value.into();
        }
    }

    /// Write a single transition value.
    pub fn set_transition(&mut self, id: ElementId, value: impl Into<String>) {
        if let Some(data) = self.data_mut(id) {
            data.style.transition = value.into();
        }
    }

    // -------------------------------------------------------------------------
    // Classes
    // -------------------------------------------------------------------------

    /// Add a class (no duplicates).
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(data) = self.data_mut(id) {
            if !data.classes.iter().any(|existing| existing == class) {
                data.classes.push(class.to_string());
            }
        }
    }

    /// Remove a class.
    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(data) = self.data_mut(id) {
            data.classes.retain(|existing| existing != class);
        }
    }

    /// Check for a class.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.data(id)
            .is_some_and(|data| data.classes.iter().any(|existing| existing == class))
    }

    /// Collect every live element carrying a class, in document order.
    pub fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        let mut out = Vec::new();
        for root in self.roots.clone() {
            self.collect_with_class(root, class, &mut out);
        }
        out
    }

    fn collect_with_class(&self, id: ElementId, class: &str, out: &mut Vec<ElementId>) {
        if self.has_class(id, class) {
            out.push(id);
        }
        if let Some(data) = self.data(id) {
            for child in &data.children {
                self.collect_with_class(*child, class, out);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Hit Testing
    // -------------------------------------------------------------------------

    /// Topmost element at a point.
    ///
    /// The document has no z-order, so paint order is document order:
    /// a pre-order walk keeps the last element whose rect contains the
    /// point, which makes children win over parents and later siblings
    /// win over earlier ones.
    pub fn element_from_point(&self, point: GazePoint) -> Option<ElementId> {
        let mut hit = None;
        for root in &self.roots {
            self.hit_walk(*root, point, &mut hit);
        }
        hit
    }

    fn hit_walk(&self, id: ElementId, point: GazePoint, hit: &mut Option<ElementId>) {
        let Some(data) = self.data(id) else { return };
        if data.rect.contains(point) {
            *hit = Some(id);
        }
        for child in &data.children {
            self.hit_walk(*child, point, hit);
        }
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Monotonic counter bumped by every structural or text change.
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }

    // -------------------------------------------------------------------------
    // Internal
    // -------------------------------------------------------------------------

    fn data(&self, id: ElementId) -> Option<&ElementData> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.data.as_ref()
    }

    fn data_mut(&mut self, id: ElementId) -> Option<&mut ElementData> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.data.as_mut()
    }
}

// =============================================================================
// Tests
// =============================================================================
