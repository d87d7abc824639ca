use serde::Serialize;
use uuid::Uuid;

use super::filter::Filter;
use crate::db::models::Video;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "activeId", rename_all = "lowercase")]
pub enum DragState {
    Idle,
    Dragging(Uuid),
}

/// Positions of a dropped item within the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reorder {
    pub old_index: usize,
    pub new_index: usize,
}

/// One session's view of the catalog.
///
/// `videos` is the only ordered collection; the filtered view is derived from
/// it on demand. Manual ordering lives here only and is dropped by `load`.
#[derive(Debug, Clone)]
pub struct DirectoryView {
    videos: Vec<Video>,
    filter: Filter,
    drag: DragState,
}

impl Default for DirectoryView {
    fn default() -> Self {
        Self {
            videos: Vec::new(),
            filter: Filter::default(),
            drag: DragState::Idle,
        }
    }
}

impl DirectoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contents with a fresh catalog listing.
    pub fn load(&mut self, videos: Vec<Video>) {
        self.videos = videos;
        self.drag = DragState::Idle;
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn filtered(&self) -> Vec<&Video> {
        self.filter.apply(&self.videos)
    }

    /// Only items currently visible in the filtered view can be picked up.
    pub fn drag_start(&mut self, id: Uuid) -> bool {
        if !self.filtered().iter().any(|v| v.id == id) {
            return false;
        }
        self.drag = DragState::Dragging(id);
        true
    }

    pub fn drag_cancel(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Ends the drag. Dropping over another visible item moves the dragged
    /// record to that item's position; anything else leaves the order as is.
    pub fn drag_end(&mut self, over: Option<Uuid>) -> Option<Reorder> {
        let active = match std::mem::replace(&mut self.drag, DragState::Idle) {
            DragState::Dragging(id) => id,
            DragState::Idle => return None,
        };
        let over = over.filter(|o| *o != active)?;

        let visible = self.filtered();
        let old_index = visible.iter().position(|v| v.id == active)?;
        let new_index = visible.iter().position(|v| v.id == over)?;

        let from = self.videos.iter().position(|v| v.id == active)?;
        let to = self.videos.iter().position(|v| v.id == over)?;
        array_move(&mut self.videos, from, to);

        Some(Reorder {
            old_index,
            new_index,
        })
    }
}

fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    items.insert(to, item);
}
