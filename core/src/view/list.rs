//! Fetched collection plus a client-side text filter.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::context::Context;
use crate::resource::Resource;
use crate::transport::Transport;
use crate::view::LoadState;

/// Outcome of a delete action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Confirmation refused; no request was issued.
    Cancelled,
    Deleted,
    Failed,
}

/// Cache of the server's last known collection.
///
/// The collection is only ever replaced wholesale by `reload`; mutations
/// never patch it locally. `visible` holds the indices of items matching the
/// current search and is recomputed whenever the search text or the items
/// change.
#[derive(Debug, Clone)]
pub struct ListView<R> {
    state: LoadState,
    items: Vec<R>,
    search: String,
    visible: Vec<usize>,
}

impl<R: Resource> ListView<R> {
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            items: Vec::new(),
            search: String::new(),
            visible: Vec::new(),
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn find(&self, id: Uuid) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Items matching the search, in server order.
    pub fn visible(&self) -> impl Iterator<Item = &R> + '_ {
        self.visible.iter().map(|&i| &self.items[i])
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.refilter();
    }

    /// Enter `Loading`, fetch everything, then settle in `Ready` or `Error`.
    /// On failure the previous items are kept.
    pub fn reload<T: Transport>(&mut self, ctx: &Context<'_, T>) -> bool {
        self.state = LoadState::Loading;
        match R::fetch_all(ctx.api) {
            Ok(items) => {
                debug!(count = items.len(), noun = R::PLURAL, "list reloaded");
                self.items = items;
                self.state = LoadState::Ready;
                self.refilter();
                true
            }
            Err(err) => {
                warn!(error = %err, noun = R::PLURAL, "list reload failed");
                ctx.error(format!("Failed to load {}", R::PLURAL));
                self.state = LoadState::Error;
                false
            }
        }
    }

    /// Ask for confirmation, delete, then reload.
    pub fn delete<T: Transport>(&mut self, ctx: &Context<'_, T>, id: Uuid) -> DeleteOutcome {
        if !ctx.confirm.confirm(&format!("Delete this {}?", R::NOUN)) {
            return DeleteOutcome::Cancelled;
        }
        match R::delete(ctx.api, id) {
            Ok(()) => {
                ctx.success(format!("Deleted {}", R::NOUN));
                self.reload(ctx);
                DeleteOutcome::Deleted
            }
            Err(err) => {
                warn!(error = %err, %id, noun = R::NOUN, "delete failed");
                ctx.error(format!("Failed to delete {}", R::NOUN));
                DeleteOutcome::Failed
            }
        }
    }

    fn refilter(&mut self) {
        let needle = self.search.to_lowercase();
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.search_text().to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();
    }
}

impl<R: Resource> Default for ListView<R> {
    fn default() -> Self {
        Self::new()
    }
}
