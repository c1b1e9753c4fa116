//! Create/edit form state.
//!
//! A form mirrors one entity into editable fields. It is in `New` mode with
//! blank fields, or in `Edit` mode pre-populated from the selected entity.
//! Selecting a different entity value re-populates the fields; selecting the
//! same value again keeps whatever the user has typed.

use tracing::warn;
use uuid::Uuid;

use crate::context::Context;
use crate::resource::Resource;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    New,
    Edit(Uuid),
}

/// Result of a submission. `Saved` tells the parent to close and reload.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<R> {
    Saved(R),
    Failed,
}

#[derive(Debug, Clone)]
pub struct Form<R: Resource> {
    mode: FormMode,
    fields: R::Input,
    synced: Option<R>,
}

impl<R: Resource> Form<R> {
    pub fn blank() -> Self {
        Self {
            mode: FormMode::New,
            fields: R::Input::default(),
            synced: None,
        }
    }

    /// `New` form for `None`, `Edit` form pre-populated from `Some(entity)`.
    pub fn for_selection(selected: Option<&R>) -> Self {
        let mut form = Self::blank();
        form.select(selected);
        form
    }

    pub fn select(&mut self, selected: Option<&R>) {
        match selected {
            Some(entity) if self.synced.as_ref() != Some(entity) => {
                self.mode = FormMode::Edit(entity.id());
                self.fields = entity.to_input();
                self.synced = Some(entity.clone());
            }
            Some(_) => {}
            None => {
                if self.synced.is_some() {
                    *self = Self::blank();
                }
            }
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn fields(&self) -> &R::Input {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut R::Input {
        &mut self.fields
    }

    /// Create or update depending on mode. On failure the fields are left
    /// untouched so the user can retry.
    pub fn submit<T: Transport>(&self, ctx: &Context<'_, T>) -> SubmitOutcome<R> {
        let result = match self.mode {
            FormMode::New => R::create(ctx.api, &self.fields),
            FormMode::Edit(id) => R::update(ctx.api, id, &self.fields),
        };
        match result {
            Ok(saved) => {
                let verb = if self.is_edit() { "Updated" } else { "Created" };
                ctx.success(format!("{verb} {}", R::NOUN));
                SubmitOutcome::Saved(saved)
            }
            Err(err) => {
                warn!(error = %err, noun = R::NOUN, "save failed");
                ctx.error(format!("Failed to save {}", R::NOUN));
                SubmitOutcome::Failed
            }
        }
    }
}

impl<R: Resource> Default for Form<R> {
    fn default() -> Self {
        Self::blank()
    }
}
