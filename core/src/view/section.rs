//! A list view together with its create/edit form.

use uuid::Uuid;

use crate::context::Context;
use crate::form::{Form, SubmitOutcome};
use crate::resource::Resource;
use crate::transport::Transport;
use crate::view::list::{DeleteOutcome, ListView};

#[derive(Debug, Clone)]
pub struct CrudSection<R: Resource> {
    list: ListView<R>,
    form: Option<Form<R>>,
}

impl<R: Resource> CrudSection<R> {
    pub fn new() -> Self {
        Self {
            list: ListView::new(),
            form: None,
        }
    }

    pub fn list(&self) -> &ListView<R> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListView<R> {
        &mut self.list
    }

    pub fn reload<T: Transport>(&mut self, ctx: &Context<'_, T>) -> bool {
        self.list.reload(ctx)
    }

    pub fn form(&self) -> Option<&Form<R>> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut Form<R>> {
        self.form.as_mut()
    }

    pub fn open_new_form(&mut self) -> &mut Form<R> {
        self.form.insert(Form::blank())
    }

    /// Open the form on the listed entity with `id`. `None` when the id is
    /// not in the current list.
    pub fn open_edit_form(&mut self, id: Uuid) -> Option<&mut Form<R>> {
        let selected = self.list.find(id)?.clone();
        match self.form.as_mut() {
            Some(form) => form.select(Some(&selected)),
            None => self.form = Some(Form::for_selection(Some(&selected))),
        }
        self.form.as_mut()
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Submit the open form. A successful save closes the form and reloads
    /// the list; a failure leaves the form open as it was. `None` when no
    /// form is open.
    pub fn submit_form<T: Transport>(&mut self, ctx: &Context<'_, T>) -> Option<SubmitOutcome<R>> {
        let outcome = self.form.as_ref()?.submit(ctx);
        if let SubmitOutcome::Saved(_) = outcome {
            self.form = None;
            self.list.reload(ctx);
        }
        Some(outcome)
    }

    pub fn delete<T: Transport>(&mut self, ctx: &Context<'_, T>, id: Uuid) -> DeleteOutcome {
        self.list.delete(ctx, id)
    }
}

impl<R: Resource> Default for CrudSection<R> {
    fn default() -> Self {
        Self::new()
    }
}
