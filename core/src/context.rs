//! Capabilities handed to every view operation.

use crate::api::Api;
use crate::export::ArtifactSink;
use crate::notify::{Confirm, Notification, Notifier};

/// Everything a view needs from the outside world for one operation.
///
/// Views borrow a `Context` per call instead of storing it, so a front-end
/// owns the facade and capabilities and can hand the same ones to several
/// views.
pub struct Context<'a, T> {
    pub api: &'a Api<T>,
    pub notifier: &'a dyn Notifier,
    pub confirm: &'a dyn Confirm,
    pub sink: &'a dyn ArtifactSink,
}

impl<'a, T> Context<'a, T> {
    pub fn new(
        api: &'a Api<T>,
        notifier: &'a dyn Notifier,
        confirm: &'a dyn Confirm,
        sink: &'a dyn ArtifactSink,
    ) -> Self {
        Self {
            api,
            notifier,
            confirm,
            sink,
        }
    }

    pub(crate) fn success(&self, message: impl Into<String>) {
        self.notifier.notify(Notification::success(message));
    }

    pub(crate) fn info(&self, message: impl Into<String>) {
        self.notifier.notify(Notification::info(message));
    }

    pub(crate) fn error(&self, message: impl Into<String>) {
        self.notifier.notify(Notification::error(message));
    }
}
