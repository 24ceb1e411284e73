//! Change notification for the host UI.

/// Receives a signal whenever the attributes active at the selection may
/// have changed. Implementations re-query [`super::RichText::has`] for the
/// kinds they display.
pub trait FormatListener {
    fn on_active_attributes_may_have_changed(&mut self);
}

impl<F: FnMut()> FormatListener for F {
    fn on_active_attributes_may_have_changed(&mut self) {
        self()
    }
}
