use std::fmt;

type ConfirmAction = Box<dyn FnOnce()>;

struct PendingConfirm {
    title: String,
    message: String,
    on_confirm: ConfirmAction,
}

/// Modal yes/no gate. At most one question is open at a time and it is
/// dropped entirely once answered.
#[derive(Default)]
pub struct ConfirmDialog {
    pending: Option<PendingConfirm>,
}

impl fmt::Debug for ConfirmDialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfirmDialog")
            .field("title", &self.title())
            .field("message", &self.message())
            .finish()
    }
}

impl ConfirmDialog {
    /// Replaces any question still open; its callback is discarded.
    pub fn open(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        on_confirm: impl FnOnce() + 'static,
    ) {
        self.pending = Some(PendingConfirm {
            title: title.into(),
            message: message.into(),
            on_confirm: Box::new(on_confirm),
        });
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn title(&self) -> Option<&str> {
        self.pending.as_ref().map(|pending| pending.title.as_str())
    }

    pub fn message(&self) -> Option<&str> {
        self.pending.as_ref().map(|pending| pending.message.as_str())
    }

    /// Closes the dialog and hands back the callback so it can run after
    /// whatever borrow the caller holds on the dialog is released.
    pub fn take_confirmed(&mut self) -> Option<ConfirmAction> {
        self.pending.take().map(|pending| pending.on_confirm)
    }

    pub fn confirm(&mut self) -> bool {
        match self.take_confirmed() {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
