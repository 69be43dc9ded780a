/// Open/closed state of a yes/no confirmation dialog.
///
/// The guarded action only runs through [`ConfirmGate::confirm`], and only while the
/// gate is open; every transition leaves it closed except [`ConfirmGate::open`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmGate {
    open: bool,
}

impl ConfirmGate {
    pub fn closed() -> Self {
        Self { open: false }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(self) -> Self {
        Self { open: true }
    }

    pub fn cancel(self) -> Self {
        Self::closed()
    }

    pub fn confirm(self, action: impl FnOnce()) -> Self {
        if self.open {
            action();
        }
        Self::closed()
    }
}
