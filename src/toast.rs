/// How long a resolved toast stays on screen.
pub const TOAST_DURATION_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    Pending,
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub text: String,
}

/// Transient status messages. A pending toast is updated in place, by id,
/// when its request resolves.
#[derive(Debug, Clone, Default)]
pub struct Toaster {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl Toaster {
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    fn push(&mut self, kind: ToastKind, text: impl Into<String>) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            text: text.into(),
        });
        id
    }

    pub fn pending(&mut self, text: impl Into<String>) -> ToastId {
        self.push(ToastKind::Pending, text)
    }

    /// A failure with no request behind it, e.g. a validation error.
    pub fn error(&mut self, text: impl Into<String>) -> ToastId {
        self.push(ToastKind::Failure, text)
    }

    fn resolve(&mut self, id: ToastId, kind: ToastKind, text: impl Into<String>) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast) => {
                toast.kind = kind;
                toast.text = text.into();
                true
            }
            None => false,
        }
    }

    /// Returns false when the toast is already gone.
    pub fn succeed(&mut self, id: ToastId, text: impl Into<String>) -> bool {
        self.resolve(id, ToastKind::Success, text)
    }

    pub fn fail(&mut self, id: ToastId, text: impl Into<String>) -> bool {
        self.resolve(id, ToastKind::Failure, text)
    }

    pub fn dismiss(&mut self, id: ToastId) {
        self.toasts.retain(|t| t.id != id);
    }
}
