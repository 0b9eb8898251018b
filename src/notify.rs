use std::time::{Duration, Instant};

/// Flavour of a user notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    /// How long a toast of this kind stays up by default
    pub fn default_duration(self) -> Duration {
        match self {
            ToastKind::Error => Duration::from_millis(4000),
            ToastKind::Success | ToastKind::Info => Duration::from_millis(3000),
        }
    }
}

/// Capability to tell the user something. Injected into the board context.
pub trait Notifier {
    fn notify(&mut self, kind: ToastKind, message: String);

    fn success(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(ToastKind::Success, message.into());
    }

    fn error(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(ToastKind::Error, message.into());
    }

    fn info(&mut self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(ToastKind::Info, message.into());
    }
}

/// Notifier that only writes to the log. Used when there is no UI.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, kind: ToastKind, message: String) {
        match kind {
            ToastKind::Error => log::error!("{}", message),
            ToastKind::Success | ToastKind::Info => log::info!("{}", message),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub expires_at: Instant,
}

/// Queue of toasts currently on screen
#[derive(Debug)]
pub struct Toasts {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 1,
        }
    }

    /// Show a toast for `duration`, returning its id
    pub fn show(&mut self, kind: ToastKind, message: impl Into<String>, duration: Duration) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
            expires_at: Instant::now() + duration,
        });
        id
    }

    /// Remove a toast by id. Unknown ids are ignored.
    pub fn remove(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    /// Drop toasts that have expired by `now`
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|toast| toast.expires_at > now);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, kind: ToastKind, message: String) {
        LogNotifier.notify(kind, message.clone());
        self.show(kind, message, kind.default_duration());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_ids_and_removal() {
        let mut toasts = Toasts::new();
        let first = toasts.show(ToastKind::Info, "one", Duration::from_secs(1));
        let second = toasts.show(ToastKind::Error, "two", Duration::from_secs(1));
        assert_eq!((first, second), (1, 2));

        toasts.remove(first);
        toasts.remove(99);
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.iter().next().unwrap().message, "two");

        toasts.remove(second);
        assert!(toasts.is_empty());
    }

    #[test]
    fn test_prune_drops_expired() {
        let mut toasts = Toasts::new();
        toasts.success("saved");
        toasts.error("failed");

        let now = Instant::now();
        toasts.prune(now + Duration::from_millis(3500));
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts.iter().next().unwrap().kind, ToastKind::Error);

        toasts.prune(now + Duration::from_millis(4500));
        assert!(toasts.is_empty());
    }
}
