/// Lifecycle of one controller's most recent action.
///
/// Re-derived on every action: a new submission replaces whatever was there,
/// so a pending request never coexists with an older result or error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus<T> {
    #[default]
    Idle,
    Pending,
    Loaded(T),
    Failed(String),
}

impl<T> RequestStatus<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            RequestStatus::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Whether the last action reached Loaded or Failed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Loaded(_) | RequestStatus::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_are_exclusive() {
        let idle: RequestStatus<u8> = RequestStatus::default();
        assert!(!idle.is_pending() && idle.result().is_none() && idle.error().is_none());
        assert!(!idle.is_terminal());

        let pending: RequestStatus<u8> = RequestStatus::Pending;
        assert!(pending.is_pending());
        assert!(pending.result().is_none() && pending.error().is_none());

        let loaded = RequestStatus::Loaded(3u8);
        assert_eq!(loaded.result(), Some(&3));
        assert!(loaded.error().is_none() && !loaded.is_pending());
        assert!(loaded.is_terminal());

        let failed: RequestStatus<u8> = RequestStatus::Failed("boom".to_string());
        assert_eq!(failed.error(), Some("boom"));
        assert!(failed.result().is_none() && !failed.is_pending());
        assert!(failed.is_terminal());
    }
}
