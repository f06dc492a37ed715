use std::convert::TryFrom;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    DeleteSighting,
    ResolveAlert,
}

impl ActionKind {
    pub const fn title(self) -> &'static str {
        match self {
            Self::DeleteSighting => "Confirm Deletion",
            Self::ResolveAlert => "Confirm Resolution",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::DeleteSighting => {
                "Are you sure you want to delete this sighting? This action cannot be undone."
            }
            Self::ResolveAlert => {
                "Are you sure you want to mark this alert as resolved? This action cannot be undone."
            }
        }
    }

    pub const fn confirm_label(self) -> &'static str {
        match self {
            Self::DeleteSighting => "Delete",
            Self::ResolveAlert => "Resolve",
        }
    }
}

/// An action the operator has confirmed. Only [`ConfirmModal`] hands these
/// out, so holding one means the confirmation step happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAction {
    kind: ActionKind,
    id: i64,
}

impl PendingAction {
    pub const fn kind(self) -> ActionKind {
        self.kind
    }

    pub const fn id(self) -> i64 {
        self.id
    }
}

impl fmt::Display for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ActionKind::DeleteSighting => write!(f, "delete sighting {}", self.id),
            ActionKind::ResolveAlert => write!(f, "resolve alert {}", self.id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    ConfirmDelete(i64),
    ConfirmResolve(i64),
}

impl fmt::Display for ModalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "Closed"),
            Self::ConfirmDelete(id) => write!(f, "ConfirmDelete({id})"),
            Self::ConfirmResolve(id) => write!(f, "ConfirmResolve({id})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    TriggerDelete(i64),
    TriggerResolve(i64),
    Cancel,
    Confirm,
}

impl fmt::Display for ModalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TriggerDelete(id) => write!(f, "TriggerDelete({id})"),
            Self::TriggerResolve(id) => write!(f, "TriggerResolve({id})"),
            Self::Cancel => write!(f, "Cancel"),
            Self::Confirm => write!(f, "Confirm"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid transition from {from} with event {event}")]
pub struct ModalTransitionError {
    pub from: ModalState,
    pub event: ModalEvent,
}

/// Confirmation gate in front of every destructive action.
#[derive(Debug, Default)]
pub struct ConfirmModal {
    state: ModalState,
}

impl ConfirmModal {
    pub const fn new() -> Self {
        Self {
            state: ModalState::Closed,
        }
    }

    pub const fn state(&self) -> ModalState {
        self.state
    }

    pub const fn is_open(&self) -> bool {
        !matches!(self.state, ModalState::Closed)
    }

    /// The action the open modal is asking about.
    pub const fn target(&self) -> Option<ActionKind> {
        match self.state {
            ModalState::Closed => None,
            ModalState::ConfirmDelete(_) => Some(ActionKind::DeleteSighting),
            ModalState::ConfirmResolve(_) => Some(ActionKind::ResolveAlert),
        }
    }

    pub fn title(&self) -> Option<&'static str> {
        self.target().map(ActionKind::title)
    }

    pub fn message(&self) -> Option<&'static str> {
        self.target().map(ActionKind::message)
    }

    /// Applies `event`. Returns the confirmed action when the event was
    /// `Confirm`; a rejected event leaves the state as it was.
    pub fn process_event(
        &mut self,
        event: ModalEvent,
    ) -> Result<Option<PendingAction>, ModalTransitionError> {
        let next = NextState::try_from((self.state, event))?;
        tracing::debug!(from = %self.state, to = %next.state, %event, "modal transition");
        self.state = next.state;
        Ok(next.confirmed)
    }
}

struct NextState {
    state: ModalState,
    confirmed: Option<PendingAction>,
}

impl ModalState {
    const fn next_state(self) -> NextState {
        NextState {
            state: self,
            confirmed: None,
        }
    }
}

impl TryFrom<(ModalState, ModalEvent)> for NextState {
    type Error = ModalTransitionError;

    fn try_from(value: (ModalState, ModalEvent)) -> Result<Self, Self::Error> {
        let (current, event) = value;

        match (current, event) {
            (ModalState::Closed, ModalEvent::TriggerDelete(id)) => {
                Ok(ModalState::ConfirmDelete(id).next_state())
            }
            (ModalState::Closed, ModalEvent::TriggerResolve(id)) => {
                Ok(ModalState::ConfirmResolve(id).next_state())
            }
            (ModalState::ConfirmDelete(_) | ModalState::ConfirmResolve(_), ModalEvent::Cancel) => {
                Ok(ModalState::Closed.next_state())
            }
            (ModalState::ConfirmDelete(id), ModalEvent::Confirm) => Ok(NextState {
                state: ModalState::Closed,
                confirmed: Some(PendingAction {
                    kind: ActionKind::DeleteSighting,
                    id,
                }),
            }),
            (ModalState::ConfirmResolve(id), ModalEvent::Confirm) => Ok(NextState {
                state: ModalState::Closed,
                confirmed: Some(PendingAction {
                    kind: ActionKind::ResolveAlert,
                    id,
                }),
            }),
            _ => Err(ModalTransitionError {
                from: current,
                event,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_then_confirm_yields_the_recorded_target() {
        let mut modal = ConfirmModal::new();
        assert_eq!(modal.process_event(ModalEvent::TriggerDelete(4)), Ok(None));
        assert!(modal.is_open());
        assert_eq!(modal.title(), Some("Confirm Deletion"));

        let action = modal.process_event(ModalEvent::Confirm).ok().flatten();
        assert_eq!(action.map(PendingAction::id), Some(4));
        assert_eq!(action.map(PendingAction::kind), Some(ActionKind::DeleteSighting));
        assert_eq!(modal.state(), ModalState::Closed);
    }

    #[test]
    fn cancel_clears_the_target() {
        let mut modal = ConfirmModal::new();
        assert!(modal.process_event(ModalEvent::TriggerResolve(9)).is_ok());
        assert_eq!(
            modal.message(),
            Some("Are you sure you want to mark this alert as resolved? This action cannot be undone.")
        );

        assert_eq!(modal.process_event(ModalEvent::Cancel), Ok(None));
        assert!(!modal.is_open());
        assert_eq!(modal.title(), None);
    }

    #[test]
    fn confirm_while_closed_is_rejected() {
        let mut modal = ConfirmModal::new();
        let err = modal.process_event(ModalEvent::Confirm);
        assert_eq!(
            err,
            Err(ModalTransitionError {
                from: ModalState::Closed,
                event: ModalEvent::Confirm,
            })
        );
        assert_eq!(modal.state(), ModalState::Closed);
    }

    #[test]
    fn trigger_while_open_keeps_the_first_target() {
        let mut modal = ConfirmModal::new();
        assert!(modal.process_event(ModalEvent::TriggerDelete(1)).is_ok());
        assert!(modal.process_event(ModalEvent::TriggerResolve(2)).is_err());
        assert_eq!(modal.state(), ModalState::ConfirmDelete(1));
    }

    #[test]
    fn transition_error_names_both_sides() {
        let err = ModalTransitionError {
            from: ModalState::ConfirmDelete(3),
            event: ModalEvent::TriggerDelete(5),
        };
        assert_eq!(
            err.to_string(),
            "Invalid transition from ConfirmDelete(3) with event TriggerDelete(5)"
        );
    }
}
