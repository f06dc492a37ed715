// Core of the operations console; the binary adds the terminal front end.
pub mod actions;
pub mod api;
pub mod config;
pub mod domain;
pub mod map;
pub mod modal;
pub mod poller;
pub mod summary;
pub mod view;

pub use actions::{execute, ActionOutcome};
pub use api::{ApiClient, ApiConfig, ApiError};
pub use domain::{AlertKind, AnimalKind, GeoPoint, MarkerKey, Tab};
pub use modal::{ConfirmModal, ModalEvent, ModalTransitionError, PendingAction};
pub use poller::{PollEvent, Poller};
pub use view::MapView;
