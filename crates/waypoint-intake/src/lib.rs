//! Activation-gated, single-flight intake of deep-link contexts.
//!
//! External triggers arrive on arbitrary threads: attribution callbacks,
//! URL opens, push taps. This crate turns them into one ordered stream of
//! route cycles on the UI thread.
//!
//! ```text
//! submit ─► ActivationGate ─(active)─► queue ─► Dispatcher ─► RootContainer::handle
//!                │                       ▲
//!           (inactive)                   │
//!                ▼                       │
//!           pending slot ─(activation)───┘
//! ```
//!
//! The dispatcher holds the [`DispatchSerializer`] permit for each route
//! cycle, so two cycles never overlap.
//!
//! [`DeepLinkIntake`] is `Send + Sync` and can be cloned into every callback.
//! [`Dispatcher`] stays on the UI thread and routes to the root held in its
//! [`RootSlot`].

pub mod dispatcher;
pub mod gate;
pub mod intake;
pub mod serializer;

pub use dispatcher::{Dispatcher, RootSlot};
pub use gate::{ActivationGate, ActivationState, GateDecision};
pub use intake::{Admission, DeepLinkIntake, DeepLinkIntakeBuilder};
pub use serializer::{DispatchPermit, DispatchSerializer};
