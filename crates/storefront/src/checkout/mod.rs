//! Order checkout workflow.
//!
//! # Control flow
//!
//! The customer edits the shipping form ([`draft`] persists it between
//! visits) -> [`validate`] gates submission -> [`submit`] performs the
//! three dependent writes against the remote service (address -> order ->
//! order items) -> on success [`message`] builds the order summary and the
//! WhatsApp hand-off link.
//!
//! On any write failure the flow halts and surfaces that error; earlier
//! successful writes are not rolled back. A manual resubmit after a
//! partial failure can therefore create duplicate address/order rows -
//! a known, accepted weakness of the single-attempt design, documented
//! rather than hidden. Compensating deletes are the extension point if
//! that ever stops being acceptable.

pub mod draft;
pub mod message;
pub mod submit;
pub mod validate;

pub use draft::{DraftError, load_draft, store_draft};
pub use message::{compose_order_message, whatsapp_link};
pub use submit::{PlacedOrder, SubmitError, submit};
pub use validate::{FieldErrors, validate};
