//! Flock Core Library
//!
//! Headless create/edit form engine for the congregation admin: field
//! registry, form state, validation, modal orchestration and the seams
//! (submitter, notifier, option source) that connect it to the outside.

pub mod catalog;
pub mod config;
pub mod error;
pub mod field;
pub mod lint;
pub mod messages;
pub mod modal;
pub mod notifier;
pub mod options;
pub mod render;
pub mod schema;
pub mod state;
pub mod submit;
pub mod wizard;

pub use config::{FlockConfig, FormDefinition};
pub use error::{FlockError, FlockResult};
pub use field::{FieldDescriptor, FieldKind, SelectOption};
pub use lint::{lint_form, FormIssue};
pub use messages::{Locale, Messages};
pub use modal::{CloseReason, FieldView, FormMode, FormModal, ModalConfig, ModalPhase, ModalView, Prepared, SubmitOutcome, SubmitTicket};
pub use notifier::{Notification, Notifier, ToastColor, TracingNotifier};
pub use options::{OptionLookup, OptionSource};
pub use render::{render_fields, RenderedField, Widget};
pub use schema::{DescriptorSchema, Validator};
pub use state::{FieldErrors, FormState, FormValues};
pub use submit::{SubmitResult, Submitter};
pub use wizard::{Wizard, WizardStep};
