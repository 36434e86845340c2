// Metadata validation against reference tables
pub mod compare;
pub mod metadata;
pub mod selector;
pub mod session;
pub mod suite;
pub mod validator;

pub use compare::CheckOutcome;
pub use metadata::{LoftyExtractor, LoftySession};
pub use selector::{run_case, run_row, skip_reason, CaseOutcome, SkipReason};
pub use session::{SessionGuard, SessionState};
pub use suite::{run_table, SuiteSummary};
pub use validator::{FieldCheck, MetadataValidator, ValidationReport};
