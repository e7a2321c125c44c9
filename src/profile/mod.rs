//! The profile-edit screen: form submission and avatar capture.

pub mod avatar;
pub mod screen;
pub mod submission;

pub use avatar::{AvatarFlow, AvatarModal, AvatarOutcome, AvatarStateMachine, CaptureStep};
pub use screen::{Collaborators, ProfileScreen};
pub use submission::{Outcome, SubmissionOrchestrator};
