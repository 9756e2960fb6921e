//! Business logic services for the application layer.

pub mod submission_gate;

pub use submission_gate::SubmissionGate;
