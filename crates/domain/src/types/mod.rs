//! Domain types and wire models

pub mod operation;
pub mod request;
pub mod run;
pub mod wire;

pub use operation::{Operation, RemoteRunStatus};
pub use request::{Authentication, ConnectorInput, OperationRequest, ProcessedResult};
pub use run::{RunHandle, RunState};
pub use wire::{
    DeidentifyStructuredTextRequest, FileEnvelope, ProcessedOutput, ReidentifyFileRequest,
    ReidentifyResponse, RunStartResponse, RunStatusResponse, TokenTypeSpec,
};
