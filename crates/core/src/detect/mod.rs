//! Detect operation dispatch
//!
//! DEIDENTIFY starts an asynchronous run and polls it; REIDENTIFY is one
//! synchronous call. Both go through the [`DetectTransport`] port.

pub mod plan;
pub mod poller;
pub mod ports;
pub mod service;
pub mod transport;

pub use plan::OperationPlan;
pub use poller::{PollSchedule, RunPoller};
pub use ports::{DetectTransport, HttpMethod, TransportRequest, TransportResponse};
pub use service::DetectService;
pub use transport::{parse_body, send_checked};
