mod controller;
mod gateway;
mod outcome;

pub use controller::{JobController, StatusObserver};
pub use gateway::{AnalysisGateway, StatusError, SubmissionError, SubmissionRequest};
pub use outcome::{PollOutcome, STATUS_FAILURE, STATUS_SUCCESS, classify};
