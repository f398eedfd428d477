pub mod client;
pub mod config;
pub mod controller;
pub mod exception;
pub mod history;
pub mod interpreter;
pub mod param;
pub mod transport;
pub mod util;
pub mod validator;

pub use client::{ClassificationClient, ClassificationRequest, ClassificationResponse};
pub use config::Config;
pub use controller::{RequestController, RequestState};
pub use exception::Exception;
pub use history::HistoryLedger;
pub use interpreter::{interpret, DisplayToken};
pub use param::Endpoint;
pub use transport::{HttpTransport, Transport};
pub use validator::{validate, NormalizedAddress, PrefixRule};
