//! CLI command implementations.

pub mod cart;
pub mod request;

use clap::{Args, ValueEnum};
use shelfcart::cart::is_reserved;
use shelfcart::request::RequestStatus;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Catalog book id.
    pub id: String,

    /// Book title.
    pub title: String,

    /// Author name.
    #[arg(short, long)]
    pub author: Option<String>,

    /// Category name.
    #[arg(long)]
    pub category: Option<String>,

    /// Extra display field, as key=value (repeatable).
    #[arg(short, long = "field", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
}

/// Arguments for the add-json command.
#[derive(Args)]
pub struct AddJsonArgs {
    /// Catalog item as a JSON object, e.g. '{"id": 3, "title": "Emma"}'.
    pub item: String,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Catalog book id.
    pub id: String,
}

/// Arguments for the submit command.
#[derive(Args)]
pub struct SubmitArgs {
    /// Message for the librarian.
    #[arg(short, long)]
    pub note: Option<String>,
}

/// Arguments for the requests command.
#[derive(Args)]
pub struct RequestsArgs {
    /// Only show requests in this status.
    #[arg(short, long)]
    pub status: Option<StatusArg>,
}

/// Arguments for the request command.
#[derive(Args)]
pub struct RequestArgs {
    /// Request id.
    pub id: String,

    /// Lifecycle step to apply.
    #[arg(value_enum)]
    pub action: RequestAction,
}

/// Request status as a command line value.
#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Waiting,
    Approved,
    Rejected,
    Returned,
    Cancelled,
}

impl From<StatusArg> for RequestStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Waiting => RequestStatus::Waiting,
            StatusArg::Approved => RequestStatus::Approved,
            StatusArg::Rejected => RequestStatus::Rejected,
            StatusArg::Returned => RequestStatus::Returned,
            StatusArg::Cancelled => RequestStatus::Cancelled,
        }
    }
}

/// Lifecycle steps a librarian or patron can take.
#[derive(Clone, Copy, ValueEnum)]
pub enum RequestAction {
    Approve,
    Reject,
    Cancel,
    Return,
}

impl RequestAction {
    pub fn target(self) -> RequestStatus {
        match self {
            RequestAction::Approve => RequestStatus::Approved,
            RequestAction::Reject => RequestStatus::Rejected,
            RequestAction::Cancel => RequestStatus::Cancelled,
            RequestAction::Return => RequestStatus::Returned,
        }
    }
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, _)) if is_reserved(key.trim()) => {
            Err(format!("{:?} is reserved and cannot be set as a field", key.trim()))
        }
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected key=value, got {s:?}")),
    }
}
