//! Borrow request status state machine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CartError;

/// Where a borrow request is in its lifecycle.
///
/// ```text
/// waiting ──► approved ──► returned
///    │
///    ├──────► rejected
///    └──────► cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Submitted, awaiting a librarian.
    Waiting,
    /// Approved; the patron has the books.
    Approved,
    /// Refused by a librarian.
    Rejected,
    /// Books were brought back.
    Returned,
    /// Withdrawn by the patron before a decision.
    Cancelled,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 5] = [
        RequestStatus::Waiting,
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Returned,
        RequestStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Waiting => "waiting",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Returned => "returned",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Waiting => "Waiting for approval",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
            RequestStatus::Returned => "Returned",
            RequestStatus::Cancelled => "Cancelled",
        }
    }

    /// No further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestStatus::Rejected | RequestStatus::Returned | RequestStatus::Cancelled
        )
    }

    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Waiting, RequestStatus::Approved)
                | (RequestStatus::Waiting, RequestStatus::Rejected)
                | (RequestStatus::Waiting, RequestStatus::Cancelled)
                | (RequestStatus::Approved, RequestStatus::Returned)
        )
    }

    /// Move to `next`, or fail if the lifecycle does not allow it.
    pub fn transition(self, next: RequestStatus) -> Result<RequestStatus, CartError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CartError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        RequestStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| CartError::Validation(format!("unknown request status: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        use RequestStatus::*;
        let legal = [
            (Waiting, Approved),
            (Waiting, Rejected),
            (Waiting, Cancelled),
            (Approved, Returned),
        ];
        for from in RequestStatus::ALL {
            for to in RequestStatus::ALL {
                assert_eq!(
                    from.can_transition_to(to),
                    legal.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for status in RequestStatus::ALL.into_iter().filter(|s| s.is_terminal()) {
            assert!(RequestStatus::ALL
                .into_iter()
                .all(|next| !status.can_transition_to(next)));
        }
        assert!(!RequestStatus::Waiting.is_terminal());
        assert!(!RequestStatus::Approved.is_terminal());
    }

    #[test]
    fn test_transition_error() {
        let err = RequestStatus::Rejected
            .transition(RequestStatus::Approved)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid request status transition from rejected to approved"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("Approved".parse::<RequestStatus>().unwrap(), RequestStatus::Approved);
        assert_eq!(" returned ".parse::<RequestStatus>().unwrap(), RequestStatus::Returned);
        assert!("lost".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn test_wire_name() {
        let json = serde_json::to_string(&RequestStatus::Cancelled).unwrap();
        assert_eq!(json, r#""cancelled""#);
    }
}
