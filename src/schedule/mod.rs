use serde::{Deserialize, Serialize};

pub mod model;

type Result<T> = std::result::Result<T, Error>;

/// Lifecycle of a meeting proposal: pending until the counterpart accepts,
/// accepted is terminal.
// TODO: no decline or reschedule transition yet; the product has not defined
// what either should do with the generated meet link.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Accepted,
}

impl Status {
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("only the counterpart can accept a proposal")]
    ProposerCannotAccept,
}
