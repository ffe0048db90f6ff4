use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Database-assigned identity of a node or relationship.
///
/// Drivers hand identities over as plain integers, decimal strings, or as a
/// pair of 32-bit words (`low`/`high`). All three shapes collapse into this
/// single 64-bit value at the boundary, so query text only ever sees the
/// canonical decimal rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "IdentityRepr", into = "i64")]
pub struct Identity(i64);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("identifier is not a decimal integer: {0:?}")]
    NotNumeric(String),

    #[error("identifier word out of 32-bit range: {0}")]
    WordOutOfRange(i64),
}

impl Identity {
    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Reassembles an identity split into two 32-bit words.
    ///
    /// `low` is read as an unsigned word, so `low = -1, high = 0` is
    /// `4294967295`.
    pub const fn from_words(low: i32, high: i32) -> Self {
        Self(((high as i64) << 32) | (low as u32 as i64))
    }

    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Identity {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Identity> for i64 {
    fn from(id: Identity) -> Self {
        id.0
    }
}

impl FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdentityError::NotNumeric(s.to_string()));
        }
        trimmed
            .parse::<i64>()
            .map(Self)
            .map_err(|_| IdentityError::NotNumeric(s.to_string()))
    }
}

/// Wire shapes an identity may arrive in.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdentityRepr {
    Int(i64),
    Text(String),
    Words { low: i64, high: i64 },
}

impl TryFrom<IdentityRepr> for Identity {
    type Error = IdentityError;

    fn try_from(repr: IdentityRepr) -> Result<Self, Self::Error> {
        match repr {
            IdentityRepr::Int(v) => Ok(Self(v)),
            IdentityRepr::Text(s) => s.parse(),
            IdentityRepr::Words { low, high } => {
                // low may be sent either signed or unsigned
                let low = if (i64::from(i32::MIN)..=i64::from(u32::MAX)).contains(&low) {
                    low as u32 as i32
                } else {
                    return Err(IdentityError::WordOutOfRange(low));
                };
                let high = i32::try_from(high).map_err(|_| IdentityError::WordOutOfRange(high))?;
                Ok(Self::from_words(low, high))
            }
        }
    }
}
