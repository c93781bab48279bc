//! User roles and the fee pool each one reads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which fee pool a role is paid from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeePool {
    /// Advisor commission pool.
    Advisor,
    /// Broker pool after referral and co-broker cuts ("team lead net fee").
    TeamLead,
}

/// Role of the user requesting a fee figure.
///
/// Unknown role names are kept verbatim in [`UserRole::Other`] so profile
/// data round-trips; they read the advisor pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    Asesor,
    TeamLeaderBroker,
    Broker,
    Other(String),
}

impl UserRole {
    /// Canonical profile name of the role.
    pub fn as_str(&self) -> &str {
        match self {
            UserRole::Asesor => "asesor",
            UserRole::TeamLeaderBroker => "team_leader_broker",
            UserRole::Broker => "broker",
            UserRole::Other(name) => name,
        }
    }

    /// Fee pool returned for this role.
    pub fn fee_pool(&self) -> FeePool {
        match self {
            UserRole::TeamLeaderBroker | UserRole::Broker => FeePool::TeamLead,
            UserRole::Asesor | UserRole::Other(_) => FeePool::Advisor,
        }
    }
}

impl From<String> for UserRole {
    fn from(name: String) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "asesor" => UserRole::Asesor,
            "team_leader_broker" => UserRole::TeamLeaderBroker,
            "broker" => UserRole::Broker,
            _ => UserRole::Other(name),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl FromStr for UserRole {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(UserRole::from(s.to_string()))
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
