use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one access-control check: which access control evaluates it,
/// on behalf of which user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccessControlInfo {
    pub access_control: String,
    pub user: String,
}

impl AccessControlInfo {
    pub fn new(access_control: impl Into<String>, user: impl Into<String>) -> Self {
        Self { access_control: access_control.into(), user: user.into() }
    }
}

impl fmt::Display for AccessControlInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} as {}", self.access_control, self.user)
    }
}
