//! Owner identity for availability operations.
//!
//! Sign-in itself lives outside this application. The board only needs to
//! know who the current owner is, or that nobody is signed in.

use crate::models::slot::OwnerId;

/// Supplies the identity of the signed-in owner.
#[cfg_attr(test, mockall::automock)]
pub trait AuthProvider {
    fn current_owner(&self) -> Option<OwnerId>;
}

/// Identity fixed at startup, typically from the config file.
#[derive(Debug, Clone, Default)]
pub struct StaticAuth {
    owner: Option<OwnerId>,
}

impl StaticAuth {
    pub fn new(owner: Option<OwnerId>) -> Self {
        Self { owner }
    }

    pub fn signed_in(owner: impl Into<String>) -> Self {
        Self::new(Some(OwnerId::new(owner)))
    }

    pub fn anonymous() -> Self {
        Self::new(None)
    }
}

impl AuthProvider for StaticAuth {
    fn current_owner(&self) -> Option<OwnerId> {
        self.owner.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_auth() {
        assert_eq!(
            StaticAuth::signed_in("owner-1").current_owner(),
            Some(OwnerId::new("owner-1"))
        );
        assert!(StaticAuth::anonymous().current_owner().is_none());
    }
}
