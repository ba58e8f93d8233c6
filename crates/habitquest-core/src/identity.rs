//! Identity signal consumed from the auth collaborator.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who a session is acting for.
///
/// The core does not authenticate anyone; it only consumes this signal.
/// `Guest` routes every operation to the local mirror, `User` to the
/// remote store. `Anonymous` (signed out and not in guest mode) loads
/// nothing and every mutation fails with `NotAuthenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Identity {
    Anonymous,
    Guest,
    User(Uuid),
}

impl Identity {
    /// The stable user id, if this is a signed-in identity.
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Identity::User(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_guest(&self) -> bool {
        matches!(self, Identity::Guest)
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_only_for_signed_in() {
        let id = Uuid::new_v4();
        assert_eq!(Identity::User(id).user_id(), Some(id));
        assert_eq!(Identity::Guest.user_id(), None);
        assert_eq!(Identity::Anonymous.user_id(), None);
    }
}
