//! Who a recommendation request is made for.

use crate::UserId;

/// The identity a recommendation is requested for.
///
/// Personalised signals are only ever derived for [`Viewer::User`].
///
/// # Examples
/// ```
/// use rasa_core::Viewer;
///
/// assert_eq!(Viewer::from(Some(4)), Viewer::User(4));
/// assert_eq!(Viewer::from(None), Viewer::Anonymous);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Viewer {
    /// A visitor who has not signed in.
    #[default]
    Anonymous,
    /// A signed-in user.
    User(UserId),
}

impl Viewer {
    /// Return the user id for signed-in viewers.
    pub const fn user_id(self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(id),
        }
    }
}

impl From<Option<UserId>> for Viewer {
    fn from(user: Option<UserId>) -> Self {
        user.map_or(Self::Anonymous, Self::User)
    }
}
