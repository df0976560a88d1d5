use uuid::Uuid;

use crate::database::models::{Plant, User};

/// A resource that belongs to exactly one user.
pub trait Ownership {
    fn owner_id(&self) -> Uuid;

    fn owned_by(&self, user: &User) -> bool {
        self.owner_id() == user.id
    }
}

impl Ownership for Plant {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

/// Drop a fetched resource unless `user` owns it. Callers turn `None` into
/// their not-found error, so a foreign id and a missing id look identical.
pub fn ensure_owned<T: Ownership>(resource: Option<T>, user: &User) -> Option<T> {
    resource.filter(|r| r.owned_by(user))
}
