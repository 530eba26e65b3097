use uuid::Uuid;

use crate::modules::diary::schema::{DiaryEntity, Visibility};

/// Decides whether `requester_id` may read `diary`. Pure: the caller supplies
/// the two grant lookups (explicit share, accepted friendship) so the rule can
/// run on every read without side effects.
///
/// FriendsOnly is satisfied by either grant: an explicit share works without a
/// friendship, and an accepted friend needs no share.
pub fn can_access(requester_id: Uuid, diary: &DiaryEntity, shared: bool, friends: bool) -> bool {
    if diary.is_owner(requester_id) {
        return true;
    }
    if diary.is_deleted() {
        return false;
    }
    match diary.visibility {
        Visibility::Private => false,
        Visibility::Public => true,
        Visibility::FriendsOnly => shared || friends,
    }
}
