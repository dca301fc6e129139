//! Mapping between stored-document envelopes and profile records

use shared::profile::UserProfile;

use crate::appwrite::Document;
use crate::repository::profile_repository::ProfileRecord;

/// The document id is the owning account id
pub fn record_from_document(document: Document<UserProfile>) -> ProfileRecord {
    ProfileRecord {
        account_id: document.id,
        profile: document.data,
    }
}
