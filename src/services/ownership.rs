//! Ownership Filter
//!
//! Defines what a given identity may see: exactly the entries it owns.

use std::collections::BTreeMap;

use crate::storage::UrlEntry;

/// Map of `short_code -> target_url` for the entries owned by `owner_id`.
///
/// An absent owner sees nothing, and neither does anyone see unowned
/// (`owner_id == None`) entries. The input is never modified. The result is
/// ordered by short code so listings render deterministically.
pub fn filter_by_owner<'a, I>(entries: I, owner_id: Option<&str>) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = &'a UrlEntry>,
{
    let Some(owner_id) = owner_id else {
        return BTreeMap::new();
    };

    entries
        .into_iter()
        .filter(|entry| entry.is_owned_by(owner_id))
        .map(|entry| (entry.short_code.clone(), entry.target_url.clone()))
        .collect()
}
