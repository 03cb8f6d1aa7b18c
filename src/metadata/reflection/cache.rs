use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, trace};

use crate::metadata::{
    reflection::{MemberKind, ReflectedMembers, Reflector},
    token::Token,
    typesystem::{CilTypeRc, CilTypeRef},
};

struct CacheEntry {
    owner: CilTypeRef,
    members: Arc<ReflectedMembers>,
}

/// Resolved member sets keyed by type token and [`MemberKind`].
///
/// Entries are computed on first use and never evicted: types do not change once they have
/// been queried. Concurrent misses for the same key may each compute a result, but only the
/// first one is stored and every caller receives the stored `Arc`.
///
/// Every entry remembers the type instance it was computed for. A different instance that
/// happens to carry the same token, such as a type of another registry, is resolved without
/// touching the stored entry.
pub struct ReflectorCache {
    entries: DashMap<(Token, MemberKind), CacheEntry>,
}

impl Default for ReflectorCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ReflectorCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        ReflectorCache {
            entries: DashMap::new(),
        }
    }

    /// Return the cached members of `target` for `kind`, resolving them on a miss
    ///
    /// ## Arguments
    /// * `target` - The type to inspect
    /// * `kind`   - Which members to collect
    pub fn get_or_reflect(&self, target: &CilTypeRc, kind: MemberKind) -> Arc<ReflectedMembers> {
        let key = (target.token, kind);
        if let Some(entry) = self.entries.get(&key) {
            if entry.owner.points_to(target) {
                trace!(token = %target.token, kind = ?kind, "reflector cache hit");
                return entry.members.clone();
            }

            let cached = entry.owner.fullname();
            drop(entry);

            debug!(
                token = %target.token,
                cached = ?cached,
                "'{}' shares its token with a cached type, resolving uncached",
                target.fullname()
            );
            return Arc::new(Reflector::reflect(target, kind));
        }

        trace!(token = %target.token, kind = ?kind, "reflector cache miss");
        let members = Arc::new(Reflector::reflect(target, kind));
        let entry = self.entries.entry(key).or_insert(CacheEntry {
            owner: CilTypeRef::new(target),
            members: members.clone(),
        });

        if entry.owner.points_to(target) {
            entry.members.clone()
        } else {
            members
        }
    }

    /// Check whether members of `token` have been resolved for `kind`
    #[must_use]
    pub fn contains(&self, token: Token, kind: MemberKind) -> bool {
        self.entries.contains_key(&(token, kind))
    }

    /// Number of stored entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been resolved yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::typesystem::{CilFlavor, CilType};
    use crate::test::superclass_fixture;

    #[test]
    fn test_same_key_returns_stored_entry() {
        let fixture = superclass_fixture();
        let cache = ReflectorCache::new();
        assert!(cache.is_empty());

        let first = cache.get_or_reflect(&fixture.super_class, MemberKind::PUBLIC);
        let second = cache.get_or_reflect(&fixture.super_class, MemberKind::PUBLIC);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(fixture.super_class.token, MemberKind::PUBLIC));
        assert!(!cache.contains(fixture.super_class.token, MemberKind::INTERNAL));
    }

    #[test]
    fn test_kind_is_part_of_key() {
        let fixture = superclass_fixture();
        let cache = ReflectorCache::new();

        let public = cache.get_or_reflect(&fixture.super_class, MemberKind::PUBLIC);
        let internal = cache.get_or_reflect(&fixture.super_class, MemberKind::INTERNAL);
        let base = cache.get_or_reflect(&fixture.base_class, MemberKind::PUBLIC);

        assert!(!Arc::ptr_eq(&public, &internal));
        assert!(!Arc::ptr_eq(&public, &base));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_same_token_of_another_type_is_not_served() {
        let fixture = superclass_fixture();
        let cache = ReflectorCache::new();

        let twin: CilTypeRc = Arc::new(CilType::new(
            fixture.super_class.token,
            "Fabrikam".to_string(),
            "Twin".to_string(),
            CilFlavor::Class,
            0,
        ));
        twin.set_base(&fixture.object).unwrap();

        let original = cache.get_or_reflect(&fixture.super_class, MemberKind::PUBLIC);
        let other = cache.get_or_reflect(&twin, MemberKind::PUBLIC);

        assert!(!original.is_empty());
        assert!(other.is_empty());
        assert!(!Arc::ptr_eq(&original, &other));
        assert_eq!(cache.len(), 1);

        let again = cache.get_or_reflect(&fixture.super_class, MemberKind::PUBLIC);
        assert!(Arc::ptr_eq(&original, &again));
    }
}
