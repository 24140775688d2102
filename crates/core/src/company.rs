//! Company grouping for the virtual customer directory.
//!
//! Customers are not stored. They are buckets of Leads whose company names
//! normalize to the same key (trimmed, lower-cased). Within a bucket the
//! lowest Lead id is the *primary*: its id is the group's id and its
//! company/notes are the group's display values.
//!
//! Identity is derived, not stable. Renaming companies so that two keys start
//! or stop colliding merges or splits groups on the next read.

use std::collections::{BTreeMap, HashMap};

use crate::types::DbId;

/// Bucket key for Leads with a blank company.
pub const NO_COMPANY_KEY: &str = "__no_company__";

/// Display name of the blank-company bucket.
pub const NO_COMPANY_LABEL: &str = "no company";

/// A record that can be grouped by company.
pub trait CompanyMember {
    fn member_id(&self) -> DbId;
    fn company(&self) -> &str;
}

/// Normalize a company name into its grouping key.
///
/// ```
/// use leadbook_core::company::{company_key, NO_COMPANY_KEY};
///
/// assert_eq!(company_key(" ACME "), "acme");
/// assert_eq!(company_key("   "), NO_COMPANY_KEY);
/// ```
pub fn company_key(company: &str) -> String {
    let key = company.trim().to_lowercase();
    if key.is_empty() {
        NO_COMPANY_KEY.to_string()
    } else {
        key
    }
}

/// Display value for a company, substituting the label for blanks.
pub fn display_company(company: &str) -> &str {
    if company.trim().is_empty() {
        NO_COMPANY_LABEL
    } else {
        company
    }
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

/// Explicit company-key → ascending member-id mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyIndex {
    buckets: BTreeMap<String, Vec<DbId>>,
    key_by_member: HashMap<DbId, String>,
}

impl CompanyIndex {
    pub fn build<M: CompanyMember>(members: &[M]) -> Self {
        let mut buckets: BTreeMap<String, Vec<DbId>> = BTreeMap::new();
        let mut key_by_member = HashMap::with_capacity(members.len());

        for member in members {
            let key = company_key(member.company());
            buckets.entry(key.clone()).or_default().push(member.member_id());
            key_by_member.insert(member.member_id(), key);
        }
        for ids in buckets.values_mut() {
            ids.sort_unstable();
            ids.dedup();
        }

        Self {
            buckets,
            key_by_member,
        }
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Groups in key order, each with its ascending member ids.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DbId])> {
        self.buckets
            .iter()
            .map(|(key, ids)| (key.as_str(), ids.as_slice()))
    }

    pub fn members(&self, key: &str) -> Option<&[DbId]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// Id of the group stored under `key` (its lowest member id).
    pub fn primary_id(&self, key: &str) -> Option<DbId> {
        self.members(key).and_then(|ids| ids.first().copied())
    }

    /// Key of the bucket holding `member_id`.
    pub fn key_of(&self, member_id: DbId) -> Option<&str> {
        self.key_by_member.get(&member_id).map(String::as_str)
    }

    /// Id of the group `member_id` belongs to.
    pub fn group_of(&self, member_id: DbId) -> Option<DbId> {
        self.key_of(member_id).and_then(|key| self.primary_id(key))
    }

    /// Key of the group whose id is `group_id`.
    ///
    /// Returns `None` when `group_id` is unknown or belongs to a non-primary member.
    pub fn key_for_group(&self, group_id: DbId) -> Option<&str> {
        self.key_of(group_id)
            .filter(|key| self.primary_id(key) == Some(group_id))
    }
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

/// One derived company group borrowing from the snapshot it came from.
#[derive(Debug)]
pub struct CompanyGroup<'a, M> {
    pub key: String,
    pub primary: &'a M,
    /// Members in ascending id order; the primary comes first.
    pub members: Vec<&'a M>,
}

impl<M: CompanyMember> CompanyGroup<'_, M> {
    pub fn id(&self) -> DbId {
        self.primary.member_id()
    }

    /// The primary's company as typed, or [`NO_COMPANY_LABEL`] for blanks.
    pub fn display_name(&self) -> &str {
        display_company(self.primary.company())
    }

    pub fn member_ids(&self) -> Vec<DbId> {
        self.members.iter().map(|m| m.member_id()).collect()
    }
}

/// Bucket a snapshot into company groups, ordered by key.
pub fn derive_groups<M: CompanyMember>(members: &[M]) -> Vec<CompanyGroup<'_, M>> {
    let index = CompanyIndex::build(members);
    groups_from_index(&index, members)
}

/// Materialize the groups of an already built index.
pub fn groups_from_index<'a, M: CompanyMember>(
    index: &CompanyIndex,
    members: &'a [M],
) -> Vec<CompanyGroup<'a, M>> {
    let by_id: HashMap<DbId, &M> = members.iter().map(|m| (m.member_id(), m)).collect();

    index
        .iter()
        .filter_map(|(key, ids)| {
            let group_members: Vec<&M> = ids.iter().filter_map(|id| by_id.get(id).copied()).collect();
            let primary = *group_members.first()?;
            Some(CompanyGroup {
                key: key.to_string(),
                primary,
                members: group_members,
            })
        })
        .collect()
}

/// Find the group whose id is `group_id` in a snapshot.
pub fn find_group<M: CompanyMember>(members: &[M], group_id: DbId) -> Option<CompanyGroup<'_, M>> {
    derive_groups(members)
        .into_iter()
        .find(|group| group.id() == group_id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
