//! Members - the external records the engine scores
//!
//! The engine never owns member data. It reads members through the
//! [`MemberDirectory`] trait and only looks at id, category, element and the
//! active flag.

pub mod directory;

pub use directory::InMemoryDirectory;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::affinity::{AffinityEntry, AffinityMatrix};
use crate::catalog::{Category, Element};
use crate::error::{Result, TeamError};
use crate::types::MemberId;

/// An organization member as supplied by the member store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,

    #[serde(default)]
    pub name: String,

    pub category: Category,

    /// Must equal `category.element()`; see [`Member::validate`]
    pub element: Element,

    #[serde(default = "default_active")]
    pub active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

fn default_active() -> bool {
    true
}

impl Member {
    /// Create an active member; the element is derived from the category
    pub fn new(id: MemberId, name: impl Into<String>, category: Category) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            element: category.element(),
            active: true,
            birth_date: None,
        }
    }

    /// Create an active member whose profile is assigned from a birth date
    pub fn from_birth_date(id: MemberId, name: impl Into<String>, birth_date: NaiveDate) -> Self {
        let mut member = Self::new(id, name, Category::from_birth_date(birth_date));
        member.birth_date = Some(birth_date);
        member
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Check the element agrees with the category
    pub fn validate(&self) -> std::result::Result<(), TeamError> {
        let expected = self.category.element();
        if self.element != expected {
            return Err(TeamError::InconsistentProfile {
                id: self.id,
                category: self.category,
                declared: self.element,
                expected,
            });
        }
        Ok(())
    }

    /// Display label: the name if set, otherwise the id
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            self.id.to_string()
        } else {
            self.name.clone()
        }
    }
}

/// Source of member records
///
/// Absence is reported as [`crate::error::LookupError::MemberNotFound`] and propagated
/// unchanged by every engine operation.
pub trait MemberDirectory {
    /// Fetch a single member
    fn get_member(&self, id: MemberId) -> Result<Member>;

    /// Fetch several members, preserving the order of `ids`
    fn get_members(&self, ids: &[MemberId]) -> Result<Vec<Member>> {
        ids.iter().map(|&id| self.get_member(id)).collect()
    }

    /// Every member whose active flag is set
    fn active_members(&self) -> Vec<Member>;

    /// Counter that changes whenever any member record changes.
    ///
    /// Directories that cannot report one return `None`, and results
    /// derived from them are never cached.
    fn generation(&self) -> Option<u64> {
        None
    }
}

impl<D: MemberDirectory + ?Sized> MemberDirectory for Arc<D> {
    fn get_member(&self, id: MemberId) -> Result<Member> {
        (**self).get_member(id)
    }

    fn get_members(&self, ids: &[MemberId]) -> Result<Vec<Member>> {
        (**self).get_members(ids)
    }

    fn active_members(&self) -> Vec<Member> {
        (**self).active_members()
    }

    fn generation(&self) -> Option<u64> {
        (**self).generation()
    }
}

/// Resolves member pairs to affinity entries via the matrix
#[derive(Debug)]
pub struct MemberResolver<'a, D: ?Sized> {
    matrix: &'a AffinityMatrix,
    directory: &'a D,
}

impl<'a, D: MemberDirectory + ?Sized> MemberResolver<'a, D> {
    pub fn new(matrix: &'a AffinityMatrix, directory: &'a D) -> Self {
        Self { matrix, directory }
    }

    /// Affinity between two members looked up by id
    pub fn resolve(&self, a: MemberId, b: MemberId) -> Result<&'a AffinityEntry> {
        let first = self.directory.get_member(a)?;
        let second = self.directory.get_member(b)?;
        resolve_members(self.matrix, &first, &second)
    }
}

/// Affinity between two already-fetched members
pub fn resolve_members<'m>(
    matrix: &'m AffinityMatrix,
    a: &Member,
    b: &Member,
) -> Result<&'m AffinityEntry> {
    matrix.lookup(a.category, b.category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_element() {
        let m = Member::new(MemberId::from_u128(1), "Ada", Category::Gemini);
        assert_eq!(m.element, Element::Air);
        assert!(m.active);
        assert!(m.validate().is_ok());
    }

    #[test]
    fn test_inconsistent_profile_rejected() {
        let mut m = Member::new(MemberId::from_u128(1), "Ada", Category::Gemini);
        m.element = Element::Water;
        assert!(matches!(
            m.validate(),
            Err(TeamError::InconsistentProfile {
                expected: Element::Air,
                ..
            })
        ));
    }

    #[test]
    fn test_from_birth_date() {
        let date = NaiveDate::from_ymd_opt(1985, 11, 30).unwrap();
        let m = Member::from_birth_date(MemberId::from_u128(9), "Grace", date);
        assert_eq!(m.category, Category::Sagittarius);
        assert_eq!(m.element, Element::Fire);
        assert_eq!(m.birth_date, Some(date));
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000003",
            "category": "leo",
            "element": "fire"
        }"#;
        let m: Member = serde_json::from_str(json).unwrap();
        assert!(m.active);
        assert!(m.name.is_empty());
        assert_eq!(m.label(), "00000000-0000-0000-0000-000000000003");
    }

    #[test]
    fn test_resolver_looks_up_by_category() {
        let directory = InMemoryDirectory::new();
        directory
            .insert(Member::new(MemberId::from_u128(1), "a", Category::Aries))
            .unwrap();
        directory
            .insert(Member::new(MemberId::from_u128(2), "b", Category::Gemini))
            .unwrap();

        let matrix = AffinityMatrix::build();
        let resolver = MemberResolver::new(&matrix, &directory);
        let entry = resolver
            .resolve(MemberId::from_u128(1), MemberId::from_u128(2))
            .unwrap();
        assert_eq!(entry.overall_score, 92);

        let err = resolver
            .resolve(MemberId::from_u128(1), MemberId::from_u128(99))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
