//! In-memory member directory
//!
//! A thread-safe roster backed by a `parking_lot::RwLock`. Rosters can be
//! loaded from and saved to JSON files (an array of [`Member`] records).
//!
//! Every write bumps a generation counter so result caches layered on top
//! can tell when the roster has moved on.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{AffinityError, LookupError, Result, ResultExt, TeamError};
use crate::members::{Member, MemberDirectory};
use crate::types::MemberId;

/// Roster held in memory
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    members: RwLock<HashMap<MemberId, Member>>,
    generation: AtomicU64,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from members, rejecting duplicates and inconsistent profiles
    pub fn from_members(members: impl IntoIterator<Item = Member>) -> Result<Self> {
        let directory = Self::new();
        {
            let mut map = directory.members.write();
            for member in members {
                member.validate()?;
                if map.contains_key(&member.id) {
                    return Err(TeamError::DuplicateMember(member.id).into());
                }
                map.insert(member.id, member);
            }
        }
        Ok(directory)
    }

    /// Parse a JSON roster
    pub fn from_json(json: &str) -> Result<Self> {
        let members: Vec<Member> = serde_json::from_str(json)?;
        Self::from_members(members)
    }

    /// Load a JSON roster from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(AffinityError::from)
            .with_context(|| format!("Reading roster '{}'", path.display()))?;
        let directory = Self::from_json(&content)
            .with_context(|| format!("Parsing roster '{}'", path.display()))?;

        tracing::info!(
            path = %path.display(),
            members = directory.len(),
            "roster loaded"
        );
        Ok(directory)
    }

    /// Save the roster as pretty JSON, ordered by id
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.all_members())?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Insert or replace a member. Returns the previous record, if any.
    pub fn insert(&self, member: Member) -> Result<Option<Member>> {
        member.validate()?;
        let mut map = self.members.write();
        let previous = map.insert(member.id, member);
        self.bump();
        Ok(previous)
    }

    pub fn remove(&self, id: MemberId) -> Result<Member> {
        let mut map = self.members.write();
        let removed = map.remove(&id).ok_or(LookupError::MemberNotFound(id))?;
        self.bump();
        Ok(removed)
    }

    /// Flip a member's active flag
    pub fn set_active(&self, id: MemberId, active: bool) -> Result<()> {
        let mut map = self.members.write();
        let member = map.get_mut(&id).ok_or(LookupError::MemberNotFound(id))?;
        member.active = active;
        self.bump();
        Ok(())
    }

    /// Number of writes applied since construction
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    // Called with the write lock held
    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.members.read().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.members.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.read().is_empty()
    }

    /// Every member, ordered by id
    pub fn all_members(&self) -> Vec<Member> {
        let mut members: Vec<Member> = self.members.read().values().cloned().collect();
        members.sort_by_key(|m| m.id);
        members
    }
}

impl MemberDirectory for InMemoryDirectory {
    fn get_member(&self, id: MemberId) -> Result<Member> {
        self.members
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| LookupError::MemberNotFound(id).into())
    }

    fn get_members(&self, ids: &[MemberId]) -> Result<Vec<Member>> {
        let map = self.members.read();
        ids.iter()
            .map(|id| {
                map.get(id)
                    .cloned()
                    .ok_or_else(|| AffinityError::from(LookupError::MemberNotFound(*id)))
            })
            .collect()
    }

    /// Active members ordered by id
    fn active_members(&self) -> Vec<Member> {
        let mut active: Vec<Member> = self
            .members
            .read()
            .values()
            .filter(|m| m.active)
            .cloned()
            .collect();
        active.sort_by_key(|m| m.id);
        active
    }

    fn generation(&self) -> Option<u64> {
        Some(self.current_generation())
    }
}
