// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! One-at-a-time guard for fetches of the same resource.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    User,
    Dashboard,
    Income,
    Expense,
    Meals,
    MealSummary,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Resource::User => "user",
            Resource::Dashboard => "dashboard",
            Resource::Income => "income",
            Resource::Expense => "expense",
            Resource::Meals => "meals",
            Resource::MealSummary => "meal summary",
        };
        f.write_str(s)
    }
}

/// Tracks which resources have a fetch pending. Not shared across threads.
#[derive(Debug, Default)]
pub struct InFlight {
    pending: RefCell<HashSet<Resource>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `resource` pending, or returns `None` if a fetch of it is already running.
    pub fn begin(&self, resource: Resource) -> Option<FetchToken<'_>> {
        if !self.pending.borrow_mut().insert(resource) {
            tracing::warn!(%resource, "fetch already in flight, skipping");
            return None;
        }
        Some(FetchToken {
            owner: self,
            resource,
        })
    }

    pub fn is_pending(&self, resource: Resource) -> bool {
        self.pending.borrow().contains(&resource)
    }

    /// Runs `f` unless a fetch of `resource` is pending; `Ok(None)` when skipped.
    pub fn guarded<T, E, F>(&self, resource: Resource, f: F) -> Result<Option<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let Some(_token) = self.begin(resource) else {
            return Ok(None);
        };
        f().map(Some)
    }
}

/// Clears the pending flag when dropped, including on error paths.
#[derive(Debug)]
pub struct FetchToken<'a> {
    owner: &'a InFlight,
    resource: Resource,
}

impl Drop for FetchToken<'_> {
    fn drop(&mut self) {
        self.owner.pending.borrow_mut().remove(&self.resource);
    }
}
