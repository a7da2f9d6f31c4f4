// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container resource limits, as hard ceilings the compiler applies.

use serde::{Deserialize, Serialize};

/// Resource limits attached to a step. Each field is `None` when no
/// limit applies (neither requested nor administrator-configured).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimits {
    pub mem_limit: Option<i64>,
    pub mem_swap_limit: Option<i64>,
    pub shm_size: Option<i64>,
    pub cpu_quota: Option<i64>,
    pub cpu_shares: Option<i64>,
    #[serde(default)]
    pub cpu_set: Option<String>,
}

impl ResourceLimits {
    /// Clamp a requested value down to at most `cap`; a request below
    /// the cap is honored unchanged. `cpu_set` is not clamped (it is a
    /// string selector, not a magnitude) — the administrator's value
    /// always wins when set.
    pub fn clamped_against(&self, caps: &ResourceLimits) -> ResourceLimits {
        fn clamp(requested: Option<i64>, cap: Option<i64>) -> Option<i64> {
            match (requested, cap) {
                (Some(r), Some(c)) => Some(r.min(c)),
                (Some(r), None) => Some(r),
                (None, cap) => cap,
            }
        }

        ResourceLimits {
            mem_limit: clamp(self.mem_limit, caps.mem_limit),
            mem_swap_limit: clamp(self.mem_swap_limit, caps.mem_swap_limit),
            shm_size: clamp(self.shm_size, caps.shm_size),
            cpu_quota: clamp(self.cpu_quota, caps.cpu_quota),
            cpu_shares: clamp(self.cpu_shares, caps.cpu_shares),
            cpu_set: caps.cpu_set.clone().or_else(|| self.cpu_set.clone()),
        }
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
