// Copyright 2025 the Ellipsis Authors
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Misuse of an [`Ellipsis`](crate::Ellipsis) lifecycle hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    /// `init` was called a second time.
    AlreadyInitialized,
    /// `init` was called after `teardown`.
    TornDown,
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInitialized => f.write_str("ellipsis widget was already initialized"),
            Self::TornDown => f.write_str("ellipsis widget was already torn down"),
        }
    }
}

impl std::error::Error for LifecycleError {}
