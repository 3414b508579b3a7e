// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Absence request store.
//!
//! Holds submitted absence requests in memory, computes their deduction on
//! submission and notifies subscribers of every change. The store is passed
//! to whoever needs it; there is no global instance.

mod error;
mod events;
mod request;
mod store;

#[cfg(test)]
mod tests;

pub use error::StoreError;
pub use events::{StoreEvent, Subscription};
pub use request::{AbsenceRequest, AbsenceRequestDraft, RequestId, RequestStatus};
pub use store::RequestStore;
