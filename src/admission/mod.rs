//! URL admission
//!
//! Decides whether an outbound link should ever be queued. The rules are
//! data ([`AdmissionPolicy`]); the [`AdmissionFilter`] applies them in a fixed
//! order against the crawl's [`SeenSet`](crate::state::SeenSet).

mod filter;
mod policy;

pub use filter::{AdmissionFilter, Decision, Rejection};
pub use policy::{AdmissionPolicy, ScopeRule, TrapRule};
