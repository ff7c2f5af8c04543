//! Timer and frame scheduling.
//!
//! Components only see the [`scheduler::Scheduler`] trait; tests drive a
//! [`scheduler::VirtualScheduler`] and hosts pump it from a [`clock::WallClock`].

pub(crate) mod clock;
pub(crate) mod scheduler;
