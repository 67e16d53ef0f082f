//! `gs-rules` — the pure rule engine.
//!
//! Every function here is a deterministic function of a `Layout`, a
//! `Parameters` snapshot and its arguments.  Nothing is cached and nothing
//! is mutated, so the movement model may call the rules from its parallel
//! intent phase.
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`access`]   | `Rules::is_admissible`                                |
//! | [`physics`]  | `Rules::speed`, `Rules::separation`                   |
//! | [`priority`] | `Contender`, `Arbiter`, `priority_rank`               |

pub mod access;
pub mod physics;
pub mod priority;


use gs_layout::Layout;
use gs_params::Parameters;

pub use priority::{Arbiter, Contender, priority_rank, priority_score};

/// Borrowed view of the inputs every rule needs.
#[derive(Copy, Clone)]
pub struct Rules<'a> {
    pub layout: &'a Layout,
    pub params: &'a Parameters,
}

impl<'a> Rules<'a> {
    pub fn new(layout: &'a Layout, params: &'a Parameters) -> Self {
        Self { layout, params }
    }
}
