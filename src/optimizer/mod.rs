//! Editing helpers built only from repeated analysis plus plain text transforms.

pub mod actions;
pub mod compare;
pub mod quick;

pub use actions::{prioritized_actions, prioritized_actions_with, ActionPlan};
pub use compare::{compare_versions, compare_with, VersionComparison, Which};
pub use quick::{
    quick_optimize, quick_optimize_with, FixedHookSelector, HookSelector, QuickOptimization,
    QuickOptimizeOptions, RandomHookSelector, SeededHookSelector,
};
