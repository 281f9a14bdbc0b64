//! Card effects: the registry of per-card behaviors and the resolver that
//! applies a forged weapon to the combat state

pub mod context;
pub mod registry;
pub mod resolver;

pub use context::ResolutionContext;
pub use registry::{
    CardLifecycle, Condition, EffectAction, EffectDescriptor, EffectPhase, EffectRegistry,
    ForgeRule,
};
pub use resolver::{resolve, ResolutionOutcome};
