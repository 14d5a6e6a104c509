//! Effect distribution to observers outside the pipeline.
mod bus;

pub use bus::{EffectBus, SubscriptionId, Topic};
