//! Topic-based effect bus.
//!
//! Delivery is synchronous and happens after the submission's state has been
//! persisted, in the order effects were produced.

use std::collections::BTreeMap;

use game_core::Effect;
use serde::{Deserialize, Serialize};

/// Topics for effect routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Topic {
    /// Entities spawned, moved or removed
    Entities,
    /// Phase changes and flow completion
    Flow,
    /// Free-form notes from game-specific appliers
    Notes,
}

impl Topic {
    pub fn of(effect: &Effect) -> Self {
        match effect {
            Effect::EntitySpawned { .. }
            | Effect::EntityMoved { .. }
            | Effect::EntityRemoved { .. } => Topic::Entities,
            Effect::PhaseChanged { .. } | Effect::FlowCompleted { .. } => Topic::Flow,
            Effect::Note { .. } => Topic::Notes,
        }
    }
}

/// Handle returned by [`EffectBus::subscribe`]; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&Effect) + Send>;

struct Subscription {
    topic: Option<Topic>,
    callback: Callback,
}

/// Publishes effects to subscribers in subscription order.
#[derive(Default)]
pub struct EffectBus {
    subscribers: BTreeMap<SubscriptionId, Subscription>,
    next_id: u64,
}

impl EffectBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receives every effect.
    pub fn subscribe(&mut self, callback: impl FnMut(&Effect) + Send + 'static) -> SubscriptionId {
        self.insert(None, Box::new(callback))
    }

    /// Receives only effects routed to `topic`.
    pub fn subscribe_topic(
        &mut self,
        topic: Topic,
        callback: impl FnMut(&Effect) + Send + 'static,
    ) -> SubscriptionId {
        self.insert(Some(topic), Box::new(callback))
    }

    /// Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn publish(&mut self, effect: &Effect) {
        let topic = Topic::of(effect);
        for subscription in self.subscribers.values_mut() {
            if subscription.topic.is_none_or(|wanted| wanted == topic) {
                (subscription.callback)(effect);
            }
        }
    }

    pub fn publish_all<'e>(&mut self, effects: impl IntoIterator<Item = &'e Effect>) {
        for effect in effects {
            self.publish(effect);
        }
    }

    fn insert(&mut self, topic: Option<Topic>, callback: Callback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.insert(id, Subscription { topic, callback });
        id
    }
}

impl std::fmt::Debug for EffectBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
