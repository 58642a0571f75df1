//! Typed events between the board and the page

use serde::{Deserialize, Serialize};

use super::container::OrderResult;
use crate::coins::CoinsChanged;
use crate::settings::Settings;

/// Something the page may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail", rename_all = "kebab-case")]
pub enum GameEvent {
    /// New settings took effect
    SettingsApplied(Settings),
    /// A full container was checked
    CardsOrdered { lane: usize, result: OrderResult },
    /// Coin balance changed
    CoinsChanged(CoinsChanged),
}

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Callback registry
///
/// Listeners run synchronously in registration order when an event is
/// published.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn publish(&mut self, event: GameEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_listeners_see_events_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        for tag in ["first", "second"] {
            let seen = seen.clone();
            bus.subscribe(move |event| {
                if let GameEvent::CoinsChanged(change) = event {
                    seen.borrow_mut().push((tag, change.coins));
                }
            });
        }

        bus.publish(GameEvent::CoinsChanged(crate::CoinBag::new(0).add(10)));
        assert_eq!(*seen.borrow(), vec![("first", 10), ("second", 10)]);
    }

    #[test]
    fn test_event_names_match_page_events() {
        let json = serde_json::to_value(GameEvent::SettingsApplied(Settings::default())).unwrap();
        assert_eq!(json["type"], "settings-applied");
        let json = serde_json::to_value(GameEvent::CoinsChanged(crate::CoinBag::new(0).reset())).unwrap();
        assert_eq!(json["type"], "coins-changed");
        assert_eq!(json["detail"]["reset"], true);
    }
}
