//! Theme state and change notification
//!
//! [`ThemeState`] is the single holder of the current theme. Observers
//! register through [`ThemeState::subscribe`] and stop receiving
//! notifications when they call [`ThemeSubscription::unsubscribe`] or drop
//! their handle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::store::{KeyValueStore, MANUAL_OVERRIDE_KEY, THEME_KEY};
use crate::{Error, Result};

/// Default theme bus capacity; a lagging observer only misses old changes
pub const DEFAULT_BUS_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(Error::InvalidInput(format!("Unknown theme: {}", other))),
        }
    }
}

/// Broadcast payload for a theme change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeChanged {
    pub theme: Theme,
    pub timestamp: DateTime<Utc>,
}

/// Fan-out channel for theme changes
#[derive(Debug)]
pub struct ThemeBus {
    tx: broadcast::Sender<ThemeChanged>,
}

impl ThemeBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> ThemeSubscription {
        ThemeSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Notify every live subscriber; having none is not an error
    pub fn publish(&self, event: ThemeChanged) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// One observer's registration on the theme bus
#[derive(Debug)]
pub struct ThemeSubscription {
    rx: broadcast::Receiver<ThemeChanged>,
}

impl ThemeSubscription {
    /// Wait for the next change; `None` once the bus is gone
    pub async fn recv(&mut self) -> Option<ThemeChanged> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Theme observer lagged, skipped {} changes", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next pending change without waiting
    pub fn try_recv(&mut self) -> Option<ThemeChanged> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }

    pub fn unsubscribe(self) {}
}

/// Current theme, persisted through the injected store
#[derive(Debug)]
pub struct ThemeState<S> {
    store: S,
    theme: Theme,
    manual_override: bool,
    bus: ThemeBus,
}

impl<S: KeyValueStore> ThemeState<S> {
    /// Restore the theme: an explicit earlier choice wins over the system
    /// preference
    pub fn load(store: S, system_theme: Theme) -> Self {
        let manual_override = matches!(store.get(MANUAL_OVERRIDE_KEY), Ok(Some(ref v)) if v == "true");

        let stored = match store.get(THEME_KEY) {
            Ok(Some(value)) => match value.parse::<Theme>() {
                Ok(theme) => Some(theme),
                Err(e) => {
                    warn!("Ignoring stored theme: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read stored theme: {}", e);
                None
            }
        };

        let theme = match stored {
            Some(theme) if manual_override => theme,
            _ => system_theme,
        };

        debug!("Initial theme: {} (manual override: {})", theme, manual_override);
        Self {
            store,
            theme,
            manual_override,
            bus: ThemeBus::new(DEFAULT_BUS_CAPACITY),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn manual_override(&self) -> bool {
        self.manual_override
    }

    pub fn subscribe(&self) -> ThemeSubscription {
        self.bus.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.bus.subscriber_count()
    }

    /// Flip between light and dark as an explicit user choice
    pub fn toggle(&mut self) -> Result<Theme> {
        let next = self.theme.toggled();
        self.set(next)?;
        Ok(next)
    }

    /// Persist `theme` as the user's choice and notify observers
    pub fn set(&mut self, theme: Theme) -> Result<()> {
        self.store.set(THEME_KEY, theme.as_str())?;
        self.store.set(MANUAL_OVERRIDE_KEY, "true")?;
        self.theme = theme;
        self.manual_override = true;

        let delivered = self.bus.publish(ThemeChanged {
            theme,
            timestamp: Utc::now(),
        });
        debug!("Theme set to {} ({} observers)", theme, delivered);
        Ok(())
    }
}
