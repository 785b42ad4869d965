//! Alert and navigation sinks for the UI drivers.

/// Where user-facing effects of a submission land.
///
/// The web front-end turns these into a redirect or an alert banner; the
/// CLI prints alerts to stderr and logs the navigation target.
pub trait Surface {
    /// Show a blocking alert.
    fn alert(&mut self, message: &str);
    /// Navigate to a path.
    fn navigate(&mut self, path: &str);
}

/// A single effect recorded by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Alert(String),
    Navigate(String),
}

/// Surface that keeps every effect in order, for drivers that act on them
/// after the submission completes.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    effects: Vec<Effect>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn alerts(&self) -> impl Iterator<Item = &str> {
        self.effects.iter().filter_map(|e| match e {
            Effect::Alert(m) => Some(m.as_str()),
            Effect::Navigate(_) => None,
        })
    }

    /// The last navigation target, if any.
    pub fn destination(&self) -> Option<&str> {
        self.effects.iter().rev().find_map(|e| match e {
            Effect::Navigate(p) => Some(p.as_str()),
            Effect::Alert(_) => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn alert(&mut self, message: &str) {
        self.effects.push(Effect::Alert(message.to_string()));
    }

    fn navigate(&mut self, path: &str) {
        self.effects.push(Effect::Navigate(path.to_string()));
    }
}

/// Terminal surface: alerts go to stderr, navigation is only logged.
#[derive(Debug, Default)]
pub struct ConsoleSurface;

impl Surface for ConsoleSurface {
    fn alert(&mut self, message: &str) {
        eprintln!("multivac-launch: {}", message.trim_end());
    }

    fn navigate(&mut self, path: &str) {
        tracing::debug!(path, "navigate");
    }
}
