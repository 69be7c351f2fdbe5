//! Flags: named switches that are either present or absent.

use std::fmt;
use std::sync::Arc;

/// Full name of the auto-registered help flag.
pub const HELP_FLAG_NAME: &str = "help";
/// Short name of the auto-registered help flag.
pub const HELP_FLAG_SHORT_NAME: &str = "h";

/// A side effect run when a flag is set.
pub type Action = Arc<dyn Fn() + Send + Sync>;

/// What happens when a flag is set, beyond recording its presence.
#[derive(Clone, Default)]
pub(crate) enum FlagAction {
    #[default]
    None,
    /// Hand the owning command to the parser's help handler.
    Help,
    Custom(Action),
}

/// A flag (`--verbose`, `-v`).
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use olive_core::{Command, Parser};
///
/// let hits = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&hits);
///
/// let mut cli = Command::new("olive", "", false);
/// cli.add_flag("verbose", "v", "Talk more")
///     .unwrap()
///     .set_action(move || {
///         counter.fetch_add(1, Ordering::SeqCst);
///     });
///
/// let result = Parser::new(&cli).parse(["-v"]).unwrap();
/// assert!(result.has_flag("verbose"));
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
#[derive(Clone)]
pub struct Flag {
    name: String,
    short_name: String,
    description: String,
    action: FlagAction,
}

impl Flag {
    pub(crate) fn new(name: String, short_name: String, description: String) -> Self {
        Self {
            name,
            short_name,
            description,
            action: FlagAction::None,
        }
    }

    pub(crate) fn help() -> Self {
        Self {
            name: HELP_FLAG_NAME.to_string(),
            short_name: HELP_FLAG_SHORT_NAME.to_string(),
            description: "Get help".to_string(),
            action: FlagAction::Help,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Sets the action run (once, synchronously) each time the flag is set.
    ///
    /// Replaces any previous action, including the help behavior of the
    /// auto-registered help flag.
    pub fn set_action<F>(&mut self, action: F) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.action = FlagAction::Custom(Arc::new(action));
        self
    }

    /// Whether this flag triggers the help handler.
    pub fn is_help(&self) -> bool {
        matches!(self.action, FlagAction::Help)
    }

    pub(crate) fn action(&self) -> &FlagAction {
        &self.action
    }
}

impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self.action {
            FlagAction::None => "none",
            FlagAction::Help => "help",
            FlagAction::Custom(_) => "custom",
        };
        f.debug_struct("Flag")
            .field("name", &self.name)
            .field("short_name", &self.short_name)
            .field("action", &action)
            .finish()
    }
}
