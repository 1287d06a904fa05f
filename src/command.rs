use strum::{EnumIter, EnumMessage, EnumString, IntoEnumIterator};

/// A top-level menu entry, parsed from one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, EnumMessage)]
#[strum(ascii_case_insensitive)]
pub enum MenuCommand {
    #[strum(serialize = "1", message = "⚡ Update App (Keep Data)")]
    UpdateApp,
    #[strum(serialize = "2", message = "📲 Launch Emulator")]
    LaunchEmulator,
    #[strum(serialize = "3", message = "🔄 Restart ADB Server")]
    RestartBridge,
    #[strum(serialize = "4", message = "🧹 Clean Install (Wipe App Data)")]
    CleanInstallApp,
    #[strum(serialize = "q", serialize = "quit", message = "🚪 Quit")]
    Quit,
    #[strum(disabled)]
    Unrecognized,
}

impl MenuCommand {
    pub fn parse(input: &str) -> Self {
        input.trim().parse().unwrap_or(Self::Unrecognized)
    }

    pub fn key(self) -> Option<&'static str> {
        match self {
            Self::UpdateApp => Some("1"),
            Self::LaunchEmulator => Some("2"),
            Self::RestartBridge => Some("3"),
            Self::CleanInstallApp => Some("4"),
            Self::Quit => Some("q"),
            Self::Unrecognized => None,
        }
    }

    /// `(key, label)` pairs in menu order.
    pub fn menu_entries() -> impl Iterator<Item = (&'static str, &'static str)> {
        Self::iter().filter_map(|c| Some((c.key()?, c.get_message()?)))
    }
}

/// Maps a 1-based numeric pick onto `0..len`. Empty, non-numeric or
/// out-of-range input falls back to the first entry.
pub fn select_index(input: &str, len: usize) -> usize {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map_or(0, |n| n - 1)
}

/// Only an explicit yes counts.
pub fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
