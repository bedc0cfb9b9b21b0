//! Keyboard commands

/// Navigation command bound to a key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    /// Step forward (ArrowRight, ArrowDown)
    Next,
    /// Step backward (ArrowLeft, ArrowUp)
    Prev,
    /// Jump to the first item (Home)
    First,
    /// Jump to the last item (End)
    Last,
}

impl KeyCommand {
    /// Map a `KeyboardEvent.key` value to a command
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" | "ArrowDown" => Some(KeyCommand::Next),
            "ArrowLeft" | "ArrowUp" => Some(KeyCommand::Prev),
            "Home" => Some(KeyCommand::First),
            "End" => Some(KeyCommand::Last),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(KeyCommand::from_key("ArrowRight"), Some(KeyCommand::Next));
        assert_eq!(KeyCommand::from_key("ArrowDown"), Some(KeyCommand::Next));
        assert_eq!(KeyCommand::from_key("ArrowLeft"), Some(KeyCommand::Prev));
        assert_eq!(KeyCommand::from_key("ArrowUp"), Some(KeyCommand::Prev));
        assert_eq!(KeyCommand::from_key("Home"), Some(KeyCommand::First));
        assert_eq!(KeyCommand::from_key("End"), Some(KeyCommand::Last));
        assert_eq!(KeyCommand::from_key("Enter"), None);
    }
}
