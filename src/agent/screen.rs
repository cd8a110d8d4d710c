//! Advisory screen-state classification.

use std::fmt;

use crate::model::VisionReply;

/// Named screen states the analysis prompt can report.
///
/// Advisory only: the planner routes on these when available but never
/// hard-fails on `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    PrimaryFolder,
    PromotionsFolder,
    SocialFolder,
    UpdatesFolder,
    SpamFolder,
    MenuOpen,
    Unknown,
}

impl ScreenState {
    /// Derive the state from an analysis reply.
    ///
    /// The folder name wins when present; otherwise `screen_type` is used
    /// to at least recognize an open side menu.
    pub fn from_reply(reply: &VisionReply) -> Self {
        if let Some(folder) = reply.folder_name.as_deref() {
            match folder.to_ascii_lowercase().as_str() {
                "primary" => return Self::PrimaryFolder,
                "promotions" => return Self::PromotionsFolder,
                "social" => return Self::SocialFolder,
                "updates" => return Self::UpdatesFolder,
                "spam" => return Self::SpamFolder,
                _ => {}
            }
        }

        match reply.screen_type.as_deref() {
            Some("side_menu") => Self::MenuOpen,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ScreenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PrimaryFolder => "Primary",
            Self::PromotionsFolder => "Promotions",
            Self::SocialFolder => "Social",
            Self::UpdatesFolder => "Updates",
            Self::SpamFolder => "Spam",
            Self::MenuOpen => "menu open",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_reply;

    #[test]
    fn test_folder_name_wins() {
        let reply = parse_reply(
            r#"{"app": "Gmail", "screen_type": "inbox_list", "folder_name": "Promotions"}"#,
        )
        .unwrap();
        assert_eq!(ScreenState::from_reply(&reply), ScreenState::PromotionsFolder);
    }

    #[test]
    fn test_side_menu_detected() {
        let reply = parse_reply(r#"{"app": "Gmail", "screen_type": "side_menu"}"#).unwrap();
        assert_eq!(ScreenState::from_reply(&reply), ScreenState::MenuOpen);
    }

    #[test]
    fn test_unrecognized_is_unknown_not_an_error() {
        let reply = parse_reply(r#"{"screen_type": "browser_page", "folder_name": "Starred"}"#)
            .unwrap();
        assert_eq!(ScreenState::from_reply(&reply), ScreenState::Unknown);

        let empty = parse_reply("{}").unwrap();
        assert_eq!(ScreenState::from_reply(&empty), ScreenState::Unknown);
    }

    #[test]
    fn test_case_insensitive_folder_names() {
        let reply = parse_reply(r#"{"folder_name": "SPAM"}"#).unwrap();
        assert_eq!(ScreenState::from_reply(&reply), ScreenState::SpamFolder);
    }
}
