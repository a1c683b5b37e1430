//! Canned response tables and selection

pub const GREETING: &str =
    "Hello! I'm your ElderEase assistant. How can I help you with social media today?";

/// Rotating acknowledgements, cycled by message count so replies stay
/// deterministic and testable
pub const ACKNOWLEDGEMENTS: [&str; 5] = [
    "I can help with that! Let me guide you step by step.",
    "That's a great question! Here's how you can do it:",
    "Many seniors find this helpful. Here's the process:",
    "I understand this can be confusing. Let me break it down for you:",
    "Perfect! I'll walk you through this in simple steps.",
];

/// Keyword to tip table. Order matters: the first keyword found in the
/// lowercased input wins, so "video call" must come before any future
/// entry that could shadow it.
pub const TIPS: [(&str, &str); 5] = [
    (
        "facebook",
        "On Facebook, you can: 1) Click 'What's on your mind?' to post, 2) Use the camera icon to share photos, 3) Click the heart icon to like posts",
    ),
    (
        "whatsapp",
        "In WhatsApp: 1) Tap the chat to message, 2) Use the paperclip to send photos, 3) Tap the phone icon for calls",
    ),
    (
        "instagram",
        "For Instagram: 1) Tap + to share photos, 2) Heart icons show likes, 3) Use the search magnifying glass to find people",
    ),
    (
        "video call",
        "For video calls: 1) In Facebook Messenger, tap the video camera, 2) In WhatsApp, tap the video camera in a chat, 3) Make sure you allow camera access",
    ),
    (
        "photo",
        "To share photos: 1) Tap the photo/gallery icon, 2) Select your photos, 3) Tap send/share button",
    ),
];

/// Compose a reply: an acknowledgement chosen by turn number, plus the tip
/// for the first matching keyword, if any.
pub fn respond(input: &str, turn: usize) -> String {
    let mut reply = ACKNOWLEDGEMENTS[turn % ACKNOWLEDGEMENTS.len()].to_string();

    let lowered = input.to_lowercase();
    for (keyword, tip) in TIPS.iter() {
        if lowered.contains(keyword) {
            reply.push_str("\n\n");
            reply.push_str(tip);
            break;
        }
    }

    reply
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_match_ignores_case() {
        let reply = respond("How do I use WhatsApp?", 0);
        assert!(reply.starts_with(ACKNOWLEDGEMENTS[0]));
        assert!(reply.contains("In WhatsApp:"));
    }

    #[test]
    fn first_table_entry_wins_on_multiple_matches() {
        let reply = respond("send a photo on facebook", 0);
        assert!(reply.contains("On Facebook"));
        assert!(!reply.contains("To share photos"));
    }

    #[test]
    fn no_keyword_gives_acknowledgement_only() {
        let reply = respond("hello there", 2);
        assert_eq!(reply, ACKNOWLEDGEMENTS[2]);
    }

    #[test]
    fn acknowledgements_cycle_by_turn() {
        assert_eq!(respond("hi", 5), ACKNOWLEDGEMENTS[0]);
        assert_eq!(respond("hi", 7), ACKNOWLEDGEMENTS[2]);
    }

    #[test]
    fn multi_word_keyword_matches() {
        let reply = respond("how do I make a Video Call with my daughter", 0);
        assert!(reply.contains("For video calls"));
    }
}
