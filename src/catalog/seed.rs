//! Seed fixtures for the tutorial catalog
//!
//! Used once to populate an empty catalog table and reused by tests.
//! Runtime reads always go through `TutorialCatalog`, never through these
//! tables directly.

use super::{Difficulty, Step, Tutorial};

fn step(id: u32, title: &str, content: &str, duration: u32) -> Step {
    Step {
        id,
        title: title.to_string(),
        content: content.to_string(),
        detailed_description: None,
        image_url: None,
        video_url: None,
        duration,
        tips: Vec::new(),
    }
}

/// The fixed tutorial set
pub fn tutorials() -> Vec<Tutorial> {
    vec![
        Tutorial {
            id: "1".to_string(),
            title: "Facebook Basics: Creating Your First Post".to_string(),
            description: "Learn how to create and share posts on Facebook".to_string(),
            category: "facebook".to_string(),
            platform: "facebook".to_string(),
            difficulty: Difficulty::Beginner,
            estimated_time: 10,
            steps: vec![
                step(1, "Open Facebook", "Click the Facebook app icon", 2),
                step(2, "Find Post Box", "Look for \"What's on your mind?\"", 2),
                step(3, "Write Your Message", "Type what you want to share", 3),
                step(4, "Share Your Post", "Click the \"Post\" button", 3),
            ],
        },
        Tutorial {
            id: "2".to_string(),
            title: "WhatsApp: Sending Photos to Family".to_string(),
            description: "Learn how to send photos through WhatsApp".to_string(),
            category: "whatsapp".to_string(),
            platform: "whatsapp".to_string(),
            difficulty: Difficulty::Beginner,
            estimated_time: 8,
            steps: vec![
                step(1, "Open WhatsApp", "Tap the WhatsApp icon", 1),
                step(2, "Choose Contact", "Select a family member", 1),
                step(3, "Attach Photo", "Tap the paperclip icon", 2),
                step(4, "Select Photo", "Choose a photo from your gallery", 2),
                step(5, "Send", "Tap the send button", 2),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_ids_are_unique() {
        let fixtures = tutorials();
        let mut ids: Vec<&str> = fixtures.iter().map(|t| t.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), fixtures.len());
    }

    #[test]
    fn step_ids_are_sequential_from_one() {
        for tutorial in tutorials() {
            for (index, step) in tutorial.steps.iter().enumerate() {
                assert_eq!(step.id as usize, index + 1, "tutorial {}", tutorial.id);
            }
        }
    }
}
