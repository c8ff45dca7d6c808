//! Static screen content
//!
//! The tab table and the demo data shown on each tab. Nothing here is
//! loaded or saved.

use crate::types::{ChatPreview, Gradient, IconRef, Like, ProfileCard, Rgb, TabDescriptor};
use chrono::{DateTime, Duration, Local};

/// Tab table, in display order
pub const TABS: &[TabDescriptor] = &[
    TabDescriptor {
        name: "discover",
        icon: IconRef { family: "ionicons", name: "flame" },
        label: "Discover",
        gradient: Gradient::new(Rgb(255, 88, 100), Rgb(255, 156, 84)),
        notification: false,
        notification_count: None,
        heartbeat: false,
    },
    TabDescriptor {
        name: "likes",
        icon: IconRef { family: "ionicons", name: "heart" },
        label: "Likes",
        gradient: Gradient::new(Rgb(238, 66, 150), Rgb(255, 120, 180)),
        notification: true,
        notification_count: Some(128),
        heartbeat: true,
    },
    TabDescriptor {
        name: "chats",
        icon: IconRef { family: "ionicons", name: "chatbubbles" },
        label: "Chats",
        gradient: Gradient::new(Rgb(142, 84, 233), Rgb(71, 118, 230)),
        notification: true,
        notification_count: Some(7),
        heartbeat: false,
    },
    TabDescriptor {
        name: "profile",
        icon: IconRef { family: "material-community", name: "account-circle" },
        label: "Profile",
        gradient: Gradient::new(Rgb(17, 153, 142), Rgb(56, 239, 125)),
        notification: false,
        notification_count: None,
        heartbeat: false,
    },
];

/// Route names of the tab shell
pub fn tab_routes() -> Vec<&'static str> {
    TABS.iter().map(|t| t.name).collect()
}

pub const CARDS: &[ProfileCard] = &[
    ProfileCard {
        name: "Maya",
        age: 27,
        distance_km: 3,
        bio: "Climbing on weekends, film photography the rest of the time.",
        interests: &["climbing", "film", "coffee"],
    },
    ProfileCard {
        name: "Jonas",
        age: 31,
        distance_km: 8,
        bio: "Will cook for you. Terrible at karaoke, does it anyway.",
        interests: &["cooking", "karaoke", "cycling"],
    },
    ProfileCard {
        name: "Priya",
        age: 29,
        distance_km: 1,
        bio: "Looking for someone to split a dessert with.",
        interests: &["baking", "board games", "travel"],
    },
    ProfileCard {
        name: "Leo",
        age: 26,
        distance_km: 12,
        bio: "Dog dad. The dog is the real catch here.",
        interests: &["dogs", "hiking", "jazz"],
    },
];

pub const LIKES: &[Like] = &[
    Like { name: "Sam", age: 28, super_like: true },
    Like { name: "Ana", age: 25, super_like: false },
    Like { name: "Kofi", age: 33, super_like: false },
    Like { name: "Elif", age: 30, super_like: true },
    Like { name: "Noah", age: 27, super_like: false },
    Like { name: "Yuki", age: 24, super_like: false },
];

/// Conversation previews, timestamped relative to `now`
pub fn chats(now: DateTime<Local>) -> Vec<ChatPreview> {
    vec![
        ChatPreview {
            name: "Maya",
            last_message: "Okay that photo of the sunrise is unreal",
            sent_at: now - Duration::minutes(2),
            unread: 2,
            online: true,
        },
        ChatPreview {
            name: "Sam",
            last_message: "Tacos on Friday?",
            sent_at: now - Duration::hours(3),
            unread: 1,
            online: false,
        },
        ChatPreview {
            name: "Priya",
            last_message: "Haha you did not",
            sent_at: now - Duration::days(2),
            unread: 4,
            online: true,
        },
        ChatPreview {
            name: "Jonas",
            last_message: "See you there!",
            sent_at: now - Duration::days(9),
            unread: 0,
            online: false,
        },
    ]
}

/// The signed-in user's own profile, as shown on the profile tab
pub static ME: ProfileCard = ProfileCard {
    name: "Alex",
    age: 28,
    distance_km: 0,
    bio: "Runner, reader, occasional pancake artist.",
    interests: &["running", "books", "brunch"],
};
