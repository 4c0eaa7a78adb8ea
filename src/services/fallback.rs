// src/services/fallback.rs
//! Canned answers used when the generation service cannot be reached.

pub const DISCLAIMER: &str = "\n\n*Note: Currently using demo responses due to API issues. Real AI responses will be available shortly.*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Food,
    Sightseeing,
    Hotel,
    Weather,
}

pub struct FallbackEntry {
    pub topic: Topic,
    pub triggers: &'static [&'static str],
    pub text: &'static str,
}

/// Catalog order. The first entry is the default.
pub static CATALOG: [FallbackEntry; 4] = [
    FallbackEntry {
        topic: Topic::Food,
        triggers: &["food", "eat", "poha"],
        text: "Indore is the largest city in Madhya Pradesh and known as the 'Food Capital of India'. It's famous for its street food, particularly Poha, Samosa, and Garadu. The city has a rich cultural heritage with landmarks like Rajwada Palace and Lal Bagh Palace.",
    },
    FallbackEntry {
        topic: Topic::Sightseeing,
        triggers: &["place", "visit", "temple"],
        text: "Indore offers a variety of attractions including the Kanch Mandir (Glass Temple), Khajrana Ganesh Temple, and the Central Museum. Don't miss trying the local street food at Sarafa Bazaar, which transforms into a food market at night.",
    },
    FallbackEntry {
        topic: Topic::Hotel,
        triggers: &["hotel", "stay", "accommodation"],
        text: "For accommodation in Indore, you can find various options from luxury hotels like Sayaji Hotel and Marriott to budget-friendly guesthouses. The city is well-connected by road, rail, and air, making it easily accessible.",
    },
    FallbackEntry {
        topic: Topic::Weather,
        triggers: &["weather", "time", "when"],
        text: "The best time to visit Indore is during the winter months from October to March when the weather is pleasant. The city hosts several festivals and events, including the Rang Panchami festival which is celebrated with great enthusiasm.",
    },
];

// "Best time to visit?" has to land on Weather, so Sightseeing is checked last.
const PRIORITY: [Topic; 4] = [Topic::Food, Topic::Hotel, Topic::Weather, Topic::Sightseeing];

fn entry(topic: Topic) -> &'static FallbackEntry {
    CATALOG
        .iter()
        .find(|e| e.topic == topic)
        .unwrap_or(&CATALOG[0])
}

/// Triggers match anywhere in the lower-cased message, including inside
/// longer words ("homestay" hits "stay").
pub fn detect_topic(msg: &str) -> Topic {
    let msg_lower = msg.to_lowercase();

    PRIORITY
        .into_iter()
        .find(|topic| entry(*topic).triggers.iter().any(|t| msg_lower.contains(t)))
        .unwrap_or(CATALOG[0].topic)
}

/// Canned text for the message with the disclaimer appended.
pub fn fallback_reply(msg: &str) -> String {
    format!("{}{}", entry(detect_topic(msg)).text, DISCLAIMER)
}
