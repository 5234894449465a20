use crate::model::{OutgoingMessage, QuickReply};

pub const MENU_PROMPT: &str = "Select a city:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    pub name: &'static str,
    /// OpenWeatherMap city id, also used as the quick reply payload.
    pub id: &'static str,
}

pub const CITIES: [City; 7] = [
    City { name: "Singapore", id: "1880252" },
    City { name: "Jakarta", id: "1642911" },
    City { name: "Kuala Lumpur", id: "1733046" },
    City { name: "Bangkok", id: "1609350" },
    City { name: "Phnom Penh", id: "1821306" },
    City { name: "Kingston", id: "3489854" },
    City { name: "Havana", id: "3553478" },
];

pub fn find_by_id(id: &str) -> Option<&'static City> {
    CITIES.iter().find(|city| city.id == id)
}

/// Quick reply menu sent on first contact.
pub fn city_menu() -> OutgoingMessage {
    OutgoingMessage {
        text: MENU_PROMPT.to_string(),
        quick_replies: Some(
            CITIES
                .iter()
                .map(|city| QuickReply {
                    content_type: "text".to_string(),
                    title: city.name.to_string(),
                    payload: city.id.to_string(),
                })
                .collect(),
        ),
    }
}
