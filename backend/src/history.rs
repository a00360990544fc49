//! Sample diagnosis history. There is no storage behind this: the history
//! view renders a fixed list.

use chrono::NaiveDate;
use shared::{HealthStatus, HistoryEntry};
use uuid::Uuid;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn sample_history() -> Vec<HistoryEntry> {
    vec![
        HistoryEntry {
            id: Uuid::from_u128(1),
            plant_name: "Tomato Plant".to_string(),
            disease: "Early Blight".to_string(),
            status: HealthStatus::Diseased,
            date: date(2023, 11, 15),
            image_url: "/static/history/tomato.jpg".to_string(),
        },
        HistoryEntry {
            id: Uuid::from_u128(2),
            plant_name: "Rose Bush".to_string(),
            disease: "Black Spot".to_string(),
            status: HealthStatus::Diseased,
            date: date(2023, 11, 12),
            image_url: "/static/history/rose.jpg".to_string(),
        },
        HistoryEntry {
            id: Uuid::from_u128(3),
            plant_name: "Echeveria".to_string(),
            disease: "None".to_string(),
            status: HealthStatus::Healthy,
            date: date(2023, 11, 10),
            image_url: "/static/history/echeveria.jpg".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_entries_are_newest_first() {
        let entries = sample_history();
        assert_eq!(entries.len(), 3);
        assert!(entries.windows(2).all(|pair| pair[0].date >= pair[1].date));
    }

    #[test]
    fn healthy_entry_carries_no_real_disease() {
        let entries = sample_history();
        let echeveria = entries
            .iter()
            .find(|e| e.plant_name == "Echeveria")
            .unwrap();
        assert_eq!(echeveria.status, HealthStatus::Healthy);
        assert_eq!(echeveria.disease, "None");
    }
}
