use reading_core::model::ResultRecord;
use reading_core::scorer::percent;

use crate::vm::time_fmt::{format_datetime, format_reading_date};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryItemVm {
    pub result_id: String,
    pub date_label: String,
    pub submitted_at: String,
    pub title: String,
    /// Server-recorded score, shown as-is.
    pub score_label: String,
    pub percent: u8,
}

impl From<&ResultRecord> for HistoryItemVm {
    fn from(record: &ResultRecord) -> Self {
        let title = if record.passage.title.trim().is_empty() {
            "Untitled reading".to_string()
        } else {
            record.passage.title.clone()
        };
        Self {
            result_id: record.result_id.as_str().to_string(),
            date_label: format_reading_date(&record.date),
            submitted_at: format_datetime(record.created_at),
            title,
            score_label: format!("{}/{}", record.client_score, record.total),
            percent: percent(record.client_score, record.total),
        }
    }
}

#[must_use]
pub fn map_history_items(records: &[ResultRecord]) -> Vec<HistoryItemVm> {
    records.iter().map(HistoryItemVm::from).collect()
}

#[cfg(test)]
mod tests {
    use reading_core::model::{ResultId, ResultPassage, Suggestions, UserId};
    use reading_core::time::fixed_now;

    use super::*;

    fn record(client_score: u32, total: u32, title: &str) -> ResultRecord {
        ResultRecord {
            user_id: UserId::new("user"),
            result_id: ResultId::new("r1"),
            date: "2025-03-07".into(),
            client_score,
            total,
            created_at: fixed_now(),
            suggestions: Suggestions::default(),
            passage: ResultPassage {
                title: title.into(),
                ..ResultPassage::default()
            },
            answers: Vec::new(),
        }
    }

    #[test]
    fn shows_recorded_score_and_percent() {
        let items = map_history_items(&[record(3, 4, "Harbor")]);
        assert_eq!(items[0].score_label, "3/4");
        assert_eq!(items[0].percent, 75);
        assert_eq!(items[0].title, "Harbor");
        assert_eq!(items[0].date_label, "Friday, Mar 7");
    }

    #[test]
    fn blank_titles_and_zero_totals_are_safe() {
        let item = HistoryItemVm::from(&record(0, 0, " "));
        assert_eq!(item.title, "Untitled reading");
        assert_eq!(item.percent, 0);
    }
}
