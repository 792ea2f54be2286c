//! Queue event bodies exchanged with the complaint service
//!
//! The complaint service publishes `complaint.created` events carrying two
//! identifiers: the numeric database row id (`complaintId`) and the public
//! complaint reference (`complaint_id`, a "CMP-…" string). Both are echoed
//! back on the classified event so every downstream consumer can correlate
//! without a lookup.

use crate::types::ClassificationResult;
use serde::{Deserialize, Serialize};

/// Event consumed from the `complaint.created` queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintCreatedEvent {
    /// Numeric database row id
    #[serde(rename = "complaintId")]
    pub record_id: i64,

    /// Public complaint reference (e.g. "CMP-1712000000-AB12CD34")
    #[serde(rename = "complaint_id")]
    pub reference: String,

    /// Complaint title; missing treated as empty
    #[serde(default)]
    pub title: String,

    /// Complaint body text; missing treated as empty
    #[serde(default)]
    pub description: String,
}

/// Event published with routing key `complaint.classified`
///
/// The classification fields mirror [`ClassificationResult`] with
/// `confidence` renamed `category_confidence` for the downstream consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintClassifiedEvent {
    /// Numeric database row id of the original complaint
    #[serde(rename = "complaintId")]
    pub record_id: i64,

    /// Public complaint reference of the original complaint
    #[serde(rename = "complaint_id")]
    pub reference: String,

    pub category_id: Option<i64>,

    pub category_name: String,

    pub category_confidence: f64,

    pub department_id: Option<i64>,

    pub keywords_matched: Vec<String>,

    pub needs_manual_review: bool,
}

impl ComplaintClassifiedEvent {
    /// Combine the original complaint identifiers with a classification result
    pub fn from_result(created: &ComplaintCreatedEvent, result: ClassificationResult) -> Self {
        Self {
            record_id: created.record_id,
            reference: created.reference.clone(),
            category_id: result.category_id,
            category_name: result.category_name,
            category_confidence: result.confidence,
            department_id: result.department_id,
            keywords_matched: result.keywords_matched,
            needs_manual_review: result.needs_manual_review,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_event_parses_wire_names() {
        let body = r#"{
            "complaintId": 42,
            "complaint_id": "CMP-1712000000-AB12CD34",
            "title": "Street light out",
            "description": "The lamp post is dark",
            "citizen_id": 7
        }"#;

        let event: ComplaintCreatedEvent = serde_json::from_str(body).unwrap();
        assert_eq!(event.record_id, 42);
        assert_eq!(event.reference, "CMP-1712000000-AB12CD34");
        assert_eq!(event.title, "Street light out");
    }

    #[test]
    fn created_event_defaults_missing_text() {
        let body = r#"{"complaintId": 1, "complaint_id": "CMP-X"}"#;
        let event: ComplaintCreatedEvent = serde_json::from_str(body).unwrap();
        assert_eq!(event.title, "");
        assert_eq!(event.description, "");
    }

    #[test]
    fn classified_event_renames_confidence() {
        let created = ComplaintCreatedEvent {
            record_id: 9,
            reference: "CMP-A".to_string(),
            title: String::new(),
            description: String::new(),
        };
        let mut result = ClassificationResult::unclassified();
        result.confidence = 0.95;

        let event = ComplaintClassifiedEvent::from_result(&created, result);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["complaintId"], 9);
        assert_eq!(json["complaint_id"], "CMP-A");
        assert_eq!(json["category_confidence"], 0.95);
        assert!(json.get("confidence").is_none());
    }
}
