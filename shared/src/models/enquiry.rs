//! Enquiry Model

use serde::{Deserialize, Serialize};

/// What the enquiry is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnquiryType {
    CustomCake,
    Products,
    Delivery,
    #[default]
    General,
}

impl std::fmt::Display for EnquiryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EnquiryType::CustomCake => "custom_cake",
            EnquiryType::Products => "products",
            EnquiryType::Delivery => "delivery",
            EnquiryType::General => "general",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnquiryStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl std::fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EnquiryStatus::Pending => "pending",
            EnquiryStatus::InProgress => "in_progress",
            EnquiryStatus::Completed => "completed",
            EnquiryStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Customer enquiry: created by submission, status mutated by admin,
/// never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub enquiry_type: EnquiryType,
    pub message: String,
    #[serde(default)]
    pub status: EnquiryStatus,
    #[serde(default)]
    pub created_at: i64,
}
