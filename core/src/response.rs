//! Decoded response record shared by every action.
//!
//! # Design
//! The endpoint answers every action with one JSON object whose fields depend
//! on the action. `Response` is the union of all of them. Every field is
//! optional: scalars are `Option`, collections are `Vec`, and anything the
//! server did not send stays `None` or empty rather than collapsing to zero.
//! Numeric fields go through [`crate::lenient`] because the server quotes
//! numbers inconsistently.

use serde::Deserialize;

use crate::lenient;

/// A task folder.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Folder {
    #[serde(default, deserialize_with = "lenient::int")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A task as returned by `get_tasks`.
///
/// `status`: 1 new (needs funding), 2 limit reached, 3 paused, 4 active,
/// 5 rejected by moderator, 6 under moderation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Task {
    #[serde(default, deserialize_with = "lenient::int")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub price_rub: Option<f64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub tarif_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub status: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub folder_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub limit_total: Option<i64>,
}

/// One message in a report thread.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReportMessage {
    #[serde(default, deserialize_with = "lenient::int")]
    pub from_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub to_id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// A worker's report on a task.
///
/// `status`: 1 in progress, 2 awaiting review, 3 sent back for rework, 6 paid.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Report {
    #[serde(default, deserialize_with = "lenient::int")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub task_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub worker_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub price_rub: Option<f64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub status: Option<i64>,
    #[serde(default, rename = "IP")]
    pub ip: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub messages: Vec<ReportMessage>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub files: Vec<String>,
}

/// Spend for a single day in `get_expenses`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DayExpense {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub expenses: Option<f64>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub expenses_in_rub: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Tariff {
    #[serde(default, deserialize_with = "lenient::int")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub min_price_rub: Option<f64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub group_id: Option<i64>,
}

/// A targeting country. Id 236 is the "CIS and nearby" group.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Country {
    #[serde(default, deserialize_with = "lenient::int")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

/// The decoded body of any call.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub success: bool,
    #[serde(default)]
    pub errors: Option<String>,

    // get_balance
    #[serde(default, deserialize_with = "lenient::float")]
    pub balance: Option<f64>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub blocked_money: Option<f64>,

    // collections
    #[serde(default, deserialize_with = "lenient::list")]
    pub folders: Vec<Folder>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub tasks: Vec<Task>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub reports: Vec<Report>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub tariffs: Vec<Tariff>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub countries: Vec<Country>,
    #[serde(default, deserialize_with = "lenient::int_list")]
    pub users: Vec<i64>,

    // get_expenses
    #[serde(default, deserialize_with = "lenient::float")]
    pub expenses: Option<f64>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub expenses_in_rub: Option<f64>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub group_by_days: Vec<DayExpense>,

    // scalars echoed back by individual actions
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub folder_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub task_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub status: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub offset: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub report_id: Option<i64>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub reject_type: Option<i64>,
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
    #[serde(default)]
    pub descr: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub need_for_report: Option<String>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub tarif_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_flag")]
    pub need_screen: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_flag")]
    pub anonym_task: Option<bool>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub time_for_work: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub time_for_check: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub limit_per_day: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub limit_per_hour: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub limit_per_user: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub limit_per_user_folder: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub limit_per_ip: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub limit_only_for_level_id: Option<i64>,
    #[serde(default)]
    pub limit_date_from: Option<String>,
    #[serde(default)]
    pub limit_date_to: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub delay_from: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub delay_to: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub targeting_gender: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub targeting_age_from: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub targeting_age_to: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub targeting_geo_country_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub targeting_geo_region_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub targeting_geo_city_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub task_only_for_list_id: Option<i64>,
    #[serde(default)]
    pub list_of_pages: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub add_to_limit: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub sub_to_limit: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub add_blacklist_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub add_whitelist_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub id_user_blacklist: Option<i64>,
}

impl Response {
    /// The server's error text, or a generic message when `errors` is absent.
    pub fn error_message(&self) -> String {
        match self.errors.as_deref() {
            Some(msg) if !msg.is_empty() => msg.to_string(),
            _ => "request failed".to_string(),
        }
    }
}
