//! Typed wrappers, one per remote action.
//!
//! Each wrapper maps its arguments onto the action's wire field names,
//! leaving optional arguments out when they hold their sentinel (zero, empty
//! text, `false`, empty id list), and goes through [`UnuClient::call`], so
//! every wrapper fails on `success: false`.

use crate::client::UnuClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::params::{IdList, Params};
use crate::response::Response;

/// What `reject_report` should do with the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectType {
    /// Send back to the worker for rework.
    Rework = 1,
    /// Reject outright.
    Reject = 2,
}

/// Arguments shared by `add_task` and `edit_task`.
///
/// `name`, `descr`, `need_for_report`, `price`, `tarif_id` and `folder_id`
/// are always sent. Every other field is optional and omitted while it holds
/// its `Default` value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskSpec {
    pub name: String,
    pub descr: String,
    pub link: String,
    pub need_for_report: String,
    /// Price of one completion in rubles.
    pub price: f64,
    pub tarif_id: i64,
    pub folder_id: i64,
    pub need_screen: bool,
    pub anonym_task: bool,
    /// Hours a worker gets to finish, 2..=168.
    pub time_for_work: i64,
    /// Hours you need to review, 10..=168.
    pub time_for_check: i64,
    pub limit_per_day: i64,
    pub limit_per_hour: i64,
    pub limit_per_user: i64,
    pub limit_per_user_folder: i64,
    pub limit_per_ip: i64,
    /// Minimum worker level: 1 basic, 2 advanced, 3 high, 4 pro.
    pub limit_only_for_level_id: i64,
    pub limit_date_from: String,
    pub limit_date_to: String,
    /// Minutes between completions.
    pub delay_from: i64,
    pub delay_to: i64,
    /// 1 female, 2 male.
    pub targeting_gender: i64,
    pub targeting_age_from: i64,
    pub targeting_age_to: i64,
    pub targeting_geo_country_id: i64,
    pub targeting_geo_region_id: i64,
    pub targeting_geo_city_id: i64,
    pub task_only_for_list_id: i64,
    pub list_of_pages: String,
}

impl TaskSpec {
    pub fn new(
        name: &str,
        descr: &str,
        need_for_report: &str,
        price: f64,
        tarif_id: i64,
        folder_id: i64,
    ) -> Self {
        Self {
            name: name.to_string(),
            descr: descr.to_string(),
            need_for_report: need_for_report.to_string(),
            price,
            tarif_id,
            folder_id,
            ..Self::default()
        }
    }

    pub fn to_params(&self) -> Params {
        Params::new()
            .with("name", &self.name)
            .with("descr", &self.descr)
            .with("need_for_report", &self.need_for_report)
            .with("price", self.price)
            .with("tarif_id", self.tarif_id)
            .with("folder_id", self.folder_id)
            .with_opt("link", &self.link)
            .with_opt("need_screen", self.need_screen)
            .with_opt("anonym_task", self.anonym_task)
            .with_opt("time_for_work", self.time_for_work)
            .with_opt("time_for_check", self.time_for_check)
            .with_opt("limit_per_day", self.limit_per_day)
            .with_opt("limit_per_hour", self.limit_per_hour)
            .with_opt("limit_per_user", self.limit_per_user)
            .with_opt("limit_per_user_folder", self.limit_per_user_folder)
            .with_opt("limit_per_ip", self.limit_per_ip)
            .with_opt("limit_only_for_level_id", self.limit_only_for_level_id)
            .with_opt("limit_date_from", &self.limit_date_from)
            .with_opt("limit_date_to", &self.limit_date_to)
            .with_opt("delay_from", self.delay_from)
            .with_opt("delay_to", self.delay_to)
            .with_opt("targeting_gender", self.targeting_gender)
            .with_opt("targeting_age_from", self.targeting_age_from)
            .with_opt("targeting_age_to", self.targeting_age_to)
            .with_opt("targeting_geo_country_id", self.targeting_geo_country_id)
            .with_opt("targeting_geo_region_id", self.targeting_geo_region_id)
            .with_opt("targeting_geo_city_id", self.targeting_geo_city_id)
            .with_opt("task_only_for_list_id", self.task_only_for_list_id)
            .with_opt("list_of_pages", &self.list_of_pages)
    }
}

impl<T: Transport> UnuClient<T> {
    /// Available funds (`balance`) and funds frozen by running tasks
    /// (`blocked_money`).
    pub fn get_balance(&self) -> Result<Response, ApiError> {
        self.call("get_balance", None)
    }

    /// All folders, in `folders`.
    pub fn get_folders(&self) -> Result<Response, ApiError> {
        self.call("get_folders", None)
    }

    /// Create a folder. The new id comes back in `folder_id`.
    pub fn create_folder(&self, name: &str) -> Result<Response, ApiError> {
        let params = Params::new().with("name", name);
        self.call("create_folder", Some(&params))
    }

    pub fn del_folder(&self, folder_id: i64) -> Result<Response, ApiError> {
        let params = Params::new().with("folder_id", folder_id);
        self.call("del_folder", Some(&params))
    }

    pub fn move_task(&self, task_id: i64, folder_id: i64) -> Result<Response, ApiError> {
        let params = Params::new()
            .with("task_id", task_id)
            .with("folder_id", folder_id);
        self.call("move_task", Some(&params))
    }

    /// List tasks, optionally filtered by folder, status and task id.
    ///
    /// The server returns at most 50 000 rows; `offset` pages past them.
    pub fn get_tasks(
        &self,
        folder_id: i64,
        status: impl Into<IdList>,
        task_id: impl Into<IdList>,
        offset: i64,
    ) -> Result<Response, ApiError> {
        let status: IdList = status.into();
        let task_id: IdList = task_id.into();
        let params = Params::new()
            .with_opt("folder_id", folder_id)
            .with_opt("status", status)
            .with_opt("task_id", task_id)
            .with_opt("offset", offset);
        self.call("get_tasks", Some(&params))
    }

    /// Reports for one or several tasks. At most 1000 rows per page.
    pub fn get_reports(&self, task_id: impl Into<IdList>, offset: i64) -> Result<Response, ApiError> {
        let task_id: IdList = task_id.into();
        let params = Params::new()
            .with("task_id", task_id)
            .with_opt("offset", offset);
        self.call("get_reports", Some(&params))
    }

    /// Accept and pay a report.
    pub fn approve_report(&self, report_id: i64) -> Result<Response, ApiError> {
        let params = Params::new().with("report_id", report_id);
        self.call("approve_report", Some(&params))
    }

    pub fn reject_report(
        &self,
        report_id: i64,
        comment: &str,
        reject_type: RejectType,
    ) -> Result<Response, ApiError> {
        let params = Params::new()
            .with("report_id", report_id)
            .with("comment", comment)
            .with("reject_type", reject_type as i64);
        self.call("reject_report", Some(&params))
    }

    /// Spend, optionally narrowed to a task, a folder and a date range
    /// (`YYYY-MM-DD HH:MM:SS`).
    pub fn get_expenses(
        &self,
        task_id: i64,
        folder_id: i64,
        date_from: &str,
        date_to: &str,
    ) -> Result<Response, ApiError> {
        let params = Params::new()
            .with_opt("task_id", task_id)
            .with_opt("folder_id", folder_id)
            .with_opt("date_from", date_from)
            .with_opt("date_to", date_to);
        self.call("get_expenses", Some(&params))
    }

    /// Create a task. The new id comes back in `task_id`; the task stays in
    /// status 1 until `task_limit_add` funds it.
    pub fn add_task(&self, task: &TaskSpec) -> Result<Response, ApiError> {
        self.call("add_task", Some(&task.to_params()))
    }

    pub fn task_limit_add(&self, task_id: i64, add_to_limit: i64) -> Result<Response, ApiError> {
        let params = Params::new()
            .with("task_id", task_id)
            .with("add_to_limit", add_to_limit);
        self.call("task_limit_add", Some(&params))
    }

    pub fn task_limit_sub(&self, task_id: i64, sub_to_limit: i64) -> Result<Response, ApiError> {
        let params = Params::new()
            .with("task_id", task_id)
            .with("sub_to_limit", sub_to_limit);
        self.call("task_limit_sub", Some(&params))
    }

    pub fn edit_task(&self, task_id: i64, task: &TaskSpec) -> Result<Response, ApiError> {
        let params = task.to_params().with("task_id", task_id);
        self.call("edit_task", Some(&params))
    }

    pub fn del_task(&self, task_id: i64) -> Result<Response, ApiError> {
        let params = Params::new().with("task_id", task_id);
        self.call("del_task", Some(&params))
    }

    pub fn get_tariffs(&self) -> Result<Response, ApiError> {
        self.call("get_tariffs", None)
    }

    pub fn get_countries(&self) -> Result<Response, ApiError> {
        self.call("get_countries", None)
    }

    pub fn task_pause(&self, task_id: i64) -> Result<Response, ApiError> {
        let params = Params::new().with("task_id", task_id);
        self.call("task_pause", Some(&params))
    }

    pub fn task_play(&self, task_id: i64) -> Result<Response, ApiError> {
        let params = Params::new().with("task_id", task_id);
        self.call("task_play", Some(&params))
    }

    /// One-off paid bump of the task in search results.
    pub fn task_to_top(&self, task_id: i64) -> Result<Response, ApiError> {
        let params = Params::new().with("task_id", task_id);
        self.call("task_to_top", Some(&params))
    }

    pub fn add_blacklist(&self, user_id: i64) -> Result<Response, ApiError> {
        let params = Params::new().with("add_blacklist_id", user_id);
        self.call("add_blacklist", Some(&params))
    }

    pub fn add_whitelist(&self, user_id: i64) -> Result<Response, ApiError> {
        let params = Params::new().with("add_whitelist_id", user_id);
        self.call("add_whitelist", Some(&params))
    }

    /// Blacklisted user ids, in `users`.
    pub fn get_blacklist(&self) -> Result<Response, ApiError> {
        self.call("get_blacklist", None)
    }

    pub fn delete_user_blacklist(&self, user_id: i64) -> Result<Response, ApiError> {
        let params = Params::new().with("id_user_blacklist", user_id);
        self.call("delete_user_blacklist", Some(&params))
    }
}
