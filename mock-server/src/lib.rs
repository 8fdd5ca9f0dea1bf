use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use axum::{extract::State, routing::post, Form, Json, Router};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

pub const DEFAULT_API_KEY: &str = "test-key";
pub const DEFAULT_BALANCE: f64 = 1000.0;
/// Price of one `task_to_top` bump.
pub const TO_TOP_PRICE: f64 = 10.0;

#[derive(Clone, Debug)]
pub struct Tariff {
    pub id: i64,
    pub name: &'static str,
    pub min_price_rub: f64,
    pub group_id: i64,
}

pub const TARIFFS: &[Tariff] = &[
    Tariff { id: 1, name: "Likes", min_price_rub: 0.5, group_id: 1 },
    Tariff { id: 2, name: "Reviews", min_price_rub: 5.0, group_id: 1 },
    Tariff { id: 12, name: "Registrations", min_price_rub: 3.0, group_id: 2 },
];

pub const COUNTRIES: &[(i64, &str)] = &[(1, "Russia"), (2, "Kazakhstan"), (236, "CIS and nearby")];

#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub descr: String,
    pub need_for_report: String,
    pub price_rub: f64,
    pub tarif_id: i64,
    pub folder_id: i64,
    pub status: i64,
    pub limit_total: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub id: i64,
    pub task_id: i64,
    pub worker_id: i64,
    pub price_rub: f64,
    pub status: i64,
    pub ip: String,
    pub comment: Option<String>,
}

/// In-memory account behind one API key.
#[derive(Debug)]
pub struct Store {
    pub api_key: String,
    pub balance: f64,
    pub blocked_money: f64,
    pub expenses: f64,
    pub folders: BTreeMap<i64, String>,
    pub tasks: BTreeMap<i64, Task>,
    pub reports: BTreeMap<i64, Report>,
    pub blacklist: BTreeSet<i64>,
    pub whitelist: BTreeSet<i64>,
    next_id: i64,
}

impl Store {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            balance: DEFAULT_BALANCE,
            blocked_money: 0.0,
            expenses: 0.0,
            folders: BTreeMap::new(),
            tasks: BTreeMap::new(),
            reports: BTreeMap::new(),
            blacklist: BTreeSet::new(),
            whitelist: BTreeSet::new(),
            next_id: 1,
        }
    }

    fn next_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Simulate a worker submitting a report for review.
    pub fn submit_report(&mut self, task_id: i64, worker_id: i64) -> Option<i64> {
        let price_rub = self.tasks.get(&task_id)?.price_rub;
        let id = self.next_id();
        self.reports.insert(
            id,
            Report {
                id,
                task_id,
                worker_id,
                price_rub,
                status: 2,
                ip: "127.0.0.1".to_string(),
                comment: None,
            },
        );
        Some(id)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(DEFAULT_API_KEY)
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Arc::new(RwLock::new(Store::default())))
}

pub fn app_with(db: Db) -> Router {
    Router::new().route("/api", post(rpc)).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

type Outcome = Result<Value, String>;

/// Form fields of one call, with lookups that produce the endpoint's error texts.
struct Call {
    fields: HashMap<String, String>,
}

impl Call {
    fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str).filter(|s| !s.is_empty())
    }

    fn required_text(&self, key: &str) -> Result<&str, String> {
        self.text(key).ok_or_else(|| format!("missing parameter: {key}"))
    }

    fn int(&self, key: &str) -> Result<Option<i64>, String> {
        match self.text(key) {
            None => Ok(None),
            Some(s) => s
                .parse()
                .map(Some)
                .map_err(|_| format!("invalid integer for {key}: {s}")),
        }
    }

    fn required_int(&self, key: &str) -> Result<i64, String> {
        self.int(key)?.ok_or_else(|| format!("missing parameter: {key}"))
    }

    fn float(&self, key: &str) -> Result<Option<f64>, String> {
        match self.text(key) {
            None => Ok(None),
            Some(s) => s
                .parse()
                .map(Some)
                .map_err(|_| format!("invalid number for {key}: {s}")),
        }
    }

    fn required_float(&self, key: &str) -> Result<f64, String> {
        self.float(key)?.ok_or_else(|| format!("missing parameter: {key}"))
    }

    /// Comma-separated id list; absent means no filter.
    fn ids(&self, key: &str) -> Result<Option<Vec<i64>>, String> {
        match self.text(key) {
            None => Ok(None),
            Some(s) => s
                .split(',')
                .map(|part| {
                    part.trim()
                        .parse()
                        .map_err(|_| format!("invalid id list for {key}: {s}"))
                })
                .collect::<Result<Vec<i64>, String>>()
                .map(Some),
        }
    }
}

async fn rpc(State(db): State<Db>, Form(pairs): Form<Vec<(String, String)>>) -> Json<Value> {
    let mut actions = pairs
        .iter()
        .filter(|(k, _)| k == "action")
        .map(|(_, v)| v.clone());
    let action = actions.next();
    let duplicated = actions.next().is_some();

    let outcome = match action {
        None => Err("missing action".to_string()),
        Some(_) if duplicated => Err("duplicate action".to_string()),
        Some(action) => {
            let call = Call {
                fields: pairs.into_iter().collect(),
            };
            debug!(action = %action, fields = call.fields.len(), "rpc call");
            let mut store = db.write().await;
            if call.text("api_key") != Some(store.api_key.as_str()) {
                Err("invalid api_key".to_string())
            } else {
                dispatch(&mut store, &action, &call)
            }
        }
    };
    Json(finish(outcome))
}

fn finish(outcome: Outcome) -> Value {
    match outcome {
        Ok(Value::Object(mut body)) => {
            body.insert("success".to_string(), Value::Bool(true));
            Value::Object(body)
        }
        Ok(_) => json!({ "success": true }),
        Err(errors) => {
            info!(errors = %errors, "rpc call failed");
            json!({ "success": false, "errors": errors })
        }
    }
}

fn dispatch(store: &mut Store, action: &str, call: &Call) -> Outcome {
    match action {
        "get_balance" => Ok(json!({
            // Quoted on purpose: the real endpoint mixes representations.
            "balance": format!("{:.2}", store.balance),
            "blocked_money": store.blocked_money,
        })),
        "get_folders" => Ok(json!({
            "folders": store
                .folders
                .iter()
                .map(|(id, name)| json!({ "id": id.to_string(), "name": name }))
                .collect::<Vec<_>>(),
        })),
        "create_folder" => {
            let name = call.required_text("name")?.to_string();
            let id = store.next_id();
            store.folders.insert(id, name.clone());
            Ok(json!({ "folder_id": id, "name": name }))
        }
        "del_folder" => {
            let id = call.required_int("folder_id")?;
            if store.tasks.values().any(|t| t.folder_id == id) {
                return Err("folder is not empty".to_string());
            }
            store
                .folders
                .remove(&id)
                .map(|_| Value::Null)
                .ok_or_else(|| "folder not found".to_string())
        }
        "move_task" => {
            let task_id = call.required_int("task_id")?;
            let folder_id = call.required_int("folder_id")?;
            if !store.folders.contains_key(&folder_id) {
                return Err("folder not found".to_string());
            }
            task_mut(store, task_id)?.folder_id = folder_id;
            Ok(Value::Null)
        }
        "get_tasks" => get_tasks(store, call),
        "get_reports" => get_reports(store, call),
        "approve_report" => {
            let id = call.required_int("report_id")?;
            let report = report_mut(store, id)?;
            if report.status == 6 {
                return Err("report already paid".to_string());
            }
            report.status = 6;
            let price = report.price_rub;
            store.blocked_money = (store.blocked_money - price).max(0.0);
            store.expenses += price;
            Ok(Value::Null)
        }
        "reject_report" => {
            let id = call.required_int("report_id")?;
            let comment = call.required_text("comment")?.to_string();
            let reject_type = call.required_int("reject_type")?;
            match reject_type {
                1 => {
                    let report = report_mut(store, id)?;
                    report.status = 3;
                    report.comment = Some(comment);
                }
                2 => {
                    store
                        .reports
                        .remove(&id)
                        .ok_or_else(|| "report not found".to_string())?;
                }
                other => return Err(format!("invalid reject_type: {other}")),
            }
            Ok(Value::Null)
        }
        "get_expenses" => Ok(json!({
            "expenses": store.expenses,
            "expenses_in_rub": store.expenses.to_string(),
            "group_by_days": [],
        })),
        "add_task" => {
            let task = task_from_call(store, call, None)?;
            let id = task.id;
            store.tasks.insert(id, task);
            Ok(json!({ "task_id": id.to_string() }))
        }
        "edit_task" => {
            let id = call.required_int("task_id")?;
            let existing = store
                .tasks
                .get(&id)
                .cloned()
                .ok_or_else(|| "task not found".to_string())?;
            let task = task_from_call(store, call, Some(existing))?;
            store.tasks.insert(id, task);
            Ok(Value::Null)
        }
        "task_limit_add" => {
            let id = call.required_int("task_id")?;
            let count = call.required_int("add_to_limit")?;
            if count <= 0 {
                return Err("add_to_limit must be positive".to_string());
            }
            let cost = task_mut(store, id)?.price_rub * count as f64;
            if cost > store.balance {
                return Err("no funds".to_string());
            }
            store.balance -= cost;
            store.blocked_money += cost;
            let task = task_mut(store, id)?;
            task.limit_total += count;
            if task.status == 1 || task.status == 2 {
                task.status = 4;
            }
            Ok(Value::Null)
        }
        "task_limit_sub" => {
            let id = call.required_int("task_id")?;
            let count = call.required_int("sub_to_limit")?;
            let task = task_mut(store, id)?;
            let removed = count.clamp(0, task.limit_total);
            task.limit_total -= removed;
            if task.limit_total == 0 && task.status == 4 {
                task.status = 2;
            }
            let refund = task.price_rub * removed as f64;
            store.balance += refund;
            store.blocked_money = (store.blocked_money - refund).max(0.0);
            Ok(Value::Null)
        }
        "del_task" => {
            let id = call.required_int("task_id")?;
            store
                .tasks
                .remove(&id)
                .map(|_| Value::Null)
                .ok_or_else(|| "task not found".to_string())
        }
        "get_tariffs" => Ok(json!({
            "tariffs": TARIFFS
                .iter()
                .map(|t| json!({
                    "id": t.id,
                    "name": t.name,
                    "min_price_rub": t.min_price_rub.to_string(),
                    "group_id": t.group_id.to_string(),
                }))
                .collect::<Vec<_>>(),
        })),
        "get_countries" => Ok(json!({
            "countries": COUNTRIES
                .iter()
                .map(|(id, name)| json!({ "id": id, "name": name }))
                .collect::<Vec<_>>(),
        })),
        "task_pause" => {
            let task = task_mut(store, call.required_int("task_id")?)?;
            if task.status != 4 {
                return Err("task is not active".to_string());
            }
            task.status = 3;
            Ok(Value::Null)
        }
        "task_play" => {
            let task = task_mut(store, call.required_int("task_id")?)?;
            if task.status != 3 {
                return Err("task is not paused".to_string());
            }
            task.status = 4;
            Ok(Value::Null)
        }
        "task_to_top" => {
            task_mut(store, call.required_int("task_id")?)?;
            if store.balance < TO_TOP_PRICE {
                return Err("no funds".to_string());
            }
            store.balance -= TO_TOP_PRICE;
            store.expenses += TO_TOP_PRICE;
            Ok(Value::Null)
        }
        "add_blacklist" => {
            store.blacklist.insert(call.required_int("add_blacklist_id")?);
            Ok(Value::Null)
        }
        "add_whitelist" => {
            store.whitelist.insert(call.required_int("add_whitelist_id")?);
            Ok(Value::Null)
        }
        "get_blacklist" => Ok(json!({
            // Alternate quoted and bare ids like the real endpoint.
            "users": store
                .blacklist
                .iter()
                .enumerate()
                .map(|(i, id)| if i % 2 == 0 { json!(id) } else { json!(id.to_string()) })
                .collect::<Vec<_>>(),
        })),
        "delete_user_blacklist" => {
            let id = call.required_int("id_user_blacklist")?;
            if store.blacklist.remove(&id) {
                Ok(Value::Null)
            } else {
                Err("user is not blacklisted".to_string())
            }
        }
        other => Err(format!("unknown action: {other}")),
    }
}

fn task_mut(store: &mut Store, id: i64) -> Result<&mut Task, String> {
    store.tasks.get_mut(&id).ok_or_else(|| "task not found".to_string())
}

fn report_mut(store: &mut Store, id: i64) -> Result<&mut Report, String> {
    store
        .reports
        .get_mut(&id)
        .ok_or_else(|| "report not found".to_string())
}

fn task_from_call(store: &mut Store, call: &Call, existing: Option<Task>) -> Result<Task, String> {
    let name = call.required_text("name")?.to_string();
    let descr = call.required_text("descr")?.to_string();
    let need_for_report = call.required_text("need_for_report")?.to_string();
    let price_rub = call.required_float("price")?;
    let tarif_id = call.required_int("tarif_id")?;
    let folder_id = call.required_int("folder_id")?;

    let tariff = TARIFFS
        .iter()
        .find(|t| t.id == tarif_id)
        .ok_or_else(|| format!("unknown tarif_id: {tarif_id}"))?;
    if price_rub < tariff.min_price_rub {
        return Err(format!(
            "price is below the tariff minimum of {}",
            tariff.min_price_rub
        ));
    }
    if !store.folders.contains_key(&folder_id) {
        return Err("folder not found".to_string());
    }
    if let Some(hours) = call.int("time_for_work")? {
        if !(2..=168).contains(&hours) {
            return Err("time_for_work must be between 2 and 168".to_string());
        }
    }
    if let Some(hours) = call.int("time_for_check")? {
        if !(10..=168).contains(&hours) {
            return Err("time_for_check must be between 10 and 168".to_string());
        }
    }

    let (id, status, limit_total) = match existing {
        Some(task) => (task.id, task.status, task.limit_total),
        None => (store.next_id(), 1, 0),
    };
    Ok(Task {
        id,
        name,
        descr,
        need_for_report,
        price_rub,
        tarif_id,
        folder_id,
        status,
        limit_total,
    })
}

fn get_tasks(store: &Store, call: &Call) -> Outcome {
    let folder_id = call.int("folder_id")?;
    let statuses = call.ids("status")?;
    let task_ids = call.ids("task_id")?;
    let offset = call.int("offset")?.unwrap_or(0).max(0) as usize;

    let tasks: Vec<Value> = store
        .tasks
        .values()
        .filter(|t| folder_id.map_or(true, |f| t.folder_id == f))
        .filter(|t| statuses.as_ref().map_or(true, |s| s.contains(&t.status)))
        .filter(|t| task_ids.as_ref().map_or(true, |ids| ids.contains(&t.id)))
        .skip(offset)
        .map(|t| {
            json!({
                "id": t.id.to_string(),
                "name": t.name,
                "price_rub": t.price_rub,
                "tarif_id": t.tarif_id,
                "status": t.status.to_string(),
                "folder_id": t.folder_id,
                "limit_total": t.limit_total.to_string(),
            })
        })
        .collect();
    Ok(json!({ "tasks": tasks }))
}

fn get_reports(store: &Store, call: &Call) -> Outcome {
    let task_ids = call
        .ids("task_id")?
        .ok_or_else(|| "missing parameter: task_id".to_string())?;
    let offset = call.int("offset")?.unwrap_or(0).max(0) as usize;

    let reports: Vec<Value> = store
        .reports
        .values()
        .filter(|r| task_ids.contains(&r.task_id))
        .skip(offset)
        .map(|r| {
            let messages: Vec<Value> = r
                .comment
                .iter()
                .map(|text| json!({ "from_id": 0, "to_id": r.worker_id, "date": "", "text": text }))
                .collect();
            json!({
                "id": r.id,
                "task_id": r.task_id.to_string(),
                "worker_id": r.worker_id,
                "price_rub": r.price_rub.to_string(),
                "status": r.status,
                "IP": r.ip,
                "messages": messages,
                "files": [],
            })
        })
        .collect();
    Ok(json!({ "reports": reports }))
}
