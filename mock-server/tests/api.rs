use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, DEFAULT_API_KEY};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn form_request(body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/api")
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string())
        .unwrap()
}

fn rpc(action: &str, rest: &str) -> Request<String> {
    let mut body = format!("api_key={DEFAULT_API_KEY}&action={action}");
    if !rest.is_empty() {
        body.push('&');
        body.push_str(rest);
    }
    form_request(&body)
}

// --- envelope ---

#[tokio::test]
async fn balance_has_success_flag() {
    let resp = app().oneshot(rpc("get_balance", "")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["balance"], "1000.00");
    assert_eq!(json["blocked_money"], 0.0);
}

#[tokio::test]
async fn wrong_api_key_is_rejected() {
    let resp = app()
        .oneshot(form_request("api_key=nope&action=get_balance"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["errors"], "invalid api_key");
}

#[tokio::test]
async fn duplicate_action_is_rejected() {
    let resp = app()
        .oneshot(rpc("get_balance", "action=del_task"))
        .await
        .unwrap();

    let json = body_json(resp).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["errors"], "duplicate action");
}

#[tokio::test]
async fn missing_action_is_rejected() {
    let resp = app()
        .oneshot(form_request(&format!("api_key={DEFAULT_API_KEY}")))
        .await
        .unwrap();

    let json = body_json(resp).await;
    assert_eq!(json["errors"], "missing action");
}

#[tokio::test]
async fn unknown_action_is_reported() {
    let resp = app().oneshot(rpc("get_weather", "")).await.unwrap();

    let json = body_json(resp).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["errors"], "unknown action: get_weather");
}

#[tokio::test]
async fn non_form_body_is_refused() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api")
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(r#"{"action":"get_balance"}"#.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn get_is_not_routed() {
    let resp = app()
        .oneshot(Request::builder().uri("/api").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = body_bytes(resp).await;
    assert!(body.is_empty());
}

// --- reference data ---

#[tokio::test]
async fn tariffs_and_countries_are_listed() {
    let resp = app().oneshot(rpc("get_tariffs", "")).await.unwrap();
    let json = body_json(resp).await;
    let tariffs = json["tariffs"].as_array().unwrap();
    assert_eq!(tariffs.len(), 3);
    assert_eq!(tariffs[0]["min_price_rub"], "0.5");

    let resp = app().oneshot(rpc("get_countries", "")).await.unwrap();
    let json = body_json(resp).await;
    let countries = json["countries"].as_array().unwrap();
    assert!(countries.iter().any(|c| c["id"] == 236));
}

// --- full task lifecycle ---

#[tokio::test]
async fn task_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create folder
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(rpc("create_folder", "name=Promo+%26+Ads"))
        .await
        .unwrap();
    let json = body_json(resp).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["name"], "Promo & Ads");
    let folder_id = json["folder_id"].as_i64().unwrap();

    // add task
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(rpc(
            "add_task",
            &format!(
                "name=Like&descr=Like+the+post&need_for_report=screenshot&price=2&tarif_id=1&folder_id={folder_id}"
            ),
        ))
        .await
        .unwrap();
    let json = body_json(resp).await;
    assert_eq!(json["success"], true);
    let task_id: i64 = json["task_id"].as_str().unwrap().parse().unwrap();

    // new task waits for funding
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(rpc("get_tasks", &format!("task_id={task_id}")))
        .await
        .unwrap();
    let json = body_json(resp).await;
    assert_eq!(json["tasks"][0]["status"], "1");

    // fund it
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(rpc("task_limit_add", &format!("task_id={task_id}&add_to_limit=10")))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["success"], true);

    // pause
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(rpc("task_pause", &format!("task_id={task_id}")))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["success"], true);

    // filter by paused status
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(rpc("get_tasks", "status=3,5"))
        .await
        .unwrap();
    let json = body_json(resp).await;
    let tasks = json["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["limit_total"], "10");

    // balance reflects the blocked funds
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(rpc("get_balance", ""))
        .await
        .unwrap();
    let json = body_json(resp).await;
    assert_eq!(json["balance"], "980.00");
    assert_eq!(json["blocked_money"], 20.0);

    // folder with tasks cannot be deleted
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(rpc("del_folder", &format!("folder_id={folder_id}")))
        .await
        .unwrap();
    let json = body_json(resp).await;
    assert_eq!(json["errors"], "folder is not empty");

    // delete task, then folder
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(rpc("del_task", &format!("task_id={task_id}")))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["success"], true);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(rpc("del_folder", &format!("folder_id={folder_id}")))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["success"], true);

    // list after delete: empty
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(rpc("get_tasks", ""))
        .await
        .unwrap();
    let json = body_json(resp).await;
    assert!(json["tasks"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn blacklist_round_trip() {
    use tower::Service;

    let mut app = app().into_service();

    for id in ["7", "9"] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(rpc("add_blacklist", &format!("add_blacklist_id={id}")))
            .await
            .unwrap();
        assert_eq!(body_json(resp).await["success"], true);
    }

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(rpc("get_blacklist", ""))
        .await
        .unwrap();
    let json = body_json(resp).await;
    assert_eq!(json["users"], serde_json::json!([7, "9"]));

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(rpc("delete_user_blacklist", "id_user_blacklist=8"))
        .await
        .unwrap();
    assert_eq!(body_json(resp).await["errors"], "user is not blacklisted");
}
