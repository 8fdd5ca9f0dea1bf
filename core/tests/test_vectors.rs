//! Verify request building and response decoding against the JSON test
//! vectors stored in `test-vectors/`.
//!
//! Request vectors pin the exact form body, so any change to field order or
//! encoding shows up here. Response vectors compare selected fields rather
//! than whole records.

use unu_core::{decode_response, ApiError, ClientConfig, HttpRequest, ParamValue, Params, UnuClient};

/// Convert a JSON scalar from a vector into a `ParamValue`.
fn param_value(value: &serde_json::Value) -> ParamValue {
    match value {
        serde_json::Value::String(s) => ParamValue::Text(s.clone()),
        serde_json::Value::Bool(b) => ParamValue::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => ParamValue::Int(i),
            None => ParamValue::Float(n.as_f64().unwrap()),
        },
        other => panic!("unsupported param value: {other}"),
    }
}

fn expected_pairs(value: &serde_json::Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let config = ClientConfig::new(
        vectors["url"].as_str().unwrap(),
        vectors["token"].as_str().unwrap(),
    );
    let client = UnuClient::from_config(config);

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let action = case["action"].as_str().unwrap();
        let params: Option<Params> = case["params"].as_object().map(|map| {
            map.iter()
                .map(|(k, v)| (k.clone(), param_value(v)))
                .collect()
        });

        let req: HttpRequest = client.build_request(action, params.as_ref()).unwrap();
        assert_eq!(req.url, vectors["url"].as_str().unwrap(), "{name}: url");
        assert_eq!(
            req.form_fields(),
            expected_pairs(&case["expected_fields"]),
            "{name}: fields"
        );
        assert_eq!(req.body, case["expected_body"].as_str().unwrap(), "{name}: body");
        assert_eq!(req.form_values("action").len(), 1, "{name}: single action");
        assert_eq!(req.form_values("api_key").len(), 1, "{name}: single token");
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = decode_response(case["body"].as_str().unwrap());

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "Remote" => {
                    let expected = case["expected_message"].as_str().unwrap();
                    assert!(
                        matches!(&err, ApiError::Remote { message } if message == expected),
                        "{name}: expected Remote({expected}), got {err:?}"
                    );
                }
                "Deserialization" => assert!(
                    matches!(err, ApiError::Deserialization(_)),
                    "{name}: expected Deserialization, got {err:?}"
                ),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
            continue;
        }

        let resp = result.unwrap_or_else(|e| panic!("{name}: {e}"));
        assert!(resp.success, "{name}: success");
        let expected = case["expected"].as_object().unwrap();
        for (field, value) in expected {
            match field.as_str() {
                "balance" => assert_eq!(resp.balance, value.as_f64(), "{name}: balance"),
                "blocked_money" => {
                    assert_eq!(resp.blocked_money, value.as_f64(), "{name}: blocked_money")
                }
                "task_id" => assert_eq!(resp.task_id, value.as_i64(), "{name}: task_id"),
                "folder_id" => assert_eq!(resp.folder_id, value.as_i64(), "{name}: folder_id"),
                "users" => {
                    let users: Vec<i64> = value
                        .as_array()
                        .unwrap()
                        .iter()
                        .map(|v| v.as_i64().unwrap())
                        .collect();
                    assert_eq!(resp.users, users, "{name}: users");
                }
                other => panic!("{name}: unhandled expected field: {other}"),
            }
        }
    }
}
