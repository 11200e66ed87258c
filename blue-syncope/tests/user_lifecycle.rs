use blue_core::{Error, Module};
use blue_syncope::{SyncopeModule, CHANGE_STATUS_FAILED, CHECK_MODE_SUCCESS, RETRIEVE_USER_FAILED};
use httpmock::prelude::*;
use serde_json::{json, Value};

const USER_PATH: &str = "/syncope/rest/users/c9b2dec2-00a7-4855-97c0-d854842b4b24";

fn bellini() -> Value {
    json!({
        "@class": "org.apache.syncope.common.lib.to.UserTO",
        "key": "c9b2dec2-00a7-4855-97c0-d854842b4b24",
        "username": "bellini",
        "status": "suspended",
        "plainAttrs": [
            { "schema": "firstname", "values": ["Vincenzo"] },
            { "schema": "surname", "values": ["Bellini"] }
        ],
        "resources": []
    })
}

fn args(server: &MockServer) -> Value {
    json!({
        "adminUser": "admin",
        "adminPwd": "pwd",
        "serverName": server.base_url(),
        "syncopeUser": "c9b2dec2-00a7-4855-97c0-d854842b4b24",
        "newAttributeValue": "firstname=test;surname=test",
        "newStatus": "REACTIVATE",
        "changeStatusOnSyncope": "true",
        "mustChangePassword": true
    })
}

fn call(path: &[&str], args: Value) -> blue_core::Result<Value> {
    let mut module = SyncopeModule::new().unwrap();
    module.call(path, args, None, None)
}

#[test]
fn reactivate_suspended_user() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(USER_PATH);
        then.status(200).json_body(bellini());
    });
    let post = server.mock(|when, then| {
        when.method(POST).path(format!("{}/status", USER_PATH));
        then.status(200).json_body(json!([]));
    });

    let report = call(&["change", "status"], args(&server)).unwrap();

    assert_eq!(report, json!({"changed": true, "message": []}));
    post.assert();
}

#[test]
fn status_change_rejected_is_a_failure_report() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(USER_PATH);
        then.status(200).json_body(bellini());
    });
    server.mock(|when, then| {
        when.method(POST).path(format!("{}/status", USER_PATH));
        then.status(500).json_body(json!([]));
    });

    let err = call(&["change", "status"], args(&server)).unwrap_err();

    assert!(matches!(err, Error::Module(ref msg) if msg == CHANGE_STATUS_FAILED));
}

#[test]
fn check_mode_reports_without_changing() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(USER_PATH);
        then.status(200).json_body(bellini());
    });
    let post = server.mock(|when, then| {
        when.method(POST).path(format!("{}/status", USER_PATH));
        then.status(200).json_body(json!([]));
    });

    let mut args = args(&server);
    args["check_mode"] = json!("true");
    let report = call(&["change", "status"], args).unwrap();

    assert_eq!(report, json!({"changed": false, "message": CHECK_MODE_SUCCESS}));
    post.assert_calls(0);
}

#[test]
fn modify_user_when_retrieval_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(USER_PATH);
        then.status(500).json_body(json!([]));
    });

    let err = call(&["modify", "user"], args(&server)).unwrap_err();

    assert!(matches!(err, Error::Module(ref msg) if msg == RETRIEVE_USER_FAILED));
}

#[test]
fn modify_user_overwrites_first_values() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(USER_PATH);
        then.status(200).json_body(bellini());
    });

    let mut expected = bellini();
    expected["plainAttrs"][0]["values"][0] = json!("test");
    expected["plainAttrs"][1]["values"][0] = json!("test");
    let put = server.mock(|when, then| {
        when.method(PUT).path(USER_PATH).json_body(expected.clone());
        then.status(200).json_body(expected.clone());
    });

    let report = call(&["modify", "user"], args(&server)).unwrap();

    assert_eq!(report["changed"], true);
    assert_eq!(report["message"]["plainAttrs"][0]["values"][0], "test");
    put.assert();
}

#[test]
fn set_must_change_password() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(USER_PATH);
        then.status(200).json_body(bellini());
    });
    let put = server.mock(|when, then| {
        when.method(PUT).path(USER_PATH);
        then.status(200).json_body(json!([]));
    });

    let report = call(&["must", "change", "password"], args(&server)).unwrap();

    assert_eq!(report["changed"], true);
    put.assert();
}

#[test]
fn set_must_change_password_keeps_the_rest_of_the_user() {
    let server = MockServer::start();
    let mut fetched = bellini();
    fetched.as_object_mut().unwrap().remove("key");
    fetched["status"] = Value::Null;
    fetched["mustChangePassword"] = Value::Null;
    server.mock(|when, then| {
        when.method(GET).path(USER_PATH);
        then.status(200).json_body(fetched.clone());
    });

    let mut expected = fetched.clone();
    expected["mustChangePassword"] = json!(true);
    let put = server.mock(|when, then| {
        when.method(PUT).path(USER_PATH).json_body(expected.clone());
        then.status(200).json_body(json!([]));
    });

    let report = call(&["must", "change", "password"], args(&server)).unwrap();

    assert_eq!(report["changed"], true);
    put.assert();
}

#[test]
fn set_must_change_password_when_retrieval_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(USER_PATH);
        then.status(500).json_body(json!([]));
    });

    let err = call(&["must", "change", "password"], args(&server)).unwrap_err();

    assert!(matches!(err, Error::Module(ref msg) if msg == RETRIEVE_USER_FAILED));
}

#[test]
fn unknown_action_fails_before_any_request() {
    let server = MockServer::start();
    let any = server.mock(|when, then| {
        when.path(USER_PATH);
        then.status(200).json_body(bellini());
    });

    let err = call(&["delete", "user"], args(&server)).unwrap_err();

    assert!(matches!(err, Error::MethodNotFound(ref p) if p == "delete user"));
    any.assert_calls(0);
}

#[test]
fn missing_status_fails_before_any_request() {
    let server = MockServer::start();
    let any = server.mock(|when, then| {
        when.path(USER_PATH);
        then.status(200).json_body(bellini());
    });

    let mut args = args(&server);
    args.as_object_mut().unwrap().remove("newStatus");
    let err = call(&["change", "status"], args).unwrap_err();

    assert!(matches!(err, Error::Schema(ref msg) if msg.contains("newStatus")));
    any.assert_calls(0);
}

#[test]
fn unreachable_server_aborts() {
    let mut args = json!({
        "adminUser": "admin",
        "adminPwd": "pwd",
        "serverName": "http://127.0.0.1:9",
        "syncopeUser": "id",
        "newStatus": "SUSPEND",
        "changeStatusOnSyncope": "false"
    });
    args["check_mode"] = json!(false);

    let err = call(&["change", "status"], args).unwrap_err();

    assert!(matches!(err, Error::Module(ref msg) if msg.contains("127.0.0.1:9")));
}
