//! Tool dispatch against a mock Stardog server.

use serde_json::{Value, json};
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::TestHarness;

#[tokio::test]
async fn test_missing_required_argument_is_soft_and_sends_nothing() {
    let harness = TestHarness::new().await;
    Mock::given(method("POST"))
        .and(path("/admin/roles"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&harness.server)
        .await;

    let text = harness.call_text("create_role", json!({})).await;
    assert_eq!(text, "Error: role_name is required.");

    let text = harness
        .call_text("assign_role_to_user", json!({"role_name": ""}))
        .await;
    assert_eq!(text, "Error: role_name and username are required.");

    let text = harness
        .call_text("assign_role_to_user", json!({"role_name": "writer"}))
        .await;
    assert_eq!(text, "Error: username is required.");
}

#[tokio::test]
async fn test_unknown_tool_is_soft() {
    let harness = TestHarness::new().await;
    let text = harness.call_text("drop_everything", json!({})).await;
    assert_eq!(text, "Unsupported tool: drop_everything");
    assert!(harness.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_databases() {
    let harness = TestHarness::new().await;
    let listing = json!({"databases": ["movies", "music"]});
    Mock::given(method("GET"))
        .and(path("/admin/databases"))
        .and(header("authorization", "Basic YWRtaW46YWRtaW4="))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing))
        .expect(1)
        .mount(&harness.server)
        .await;

    let text = harness.call_text("list_databases", json!({})).await;
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, json!(["movies", "music"]));
}

#[tokio::test]
async fn test_get_database_size_is_plain_text() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/movies/size"))
        .respond_with(ResponseTemplate::new(200).set_body_string("1024\n"))
        .mount(&harness.server)
        .await;

    let text = harness
        .call_text("get_database_size", json!({"database_name": "movies"}))
        .await;
    assert_eq!(text, "1024");
}

#[tokio::test]
async fn test_get_database_configuration_marks_unknown_keys() {
    let harness = TestHarness::new().await;
    let options = json!({"search.enabled": true, "index.type": "disk"});
    Mock::given(method("GET"))
        .and(path("/admin/databases/movies/options"))
        .respond_with(ResponseTemplate::new(200).set_body_json(options))
        .mount(&harness.server)
        .await;

    let text = harness
        .call_text(
            "get_database_configuration",
            json!({"database_name": "movies", "option_keys": ["search.enabled", "bogus"]}),
        )
        .await;
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, json!({"search.enabled": true, "bogus": "not_found"}));
}

#[tokio::test]
async fn test_permission_assign_then_revoke() {
    let harness = TestHarness::new().await;
    let permission = json!({"action": "read", "resource_type": "db", "resource": ["movies"]});

    Mock::given(method("PUT"))
        .and(path("/admin/permissions/role/reader"))
        .and(body_json(&permission))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/admin/permissions/role/reader/delete"))
        .and(body_json(&permission))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&harness.server)
        .await;

    let args = json!({"role_name": "reader", "permission": permission});
    let text = harness
        .call_text("assign_permission_to_role", args.clone())
        .await;
    assert_eq!(text, "Successfully assigned permission to role 'reader'.");

    let text = harness.call_text("revoke_permission_from_role", args).await;
    assert_eq!(text, "Successfully revoked permission from role 'reader'.");
}

#[tokio::test]
async fn test_create_role_sends_rolename() {
    let harness = TestHarness::new().await;
    Mock::given(method("POST"))
        .and(path("/admin/roles"))
        .and(body_json(json!({"rolename": "auditor"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&harness.server)
        .await;

    let text = harness
        .call_text("create_role", json!({"role_name": "auditor"}))
        .await;
    assert_eq!(text, "Role 'auditor' created successfully.");
}

#[tokio::test]
async fn test_delete_role_forwards_force() {
    let harness = TestHarness::new().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/roles/auditor"))
        .and(query_param("force", "true"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&harness.server)
        .await;

    let text = harness
        .call_text("delete_role", json!({"role_name": "auditor", "force": true}))
        .await;
    assert_eq!(text, "Role 'auditor' deleted successfully.");
}

#[tokio::test]
async fn test_upstream_404_is_a_hard_error() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/admin/users/ghost/roles"))
        .respond_with(ResponseTemplate::new(404).set_body_string("User does not exist"))
        .mount(&harness.server)
        .await;

    let err = harness
        .call("get_roles_assigned_to_user", json!({"username": "ghost"}))
        .await
        .unwrap_err();
    assert_eq!(err.name, "get_roles_assigned_to_user");
    let message = err.to_string();
    assert!(message.starts_with("Error executing tool: get_roles_assigned_to_user - "));
    assert!(message.contains("[Status Code: 404]"));
    assert!(message.contains("User does not exist"));
}

#[tokio::test]
async fn test_list_roles_with_permissions_filters() {
    let harness = TestHarness::new().await;
    let roles = json!({
        "roles": [
            {"rolename": "reader", "permissions": []},
            {"rolename": "writer", "permissions": []}
        ]
    });
    Mock::given(method("GET"))
        .and(path("/admin/roles/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(roles))
        .mount(&harness.server)
        .await;

    let text = harness
        .call_text(
            "list_roles",
            json!({"include_permissions": true, "roles_filter": ["writer"]}),
        )
        .await;
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, json!([{"rolename": "writer", "permissions": []}]));
}

#[tokio::test]
async fn test_list_users_plain() {
    let harness = TestHarness::new().await;
    let users = json!({"users": ["admin", "anonymous"]});
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users))
        .mount(&harness.server)
        .await;

    let text = harness.call_text("list_users", json!({})).await;
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, json!(["admin", "anonymous"]));
}

#[tokio::test]
async fn test_whoami_is_text() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/admin/status/whoami"))
        .respond_with(ResponseTemplate::new(200).set_body_string("admin"))
        .mount(&harness.server)
        .await;

    assert_eq!(harness.call_text("get_whoami", json!({})).await, "admin");
}

#[tokio::test]
async fn test_kill_process() {
    let harness = TestHarness::new().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/processes/42"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&harness.server)
        .await;

    let text = harness.call_text("kill_process", json!({"id": 42})).await;
    assert_eq!(text, "Process with ID '42' killed.");
}

#[tokio::test]
async fn test_kill_process_zero_id_is_soft() {
    let harness = TestHarness::new().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&harness.server)
        .await;

    let text = harness.call_text("kill_process", json!({"id": 0})).await;
    assert_eq!(text, "Error: id is required.");
}

#[tokio::test]
async fn test_construct_query_returns_turtle_text() {
    let harness = TestHarness::new().await;
    let turtle = "<urn:a> <urn:b> <urn:c> .\n";
    Mock::given(method("POST"))
        .and(path("/movies/query"))
        .and(header("accept", "text/turtle"))
        .and(query_param("reasoning", "false"))
        .and(query_param("limit", "1000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(turtle))
        .expect(1)
        .mount(&harness.server)
        .await;

    let text = harness
        .call_text(
            "execute_sparql_read",
            json!({
                "query": "CONSTRUCT WHERE { ?s ?p ?o }",
                "database": "movies",
                "query_type": "construct"
            }),
        )
        .await;
    assert_eq!(text, turtle);
}

#[tokio::test]
async fn test_select_query_returns_json() {
    let harness = TestHarness::new().await;
    let bindings = json!({"head": {"vars": ["s"]}, "results": {"bindings": []}});
    Mock::given(method("POST"))
        .and(path("/movies/query"))
        .and(header("accept", "application/sparql-results+json"))
        .and(body_string("query=SELECT+%3Fs+WHERE+%7B%7D"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bindings.clone()))
        .expect(1)
        .mount(&harness.server)
        .await;

    let text = harness
        .call_text(
            "execute_sparql_read",
            json!({"query": "SELECT ?s WHERE {}", "database": "movies"}),
        )
        .await;
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, bindings);
}

#[tokio::test]
async fn test_invalid_query_type_fails_without_request() {
    let harness = TestHarness::new().await;
    Mock::given(method("POST"))
        .and(path("/movies/query"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&harness.server)
        .await;

    let err = harness
        .call(
            "execute_sparql_read",
            json!({"query": "SELECT * {}", "database": "movies", "query_type": "foo"}),
        )
        .await
        .unwrap_err();
    assert_eq!(err.name, "execute_sparql_read");
    assert!(err.message.contains("Invalid query type: foo"));
}

#[tokio::test]
async fn test_list_users_with_details_filters() {
    let harness = TestHarness::new().await;
    let users = json!({
        "users": [
            {"username": "admin", "superuser": true},
            {"username": "alice", "superuser": false}
        ]
    });
    Mock::given(method("GET"))
        .and(path("/admin/users/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users))
        .expect(1)
        .mount(&harness.server)
        .await;

    let text = harness
        .call_text(
            "list_users",
            json!({"include_details": true, "usernames_filter": ["alice"]}),
        )
        .await;
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, json!([{"username": "alice", "superuser": false}]));
}

#[tokio::test]
async fn test_assign_and_revoke_role_for_user() {
    let harness = TestHarness::new().await;
    Mock::given(method("POST"))
        .and(path("/admin/users/bob/roles"))
        .and(body_json(json!({"rolename": "writer"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/admin/users/bob/roles/writer"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&harness.server)
        .await;

    let args = json!({"role_name": "writer", "username": "bob"});
    let text = harness.call_text("assign_role_to_user", args.clone()).await;
    assert_eq!(text, "Successfully assigned role 'writer' to user 'bob'.");

    let text = harness.call_text("revoke_role_from_user", args).await;
    assert_eq!(text, "Successfully revoked role 'writer' from user 'bob'.");
}

#[tokio::test]
async fn test_user_permission_assign_then_revoke() {
    let harness = TestHarness::new().await;
    let permission = json!({"action": "all", "resource_type": "*", "resource": ["*"]});

    Mock::given(method("PUT"))
        .and(path("/admin/permissions/user/bob"))
        .and(body_json(&permission))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/admin/permissions/user/bob/delete"))
        .and(body_json(&permission))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&harness.server)
        .await;

    let args = json!({"username": "bob", "permission": permission});
    let text = harness
        .call_text("assign_permission_to_user", args.clone())
        .await;
    assert_eq!(text, "Successfully assigned permission to user 'bob'.");

    let text = harness.call_text("revoke_permission_from_user", args).await;
    assert_eq!(text, "Successfully revoked permission from user 'bob'.");
}

#[tokio::test]
async fn test_get_users_with_role() {
    let harness = TestHarness::new().await;
    let users = json!({"users": ["alice", "bob"]});
    Mock::given(method("GET"))
        .and(path("/admin/roles/reader/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(users))
        .expect(1)
        .mount(&harness.server)
        .await;

    let text = harness
        .call_text("get_users_with_role", json!({"role_name": "reader"}))
        .await;
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, json!(["alice", "bob"]));
}

#[tokio::test]
async fn test_list_processes_and_server_metrics() {
    let harness = TestHarness::new().await;
    let processes = json!([{"id": "17", "status": "RUNNING"}]);
    let metrics = json!({"dbms.memory.heap.used": {"value": 1024}});
    Mock::given(method("GET"))
        .and(path("/admin/processes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(processes.clone()))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(metrics.clone()))
        .expect(1)
        .mount(&harness.server)
        .await;

    let text = harness.call_text("list_processes", json!({})).await;
    assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), processes);

    let text = harness.call_text("get_server_metrics", json!({})).await;
    assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), metrics);
}

#[tokio::test]
async fn test_list_stored_queries_asks_for_json() {
    let harness = TestHarness::new().await;
    let stored = json!({"queries": [{"name": "all_movies", "database": "movies"}]});
    Mock::given(method("GET"))
        .and(path("/admin/queries/stored"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stored.clone()))
        .expect(1)
        .mount(&harness.server)
        .await;

    let text = harness.call_text("list_stored_queries", json!({})).await;
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, stored);
}

#[tokio::test]
async fn test_get_database_configuration_documentation() {
    let harness = TestHarness::new().await;
    let docs = json!({
        "search.enabled": {"description": "Enable full-text search", "defaultValue": "false"}
    });
    Mock::given(method("GET"))
        .and(path("/admin/config_properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(docs.clone()))
        .expect(1)
        .mount(&harness.server)
        .await;

    let text = harness
        .call_text("get_database_configuration_documentation", json!({}))
        .await;
    let parsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, docs);
}

#[tokio::test]
async fn test_role_name_cannot_escape_its_path_segment() {
    let harness = TestHarness::new().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/databases/movies"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&harness.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/admin/roles/..%2Fdatabases%2Fmovies"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&harness.server)
        .await;

    let text = harness
        .call_text("delete_role", json!({"role_name": "../databases/movies"}))
        .await;
    assert_eq!(text, "Role '../databases/movies' deleted successfully.");
}
