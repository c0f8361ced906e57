//! Prompt rendering against a mock Stardog server.

use serde_json::json;
use stardog_mcp::PromptError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{TestHarness, object, prompt_text};

#[tokio::test]
async fn test_database_config_helper() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/admin/config_properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search.enabled": "Enables full-text search",
            "query.timeout": "Query timeout"
        })))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/databases/movies/options"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search.enabled": true,
            "query.timeout": "5m"
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let args = object(json!({
        "database_name": "movies",
        "option_keys": "search.enabled, spatial.enabled"
    }));
    let result = harness
        .prompts
        .get("database_config_helper", Some(&args))
        .await
        .unwrap();
    let text = prompt_text(&result);

    assert!(text.contains("database 'movies'"));
    assert!(text.contains("search.enabled: \"Enables full-text search\""));
    assert!(!text.contains("Query timeout"));
    assert!(text.contains("options: search.enabled, spatial.enabled"));
    assert!(text.contains("\"spatial.enabled\": \"not_found\""));
    assert!(!text.contains("{options}"));
}

#[tokio::test]
async fn test_roles_summary() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/admin/roles/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "roles": [{"rolename": "reader", "permissions": [
                {"action": "READ", "resource_type": "db", "resource": ["*"]}
            ]}]
        })))
        .mount(&harness.server)
        .await;

    let result = harness.prompts.get("roles_summary", None).await.unwrap();
    let text = prompt_text(&result);
    assert!(text.contains("\"rolename\": \"reader\""));
    assert!(text.contains("| Resource Type | Resource Name | Permissions |"));
    assert!(!text.contains("{roles_with_permissions}"));
}

#[tokio::test]
async fn test_prompt_upstream_failure() {
    let harness = TestHarness::new().await;
    Mock::given(method("GET"))
        .and(path("/admin/roles/list"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&harness.server)
        .await;

    let err = harness.prompts.get("roles_summary", None).await.unwrap_err();
    let PromptError::Generation { name, message } = err else {
        unreachable!("expected a generation error");
    };
    assert_eq!(name, "roles_summary");
    assert!(message.contains("[Status Code: 500]"));
}
