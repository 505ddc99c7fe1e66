use pharmadesk_cli::commands::crud::{self, CrudAction};
use pharmadesk_cli::commands::{alerts, dashboard, form_from_fields, invoicing, login, Resource};
use pharmadesk_cli::CommandError;
use pharmadesk_client::{ApiClient, ApiError, RequestBody, Session};
use pharmadesk_data::Timeframe;
use pharmadesk_test::ScriptedTransport;
use serde_json::json;

fn api(transport: &ScriptedTransport) -> ApiClient<ScriptedTransport> {
    ApiClient::new(transport.clone(), Session::new())
}

fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn create_sends_validated_fields() {
    let transport = ScriptedTransport::new();
    transport.respond(201, json!({"id": 5, "name": "Norte", "email": "a@b.mx"}));
    let api = api(&transport);

    let form = form_from_fields(&fields(&[
        ("name", "Norte"),
        ("email", "a@b.mx"),
        ("phone", ""),
    ]));
    let output = crud::run(&api, Resource::Suppliers, CrudAction::Create(form))
        .await
        .unwrap();

    assert_eq!(output["id"], 5);
    assert_eq!(
        transport.requests()[0].body,
        RequestBody::Json(json!({"name": "Norte", "email": "a@b.mx"}))
    );
}

#[tokio::test]
async fn blank_field_on_update_leaves_it_unchanged() {
    let transport = ScriptedTransport::new();
    transport.respond(
        200,
        json!({"id": 5, "name": "Norte Sur", "email": "a@b.mx", "phone": "555"}),
    );
    let api = api(&transport);

    let form = form_from_fields(&fields(&[("name", "Norte Sur"), ("email", "")]));
    let output = crud::run(&api, Resource::Suppliers, CrudAction::Update(5, form))
        .await
        .unwrap();

    assert_eq!(output["email"], "a@b.mx");
    let request = &transport.requests()[0];
    assert_eq!(request.path, "/suppliers/5");
    assert_eq!(request.body, RequestBody::Json(json!({"name": "Norte Sur"})));
}

#[tokio::test]
async fn invalid_fields_are_reported_without_a_request() {
    let transport = ScriptedTransport::new();
    let api = api(&transport);

    let form = form_from_fields(&fields(&[("name", "x")]));
    let err = crud::run(&api, Resource::Roles, CrudAction::Create(form))
        .await
        .unwrap_err();

    assert!(matches!(err, CommandError::Api(ApiError::Validation(_))));
    assert!(err.to_string().starts_with("Please correct the form: name:"));
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn delete_reports_the_removed_record() {
    let transport = ScriptedTransport::new();
    transport.respond_empty(204);
    let api = api(&transport);

    let output = crud::run(&api, Resource::Alerts, CrudAction::Delete(8))
        .await
        .unwrap();
    assert_eq!(output, json!({"deleted": 8, "resource": "alerts"}));
    assert_eq!(transport.requests()[0].path, "/alerts/8");
}

#[tokio::test]
async fn list_renders_every_record() {
    let transport = ScriptedTransport::new();
    transport.respond(
        200,
        json!([{"id": 1, "email": "ana@farmacia.mx", "name": "Ana", "role": {"id": 2, "name": "Admin"}}]),
    );
    let api = api(&transport);

    let output = crud::run(&api, Resource::Users, CrudAction::List).await.unwrap();
    assert_eq!(output[0]["role"]["name"], "Admin");
    assert_eq!(transport.requests()[0].path, "/users");
}

#[tokio::test]
async fn login_prints_token() {
    let transport = ScriptedTransport::new();
    transport.respond(200, json!({"access_token": "tok-9", "token_type": "bearer"}));
    let api = api(&transport);

    let output = login::run(&api, "ana@farmacia.mx", "s3cret").await.unwrap();
    assert_eq!(output["access_token"], "tok-9");
    assert!(api.session().is_authenticated().await);
}

#[tokio::test]
async fn resolve_alert_posts_action() {
    let transport = ScriptedTransport::new();
    transport.respond(
        200,
        json!({
            "id": 3, "type": "expiring", "message": "Lote 7", "medicine_id": 1,
            "severity": "low", "is_active": false, "created_at": "2024-05-01T00:00:00Z",
            "resolved_at": "2024-05-02T00:00:00Z"
        }),
    );
    let api = api(&transport);

    let output = alerts::resolve(&api, 3).await.unwrap();
    assert_eq!(output["is_active"], false);
    assert_eq!(transport.requests()[0].path, "/alerts/3/resolve");
}

#[tokio::test]
async fn invoicing_lists_missing_fields() {
    let transport = ScriptedTransport::new();
    transport.respond(
        200,
        json!({"id": 4, "name": "Botica", "rfc": "BOT010101AB1", "fiscal_postal_code": "06000"}),
    );
    let api = api(&transport);

    let output = invoicing::run(&api, 4).await.unwrap();
    assert_eq!(output["ready"], false);
    let missing: Vec<_> = output["missing"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(missing, ["tax_regime", "cfdi_use", "fiscal_street"]);
}

#[tokio::test]
async fn dashboard_combines_panels() {
    let transport = ScriptedTransport::new();
    transport.respond(
        200,
        json!({
            "timeframe": "30d",
            "current": {"sales": 10.0, "expenses": 4.0, "profit": 6.0},
            "previous": {"sales": 8.0, "expenses": 4.0, "profit": 4.0},
            "variations": {"sales": 25.0, "expenses": 0.0, "profit": 50.0}
        }),
    );
    transport.respond(
        200,
        json!({
            "pending_delivery": 1, "shipped_but_not_delivered": 2,
            "pending_payment": 3, "expiring_soon": 9
        }),
    );
    transport.respond(200, json!([]));
    let api = api(&transport);

    let output = dashboard::run(&api, Timeframe::Month, 5).await.unwrap();
    assert_eq!(output["outstanding_orders"], 6);
    assert_eq!(output["comparison"]["timeframe"], "30d");
    assert_eq!(transport.request_count(), 3);
}

#[tokio::test]
async fn backend_failure_surfaces_as_user_message() {
    let transport = ScriptedTransport::new();
    transport.respond(404, json!({"detail": "Client not found"}));
    let api = api(&transport);

    let err = crud::run(&api, Resource::Clients, CrudAction::Get(77))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "The record no longer exists.");
}
