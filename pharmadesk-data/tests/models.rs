use pharmadesk_core::{FormValue, FormValues, RuleCode, SchemaKind};
use pharmadesk_data::{
    from_entity, to_payload, Alert, AlertKind, Client, Entity, FiscalData, MedicineSummary,
    Report, Role, RoleRef, Severity, Supplier, User, UserRef,
};

fn client() -> Client {
    Client {
        id: 7,
        name: "Farmacia Centro".into(),
        contact: Some("Lucia".into()),
        address: None,
        email: Some("".into()),
        fiscal: FiscalData {
            rfc: Some("FCE010101AB1".into()),
            fiscal_postal_code: Some("06000".into()),
            ..FiscalData::default()
        },
    }
}

fn supplier() -> Supplier {
    Supplier {
        id: 2,
        name: "Distribuidora Norte".into(),
        contact_info: Some("Ventas".into()),
        email: Some("ventas@norte.mx".into()),
        phone: Some("   ".into()),
        address: None,
    }
}

fn report() -> Report {
    Report {
        id: 11,
        report_type: "inventory".into(),
        date: "2024-05-01T09:30:00".into(),
        data: "{\"items\":3}".into(),
        generated_by: 4,
        user: UserRef {
            id: 4,
            name: "Ana".into(),
        },
    }
}

fn role() -> Role {
    Role {
        id: 3,
        name: "Cajero".into(),
        description: Some("Punto de venta".into()),
        users_count: Some(5),
    }
}

fn user() -> User {
    User {
        id: 4,
        email: "ana@farmacia.mx".into(),
        name: "Ana".into(),
        role: RoleRef {
            id: 3,
            name: "Cajero".into(),
        },
    }
}

fn alert() -> Alert {
    Alert {
        id: 9,
        kind: AlertKind::LowStock,
        message: "Paracetamol bajo".into(),
        medicine_id: 15,
        severity: Severity::High,
        is_active: true,
        created_at: "2024-05-02T08:00:00Z".into(),
        resolved_at: None,
        medicine: Some(MedicineSummary {
            id: 15,
            name: "Paracetamol".into(),
            expiration_date: None,
            inventory: None,
        }),
    }
}

fn round_trip<E: Entity>(entity: &E) -> E::Create {
    to_payload(E::schema(SchemaKind::Create), &from_entity(entity)).unwrap()
}

#[test]
fn adapter_is_idempotent_for_every_entity() {
    assert_eq!(round_trip(&client()), client().writable());
    assert_eq!(round_trip(&supplier()), supplier().writable());
    assert_eq!(round_trip(&report()), report().writable());
    assert_eq!(round_trip(&role()), role().writable());
    assert_eq!(round_trip(&user()), user().writable());
    assert_eq!(round_trip(&alert()), alert().writable());
}

#[test]
fn blank_optionals_are_omitted_from_the_payload() {
    let form = FormValues::new().with("name", "Acme").with("email", "");
    let payload = Client::validate_create(&form).unwrap();
    assert!(payload.email.is_none());
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json, serde_json::json!({"name": "Acme"}));
}

#[test]
fn short_name_fails_min_length() {
    let form = FormValues::new().with("name", "a");
    let errors = Supplier::validate_create(&form).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "name");
    assert_eq!(errors[0].code, RuleCode::MinLength);
}

#[test]
fn malformed_email_fails() {
    let form = FormValues::new()
        .with("name", "Acme")
        .with("email", "not-an-email");
    let errors = Client::validate_create(&form).unwrap_err();
    assert_eq!(errors[0].field, "email");
    assert_eq!(errors[0].code, RuleCode::EmailFormat);
}

#[test]
fn rfc_and_postal_code_patterns() {
    let ok = FormValues::new()
        .with("name", "Acme")
        .with("rfc", "gode800101ab1")
        .with("fiscal_postal_code", "06000");
    assert!(Client::validate_create(&ok).is_ok());

    let bad = FormValues::new()
        .with("name", "Acme")
        .with("rfc", "123")
        .with("fiscal_postal_code", "6000");
    let errors = Client::validate_create(&bad).unwrap_err();
    let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, ["rfc", "fiscal_postal_code"]);
    assert!(errors.iter().all(|e| e.code == RuleCode::Pattern));
}

#[test]
fn rfc_is_submitted_trimmed_and_upper_case() {
    let form = FormValues::new()
        .with("name", "Acme")
        .with("rfc", " abc010101xy9 ");
    let payload = Client::validate_create(&form).unwrap();
    assert_eq!(payload.fiscal.rfc.as_deref(), Some("ABC010101XY9"));

    let update = Client::validate_update(&FormValues::new().with("rfc", "gode800101ab1")).unwrap();
    assert_eq!(update.fiscal.rfc.as_deref(), Some("GODE800101AB1"));
}

#[test]
fn padded_text_is_checked_and_sent_trimmed() {
    let alert = FormValues::new()
        .with("type", " low_stock ")
        .with("message", "Stock bajo")
        .with("medicine_id", 4i64)
        .with("severity", "high ");
    let payload = Alert::validate_create(&alert).unwrap();
    assert_eq!(payload.kind, AlertKind::LowStock);
    assert_eq!(payload.severity, Severity::High);

    let client = FormValues::new()
        .with("name", "  Acme ")
        .with("email", " ventas@acme.mx ");
    let json = serde_json::to_value(Client::validate_create(&client).unwrap()).unwrap();
    assert_eq!(json, serde_json::json!({"name": "Acme", "email": "ventas@acme.mx"}));

    let report = FormValues::new()
        .with("report_type", "sales")
        .with("date", " 2024-05-01 ")
        .with("data", "{}")
        .with("generated_by", 2i64);
    let payload = Report::validate_create(&report).unwrap();
    assert_eq!(payload.date, "2024-05-01");
}

#[test]
fn empty_update_is_a_valid_no_op() {
    let update = Role::validate_update(&FormValues::new()).unwrap();
    assert_eq!(update, Default::default());
    assert_eq!(serde_json::to_value(&update).unwrap(), serde_json::json!({}));
}

#[test]
fn update_carries_only_present_fields() {
    let form = FormValues::new().with("description", "x");
    let update = Role::validate_update(&form).unwrap();
    assert_eq!(
        serde_json::to_value(&update).unwrap(),
        serde_json::json!({"description": "x"})
    );
}

#[test]
fn role_count_is_read_only() {
    let role: Role =
        serde_json::from_str(r#"{"id":3,"name":"Cajero","usersCount":5}"#).unwrap();
    assert_eq!(role.users_count, Some(5));

    let form = from_entity(&role).with("usersCount", FormValue::Integer(99));
    let payload = Role::validate_create(&form).unwrap();
    let json = serde_json::to_value(&payload).unwrap();
    assert!(json.get("usersCount").is_none());
}

#[test]
fn user_role_is_flattened_for_editing() {
    let form = from_entity(&user());
    assert_eq!(form.get("role_id"), Some(&FormValue::Integer(3)));
    assert_eq!(form.text("role_name"), Some("Cajero"));

    let payload = User::validate_create(&form).unwrap();
    let json = serde_json::to_value(&payload).unwrap();
    assert!(json.get("role_name").is_none());
    assert!(json.get("role").is_none());
    assert_eq!(json["role_id"], 3);
}

#[test]
fn user_update_never_sends_password() {
    let form = FormValues::new()
        .with("name", "Ana Maria")
        .with("password", "new-secret");
    let update = User::validate_update(&form).unwrap();
    let json = serde_json::to_value(&update).unwrap();
    assert_eq!(json, serde_json::json!({"name": "Ana Maria"}));
}

#[test]
fn user_role_id_is_coerced_from_text() {
    let form = FormValues::new()
        .with("name", "Luis")
        .with("email", "luis@farmacia.mx")
        .with("role_id", "2");
    let payload = User::validate_create(&form).unwrap();
    assert_eq!(payload.role_id, 2);

    let zero = form.clone().with("role_id", "0");
    let errors = User::validate_create(&zero).unwrap_err();
    assert_eq!(errors[0].field, "role_id");
    assert_eq!(errors[0].code, RuleCode::PositiveInteger);
}

#[test]
fn report_requires_iso_date_and_positive_author() {
    let form = FormValues::new()
        .with("report_type", "sales")
        .with("date", "yesterday")
        .with("data", "{}")
        .with("generated_by", -1i64);
    let errors = Report::validate_create(&form).unwrap_err();
    let codes: Vec<_> = errors.iter().map(|e| (e.field.as_str(), e.code)).collect();
    assert_eq!(
        codes,
        [
            ("date", RuleCode::IsoDatetime),
            ("generated_by", RuleCode::PositiveInteger)
        ]
    );
}

#[test]
fn alert_enums_use_wire_names() {
    let json = serde_json::to_value(alert()).unwrap();
    assert_eq!(json["type"], "low_stock");
    assert_eq!(json["severity"], "high");

    let form = FormValues::new()
        .with("type", "overstock")
        .with("message", "Revisar")
        .with("medicine_id", 1i64)
        .with("severity", "high");
    let errors = Alert::validate_create(&form).unwrap_err();
    assert_eq!(errors[0].field, "type");
    assert_eq!(errors[0].code, RuleCode::OneOf);
}

#[test]
fn invoicing_readiness_lists_missing_fiscal_fields() {
    let errors = client().invoicing_readiness().unwrap_err();
    let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, ["tax_regime", "cfdi_use", "fiscal_street"]);
    assert!(errors.iter().all(|e| e.code == RuleCode::Required));

    let mut ready = client();
    ready.fiscal.tax_regime = Some("601".into());
    ready.fiscal.cfdi_use = Some("G03".into());
    ready.fiscal.fiscal_street = Some("Reforma".into());
    assert!(ready.invoicing_readiness().is_ok());
}

#[test]
fn client_fiscal_fields_are_flat_on_the_wire() {
    let json = serde_json::to_value(client()).unwrap();
    assert_eq!(json["rfc"], "FCE010101AB1");
    assert!(json.get("fiscal").is_none());
}
