use std::sync::LazyLock;

use pharmadesk_core::validation::{FieldKind, FieldSpec, Rule, Schema, SchemaKind};
use pharmadesk_core::{FieldError, FormValues};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId};
use crate::form::non_blank;

/// Mexican RFC: 3 letters (legal person) or 4 (natural person), a yymmdd date, 3 check characters.
static RFC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-ZÑ&]{3,4}\d{6}[A-Z0-9]{3}$").expect("RFC pattern compiles")
});

static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}$").expect("postal code pattern compiles"));

const RFC_MESSAGE: &str =
    "invalid RFC, expected XXXX000000XXX (natural person) or XXX000000XXX (legal person)";
const POSTAL_CODE_MESSAGE: &str = "postal code must be 5 digits";

/// Tax data needed to issue CFDI invoices to a client. Every field is optional
/// on the client record itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rfc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_regime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cfdi_use: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_exterior_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_interior_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_neighborhood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_country: Option<String>,
}

impl FiscalData {
    fn fields(&self) -> [(&'static str, &Option<String>); 11] {
        [
            ("rfc", &self.rfc),
            ("tax_regime", &self.tax_regime),
            ("cfdi_use", &self.cfdi_use),
            ("fiscal_street", &self.fiscal_street),
            ("fiscal_exterior_number", &self.fiscal_exterior_number),
            ("fiscal_interior_number", &self.fiscal_interior_number),
            ("fiscal_neighborhood", &self.fiscal_neighborhood),
            ("fiscal_city", &self.fiscal_city),
            ("fiscal_state", &self.fiscal_state),
            ("fiscal_postal_code", &self.fiscal_postal_code),
            ("fiscal_country", &self.fiscal_country),
        ]
    }

    fn write_form(&self, form: &mut FormValues) {
        for (name, value) in self.fields() {
            form.insert_opt(name, value.clone());
        }
    }

    fn normalized(&self) -> FiscalData {
        FiscalData {
            rfc: non_blank(&self.rfc),
            tax_regime: non_blank(&self.tax_regime),
            cfdi_use: non_blank(&self.cfdi_use),
            fiscal_street: non_blank(&self.fiscal_street),
            fiscal_exterior_number: non_blank(&self.fiscal_exterior_number),
            fiscal_interior_number: non_blank(&self.fiscal_interior_number),
            fiscal_neighborhood: non_blank(&self.fiscal_neighborhood),
            fiscal_city: non_blank(&self.fiscal_city),
            fiscal_state: non_blank(&self.fiscal_state),
            fiscal_postal_code: non_blank(&self.fiscal_postal_code),
            fiscal_country: non_blank(&self.fiscal_country),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: EntityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub fiscal: FiscalData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCreate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub fiscal: FiscalData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub fiscal: FiscalData,
}

/// RFCs are submitted upper-case, the way the tax authority issues them.
fn upper_rfc(rfc: &str) -> String {
    rfc.to_uppercase()
}

fn optional_text(name: &'static str) -> FieldSpec {
    FieldSpec::optional(name, FieldKind::Text)
}

static CREATE: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("client")
        .field(FieldSpec::required("name", FieldKind::Text).rule(Rule::MinLength(2)))
        .field(optional_text("contact"))
        .field(optional_text("address"))
        .field(optional_text("email").rule(Rule::Email))
        .field(optional_text("rfc").transform(upper_rfc).rule(Rule::Pattern {
            regex: &RFC,
            message: RFC_MESSAGE,
        }))
        .field(optional_text("tax_regime"))
        .field(optional_text("cfdi_use"))
        .field(optional_text("fiscal_street"))
        .field(optional_text("fiscal_exterior_number"))
        .field(optional_text("fiscal_interior_number"))
        .field(optional_text("fiscal_neighborhood"))
        .field(optional_text("fiscal_city"))
        .field(optional_text("fiscal_state"))
        .field(optional_text("fiscal_postal_code").rule(Rule::Pattern {
            regex: &POSTAL_CODE,
            message: POSTAL_CODE_MESSAGE,
        }))
        .field(optional_text("fiscal_country"))
});

static UPDATE: LazyLock<Schema> = LazyLock::new(|| CREATE.partial());

/// Fields that must be complete before a client can be invoiced.
static INVOICING: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new("client.invoicing")
        .field(
            FieldSpec::required("rfc", FieldKind::Text)
                .transform(upper_rfc)
                .rule(Rule::MinLength(12))
                .rule(Rule::Pattern {
                    regex: &RFC,
                    message: RFC_MESSAGE,
                }),
        )
        .field(FieldSpec::required("tax_regime", FieldKind::Text).rule(Rule::MinLength(1)))
        .field(FieldSpec::required("cfdi_use", FieldKind::Text).rule(Rule::MinLength(1)))
        .field(FieldSpec::required("fiscal_street", FieldKind::Text).rule(Rule::MinLength(1)))
        .field(
            FieldSpec::required("fiscal_postal_code", FieldKind::Text).rule(Rule::Pattern {
                regex: &POSTAL_CODE,
                message: POSTAL_CODE_MESSAGE,
            }),
        )
});

impl Client {
    /// Check that the fiscal data is complete enough to issue an invoice.
    pub fn invoicing_readiness(&self) -> Result<(), Vec<FieldError>> {
        let errors = INVOICING.check(&self.to_form());
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Entity for Client {
    type Create = ClientCreate;
    type Update = ClientUpdate;

    const RESOURCE: &'static str = "clients";

    fn id(&self) -> EntityId {
        self.id
    }

    fn schema(kind: SchemaKind) -> &'static Schema {
        match kind {
            SchemaKind::Create => &CREATE,
            SchemaKind::Update => &UPDATE,
        }
    }

    fn writable(&self) -> ClientCreate {
        ClientCreate {
            name: self.name.clone(),
            contact: non_blank(&self.contact),
            address: non_blank(&self.address),
            email: non_blank(&self.email),
            fiscal: self.fiscal.normalized(),
        }
    }

    fn to_form(&self) -> FormValues {
        let mut form = FormValues::new().with("name", self.name.as_str());
        form.insert_opt("contact", self.contact.clone());
        form.insert_opt("address", self.address.clone());
        form.insert_opt("email", self.email.clone());
        self.fiscal.write_form(&mut form);
        form
    }
}
