use serde_json::{Map, Value};

use super::client::RegistryError;
use crate::workflows::companies::format_address;

/// Registry entry reduced to the fields the extraction consumes. Absent
/// upstream fields become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RegistryEntry {
    pub(crate) name: String,
    pub(crate) legal_form: String,
    pub(crate) city: String,
    pub(crate) postal_code: String,
    pub(crate) address: String,
    pub(crate) registration_date: String,
    pub(crate) uid: String,
    pub(crate) register_number: String,
}

pub(crate) fn parse_entries(document: &Value) -> Result<Vec<RegistryEntry>, RegistryError> {
    let items = result_list(document)?;
    Ok(items
        .iter()
        .filter_map(Value::as_object)
        .map(parse_entry)
        .collect())
}

fn result_list(document: &Value) -> Result<&[Value], RegistryError> {
    match document {
        Value::Array(items) => Ok(items),
        Value::Object(map) => {
            for key in ["list", "results"] {
                if let Some(value) = map.get(key) {
                    return value.as_array().map(Vec::as_slice).ok_or_else(|| {
                        RegistryError::MalformedPayload(format!("`{key}` is not an array"))
                    });
                }
            }
            Ok(&[])
        }
        _ => Err(RegistryError::MalformedPayload(
            "expected a JSON object or array".to_string(),
        )),
    }
}

fn parse_entry(item: &Map<String, Value>) -> RegistryEntry {
    let address = item.get("address");
    let address_fields = address.and_then(Value::as_object);

    let address_line = match (address, address_fields) {
        (_, Some(fields)) => format_address(
            scalar(fields.get("street")).as_deref(),
            scalar(fields.get("houseNumber")).as_deref(),
        ),
        (Some(other), None) => scalar(Some(other)).unwrap_or_default(),
        (None, None) => String::new(),
    };

    let city = address_fields
        .and_then(|fields| first_text(fields, &["city", "town"]))
        .or_else(|| first_text(item, &["city", "legalSeat"]))
        .unwrap_or_default();
    let postal_code = address_fields
        .and_then(|fields| first_text(fields, &["swissZipCode", "zipCode"]))
        .or_else(|| first_text(item, &["zipCode", "swissZipCode"]))
        .unwrap_or_default();

    let registration_date = first_text(item, &["registrationDate", "sogcDate"])
        .map(|raw| raw.chars().take(10).collect())
        .unwrap_or_default();

    RegistryEntry {
        name: first_text(item, &["name"]).unwrap_or_default(),
        legal_form: item
            .get("legalForm")
            .and_then(legal_form_text)
            .unwrap_or_default(),
        city,
        postal_code,
        address: address_line,
        registration_date,
        uid: first_text(item, &["uid"]).unwrap_or_default(),
        register_number: first_text(item, &["registerNumber", "chid"]).unwrap_or_default(),
    }
}

fn scalar(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn first_text(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| scalar(map.get(*key)))
}

/// Legal forms arrive as a code, a name, or an object carrying either, sometimes
/// keyed by language. A single representative text is picked so that long
/// multilingual names cannot leak stray markers into classification.
fn legal_form_text(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => ["shortName", "code", "fr", "de", "name", "id"]
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(legal_form_text),
        other => scalar(Some(other)),
    }
}
