//! Properties that hold for every definition of the bundled catalog, plus
//! binder and paginator invariants checked against small fixtures.

use std::sync::{Arc, Mutex};

use serde_json::json;
use shape::binder::{Body, HttpRequestTemplate, RawResponse};
use shape::define::{
    Catalog, FieldDescriptor, ListTemplate, ModelDef, Operation, RequestDef, ResponseBody,
    ResponseDef, RestMethod,
};
use shape::error::{ShapeError, TransportError};
use shape::transport::FnTransport;
use shape::{Client, Registry};

fn core() -> Registry {
    Registry::new(shape_definitions::core_catalog()).unwrap()
}

// ============================================================================
// Enum Registry
// ============================================================================

#[test]
fn every_canonical_value_looks_up_in_any_case() {
    let registry = core();
    for name in registry.enum_names() {
        for value in registry.values(name).unwrap() {
            for input in [value.to_lowercase(), value.to_uppercase(), value.clone()] {
                assert_eq!(
                    registry.lookup(name, &input).unwrap(),
                    Some(value.as_str()),
                    "{name}: {input}"
                );
            }
        }
    }
}

#[test]
fn unknown_values_list_exactly_the_canonical_set() {
    let registry = core();
    for name in registry.enum_names() {
        let canonical = registry.values(name).unwrap().join(",");
        for input in ["definitely-not-a-value", " ", "AVAILABLE_"] {
            let err = registry.validate(name, "Field", input).unwrap_err();
            assert!(matches!(err, ShapeError::UnsupportedEnum(_)));
            assert_eq!(
                err.to_string(),
                format!("unsupported enum value for Field: {input}. Supported values are: {canonical}")
            );
        }
    }
}

#[test]
fn empty_string_is_always_accepted() {
    let registry = core();
    for name in registry.enum_names() {
        registry.validate(name, "Field", "").unwrap();
    }
}

// ============================================================================
// JSON Codec
// ============================================================================

#[test]
fn marshal_omits_unset_optional_keys_and_round_trips() {
    let registry = core();
    let pool = registry
        .decode(
            "InstancePool",
            &json!({
                "id": "ocid1.instancepool.oc1..p",
                "compartmentId": "ocid1.compartment.oc1..c",
                "instanceConfigurationId": "ocid1.instanceconfiguration.oc1..i",
                "lifecycleState": "running",
                "placementConfigurations": [
                    {"availabilityDomain": "AD-1", "faultDomains": ["FAULT-DOMAIN-1", "FAULT-DOMAIN-2"]}
                ],
                "size": 3,
                "timeCreated": "2024-05-01T08:30:00.123+02:00",
                "freeformTags": {"team": "infra"}
            }),
        )
        .unwrap();

    assert_eq!(pool.get_str("LifecycleState"), Some("RUNNING"));

    let text = registry.marshal(&pool).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(json.get("displayName").is_none());
    assert!(json.get("definedTags").is_none());
    assert_eq!(json["freeformTags"], json!({"team": "infra"}));

    assert_eq!(registry.unmarshal("InstancePool", &text).unwrap(), pool);
}

#[test]
fn every_missing_required_field_is_named() {
    let registry = core();
    let full = json!({
        "id": "ocid1.byoasn.oc1..b",
        "asn": 64512,
        "compartmentId": "ocid1.compartment.oc1..c",
        "displayName": "edge",
        "timeCreated": "2024-01-01T00:00:00Z",
        "lifecycleState": "ACTIVE"
    });
    registry.decode("ByoasnSummary", &full).unwrap();

    let (wire_names, field_names) = (
        ["id", "asn", "compartmentId", "displayName", "timeCreated", "lifecycleState"],
        ["Id", "Asn", "CompartmentId", "DisplayName", "TimeCreated", "LifecycleState"],
    );
    for (wire, name) in wire_names.iter().zip(field_names) {
        let mut partial = full.clone();
        partial.as_object_mut().unwrap().remove(*wire);
        let err = registry.decode("ByoasnSummary", &partial).unwrap_err();
        assert_eq!(
            err,
            ShapeError::MissingRequired {
                model: "ByoasnSummary".into(),
                field: name.into(),
            }
        );
    }
}

// ============================================================================
// Request Binder
// ============================================================================

fn partition_registry() -> Registry {
    Registry::new(
        Catalog::new("partition")
            .with_model(
                ModelDef::new("Details")
                    .field(FieldDescriptor::string("DisplayName", "displayName").optional())
                    .field(FieldDescriptor::integer("Size", "size").optional()),
            )
            .with_request(
                RequestDef::new("UpdateWidgetRequest")
                    .field(FieldDescriptor::string("WidgetId", "widgetId").in_path())
                    .field(FieldDescriptor::string("Mode", "mode").optional().in_query())
                    .field(
                        FieldDescriptor::string("Tag", "tag")
                            .list()
                            .optional()
                            .in_query(),
                    )
                    .field(
                        FieldDescriptor::string("Note", "note")
                            .optional()
                            .in_query()
                            .omit_empty(),
                    )
                    .field(FieldDescriptor::model("Details", "details", "Details"))
                    .field(RequestDef::if_match())
                    .field(RequestDef::opc_request_id()),
            )
            .with_response(ResponseDef::new("UpdateWidgetResponse", ResponseBody::Empty))
            .with_operation(Operation::new(
                "UpdateWidget",
                RestMethod::Put,
                "/widgets/{widgetId}",
                "UpdateWidgetRequest",
                "UpdateWidgetResponse",
            )),
    )
    .unwrap()
}

#[test]
fn binder_partitions_fields_by_location() {
    let registry = partition_registry();
    let client = Client::new(registry, FnTransport::new(|_: HttpRequestTemplate| async {
        Ok(RawResponse::new(204))
    }));
    let details = client
        .registry()
        .new_record("Details")
        .unwrap()
        .with("Size", 4)
        .unwrap();

    let request = client
        .request("UpdateWidget")
        .unwrap()
        .with("WidgetId", "w/1")
        .unwrap()
        .with("Mode", "fast")
        .unwrap()
        .with("Tag", vec!["a", "b"])
        .unwrap()
        .with("Note", "")
        .unwrap()
        .with("Details", details)
        .unwrap()
        .with("IfMatch", "etag-1")
        .unwrap()
        .with_header("x-trace", "t-9");

    let template = client.bind("UpdateWidget", &request).unwrap();

    assert_eq!(template.method, RestMethod::Put);
    assert_eq!(template.path, "/widgets/w%2F1");
    assert_eq!(
        template.query,
        vec![
            ("mode".to_string(), "fast".to_string()),
            ("tag".to_string(), "a".to_string()),
            ("tag".to_string(), "b".to_string()),
        ]
    );
    assert_eq!(template.header("if-match"), Some("etag-1"));
    assert_eq!(template.header("x-trace"), Some("t-9"));
    assert_eq!(template.header("opc-request-id"), None);
    assert!(matches!(template.body, Body::Json(_)));
    assert_eq!(template.body.json(), Some(json!({"size": 4})));
}

#[test]
fn missing_path_parameter_fails_before_transport() {
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    let client = Client::new(
        partition_registry(),
        FnTransport::new(move |_: HttpRequestTemplate| {
            *counter.lock().unwrap() += 1;
            async { Ok(RawResponse::new(204)) }
        }),
    );
    let details = client.registry().new_record("Details").unwrap();
    let request = client
        .request("UpdateWidget")
        .unwrap()
        .with("Details", details)
        .unwrap();

    let err = client.bind("UpdateWidget", &request).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(*calls.lock().unwrap(), 0);
}

// ============================================================================
// Paginator
// ============================================================================

fn numbered_registry() -> Registry {
    Registry::new(
        Catalog::new("numbers")
            .with_model(ModelDef::new("Number").field(FieldDescriptor::integer("Value", "value")))
            .with_list(ListTemplate::new("ListNumbers", "/numbers", "Number")),
    )
    .unwrap()
}

/// Serves `total` items in pages of `size`, using the next offset as token.
fn paged_transport(
    total: i64,
    size: i64,
    calls: Arc<Mutex<usize>>,
) -> FnTransport<impl Fn(HttpRequestTemplate) -> std::future::Ready<Result<RawResponse, TransportError>> + Send + Sync>
{
    FnTransport::new(move |template: HttpRequestTemplate| {
        *calls.lock().unwrap() += 1;
        let start: i64 = template
            .query_param("page")
            .and_then(|p| p.parse().ok())
            .unwrap_or(0);
        let end = (start + size).min(total);
        let items: Vec<_> = (start..end).map(|n| json!({"value": n})).collect();
        let mut raw = RawResponse::json(200, &json!(items));
        if end < total {
            raw = raw.with_header("opc-next-page", end.to_string());
        }
        std::future::ready(Ok(raw))
    })
}

#[tokio::test]
async fn paginator_yields_every_item_in_order() {
    for (total, size) in [(0, 3), (1, 3), (3, 3), (7, 3), (10, 1)] {
        let calls = Arc::new(Mutex::new(0));
        let client = Client::new(numbered_registry(), paged_transport(total, size, Arc::clone(&calls)));
        let request = client.request("ListNumbers").unwrap();

        let mut pages = client.paginate("ListNumbers", request).unwrap();
        let mut values = Vec::new();
        while let Some((index, item)) = pages.next().await.unwrap() {
            assert_eq!(index as i64, item.get_i64("Value").unwrap() + 1);
            values.push(item.get_i64("Value").unwrap());
        }

        assert_eq!(values, (0..total).collect::<Vec<_>>());
        let expected_calls = if total == 0 { 1 } else { ((total + size - 1) / size) as usize };
        assert_eq!(*calls.lock().unwrap(), expected_calls, "total={total} size={size}");
        assert!(pages.is_finished());
    }
}

#[tokio::test]
async fn transport_error_poisons_without_further_calls() {
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    let transport = FnTransport::new(move |template: HttpRequestTemplate| {
        *counter.lock().unwrap() += 1;
        let result = match template.query_param("page") {
            None => Ok(RawResponse::json(200, &json!([{"value": 1}])).with_header("opc-next-page", "2")),
            Some(_) => Err(TransportError::Connection("connection reset".into())),
        };
        std::future::ready(result)
    });
    let client = Client::new(numbered_registry(), transport);
    let request = client.request("ListNumbers").unwrap();

    let mut pages = client.paginate("ListNumbers", request).unwrap();
    assert!(pages.next().await.unwrap().is_some());

    let first = pages.next().await.unwrap_err();
    assert_eq!(first, ShapeError::Transport(TransportError::Connection("connection reset".into())));
    for _ in 0..3 {
        assert_eq!(pages.next().await.unwrap_err(), first);
    }
    assert_eq!(*calls.lock().unwrap(), 2);
}

#[tokio::test]
async fn malformed_page_poisons_with_decode_error() {
    let transport = FnTransport::new(|_: HttpRequestTemplate| {
        std::future::ready(Ok(RawResponse::json(200, &json!({"value": 1}))))
    });
    let client = Client::new(numbered_registry(), transport);
    let request = client.request("ListNumbers").unwrap();

    let mut pages = client.paginate("ListNumbers", request).unwrap();
    let err = pages.next().await.unwrap_err();
    assert!(matches!(err, ShapeError::Decode(_)));
    assert_eq!(pages.next().await.unwrap_err(), err);
}
