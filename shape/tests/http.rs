//! Calls through the reqwest transport against a mock server.

use serde_json::json;
use shape::client::ReqwestTransport;
use shape::error::ShapeError;
use shape::{Client, Registry};
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client(server: &MockServer) -> Client<ReqwestTransport> {
    let registry = Registry::new(shape_definitions::core_catalog()).unwrap();
    let transport = ReqwestTransport::new(Url::parse(&server.uri()).unwrap()).unwrap();
    Client::new(registry, transport)
}

fn cluster(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "compartmentId": "ocid1.compartment.oc1..c",
        "availabilityDomain": "Uocm:PHX-AD-1",
        "lifecycleState": "ACTIVE",
        "timeCreated": "2024-02-02T12:00:00Z"
    })
}

#[tokio::test]
async fn test_collection_pages_are_followed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/computeClusters"))
        .and(query_param("compartmentId", "ocid1.compartment.oc1..c"))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"items": [cluster("c1"), cluster("c2")]}))
                .insert_header("opc-next-page", "tok1")
                .insert_header("opc-request-id", "srv-1"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/computeClusters"))
        .and(query_param("page", "tok1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [cluster("c3")]})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server).await;
    let request = client
        .request("ListComputeClusters")
        .unwrap()
        .with("CompartmentId", "ocid1.compartment.oc1..c")
        .unwrap();

    let clusters = client.list_all("ListComputeClusters", request).await.unwrap();
    let ids: Vec<_> = clusters.iter().map(|c| c.get_str("Id").unwrap()).collect();
    assert_eq!(ids, vec!["c1", "c2", "c3"]);
}

#[tokio::test]
async fn test_create_sends_details_as_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/natGateways"))
        .and(header("opc-retry-token", "retry-1"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "compartmentId": "ocid1.compartment.oc1..c",
            "vcnId": "ocid1.vcn.oc1..v",
            "displayName": "egress"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "id": "ocid1.natgateway.oc1..n",
                    "compartmentId": "ocid1.compartment.oc1..c",
                    "vcnId": "ocid1.vcn.oc1..v",
                    "displayName": "egress",
                    "lifecycleState": "PROVISIONING",
                    "isBlockTraffic": false,
                    "natIp": "203.0.113.7",
                    "timeCreated": "2024-06-01T00:00:00Z"
                }))
                .insert_header("etag", "\"v1\""),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server).await;
    let details = client
        .registry()
        .new_record("CreateNatGatewayDetails")
        .unwrap()
        .with("CompartmentId", "ocid1.compartment.oc1..c")
        .unwrap()
        .with("VcnId", "ocid1.vcn.oc1..v")
        .unwrap()
        .with("DisplayName", "egress")
        .unwrap();
    let request = client
        .request("CreateNatGateway")
        .unwrap()
        .with("CreateNatGatewayDetails", details)
        .unwrap()
        .with("OpcRetryToken", "retry-1")
        .unwrap();

    let response = client.call("CreateNatGateway", &request).await.unwrap();
    assert_eq!(response.etag(), Some("\"v1\""));
    let gateway = response.record().unwrap();
    assert_eq!(gateway.get_str("LifecycleState"), Some("PROVISIONING"));
    assert_eq!(gateway.get_str("NatIp"), Some("203.0.113.7"));
}

#[tokio::test]
async fn test_service_error_carries_request_id() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/natGateways/ocid1.natgateway.oc1..gone"))
        .and(header("if-match", "\"v1\""))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"code": "NotAuthorizedOrNotFound", "message": "missing"}))
                .insert_header("opc-request-id", "srv-404"),
        )
        .mount(&server)
        .await;

    let client = client(&server).await;
    let request = client
        .request("DeleteNatGateway")
        .unwrap()
        .with("NatGatewayId", "ocid1.natgateway.oc1..gone")
        .unwrap()
        .with("IfMatch", "\"v1\"")
        .unwrap();

    let err = client.call("DeleteNatGateway", &request).await.unwrap_err();
    let ShapeError::Service(service) = err else {
        panic!("expected service error");
    };
    assert_eq!(service.status, 404);
    assert_eq!(service.code, "NotAuthorizedOrNotFound");
    assert_eq!(service.opc_request_id.as_deref(), Some("srv-404"));
}

#[tokio::test]
async fn test_union_list_decodes_each_variant() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vcnTopology"))
        .and(query_param("vcnId", "ocid1.vcn.oc1..v"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entities": [{"id": "ocid1.subnet.oc1..s", "type": "SUBNET"}],
            "relationships": [
                {"type": "CONTAINS", "id1": "ocid1.vcn.oc1..v", "id2": "ocid1.subnet.oc1..s"},
                {
                    "type": "ROUTES_TO",
                    "id1": "ocid1.subnet.oc1..s",
                    "id2": "ocid1.internetgateway.oc1..ig",
                    "routeRuleDetails": {
                        "destinationType": "CIDR_BLOCK",
                        "destination": "0.0.0.0/0",
                        "routeTableId": "ocid1.routetable.oc1..rt",
                        "routeType": "static"
                    }
                }
            ],
            "timeCreated": "2024-06-01T00:00:00Z",
            "vcnId": "ocid1.vcn.oc1..v"
        })))
        .mount(&server)
        .await;

    let client = client(&server).await;
    let request = client
        .request("GetVcnTopology")
        .unwrap()
        .with("CompartmentId", "ocid1.compartment.oc1..c")
        .unwrap()
        .with("VcnId", "ocid1.vcn.oc1..v")
        .unwrap();

    let response = client.call("GetVcnTopology", &request).await.unwrap();
    let topology = response.record().unwrap();
    let relationships = topology.get_list("Relationships").unwrap();

    let models: Vec<_> = relationships
        .iter()
        .map(|r| r.as_record().unwrap().model_name())
        .collect();
    assert_eq!(
        models,
        vec!["TopologyContainsEntityRelationship", "TopologyRoutesToEntityRelationship"]
    );

    let routes = relationships[1].as_record().unwrap();
    let details = routes.get_record("RouteRuleDetails").unwrap();
    assert_eq!(details.get_str("RouteType"), Some("STATIC"));
}
