//! NAT gateways, DRG route tables and IPSec tunnel routes.

use shape_define::{
    Catalog, EnumDef, FieldDescriptor, HeaderField, ListTemplate, ModelDef, Operation, RequestDef,
    ResponseBody, ResponseDef, RestMethod,
};

use crate::common::{
    compartment_scope, defined_tags, display_name_filter, freeform_tags, lifecycle_filter,
};

const NAT_STATE: &str = "NatGatewayLifecycleState";
const DRG_ROUTE_TABLE_STATE: &str = "DrgRouteTableLifecycleState";

pub(super) fn catalog() -> Catalog {
    Catalog::new("gateways")
        .with_enum(EnumDef::new(
            NAT_STATE,
            ["PROVISIONING", "AVAILABLE", "TERMINATING", "TERMINATED"],
        ))
        .with_enum(EnumDef::new(
            DRG_ROUTE_TABLE_STATE,
            ["PROVISIONING", "AVAILABLE", "TERMINATING", "TERMINATED"],
        ))
        .with_enum(EnumDef::new("TunnelRouteSummaryAdvertiser", ["CUSTOMER", "ORACLE"]))
        .with_enum(EnumDef::new(
            "ListIPSecConnectionTunnelRoutesAdvertiser",
            ["CUSTOMER", "ORACLE"],
        ))
        .with_catalog(nat_gateways())
        .with_model(drg_route_table())
        .with_list(
            ListTemplate::new("ListDrgRouteTables", "/drgRouteTables", "DrgRouteTable")
                .sort_by(["TIMECREATED", "DISPLAYNAME"])
                .scope(FieldDescriptor::string("DrgId", "drgId").in_query())
                .filter(display_name_filter())
                .filter(
                    FieldDescriptor::string(
                        "ImportDrgRouteDistributionId",
                        "importDrgRouteDistributionId",
                    )
                    .optional()
                    .in_query(),
                )
                .filter(lifecycle_filter(DRG_ROUTE_TABLE_STATE)),
        )
        .with_model(
            ModelDef::new("TunnelRouteSummary")
                .with_description("A route learned or advertised over an IPSec tunnel")
                .fields([
                    FieldDescriptor::string("Prefix", "prefix").optional(),
                    FieldDescriptor::integer("Age", "age").optional(),
                    FieldDescriptor::boolean("IsBestPath", "isBestPath").optional(),
                    FieldDescriptor::integer("AsPath", "asPath").list().optional(),
                    FieldDescriptor::enumeration(
                        "Advertiser",
                        "advertiser",
                        "TunnelRouteSummaryAdvertiser",
                    )
                    .optional(),
                ]),
        )
        .with_list(
            ListTemplate::new(
                "ListIPSecConnectionTunnelRoutes",
                "/ipsecConnections/{ipscId}/tunnels/{tunnelId}/routes",
                "TunnelRouteSummary",
            )
            .scope(FieldDescriptor::string("IpscId", "ipscId").in_path())
            .scope(FieldDescriptor::string("TunnelId", "tunnelId").in_path())
            .filter(
                FieldDescriptor::enumeration(
                    "Advertiser",
                    "advertiser",
                    "ListIPSecConnectionTunnelRoutesAdvertiser",
                )
                .optional()
                .in_query()
                .omit_empty(),
            )
            .with_description("The routes advertised to the customer and the routes received from the customer"),
        )
}

fn nat_gateways() -> Catalog {
    let nat_gateway_id = || FieldDescriptor::string("NatGatewayId", "natGatewayId").in_path();

    Catalog::new("nat")
        .with_model(
            ModelDef::new("NatGateway")
                .with_description("A NAT gateway giving private subnets outbound internet access")
                .fields([
                    FieldDescriptor::string("CompartmentId", "compartmentId"),
                    FieldDescriptor::string("Id", "id"),
                    FieldDescriptor::boolean("IsBlockTraffic", "isBlockTraffic"),
                    FieldDescriptor::enumeration("LifecycleState", "lifecycleState", NAT_STATE),
                    FieldDescriptor::string("NatIp", "natIp"),
                    FieldDescriptor::time("TimeCreated", "timeCreated"),
                    FieldDescriptor::string("VcnId", "vcnId"),
                    defined_tags(),
                    FieldDescriptor::string("DisplayName", "displayName").optional(),
                    freeform_tags(),
                    FieldDescriptor::string("PublicIpId", "publicIpId").optional(),
                    FieldDescriptor::string("RouteTableId", "routeTableId").optional(),
                ]),
        )
        .with_model(
            ModelDef::new("CreateNatGatewayDetails").fields([
                FieldDescriptor::string("CompartmentId", "compartmentId"),
                FieldDescriptor::string("VcnId", "vcnId"),
                defined_tags(),
                FieldDescriptor::string("DisplayName", "displayName").optional(),
                freeform_tags(),
                FieldDescriptor::boolean("IsBlockTraffic", "isBlockTraffic").optional(),
                FieldDescriptor::string("PublicIpId", "publicIpId").optional(),
                FieldDescriptor::string("RouteTableId", "routeTableId").optional(),
            ]),
        )
        .with_request(
            RequestDef::new("GetNatGatewayRequest")
                .field(nat_gateway_id())
                .field(RequestDef::opc_request_id()),
        )
        .with_request(
            RequestDef::new("CreateNatGatewayRequest")
                .field(FieldDescriptor::model(
                    "CreateNatGatewayDetails",
                    "createNatGatewayDetails",
                    "CreateNatGatewayDetails",
                ))
                .field(RequestDef::opc_retry_token())
                .field(RequestDef::opc_request_id()),
        )
        .with_request(
            RequestDef::new("DeleteNatGatewayRequest")
                .field(nat_gateway_id())
                .field(RequestDef::if_match())
                .field(RequestDef::opc_request_id()),
        )
        .with_response(
            ResponseDef::new("GetNatGatewayResponse", ResponseBody::Record("NatGateway".into()))
                .header(HeaderField::etag())
                .header(HeaderField::request_id()),
        )
        .with_response(
            ResponseDef::new("CreateNatGatewayResponse", ResponseBody::Record("NatGateway".into()))
                .header(HeaderField::etag())
                .header(HeaderField::request_id()),
        )
        .with_response(
            ResponseDef::new("DeleteNatGatewayResponse", ResponseBody::Empty)
                .header(HeaderField::request_id()),
        )
        .with_operation(Operation::new(
            "GetNatGateway",
            RestMethod::Get,
            "/natGateways/{natGatewayId}",
            "GetNatGatewayRequest",
            "GetNatGatewayResponse",
        ))
        .with_operation(
            Operation::new(
                "CreateNatGateway",
                RestMethod::Post,
                "/natGateways",
                "CreateNatGatewayRequest",
                "CreateNatGatewayResponse",
            )
            .with_description("Creates a new NAT gateway for the specified VCN"),
        )
        .with_operation(
            Operation::new(
                "DeleteNatGateway",
                RestMethod::Delete,
                "/natGateways/{natGatewayId}",
                "DeleteNatGatewayRequest",
                "DeleteNatGatewayResponse",
            )
            .with_description("Deletes the specified NAT gateway"),
        )
        .with_list(
            ListTemplate::new("ListNatGateways", "/natGateways", "NatGateway")
                .sort_by(["TIMECREATED", "DISPLAYNAME"])
                .scope(compartment_scope())
                .filter(FieldDescriptor::string("VcnId", "vcnId").optional().in_query())
                .filter(display_name_filter())
                .filter(lifecycle_filter(NAT_STATE)),
        )
}

fn drg_route_table() -> ModelDef {
    ModelDef::new("DrgRouteTable").fields([
        FieldDescriptor::string("Id", "id"),
        FieldDescriptor::string("CompartmentId", "compartmentId"),
        FieldDescriptor::string("DrgId", "drgId"),
        FieldDescriptor::time("TimeCreated", "timeCreated"),
        FieldDescriptor::enumeration("LifecycleState", "lifecycleState", DRG_ROUTE_TABLE_STATE),
        FieldDescriptor::boolean("IsEcmpEnabled", "isEcmpEnabled"),
        FieldDescriptor::string("DisplayName", "displayName").optional(),
        defined_tags(),
        freeform_tags(),
        FieldDescriptor::string("ImportDrgRouteDistributionId", "importDrgRouteDistributionId")
            .optional(),
    ])
}
