//! Network topology: entities of a VCN and the relationships between them.
//!
//! Relationships are a discriminated union keyed by `type`:
//!
//! | Tag | Model |
//! |---|---|
//! | `CONTAINS` | `TopologyContainsEntityRelationship` |
//! | `ASSOCIATED_WITH` | `TopologyAssociatedWithEntityRelationship` |
//! | `ROUTES_TO` | `TopologyRoutesToEntityRelationship` |

use shape_define::{
    Catalog, EnumDef, FieldDescriptor, HeaderField, ModelDef, Operation, RequestDef, ResponseBody,
    ResponseDef, RestMethod, UnionDef,
};

/// Name of the relationship union.
pub const ENTITY_RELATIONSHIP: &str = "TopologyEntityRelationship";

const ROUTE_TYPE: &str = "TopologyRoutesToRelationshipDetailsRouteType";

/// Creates the topology catalog.
///
/// ## Examples
///
/// ```
/// use shape_definitions::topology;
///
/// let catalog = topology::catalog();
/// let union = &catalog.unions[0];
/// assert_eq!(union.discriminator, "type");
/// assert_eq!(union.model_for("CONTAINS"), Some("TopologyContainsEntityRelationship"));
/// ```
pub fn catalog() -> Catalog {
    Catalog::new("topology")
        .with_enum(EnumDef::new(ROUTE_TYPE, ["STATIC", "DYNAMIC"]))
        .with_union(
            UnionDef::new(ENTITY_RELATIONSHIP)
                .with_description("A relationship between two entities of a topology")
                .variant("CONTAINS", "TopologyContainsEntityRelationship")
                .variant("ASSOCIATED_WITH", "TopologyAssociatedWithEntityRelationship")
                .variant("ROUTES_TO", "TopologyRoutesToEntityRelationship"),
        )
        .with_model(
            relationship("TopologyContainsEntityRelationship", "CONTAINS"),
        )
        .with_model(
            ModelDef::new("TopologyAssociatedWithRelationshipDetails").field(
                FieldDescriptor::string("Via", "via").list().optional(),
            ),
        )
        .with_model(
            relationship("TopologyAssociatedWithEntityRelationship", "ASSOCIATED_WITH").field(
                FieldDescriptor::model(
                    "AssociatedWithDetails",
                    "associatedWithDetails",
                    "TopologyAssociatedWithRelationshipDetails",
                )
                .optional(),
            ),
        )
        .with_model(
            ModelDef::new("TopologyRoutesToRelationshipDetails").fields([
                FieldDescriptor::string("DestinationType", "destinationType"),
                FieldDescriptor::string("Destination", "destination"),
                FieldDescriptor::string("RouteTableId", "routeTableId"),
                FieldDescriptor::enumeration("RouteType", "routeType", ROUTE_TYPE).optional(),
            ]),
        )
        .with_model(
            relationship("TopologyRoutesToEntityRelationship", "ROUTES_TO").field(
                FieldDescriptor::model(
                    "RouteRuleDetails",
                    "routeRuleDetails",
                    "TopologyRoutesToRelationshipDetails",
                ),
            ),
        )
        .with_model(
            ModelDef::new("VcnTopology")
                .with_description("The entities of a VCN and how they relate")
                .fields([
                    FieldDescriptor::json("Entities", "entities").list(),
                    FieldDescriptor::model("Relationships", "relationships", ENTITY_RELATIONSHIP)
                        .list(),
                    FieldDescriptor::time("TimeCreated", "timeCreated"),
                    FieldDescriptor::string("VcnId", "vcnId"),
                ]),
        )
        .with_request(
            RequestDef::new("GetVcnTopologyRequest")
                .field(FieldDescriptor::string("CompartmentId", "compartmentId").in_query())
                .field(FieldDescriptor::string("VcnId", "vcnId").in_query())
                .field(RequestDef::opc_request_id()),
        )
        .with_response(
            ResponseDef::new("GetVcnTopologyResponse", ResponseBody::Record("VcnTopology".into()))
                .header(HeaderField::etag())
                .header(HeaderField::request_id()),
        )
        .with_operation(
            Operation::new(
                "GetVcnTopology",
                RestMethod::Get,
                "/vcnTopology",
                "GetVcnTopologyRequest",
                "GetVcnTopologyResponse",
            )
            .with_description("Gets the topology of the specified VCN"),
        )
}

fn relationship(name: &str, tag: &str) -> ModelDef {
    ModelDef::new(name)
        .member_of(ENTITY_RELATIONSHIP, tag)
        .field(FieldDescriptor::string("Id1", "id1"))
        .field(FieldDescriptor::string("Id2", "id2"))
}
