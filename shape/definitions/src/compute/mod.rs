//! Compute: clusters, capacity topology hosts and instance pools.
//!
//! ## Operations
//!
//! - `ListComputeClusters` - GET /computeClusters
//! - `ListComputeCapacityTopologyComputeBareMetalHosts` - GET /computeCapacityTopologies/{computeCapacityTopologyId}/computeBareMetalHosts
//! - `GetInstancePool` - GET /instancePools/{instancePoolId}
//! - `UpdateInstancePool` - PUT /instancePools/{instancePoolId}
//! - `ListInstancePools` - GET /instancePools

use shape_define::{
    Catalog, EnumDef, FieldDescriptor, HeaderField, ListTemplate, ModelDef, Operation, RequestDef,
    ResponseBody, ResponseDef, RestMethod,
};

use crate::common::{
    compartment_scope, defined_tags, display_name_filter, freeform_tags, lifecycle_filter,
};

/// Lifecycle states of an instance pool.
pub const INSTANCE_POOL_LIFECYCLE_STATE: &str = "InstancePoolLifecycleState";

const CLUSTER_STATE: &str = "ComputeClusterLifecycleState";
const HOST_STATE: &str = "ComputeBareMetalHostLifecycleState";

/// Creates the compute catalog.
///
/// ## Examples
///
/// ```
/// use shape_definitions::compute;
///
/// let catalog = compute::catalog();
/// assert!(catalog.operations.iter().any(|op| op.id == "UpdateInstancePool"));
/// ```
pub fn catalog() -> Catalog {
    Catalog::new("compute")
        .with_enum(EnumDef::new(CLUSTER_STATE, ["ACTIVE", "DELETED"]))
        .with_enum(EnumDef::new(HOST_STATE, ["ACTIVE", "INACTIVE"]))
        .with_enum(
            EnumDef::new(
                INSTANCE_POOL_LIFECYCLE_STATE,
                [
                    "PROVISIONING",
                    "SCALING",
                    "STARTING",
                    "STOPPING",
                    "TERMINATING",
                    "STOPPED",
                    "TERMINATED",
                    "RUNNING",
                ],
            )
            .with_description("The current state of an instance pool"),
        )
        .with_catalog(clusters())
        .with_catalog(bare_metal_hosts())
        .with_catalog(instance_pools())
}

fn clusters() -> Catalog {
    Catalog::new("compute-clusters")
        .with_model(
            ModelDef::new("ComputeClusterSummary").fields([
                FieldDescriptor::string("Id", "id"),
                FieldDescriptor::string("CompartmentId", "compartmentId"),
                FieldDescriptor::string("AvailabilityDomain", "availabilityDomain"),
                FieldDescriptor::enumeration("LifecycleState", "lifecycleState", CLUSTER_STATE),
                FieldDescriptor::time("TimeCreated", "timeCreated"),
                FieldDescriptor::string("DisplayName", "displayName").optional(),
                defined_tags(),
                freeform_tags(),
            ]),
        )
        .with_model(
            ModelDef::new("ComputeClusterCollection").field(
                FieldDescriptor::model("Items", "items", "ComputeClusterSummary").list(),
            ),
        )
        .with_list(
            ListTemplate::new("ListComputeClusters", "/computeClusters", "ComputeClusterSummary")
                .in_collection("ComputeClusterCollection")
                .sort_by(["TIMECREATED", "DISPLAYNAME"])
                .scope(compartment_scope())
                .filter(
                    FieldDescriptor::string("AvailabilityDomain", "availabilityDomain")
                        .optional()
                        .in_query(),
                )
                .filter(display_name_filter()),
        )
}

fn bare_metal_hosts() -> Catalog {
    let optional_query =
        |name: &str, wire: &str| FieldDescriptor::string(name, wire).optional().in_query();

    Catalog::new("compute-capacity-topology")
        .with_model(
            ModelDef::new("ComputeBareMetalHostSummary")
                .with_description("A bare metal host within a compute capacity topology")
                .fields([
                    FieldDescriptor::string("Id", "id"),
                    FieldDescriptor::string("ComputeCapacityTopologyId", "computeCapacityTopologyId"),
                    FieldDescriptor::string("ComputeHpcIslandId", "computeHpcIslandId"),
                    FieldDescriptor::string("ComputeNetworkBlockId", "computeNetworkBlockId"),
                    FieldDescriptor::string("ComputeLocalBlockId", "computeLocalBlockId"),
                    FieldDescriptor::string("CompartmentId", "compartmentId"),
                    FieldDescriptor::string("AvailabilityDomain", "availabilityDomain"),
                    FieldDescriptor::enumeration("LifecycleState", "lifecycleState", HOST_STATE),
                    FieldDescriptor::time("TimeCreated", "timeCreated"),
                    FieldDescriptor::time("TimeUpdated", "timeUpdated"),
                    FieldDescriptor::string("InstanceShape", "instanceShape").optional(),
                    FieldDescriptor::string("InstanceId", "instanceId").optional(),
                    FieldDescriptor::boolean("HasImpactedComponents", "hasImpactedComponents")
                        .optional(),
                    defined_tags(),
                    freeform_tags(),
                ]),
        )
        .with_model(
            ModelDef::new("ComputeBareMetalHostCollection").field(
                FieldDescriptor::model("Items", "items", "ComputeBareMetalHostSummary").list(),
            ),
        )
        .with_list(
            ListTemplate::new(
                "ListComputeCapacityTopologyComputeBareMetalHosts",
                "/computeCapacityTopologies/{computeCapacityTopologyId}/computeBareMetalHosts",
                "ComputeBareMetalHostSummary",
            )
            .in_collection("ComputeBareMetalHostCollection")
            .sort_by(["TIMECREATED", "DISPLAYNAME"])
            .scope(
                FieldDescriptor::string("ComputeCapacityTopologyId", "computeCapacityTopologyId")
                    .in_path(),
            )
            .scope(optional_query("AvailabilityDomain", "availabilityDomain"))
            .scope(optional_query("CompartmentId", "compartmentId"))
            .scope(optional_query("ComputeHpcIslandId", "computeHpcIslandId"))
            .scope(optional_query("ComputeNetworkBlockId", "computeNetworkBlockId"))
            .scope(optional_query("ComputeLocalBlockId", "computeLocalBlockId"))
            .with_description("Lists the bare metal hosts of a compute capacity topology"),
        )
}

fn instance_pools() -> Catalog {
    Catalog::new("instance-pools")
        .with_model(
            ModelDef::new("InstancePoolPlacementConfiguration").fields([
                FieldDescriptor::string("AvailabilityDomain", "availabilityDomain"),
                FieldDescriptor::string("PrimarySubnetId", "primarySubnetId").optional(),
                FieldDescriptor::string("FaultDomains", "faultDomains")
                    .list()
                    .optional(),
            ]),
        )
        .with_model(
            ModelDef::new("InstancePool")
                .with_description("A group of instances provisioned from one instance configuration")
                .fields([
                    FieldDescriptor::string("Id", "id"),
                    FieldDescriptor::string("CompartmentId", "compartmentId"),
                    FieldDescriptor::string("InstanceConfigurationId", "instanceConfigurationId"),
                    FieldDescriptor::enumeration(
                        "LifecycleState",
                        "lifecycleState",
                        INSTANCE_POOL_LIFECYCLE_STATE,
                    ),
                    FieldDescriptor::model(
                        "PlacementConfigurations",
                        "placementConfigurations",
                        "InstancePoolPlacementConfiguration",
                    )
                    .list(),
                    FieldDescriptor::integer("Size", "size"),
                    FieldDescriptor::time("TimeCreated", "timeCreated"),
                    defined_tags(),
                    FieldDescriptor::string("DisplayName", "displayName").optional(),
                    freeform_tags(),
                    FieldDescriptor::string("InstanceDisplayNameFormatter", "instanceDisplayNameFormatter")
                        .optional(),
                    FieldDescriptor::string("InstanceHostnameFormatter", "instanceHostnameFormatter")
                        .optional(),
                ]),
        )
        .with_model(
            ModelDef::new("InstancePoolSummary").fields([
                FieldDescriptor::string("Id", "id"),
                FieldDescriptor::string("CompartmentId", "compartmentId"),
                FieldDescriptor::string("InstanceConfigurationId", "instanceConfigurationId"),
                FieldDescriptor::enumeration(
                    "LifecycleState",
                    "lifecycleState",
                    INSTANCE_POOL_LIFECYCLE_STATE,
                ),
                FieldDescriptor::string("AvailabilityDomains", "availabilityDomains").list(),
                FieldDescriptor::integer("Size", "size"),
                FieldDescriptor::time("TimeCreated", "timeCreated"),
                defined_tags(),
                FieldDescriptor::string("DisplayName", "displayName").optional(),
                freeform_tags(),
            ]),
        )
        .with_model(
            ModelDef::new("UpdateInstancePoolDetails").fields([
                defined_tags(),
                FieldDescriptor::string("DisplayName", "displayName").optional(),
                freeform_tags(),
                FieldDescriptor::string("InstanceConfigurationId", "instanceConfigurationId")
                    .optional(),
                FieldDescriptor::model(
                    "PlacementConfigurations",
                    "placementConfigurations",
                    "InstancePoolPlacementConfiguration",
                )
                .list()
                .optional(),
                FieldDescriptor::integer("Size", "size").optional(),
            ]),
        )
        .with_request(
            RequestDef::new("GetInstancePoolRequest")
                .field(pool_id())
                .field(RequestDef::opc_request_id()),
        )
        .with_response(
            ResponseDef::new("GetInstancePoolResponse", ResponseBody::Record("InstancePool".into()))
                .header(HeaderField::etag())
                .header(HeaderField::request_id()),
        )
        .with_operation(Operation::new(
            "GetInstancePool",
            RestMethod::Get,
            "/instancePools/{instancePoolId}",
            "GetInstancePoolRequest",
            "GetInstancePoolResponse",
        ))
        .with_request(
            RequestDef::new("UpdateInstancePoolRequest")
                .field(pool_id())
                .field(FieldDescriptor::model(
                    "UpdateInstancePoolDetails",
                    "updateInstancePoolDetails",
                    "UpdateInstancePoolDetails",
                ))
                .field(RequestDef::opc_retry_token())
                .field(RequestDef::if_match())
                .field(RequestDef::opc_request_id()),
        )
        .with_response(
            ResponseDef::new(
                "UpdateInstancePoolResponse",
                ResponseBody::Record("InstancePool".into()),
            )
            .header(HeaderField::etag())
            .header(HeaderField::request_id()),
        )
        .with_operation(
            Operation::new(
                "UpdateInstancePool",
                RestMethod::Put,
                "/instancePools/{instancePoolId}",
                "UpdateInstancePoolRequest",
                "UpdateInstancePoolResponse",
            )
            .with_description("Updates the specified instance pool"),
        )
        .with_list(
            ListTemplate::new("ListInstancePools", "/instancePools", "InstancePoolSummary")
                .sort_by(["TIMECREATED", "DISPLAYNAME"])
                .scope(compartment_scope())
                .filter(display_name_filter())
                .filter(lifecycle_filter(INSTANCE_POOL_LIFECYCLE_STATE)),
        )
}

fn pool_id() -> FieldDescriptor {
    FieldDescriptor::string("InstancePoolId", "instancePoolId").in_path()
}
