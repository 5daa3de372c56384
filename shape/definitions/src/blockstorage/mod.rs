//! Block storage: boot volume replicas.
//!
//! ## Operations
//!
//! - `ListBootVolumeReplicas` - GET /bootVolumeReplicas
//! - `GetBootVolumeReplica` - GET /bootVolumeReplicas/{bootVolumeReplicaId}

use shape_define::{
    Catalog, EnumDef, FieldDescriptor, HeaderField, ListTemplate, ModelDef, Operation, RequestDef,
    ResponseBody, ResponseDef, RestMethod,
};

use crate::common::{defined_tags, display_name_filter, freeform_tags, lifecycle_filter};

/// Lifecycle states of a boot volume replica.
pub const BOOT_VOLUME_REPLICA_LIFECYCLE_STATE: &str = "BootVolumeReplicaLifecycleState";

/// Creates the block storage catalog.
///
/// ## Examples
///
/// ```
/// use shape_definitions::blockstorage;
///
/// let catalog = blockstorage::catalog();
/// assert_eq!(catalog.lists[0].id, "ListBootVolumeReplicas");
/// ```
pub fn catalog() -> Catalog {
    Catalog::new("blockstorage")
        .with_enum(
            EnumDef::new(
                BOOT_VOLUME_REPLICA_LIFECYCLE_STATE,
                ["PROVISIONING", "AVAILABLE", "ACTIVATING", "TERMINATING", "TERMINATED", "FAULTY"],
            )
            .with_description("The current state of a boot volume replica"),
        )
        .with_model(boot_volume_replica())
        .with_list(
            ListTemplate::new("ListBootVolumeReplicas", "/bootVolumeReplicas", "BootVolumeReplica")
                .sort_by(["TIMECREATED", "DISPLAYNAME"])
                .scope(
                    FieldDescriptor::string("AvailabilityDomain", "availabilityDomain")
                        .optional()
                        .in_query(),
                )
                .scope(
                    FieldDescriptor::string("CompartmentId", "compartmentId")
                        .optional()
                        .in_query(),
                )
                .filter(display_name_filter())
                .filter(lifecycle_filter(BOOT_VOLUME_REPLICA_LIFECYCLE_STATE))
                .filter(
                    FieldDescriptor::string("VolumeGroupReplicaId", "volumeGroupReplicaId")
                        .optional()
                        .in_query(),
                )
                .with_description("Lists the boot volume replicas in the specified compartment and availability domain"),
        )
        .with_request(
            RequestDef::new("GetBootVolumeReplicaRequest")
                .field(FieldDescriptor::string("BootVolumeReplicaId", "bootVolumeReplicaId").in_path())
                .field(RequestDef::opc_request_id()),
        )
        .with_response(
            ResponseDef::new(
                "GetBootVolumeReplicaResponse",
                ResponseBody::Record("BootVolumeReplica".into()),
            )
            .header(HeaderField::etag())
            .header(HeaderField::request_id()),
        )
        .with_operation(
            Operation::new(
                "GetBootVolumeReplica",
                RestMethod::Get,
                "/bootVolumeReplicas/{bootVolumeReplicaId}",
                "GetBootVolumeReplicaRequest",
                "GetBootVolumeReplicaResponse",
            )
            .with_description("Gets information for the specified boot volume replica"),
        )
}

fn boot_volume_replica() -> ModelDef {
    ModelDef::new("BootVolumeReplica")
        .with_description("An asynchronous replica of a boot volume in another availability domain")
        .fields([
            FieldDescriptor::string("AvailabilityDomain", "availabilityDomain"),
            FieldDescriptor::string("BootVolumeId", "bootVolumeId"),
            FieldDescriptor::string("CompartmentId", "compartmentId"),
            FieldDescriptor::string("DisplayName", "displayName"),
            FieldDescriptor::string("Id", "id"),
            FieldDescriptor::enumeration(
                "LifecycleState",
                "lifecycleState",
                BOOT_VOLUME_REPLICA_LIFECYCLE_STATE,
            ),
            FieldDescriptor::integer("SizeInGBs", "sizeInGBs"),
            FieldDescriptor::time("TimeCreated", "timeCreated"),
            FieldDescriptor::time("TimeLastSynced", "timeLastSynced"),
            defined_tags(),
            freeform_tags(),
            FieldDescriptor::string("ImageId", "imageId").optional(),
            FieldDescriptor::integer("TotalDataTransferredInGBs", "totalDataTransferredInGBs").optional(),
            FieldDescriptor::string("VolumeGroupReplicaId", "volumeGroupReplicaId").optional(),
            FieldDescriptor::string("KmsKeyId", "kmsKeyId").optional(),
        ])
}
