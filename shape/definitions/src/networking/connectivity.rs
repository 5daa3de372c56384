//! FastConnect cross-connect groups and their MACsec settings.

use shape_define::{
    Catalog, EnumDef, FieldDescriptor, HeaderField, ListTemplate, ModelDef, Operation, RequestDef,
    ResponseBody, ResponseDef, RestMethod,
};

use crate::common::{compartment_scope, display_name_filter, lifecycle_filter};

const GROUP_STATE: &str = "CrossConnectGroupLifecycleState";

pub(super) fn catalog() -> Catalog {
    Catalog::new("connectivity")
        .with_enum(EnumDef::new(
            GROUP_STATE,
            ["PROVISIONING", "PROVISIONED", "INACTIVE", "TERMINATING", "TERMINATED"],
        ))
        .with_enum(
            EnumDef::new("MacsecState", ["ENABLED", "DISABLED"])
                .with_description("Whether MACsec is enabled on the link"),
        )
        .with_enum(EnumDef::new(
            "MacsecEncryptionCipher",
            ["AES128_GCM", "AES128_GCM_XPN", "AES256_GCM", "AES256_GCM_XPN"],
        ))
        .with_model(
            ModelDef::new("MacsecKey").fields([
                FieldDescriptor::string(
                    "ConnectivityAssociationNameSecretId",
                    "connectivityAssociationNameSecretId",
                ),
                FieldDescriptor::string(
                    "ConnectivityAssociationKeySecretId",
                    "connectivityAssociationKeySecretId",
                ),
                FieldDescriptor::integer(
                    "ConnectivityAssociationNameSecretVersion",
                    "connectivityAssociationNameSecretVersion",
                )
                .optional(),
                FieldDescriptor::integer(
                    "ConnectivityAssociationKeySecretVersion",
                    "connectivityAssociationKeySecretVersion",
                )
                .optional(),
            ]),
        )
        .with_model(
            ModelDef::new("MacsecProperties").fields([
                FieldDescriptor::enumeration("State", "state", "MacsecState"),
                FieldDescriptor::model("PrimaryKey", "primaryKey", "MacsecKey").optional(),
                FieldDescriptor::enumeration(
                    "EncryptionCipher",
                    "encryptionCipher",
                    "MacsecEncryptionCipher",
                )
                .optional(),
                FieldDescriptor::boolean(
                    "IsUnprotectedTrafficAllowed",
                    "isUnprotectedTrafficAllowed",
                )
                .optional(),
            ]),
        )
        .with_model(
            ModelDef::new("CrossConnectGroup")
                .with_description("A link aggregation group of cross-connects")
                .fields([
                    FieldDescriptor::string("Id", "id").optional(),
                    FieldDescriptor::string("CompartmentId", "compartmentId").optional(),
                    FieldDescriptor::string("DisplayName", "displayName").optional(),
                    FieldDescriptor::enumeration("LifecycleState", "lifecycleState", GROUP_STATE)
                        .optional(),
                    FieldDescriptor::string("CustomerReferenceName", "customerReferenceName")
                        .optional(),
                    FieldDescriptor::time("TimeCreated", "timeCreated").optional(),
                    FieldDescriptor::model("MacsecProperties", "macsecProperties", "MacsecProperties")
                        .optional(),
                    FieldDescriptor::string("OciPhysicalDeviceName", "ociPhysicalDeviceName")
                        .optional(),
                    FieldDescriptor::string("OciLogicalDeviceName", "ociLogicalDeviceName")
                        .optional(),
                ]),
        )
        .with_request(
            RequestDef::new("GetCrossConnectGroupRequest")
                .field(
                    FieldDescriptor::string("CrossConnectGroupId", "crossConnectGroupId").in_path(),
                )
                .field(RequestDef::opc_request_id()),
        )
        .with_response(
            ResponseDef::new(
                "GetCrossConnectGroupResponse",
                ResponseBody::Record("CrossConnectGroup".into()),
            )
            .header(HeaderField::etag())
            .header(HeaderField::request_id()),
        )
        .with_operation(Operation::new(
            "GetCrossConnectGroup",
            RestMethod::Get,
            "/crossConnectGroups/{crossConnectGroupId}",
            "GetCrossConnectGroupRequest",
            "GetCrossConnectGroupResponse",
        ))
        .with_list(
            ListTemplate::new("ListCrossConnectGroups", "/crossConnectGroups", "CrossConnectGroup")
                .sort_by(["TIMECREATED", "DISPLAYNAME"])
                .scope(compartment_scope())
                .filter(display_name_filter())
                .filter(lifecycle_filter(GROUP_STATE)),
        )
}
