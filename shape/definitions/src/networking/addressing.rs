//! Bring-your-own IP ranges and autonomous system numbers.

use shape_define::{Catalog, EnumDef, FieldDescriptor, ListTemplate, ModelDef};

use crate::common::{
    compartment_scope, defined_tags, display_name_filter, freeform_tags, lifecycle_filter,
};

const BYOIP_STATE: &str = "ByoipRangeLifecycleState";
const BYOIP_DETAILS: &str = "ByoipRangeLifecycleDetails";
const BYOASN_STATE: &str = "ByoasnLifecycleState";

pub(super) fn catalog() -> Catalog {
    Catalog::new("addressing")
        .with_enum(EnumDef::new(
            BYOIP_STATE,
            ["INACTIVE", "UPDATING", "ACTIVE", "DELETING", "DELETED"],
        ))
        .with_enum(EnumDef::new(
            BYOIP_DETAILS,
            [
                "CREATING",
                "VALIDATING",
                "PROVISIONED",
                "ACTIVE",
                "FAILED",
                "DELETING",
                "DELETED",
                "ADVERTISING",
                "WITHDRAWING",
            ],
        ))
        .with_enum(EnumDef::new(
            BYOASN_STATE,
            ["CREATING", "ACTIVE", "UPDATING", "DELETING", "DELETED", "FAILED"],
        ))
        .with_model(
            ModelDef::new("ByoipRangeSummary")
                .with_description("A customer-owned public IP address range imported into the cloud")
                .fields([
                    FieldDescriptor::string("CidrBlock", "cidrBlock").optional(),
                    FieldDescriptor::string("CompartmentId", "compartmentId").optional(),
                    defined_tags(),
                    FieldDescriptor::string("DisplayName", "displayName").optional(),
                    freeform_tags(),
                    FieldDescriptor::string("Id", "id").optional(),
                    FieldDescriptor::string("Ipv6CidrBlock", "ipv6CidrBlock").optional(),
                    FieldDescriptor::enumeration("LifecycleState", "lifecycleState", BYOIP_STATE)
                        .optional(),
                    FieldDescriptor::enumeration(
                        "LifecycleDetails",
                        "lifecycleDetails",
                        BYOIP_DETAILS,
                    )
                    .optional(),
                    FieldDescriptor::time("TimeCreated", "timeCreated").optional(),
                ]),
        )
        .with_model(collection("ByoipRangeCollection", "ByoipRangeSummary"))
        .with_list(
            ListTemplate::new("ListByoipRanges", "/byoipRanges", "ByoipRangeSummary")
                .in_collection("ByoipRangeCollection")
                .sort_by(["TIMECREATED", "DISPLAYNAME"])
                .scope(compartment_scope())
                .filter(display_name_filter())
                .filter(
                    FieldDescriptor::string("LifecycleState", "lifecycleState")
                        .optional()
                        .in_query(),
                ),
        )
        .with_model(
            ModelDef::new("ByoasnSummary").fields([
                FieldDescriptor::string("Id", "id"),
                FieldDescriptor::integer("Asn", "asn"),
                FieldDescriptor::string("CompartmentId", "compartmentId"),
                FieldDescriptor::string("DisplayName", "displayName"),
                FieldDescriptor::time("TimeCreated", "timeCreated"),
                FieldDescriptor::enumeration("LifecycleState", "lifecycleState", BYOASN_STATE),
                FieldDescriptor::time("TimeValidated", "timeValidated").optional(),
                FieldDescriptor::time("TimeUpdated", "timeUpdated").optional(),
                FieldDescriptor::string("ValidationToken", "validationToken").optional(),
                freeform_tags(),
                defined_tags(),
            ]),
        )
        .with_model(collection("ByoasnCollection", "ByoasnSummary"))
        .with_list(
            ListTemplate::new("ListByoasns", "/byoasns", "ByoasnSummary")
                .in_collection("ByoasnCollection")
                .sort_by(["TIMECREATED", "DISPLAYNAME"])
                .scope(compartment_scope())
                .filter(display_name_filter())
                .filter(lifecycle_filter(BYOASN_STATE)),
        )
}

fn collection(name: &str, item: &str) -> ModelDef {
    ModelDef::new(name).field(FieldDescriptor::model("Items", "items", item).list())
}
