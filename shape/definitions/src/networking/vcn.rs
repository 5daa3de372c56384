//! VCNs, network security groups and their security rules.

use shape_define::{Catalog, EnumDef, FieldDescriptor, ListTemplate, ModelDef};

use crate::common::{
    compartment_scope, defined_tags, display_name_filter, freeform_tags, lifecycle_filter,
};

const VCN_STATE: &str = "VcnLifecycleState";
const NSG_STATE: &str = "NetworkSecurityGroupLifecycleState";

pub(super) fn catalog() -> Catalog {
    Catalog::new("vcn")
        .with_enum(EnumDef::new(
            VCN_STATE,
            ["PROVISIONING", "AVAILABLE", "TERMINATING", "TERMINATED", "UPDATING"],
        ))
        .with_enum(EnumDef::new(
            NSG_STATE,
            ["PROVISIONING", "AVAILABLE", "TERMINATING", "TERMINATED", "UPDATING"],
        ))
        .with_enum(EnumDef::new("SecurityRuleDirection", ["EGRESS", "INGRESS"]))
        .with_enum(EnumDef::new(
            "SecurityRuleDestinationType",
            ["CIDR_BLOCK", "SERVICE_CIDR_BLOCK", "NETWORK_SECURITY_GROUP"],
        ))
        .with_enum(EnumDef::new(
            "SecurityRuleSourceType",
            ["CIDR_BLOCK", "SERVICE_CIDR_BLOCK", "NETWORK_SECURITY_GROUP"],
        ))
        .with_enum(EnumDef::new(
            "ListNetworkSecurityGroupSecurityRulesDirection",
            ["EGRESS", "INGRESS"],
        ))
        .with_model(vcn())
        .with_model(network_security_group())
        .with_model(
            ModelDef::new("PortRange")
                .field(FieldDescriptor::integer("Max", "max"))
                .field(FieldDescriptor::integer("Min", "min")),
        )
        .with_model(
            ModelDef::new("IcmpOptions")
                .field(FieldDescriptor::integer("Type", "type"))
                .field(FieldDescriptor::integer("Code", "code").optional()),
        )
        .with_model(port_options("TcpOptions"))
        .with_model(port_options("UdpOptions"))
        .with_model(security_rule())
        .with_list(
            ListTemplate::new("ListVcns", "/vcns", "Vcn")
                .sort_by(["TIMECREATED", "DISPLAYNAME"])
                .scope(compartment_scope())
                .filter(display_name_filter())
                .filter(lifecycle_filter(VCN_STATE))
                .with_description("Lists the virtual cloud networks in the specified compartment"),
        )
        .with_list(
            ListTemplate::new(
                "ListNetworkSecurityGroups",
                "/networkSecurityGroups",
                "NetworkSecurityGroup",
            )
            .sort_by(["TIMECREATED", "DISPLAYNAME"])
            .scope(FieldDescriptor::string("CompartmentId", "compartmentId").optional().in_query())
            .scope(FieldDescriptor::string("VlanId", "vlanId").optional().in_query())
            .scope(FieldDescriptor::string("VcnId", "vcnId").optional().in_query())
            .filter(display_name_filter())
            .filter(lifecycle_filter(NSG_STATE)),
        )
        .with_list(
            ListTemplate::new(
                "ListNetworkSecurityGroupSecurityRules",
                "/networkSecurityGroups/{networkSecurityGroupId}/securityRules",
                "SecurityRule",
            )
            .sort_by(["TIMECREATED"])
            .scope(
                FieldDescriptor::string("NetworkSecurityGroupId", "networkSecurityGroupId").in_path(),
            )
            .scope(
                FieldDescriptor::enumeration(
                    "Direction",
                    "direction",
                    "ListNetworkSecurityGroupSecurityRulesDirection",
                )
                .optional()
                .in_query()
                .omit_empty(),
            )
            .with_description("Lists the security rules in the specified network security group"),
        )
}

fn vcn() -> ModelDef {
    ModelDef::new("Vcn")
        .with_description("A virtual cloud network")
        .fields([
            FieldDescriptor::string("CidrBlock", "cidrBlock"),
            FieldDescriptor::string("CidrBlocks", "cidrBlocks").list(),
            FieldDescriptor::string("CompartmentId", "compartmentId"),
            FieldDescriptor::string("Id", "id"),
            FieldDescriptor::enumeration("LifecycleState", "lifecycleState", VCN_STATE),
            FieldDescriptor::string("Byoipv6CidrBlocks", "byoipv6CidrBlocks")
                .list()
                .optional(),
            FieldDescriptor::string("DefaultDhcpOptionsId", "defaultDhcpOptionsId").optional(),
            FieldDescriptor::string("DefaultRouteTableId", "defaultRouteTableId").optional(),
            FieldDescriptor::string("DefaultSecurityListId", "defaultSecurityListId").optional(),
            defined_tags(),
            FieldDescriptor::string("DisplayName", "displayName").optional(),
            FieldDescriptor::string("DnsLabel", "dnsLabel").optional(),
            freeform_tags(),
            FieldDescriptor::string("Ipv6CidrBlocks", "ipv6CidrBlocks")
                .list()
                .optional(),
            FieldDescriptor::time("TimeCreated", "timeCreated").optional(),
            FieldDescriptor::string("VcnDomainName", "vcnDomainName").optional(),
        ])
}

fn network_security_group() -> ModelDef {
    ModelDef::new("NetworkSecurityGroup").fields([
        FieldDescriptor::string("CompartmentId", "compartmentId"),
        FieldDescriptor::string("Id", "id"),
        FieldDescriptor::enumeration("LifecycleState", "lifecycleState", NSG_STATE),
        FieldDescriptor::time("TimeCreated", "timeCreated"),
        FieldDescriptor::string("VcnId", "vcnId"),
        defined_tags(),
        FieldDescriptor::string("DisplayName", "displayName").optional(),
        freeform_tags(),
    ])
}

fn port_options(name: &str) -> ModelDef {
    ModelDef::new(name)
        .field(FieldDescriptor::model("DestinationPortRange", "destinationPortRange", "PortRange").optional())
        .field(FieldDescriptor::model("SourcePortRange", "sourcePortRange", "PortRange").optional())
}

fn security_rule() -> ModelDef {
    ModelDef::new("SecurityRule")
        .with_description("A security rule in a network security group")
        .fields([
            FieldDescriptor::enumeration("Direction", "direction", "SecurityRuleDirection"),
            FieldDescriptor::string("Protocol", "protocol"),
            FieldDescriptor::string("Description", "description").optional(),
            FieldDescriptor::string("Destination", "destination").optional(),
            FieldDescriptor::enumeration(
                "DestinationType",
                "destinationType",
                "SecurityRuleDestinationType",
            )
            .optional(),
            FieldDescriptor::model("IcmpOptions", "icmpOptions", "IcmpOptions").optional(),
            FieldDescriptor::string("Id", "id").optional(),
            FieldDescriptor::boolean("IsStateless", "isStateless").optional(),
            FieldDescriptor::boolean("IsValid", "isValid").optional(),
            FieldDescriptor::string("Source", "source").optional(),
            FieldDescriptor::enumeration("SourceType", "sourceType", "SecurityRuleSourceType")
                .optional(),
            FieldDescriptor::model("TcpOptions", "tcpOptions", "TcpOptions").optional(),
            FieldDescriptor::time("TimeCreated", "timeCreated").optional(),
            FieldDescriptor::model("UdpOptions", "udpOptions", "UdpOptions").optional(),
        ])
}
