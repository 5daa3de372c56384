//! Networking: VCNs, security groups, gateways, addressing and connectivity.
//!
//! ## Operations
//!
//! - `ListVcns` - GET /vcns
//! - `ListNetworkSecurityGroups` - GET /networkSecurityGroups
//! - `ListNetworkSecurityGroupSecurityRules` - GET /networkSecurityGroups/{networkSecurityGroupId}/securityRules
//! - `GetNatGateway`, `CreateNatGateway`, `DeleteNatGateway`, `ListNatGateways`
//! - `ListDrgRouteTables` - GET /drgRouteTables
//! - `ListIPSecConnectionTunnelRoutes` - GET /ipsecConnections/{ipscId}/tunnels/{tunnelId}/routes
//! - `ListByoipRanges`, `ListByoasns` (collection bodies)
//! - `GetCrossConnectGroup`, `ListCrossConnectGroups`

mod addressing;
mod connectivity;
mod gateways;
mod vcn;

use shape_define::Catalog;

/// Creates the networking catalog.
///
/// ## Examples
///
/// ```
/// use shape_definitions::networking;
///
/// let mut catalog = networking::catalog();
/// catalog.expand();
/// assert!(catalog.operations.iter().any(|op| op.id == "CreateNatGateway"));
/// ```
pub fn catalog() -> Catalog {
    Catalog::new("networking")
        .with_catalog(vcn::catalog())
        .with_catalog(gateways::catalog())
        .with_catalog(addressing::catalog())
        .with_catalog(connectivity::catalog())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape_define::{FieldType, RestMethod, WireLocation};

    fn expanded() -> Catalog {
        let mut catalog = catalog();
        catalog.expand();
        catalog
    }

    #[test]
    fn create_nat_gateway_uses_retry_token() {
        let catalog = expanded();
        let request = catalog
            .requests
            .iter()
            .find(|r| r.name == "CreateNatGatewayRequest")
            .unwrap();
        let headers: Vec<_> = request
            .fields_at(WireLocation::Header)
            .map(|f| f.wire_name.as_str())
            .collect();
        assert_eq!(headers, vec!["opc-retry-token", "opc-request-id"]);
        assert!(request.has_body());
    }

    #[test]
    fn delete_nat_gateway_is_conditional() {
        let catalog = expanded();
        let op = catalog
            .operations
            .iter()
            .find(|op| op.id == "DeleteNatGateway")
            .unwrap();
        assert_eq!(op.method, RestMethod::Delete);
        assert_eq!(op.path_params(), vec!["natGatewayId"]);

        let request = catalog.requests.iter().find(|r| r.name == op.request).unwrap();
        assert!(request.fields.iter().any(|f| f.wire_name == "if-match"));
    }

    #[test]
    fn tunnel_routes_have_two_path_parameters() {
        let catalog = expanded();
        let op = catalog
            .operations
            .iter()
            .find(|op| op.id == "ListIPSecConnectionTunnelRoutes")
            .unwrap();
        assert_eq!(op.path_params(), vec!["ipscId", "tunnelId"]);
    }

    #[test]
    fn security_rule_direction_filter_precedes_paging() {
        let catalog = expanded();
        let request = catalog
            .requests
            .iter()
            .find(|r| r.name == "ListNetworkSecurityGroupSecurityRulesRequest")
            .unwrap();
        let wires: Vec<_> = request.fields.iter().map(|f| f.wire_name.as_str()).collect();
        assert_eq!(
            wires,
            vec!["networkSecurityGroupId", "direction", "limit", "page", "opc-request-id", "sortBy", "sortOrder"]
        );
    }

    #[test]
    fn macsec_state_is_an_enum() {
        let catalog = expanded();
        let props = catalog
            .models
            .iter()
            .find(|m| m.name == "MacsecProperties")
            .unwrap();
        assert_eq!(
            props.find_field("state").unwrap().field_type,
            FieldType::Enum("MacsecState".into())
        );
    }

    #[test]
    fn every_enum_name_is_unique() {
        let catalog = expanded();
        let mut names: Vec<_> = catalog.enums.iter().map(|e| e.name.as_str()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
