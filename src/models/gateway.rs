use crate::types::{GatewayId, Region};

/// A regional server cluster. The set is stable, so the listing is a static
/// table; the only live datum (online users) comes from the gateway
/// endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gateway {
    pub id: GatewayId,
    pub name: &'static str,
    pub region: Region,
}

const KNOWN_GATEWAYS: [Gateway; 5] = [
    Gateway { id: 10, name: "U.S. West", region: Region::UsWest },
    Gateway { id: 11, name: "U.S. East", region: Region::UsEast },
    Gateway { id: 20, name: "Europe", region: Region::Europe },
    Gateway { id: 30, name: "Korea", region: Region::Korea },
    Gateway { id: 45, name: "Asia", region: Region::Asia },
];

#[must_use]
pub fn known_gateways() -> &'static [Gateway] {
    &KNOWN_GATEWAYS
}
