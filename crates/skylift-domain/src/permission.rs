//! The permission catalog.
//!
//! Permissions form a closed set. Storage and wire traffic carry the catalog
//! string (e.g. `"view employee"`); everything past the boundary works with
//! the enum, so an unknown string can only be rejected at parse time, never
//! at check time.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One grantable action on one resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    ViewEmployee,
    CreateEmployee,
    EditEmployee,
    DeleteEmployee,
    ViewEmployeeRole,
    CreateEmployeeRole,
    EditEmployeeRole,
    DeleteEmployeeRole,
    ViewVehicle,
    CreateVehicle,
    EditVehicle,
    DeleteVehicle,
    ViewAirport,
    CreateAirport,
    EditAirport,
    DeleteAirport,
    ViewCustomer,
    EditCustomer,
    ViewAuditLogs,
}

impl Permission {
    /// The full catalog, grouped by resource.
    pub const ALL: &'static [Permission] = &[
        Permission::ViewEmployee,
        Permission::CreateEmployee,
        Permission::EditEmployee,
        Permission::DeleteEmployee,
        Permission::ViewEmployeeRole,
        Permission::CreateEmployeeRole,
        Permission::EditEmployeeRole,
        Permission::DeleteEmployeeRole,
        Permission::ViewVehicle,
        Permission::CreateVehicle,
        Permission::EditVehicle,
        Permission::DeleteVehicle,
        Permission::ViewAirport,
        Permission::CreateAirport,
        Permission::EditAirport,
        Permission::DeleteAirport,
        Permission::ViewCustomer,
        Permission::EditCustomer,
        Permission::ViewAuditLogs,
    ];

    /// Catalog string used in storage and over the wire.
    pub fn name(self) -> &'static str {
        match self {
            Permission::ViewEmployee => "view employee",
            Permission::CreateEmployee => "create employee",
            Permission::EditEmployee => "edit employee",
            Permission::DeleteEmployee => "delete employee",
            Permission::ViewEmployeeRole => "view employee role",
            Permission::CreateEmployeeRole => "create employee role",
            Permission::EditEmployeeRole => "edit employee role",
            Permission::DeleteEmployeeRole => "delete employee role",
            Permission::ViewVehicle => "view vehicle",
            Permission::CreateVehicle => "create vehicle",
            Permission::EditVehicle => "edit vehicle",
            Permission::DeleteVehicle => "delete vehicle",
            Permission::ViewAirport => "view airport",
            Permission::CreateAirport => "create airport",
            Permission::EditAirport => "edit airport",
            Permission::DeleteAirport => "delete airport",
            Permission::ViewCustomer => "view customer",
            Permission::EditCustomer => "edit customer",
            Permission::ViewAuditLogs => "view audit logs",
        }
    }

    /// Parse a catalog string. Returns `None` for anything outside the
    /// catalog.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.name() == name)
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Permission::from_name(&raw)
            .ok_or_else(|| D::Error::custom(format!("unknown permission: {raw}")))
    }
}

/// Raised when a submitted permission string is outside the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission: {0}")]
pub struct UnknownPermission(pub String);

/// Parse a list of submitted catalog strings, preserving order.
///
/// Fails on the first string outside the catalog; role creation and update
/// go through here so invalid permissions never reach storage.
pub fn parse_permissions(raw: &[String]) -> Result<Vec<Permission>, UnknownPermission> {
    raw.iter()
        .map(|s| Permission::from_name(s).ok_or_else(|| UnknownPermission(s.clone())))
        .collect()
}
