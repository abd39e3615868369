//! Employee account kinds.

use serde::{Deserialize, Serialize};

/// What kind of staff member an employee account represents. Admins manage
/// the fleet and bookings from the dashboard; drivers and riders work trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeType {
    Admin,
    Driver,
    Rider,
}

impl EmployeeType {
    pub fn as_str(self) -> &'static str {
        match self {
            EmployeeType::Admin => "admin",
            EmployeeType::Driver => "driver",
            EmployeeType::Rider => "rider",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(EmployeeType::Admin),
            "driver" => Some(EmployeeType::Driver),
            "rider" => Some(EmployeeType::Rider),
            _ => None,
        }
    }
}

impl std::fmt::Display for EmployeeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
