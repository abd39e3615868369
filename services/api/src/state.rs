use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbAccountRepository, DbAirportRepository, DbAuditLogRepository, DbBookingRepository,
    DbEmployeeRepository, DbPaymentRepository, DbRideOptionRepository, DbRoleRepository,
    DbSessionRepository, DbVehicleRepository,
};
use crate::infra::gateway::DpoGateway;
use crate::infra::storage::S3Storage;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub storage: S3Storage,
    pub gateway: DpoGateway,
    pub payment_redirect_base_url: String,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn session_repo(&self) -> DbSessionRepository {
        DbSessionRepository {
            db: self.db.clone(),
        }
    }

    pub fn employee_repo(&self) -> DbEmployeeRepository {
        DbEmployeeRepository {
            db: self.db.clone(),
        }
    }

    pub fn role_repo(&self) -> DbRoleRepository {
        DbRoleRepository {
            db: self.db.clone(),
        }
    }

    pub fn airport_repo(&self) -> DbAirportRepository {
        DbAirportRepository {
            db: self.db.clone(),
        }
    }

    pub fn ride_option_repo(&self) -> DbRideOptionRepository {
        DbRideOptionRepository {
            db: self.db.clone(),
        }
    }

    pub fn vehicle_repo(&self) -> DbVehicleRepository {
        DbVehicleRepository {
            db: self.db.clone(),
        }
    }

    pub fn booking_repo(&self) -> DbBookingRepository {
        DbBookingRepository {
            db: self.db.clone(),
        }
    }

    pub fn payment_repo(&self) -> DbPaymentRepository {
        DbPaymentRepository {
            db: self.db.clone(),
        }
    }

    pub fn audit_repo(&self) -> DbAuditLogRepository {
        DbAuditLogRepository {
            db: self.db.clone(),
        }
    }
}
