//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use qrmenu_app::admin::AdminCapability;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_admin(&mut self, admin: AdminCapability);

    /// Capability placed by the admin middleware.
    fn admin_or_401(&self) -> Result<AdminCapability, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_admin(&mut self, admin: AdminCapability) {
        self.inject(admin);
    }

    fn admin_or_401(&self) -> Result<AdminCapability, StatusError> {
        self.obtain::<AdminCapability>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Oturum geçersiz."))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn admin_round_trips_through_depot() {
        let mut depot = Depot::new();
        let admin = AdminCapability::new(Uuid::nil());

        depot.insert_admin(admin);

        assert_eq!(depot.admin_or_401().ok(), Some(admin));
    }

    #[test]
    fn missing_admin_is_unauthorized() {
        let depot = Depot::new();

        let error = depot.admin_or_401().err();

        assert_eq!(error.map(|e| e.code), Some(salvo::http::StatusCode::UNAUTHORIZED));
    }
}
