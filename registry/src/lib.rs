use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::repository::{
    health::HealthCheckRepositoryImpl, memory::InMemoryStore,
    reservation::ReservationRepositoryImpl, space::SpaceRepositoryImpl,
};
use kernel::admission::ReservationAdmission;
use kernel::repository::{
    health::HealthCheckRepository, reservation::ReservationRepository, space::SpaceRepository,
};
use shared::config::AdmissionConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    space_repository: Arc<dyn SpaceRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    reservation_admission: Arc<ReservationAdmission>,
}

impl AppRegistry {
    // PostgreSQL をストアとして使う
    pub fn new(pool: ConnectionPool, admission: AdmissionConfig) -> Self {
        Self::from_repositories(
            Arc::new(HealthCheckRepositoryImpl::new(pool.clone())),
            Arc::new(SpaceRepositoryImpl::new(pool.clone())),
            Arc::new(ReservationRepositoryImpl::new(pool)),
            admission,
        )
    }

    // プロセス内メモリをストアとして使う
    pub fn in_memory(admission: AdmissionConfig) -> Self {
        let store = InMemoryStore::new();
        Self::from_repositories(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
            admission,
        )
    }

    // 任意のリポジトリ実装を組み合わせる
    pub fn from_repositories(
        health_check_repository: Arc<dyn HealthCheckRepository>,
        space_repository: Arc<dyn SpaceRepository>,
        reservation_repository: Arc<dyn ReservationRepository>,
        admission: AdmissionConfig,
    ) -> Self {
        // 受付フローはカタログ・台帳と同じインスタンスを共有する
        let reservation_admission = Arc::new(ReservationAdmission::new(
            space_repository.clone(),
            reservation_repository.clone(),
            admission.mode,
        ));
        Self {
            health_check_repository,
            space_repository,
            reservation_repository,
            reservation_admission,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn space_repository(&self) -> Arc<dyn SpaceRepository> {
        self.space_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn reservation_admission(&self) -> Arc<ReservationAdmission> {
        self.reservation_admission.clone()
    }
}
