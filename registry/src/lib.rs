use std::sync::Arc;

use adapter::redis::RedisClient;
use adapter::repository::{
    access::AccessRecordRepositoryImpl, auth::AuthRepositoryImpl,
    health::HealthCheckRepositoryImpl, report::ReportRepositoryImpl, space::SpaceRepositoryImpl,
    student::StudentRepositoryImpl, usage::UsageRepositoryImpl, user::UserRepositoryImpl,
};
use adapter::database::ConnectionPool;
use kernel::repository::{
    access::AccessRecordRepository, auth::AuthRepository, health::HealthCheckRepository,
    report::ReportRepository, space::SpaceRepository, student::StudentRepository,
    usage::UsageRepository, user::UserRepository,
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    space_repository: Arc<dyn SpaceRepository>,
    student_repository: Arc<dyn StudentRepository>,
    access_record_repository: Arc<dyn AccessRecordRepository>,
    report_repository: Arc<dyn ReportRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    user_repository: Arc<dyn UserRepository>,
    usage_repository: Arc<dyn UsageRepository>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let space_repository = Arc::new(SpaceRepositoryImpl::new(pool.clone()));
        let student_repository = Arc::new(StudentRepositoryImpl::new(pool.clone()));
        let access_record_repository = Arc::new(AccessRecordRepositoryImpl::new(pool.clone()));
        let report_repository = Arc::new(ReportRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let usage_repository = Arc::new(UsageRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            space_repository,
            student_repository,
            access_record_repository,
            report_repository,
            auth_repository,
            user_repository,
            usage_repository,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn space_repository(&self) -> Arc<dyn SpaceRepository> {
        self.space_repository.clone()
    }

    pub fn student_repository(&self) -> Arc<dyn StudentRepository> {
        self.student_repository.clone()
    }

    pub fn access_record_repository(&self) -> Arc<dyn AccessRecordRepository> {
        self.access_record_repository.clone()
    }

    pub fn report_repository(&self) -> Arc<dyn ReportRepository> {
        self.report_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn usage_repository(&self) -> Arc<dyn UsageRepository> {
        self.usage_repository.clone()
    }
}
