use async_trait::async_trait;

#[mockall::automock]
#[async_trait]
pub trait HealthCheckRepository: Send + Sync {
    // ストアに接続できるかを確認する
    async fn check_db(&self) -> bool;
}
