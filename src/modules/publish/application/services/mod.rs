mod deployment_quota;
mod publish_service;

pub use deployment_quota::{daily_limit_from, DeploymentQuota, DEFAULT_DAILY_DEPLOY_LIMIT};
pub use publish_service::{PublishService, PUBLISH_STEP_TIMEOUT};
