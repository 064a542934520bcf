pub mod document;
pub mod infrastructure;
pub mod modules;
pub mod payer;

pub use document::ConfigDocument;
pub use infrastructure::{
    DeploymentEnvironment, InfrastructureConfig, LogicAppSku, MonitoringConfig, ServiceBusSku,
    StorageSku,
};
pub use modules::{
    AppealRequestType, AppealsConfig, AttachmentIntegrations, AttachmentsConfig,
    AuthorizationsConfig, EcsConfig, ModuleConfig, ModuleKind, ModuleSet, QueryMethod, SftpConfig,
    X12Version,
};
pub use payer::{Contact, PayerConfiguration};
