//! Shared fixtures for unit tests.

use std::cell::RefCell;

use serde_json::{Value, json};

use crate::domain::config::{ConfigDocument, PayerConfiguration};
use crate::domain::validation::ValidatedConfig;
use crate::domain::{AppError, ArtifactDescriptor};
use crate::ports::{ArtifactSink, WritePolicy};

/// Attachments enabled, appeals disabled, one https endpoint, dev environment.
pub fn sample_value() -> Value {
    json!({
        "payerId": "MCO001",
        "payerName": "Example Community Health Plan",
        "organizationName": "Example Health Holdings",
        "contact": { "name": "Integration Team", "email": "integration@example.org" },
        "modules": {
            "attachments": {
                "enabled": true,
                "sftp": {
                    "host": "sftp.example.org",
                    "username": "mco001-edi",
                    "inboundFolder": "/inbound/275",
                    "outboundFolder": "/outbound/277"
                },
                "claimSystemEndpoint": "https://api.example.org/v1"
            },
            "appeals": { "enabled": false }
        },
        "infrastructure": {
            "region": "eastus",
            "environment": "dev"
        },
        "monitoring": {
            "logRetentionDays": 90,
            "alertEmails": ["ops@example.org"]
        }
    })
}

/// Every module enabled with every optional workflow switched on.
pub fn full_value() -> Value {
    let mut value = sample_value();
    value["modules"] = json!({
        "attachments": {
            "enabled": true,
            "sftp": {
                "host": "sftp.example.org",
                "username": "mco001-edi",
                "inboundFolder": "/inbound/275",
                "outboundFolder": "/outbound/277"
            },
            "claimSystemEndpoint": "https://api.example.org/v1",
            "rfaiEnabled": true
        },
        "authorizations": {
            "enabled": true,
            "x12Version": "005010X217",
            "endpoint": "https://auth.example.org/x12"
        },
        "appeals": {
            "enabled": true,
            "endpoint": "https://appeals.example.org/api",
            "requestTypes": ["standard", "expedited"],
            "subStatusEnabled": true,
            "documentUploadEnabled": true
        },
        "ecs": {
            "enabled": true,
            "queryMethods": ["serviceDate", "memberId", "claimHistory"],
            "endpoint": "https://ecs.example.org/v2"
        }
    });
    value
}

pub fn sample_document() -> ConfigDocument {
    ConfigDocument::from_value(sample_value()).expect("sample document")
}

pub fn sample_config() -> PayerConfiguration {
    PayerConfiguration::from_document(&sample_document()).expect("sample config")
}

pub fn validated(value: Value) -> ValidatedConfig {
    let document = ConfigDocument::from_value(value).expect("document");
    ValidatedConfig::load(document).expect("valid configuration")
}

/// Sink that keeps committed artifacts in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    committed: RefCell<Vec<ArtifactDescriptor>>,
}

impl MemorySink {
    pub fn committed(&self) -> Vec<ArtifactDescriptor> {
        self.committed.borrow().clone()
    }
}

impl ArtifactSink for MemorySink {
    fn commit(&self, artifacts: &[ArtifactDescriptor], _policy: WritePolicy) -> Result<(), AppError> {
        self.committed.borrow_mut().extend_from_slice(artifacts);
        Ok(())
    }
}
