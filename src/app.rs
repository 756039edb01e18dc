// Command dispatch shared by the binary and its tests.

use crate::config::{CliConfig, Command, RegistryConfig};
use crate::core::events::LogSink;
use crate::core::pagination::PageRequest;
use crate::core::registry::FundraiserRegistry;
use crate::domain::model::{Fundraiser, NewFundraiser};
use crate::utils::error::{ErrorSeverity, RegistryError, Result};
use crate::utils::validation::{validate_path, Validate};

pub fn load_config(cli: &CliConfig) -> Result<RegistryConfig> {
    let config = match &cli.config {
        Some(path) => {
            validate_path("--config", path)?;
            RegistryConfig::from_file(path)?
        }
        None => RegistryConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// 0 success, 1 invalid input or config, 2 not found, 3 system failure.
pub fn exit_code(error: &RegistryError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

/// Seeds a registry from `config`, runs the command and returns what should
/// be printed on stdout.
pub async fn run(cli: &CliConfig, config: &RegistryConfig) -> Result<String> {
    let registry = config.build_registry()?;
    registry.add_sink(LogSink);

    match &cli.command {
        Command::Count => Ok(registry.fundraisers_count().to_string()),
        Command::List { limit, offset } => {
            let request = PageRequest::from_signed(*limit, *offset)?;
            let page = registry.page(request);
            tracing::info!(
                "📋 {} of {} fundraisers (offset {})",
                page.len(),
                registry.fundraisers_count(),
                request.offset
            );
            let records: Vec<&Fundraiser> = page.iter().map(|f| f.as_ref()).collect();
            Ok(serde_json::to_string_pretty(&records)?)
        }
        Command::Show { index } => {
            let fundraiser = registry
                .fundraiser(*index)
                .ok_or(RegistryError::FundraiserNotFound { index: *index })?;
            Ok(serde_json::to_string_pretty(&*fundraiser)?)
        }
        cmd @ Command::Create { .. } => {
            let draft = cmd
                .draft()
                .ok_or_else(|| RegistryError::invalid_input("create", "No fundraiser arguments"))?;
            create(&registry, draft).await
        }
    }
}

async fn create(registry: &FundraiserRegistry, draft: NewFundraiser) -> Result<String> {
    let mut events = registry.subscribe();
    let index = registry.create_fundraiser(draft)?;

    // 事件在同一個寫鎖內送出，這裡一定已在通道中
    let event = events
        .recv()
        .await
        .ok_or(RegistryError::EventNotDelivered { index })?;
    tracing::info!(
        "✅ Fundraiser #{} created, registry now holds {}",
        index,
        registry.fundraisers_count()
    );
    Ok(serde_json::to_string_pretty(&event)?)
}
