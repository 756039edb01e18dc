use anyhow::Result;
use fundraiser_registry::utils::validation::Validate;
use fundraiser_registry::{RegistryConfig, RegistryError};
use std::io::Write;
use tempfile::NamedTempFile;

fn seeded_config(count: usize) -> String {
    let mut content = String::from(
        r#"
[registry]
authority = "${FUNDRAISER_IT_AUTHORITY}"
"#,
    );
    for i in 0..count {
        content.push_str(&format!(
            r#"
[[fundraisers]]
name = "Beneficiary {i}"
url = "beneficiary{i}.com"
image_url = "beneficiary{i}.png"
description = "Description for Beneficiary {i}"
beneficiary = "0xbeneficiary"
"#
        ));
    }
    content
}

#[test]
fn test_seeded_registry_from_file() -> Result<()> {
    std::env::set_var("FUNDRAISER_IT_AUTHORITY", "0xfactory");

    let mut temp_file = NamedTempFile::new()?;
    temp_file.write_all(seeded_config(25).as_bytes())?;

    let config = RegistryConfig::from_file(temp_file.path())?;
    config.validate()?;
    let registry = config.build_registry()?;

    assert_eq!(registry.fundraisers_count(), 25);
    assert_eq!(registry.authority().as_str(), "0xfactory");

    let page = registry.fundraisers(30, 10);
    assert_eq!(page.len(), 15);
    assert_eq!(page[0].name(), "Beneficiary 10");
    assert_eq!(page[14].name(), "Beneficiary 24");
    assert!(page.iter().all(|f| f.custodian().as_str() == "0xfactory"));

    std::env::remove_var("FUNDRAISER_IT_AUTHORITY");
    Ok(())
}

#[test]
fn test_invalid_seed_is_rejected_by_registry() -> Result<()> {
    let config = RegistryConfig::from_toml_str(
        r#"
[[fundraisers]]
name = "Beneficiary 0"
url = "beneficiary0.com"
image_url = "beneficiary0.png"
description = "Description for Beneficiary 0"
beneficiary = " "
"#,
    )?;

    assert!(config.validate().is_err());
    match config.build_registry() {
        Err(RegistryError::InvalidInput { field, .. }) => assert_eq!(field, "beneficiary"),
        other => panic!("expected InvalidInput, got {:?}", other.map(|r| r.fundraisers_count())),
    }
    Ok(())
}
