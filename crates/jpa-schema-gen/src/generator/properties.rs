//! Assembly of the property map consumed by the external generator.

use crate::config::{DatabaseConfig, ScriptAction};
use crate::error::Result;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Well-known property keys understood by the external generator.
pub mod keys {
    pub const TRANSACTION_TYPE: &str = "javax.persistence.transactionType";
    pub const JTA_DATA_SOURCE: &str = "javax.persistence.jtaDataSource";
    pub const NON_JTA_DATA_SOURCE: &str = "javax.persistence.nonJtaDataSource";
    pub const VALIDATION_MODE: &str = "javax.persistence.validation.mode";
    pub const JDBC_DRIVER: &str = "javax.persistence.jdbc.driver";
    pub const JDBC_URL: &str = "javax.persistence.jdbc.url";
    pub const JDBC_USER: &str = "javax.persistence.jdbc.user";
    pub const JDBC_PASSWORD: &str = "javax.persistence.jdbc.password";
    pub const DATABASE_PRODUCT_NAME: &str = "javax.persistence.database-product-name";
    pub const DATABASE_MAJOR_VERSION: &str = "javax.persistence.database-major-version";
    pub const DATABASE_MINOR_VERSION: &str = "javax.persistence.database-minor-version";
    pub const SCRIPTS_ACTION: &str = "javax.persistence.schema-generation.scripts.action";
    pub const SCRIPTS_DROP_TARGET: &str =
        "javax.persistence.schema-generation.scripts.drop-target";
    pub const SCRIPTS_CREATE_TARGET: &str =
        "javax.persistence.schema-generation.scripts.create-target";
    pub const STATEMENT_DELIMITER: &str = "hibernate.hbm2ddl.delimiter";
}

/// Insertion-ordered key/value configuration for one generation call.
///
/// Values may be explicitly null (`None`), which is distinct from the key
/// being absent. Built fresh per invocation and immutable once handed to
/// the invoker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GenerationProperties {
    entries: IndexMap<String, Option<String>>,
}

impl GenerationProperties {
    /// Value for `key`: `None` when absent, `Some(None)` when explicitly null.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries.get(key).map(|v| v.as_deref())
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Assemble the full property map for one generation call.
///
/// The generator requires *some* JDBC connection descriptor even when only
/// scripts are requested, so a throwaway in-memory bootstrap descriptor is
/// always supplied; no real database interaction occurs. Database hints are
/// passed through verbatim and not validated here - malformed hints surface
/// when the generator rejects them.
pub fn assemble(
    database: &DatabaseConfig,
    action: ScriptAction,
    drop_target: &Path,
    create_target: &Path,
    delimiter: Option<&str>,
) -> Result<GenerationProperties> {
    let mut entries: IndexMap<String, Option<String>> = IndexMap::new();
    let mut put = |key: &str, value: Option<String>| {
        entries.insert(key.to_string(), value);
    };

    put(keys::TRANSACTION_TYPE, Some("RESOURCE_LOCAL".to_string()));
    put(keys::JTA_DATA_SOURCE, None);
    put(keys::NON_JTA_DATA_SOURCE, None);
    put(keys::VALIDATION_MODE, Some("NONE".to_string()));

    // Throwaway bootstrap connection; never actually opened.
    put(keys::JDBC_DRIVER, Some("org.hsqldb.jdbcDriver".to_string()));
    put(keys::JDBC_URL, Some("jdbc:hsqldb:mem:testdb".to_string()));
    put(keys::JDBC_USER, Some(String::new()));
    put(keys::JDBC_PASSWORD, Some(String::new()));

    put(
        keys::DATABASE_PRODUCT_NAME,
        Some(database.product_name.clone()),
    );
    put(
        keys::DATABASE_MAJOR_VERSION,
        Some(database.major_version.clone()),
    );
    put(
        keys::DATABASE_MINOR_VERSION,
        Some(database.minor_version.clone()),
    );

    put(
        keys::SCRIPTS_ACTION,
        Some(action.as_property_value().to_string()),
    );
    put(
        keys::SCRIPTS_DROP_TARGET,
        Some(absolute(drop_target)?.display().to_string()),
    );
    put(
        keys::SCRIPTS_CREATE_TARGET,
        Some(absolute(create_target)?.display().to_string()),
    );

    if let Some(delimiter) = delimiter {
        put(keys::STATEMENT_DELIMITER, Some(delimiter.to_string()));
    }

    Ok(GenerationProperties { entries })
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database() -> DatabaseConfig {
        DatabaseConfig {
            product_name: "PostgreSQL".to_string(),
            major_version: "16".to_string(),
            minor_version: String::new(),
        }
    }

    fn props(delimiter: Option<&str>) -> GenerationProperties {
        assemble(
            &database(),
            ScriptAction::DropAndCreate,
            Path::new("/build/generated-schema/drop.sql"),
            Path::new("/build/generated-schema/create.sql"),
            delimiter,
        )
        .unwrap()
    }

    #[test]
    fn test_fixed_defaults() {
        let props = props(None);
        assert_eq!(
            props.get(keys::TRANSACTION_TYPE),
            Some(Some("RESOURCE_LOCAL"))
        );
        assert_eq!(props.get(keys::VALIDATION_MODE), Some(Some("NONE")));
        assert_eq!(props.get(keys::JDBC_DRIVER), Some(Some("org.hsqldb.jdbcDriver")));
        assert_eq!(props.get(keys::JDBC_URL), Some(Some("jdbc:hsqldb:mem:testdb")));
        assert_eq!(props.get(keys::JDBC_USER), Some(Some("")));
        assert_eq!(props.get(keys::JDBC_PASSWORD), Some(Some("")));
    }

    #[test]
    fn test_datasources_explicitly_null() {
        let props = props(None);
        assert_eq!(props.get(keys::JTA_DATA_SOURCE), Some(None));
        assert_eq!(props.get(keys::NON_JTA_DATA_SOURCE), Some(None));
    }

    #[test]
    fn test_database_hints_verbatim() {
        let props = props(None);
        assert_eq!(
            props.get(keys::DATABASE_PRODUCT_NAME),
            Some(Some("PostgreSQL"))
        );
        assert_eq!(props.get(keys::DATABASE_MAJOR_VERSION), Some(Some("16")));
        // Empty version strings are permitted and passed through.
        assert_eq!(props.get(keys::DATABASE_MINOR_VERSION), Some(Some("")));
    }

    #[test]
    fn test_script_targets_absolute() {
        let props = props(None);
        assert_eq!(
            props.get(keys::SCRIPTS_ACTION),
            Some(Some("drop-and-create"))
        );
        assert_eq!(
            props.get(keys::SCRIPTS_DROP_TARGET),
            Some(Some("/build/generated-schema/drop.sql"))
        );
        assert_eq!(
            props.get(keys::SCRIPTS_CREATE_TARGET),
            Some(Some("/build/generated-schema/create.sql"))
        );
    }

    #[test]
    fn test_relative_targets_become_absolute() {
        let props = assemble(
            &database(),
            ScriptAction::Create,
            Path::new("out/drop.sql"),
            Path::new("out/create.sql"),
            None,
        )
        .unwrap();
        let create = props.get(keys::SCRIPTS_CREATE_TARGET).unwrap().unwrap();
        assert!(Path::new(create).is_absolute());
    }

    #[test]
    fn test_delimiter_only_when_configured() {
        assert_eq!(props(None).get(keys::STATEMENT_DELIMITER), None);
        assert_eq!(
            props(Some(";")).get(keys::STATEMENT_DELIMITER),
            Some(Some(";"))
        );
    }

    #[test]
    fn test_insertion_order_preserved() {
        let props = props(Some(";"));
        let keys: Vec<_> = props.keys().collect();
        assert_eq!(keys[0], keys::TRANSACTION_TYPE);
        assert_eq!(keys[1], keys::JTA_DATA_SOURCE);
        assert_eq!(*keys.last().unwrap(), keys::STATEMENT_DELIMITER);
        assert_eq!(props.len(), 15);
    }
}
