//! # Suite Constants
//!
//! Fixed names, paths, and statements that define the contract between the
//! suite orchestrator, the query engine, and the distributed storage layer.

/// Setting keys understood by the configuration resolver
pub mod settings {
    /// Mode selector: `"local"` selects the embedded engine, anything else names a remote target
    pub const MODE: &str = "hive";
    pub const ES_HOST: &str = "es.host";
    pub const ES_PORT: &str = "es.port";

    pub const STORAGE_HANDLER: &str = "suite.storage_handler";
    pub const OMIT_EMPTY_PORT: &str = "suite.omit_empty_port";

    pub const SUPPORT_ARTIFACT: &str = "provisioning.support_artifact";
    pub const DATA_ARTIFACT: &str = "provisioning.data_artifact";

    /// Value of [`MODE`] that selects the embedded engine
    pub const LOCAL_MODE: &str = "local";

    /// Environment variable prefix for setting overrides (`SUITE_ES__HOST` -> `es.host`)
    pub const ENV_PREFIX: &str = "SUITE";
    pub const ENV_SEPARATOR: &str = "__";

    /// Settings file looked up in the working directory when no path is given
    pub const DEFAULT_SETTINGS_FILE: &str = "suite.toml";
}

/// Table-definition vocabulary for the search-cluster storage handler
pub mod table {
    pub const DEFAULT_STORAGE_HANDLER: &str = "org.elasticsearch.hadoop.hive.ESStorageHandler";

    pub const RESOURCE_PROPERTY: &str = "resource";
    pub const HOST_PROPERTY: &str = "host";
    pub const PORT_PROPERTY: &str = "port";
}

/// Scratch database statements issued around every suite run
pub mod bootstrap {
    pub const SCRATCH_DATABASE: &str = "test";

    pub const DROP_SCRATCH_DATABASE: &str = "DROP DATABASE IF EXISTS test CASCADE";
    pub const CREATE_SCRATCH_DATABASE: &str = "CREATE DATABASE test";
    pub const USE_SCRATCH_DATABASE: &str = "USE test";

    /// Statements run in order right after the backend starts
    pub const STATEMENTS: [&str; 3] = [
        DROP_SCRATCH_DATABASE,
        CREATE_SCRATCH_DATABASE,
        USE_SCRATCH_DATABASE,
    ];
}

/// Artifact locations, local defaults and fixed distributed-storage paths
pub mod artifacts {
    pub const DEFAULT_SUPPORT_ARTIFACT: &str = "build/libs/es-hadoop-testing.jar";
    pub const DEFAULT_DATA_ARTIFACT: &str = "src/test/resources/hive-compound.dat";

    /// Classpath-registered location of the support jar
    pub const REMOTE_SUPPORT_ARTIFACT: &str = "/eshdp/libs/es-hadoop-testing.jar";
    /// Re-provisioned before each consuming test; `LOAD DATA` moves it away
    pub const REMOTE_DATA_ARTIFACT: &str = "/eshdp/hive/hive-compound.dat";
}
