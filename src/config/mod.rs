mod manager;

pub use manager::{
    ApolloConfig, ConfigFile, ConfigManager, DEFAULT_API_KEY_ENV, ResolveOptions, ResolvedConfig,
    resolve_config,
};
