mod static_provider;
pub use static_provider::StaticCredentialProvider;

mod env;
pub use env::EnvCredentialProvider;

mod config;
pub use config::ConfigCredentialProvider;

mod file;
pub use file::FileCredentialProvider;

mod default;
pub use default::DefaultCredentialProvider;
