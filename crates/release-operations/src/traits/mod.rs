mod git_provider;
mod npm_client;

pub use git_provider::GitProvider;
pub use npm_client::NpmClient;
