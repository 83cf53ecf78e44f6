mod git;
mod npm;

pub use git::Git2Provider;
pub use npm::ProcessNpmClient;
