//! Version and build information
//!
//! Provides access to build-time embedded information.

/// Build information embedded at compile time
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Package version from Cargo.toml
    pub version: &'static str,
    /// Package name
    pub name: &'static str,
    /// Git commit hash (short)
    pub git_hash: &'static str,
    /// Git branch name
    pub git_branch: &'static str,
    /// Raw git dirty string ("true" or "false")
    git_dirty_str: &'static str,
    /// Build timestamp
    pub build_timestamp: &'static str,
    /// Target triple (e.g., x86_64-unknown-linux-gnu)
    pub target: &'static str,
    /// Build profile (debug/release)
    pub profile: &'static str,
    /// Rustc version used to build
    pub rustc_version: &'static str,
}

impl BuildInfo {
    /// Get the current build information
    pub const fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            name: env!("CARGO_PKG_NAME"),
            git_hash: env!("BFI_ASSESS_GIT_HASH"),
            git_branch: env!("BFI_ASSESS_GIT_BRANCH"),
            git_dirty_str: env!("BFI_ASSESS_GIT_DIRTY"),
            build_timestamp: env!("BFI_ASSESS_BUILD_TIMESTAMP"),
            target: env!("BFI_ASSESS_TARGET"),
            profile: env!("BFI_ASSESS_PROFILE"),
            rustc_version: env!("BFI_ASSESS_RUSTC_VERSION"),
        }
    }

    /// Whether the working directory was dirty at build time
    pub fn git_dirty(&self) -> bool {
        self.git_dirty_str == "true"
    }

    /// Get the full version string (e.g., "0.1.0-abc1234")
    pub fn full_version(&self) -> String {
        if self.git_dirty() {
            format!("{}-{}-dirty", self.version, self.git_hash)
        } else if self.git_hash != "unknown" {
            format!("{}-{}", self.version, self.git_hash)
        } else {
            self.version.to_string()
        }
    }
}

/// Get the current build info
pub fn build_info() -> BuildInfo {
    BuildInfo::current()
}

/// Print version and build information to stdout
pub fn print_version() {
    let info = build_info();
    println!("{} {}", info.name, info.full_version());
    println!("  Branch:  {}", info.git_branch);
    println!("  Built:   {}", info.build_timestamp);
    println!("  Target:  {}", info.target);
    println!("  Profile: {}", info.profile);
    println!("  Rustc:   {}", info.rustc_version);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_present() {
        let info = build_info();
        assert_eq!(info.name, "bfi-assess");
        assert!(!info.version.is_empty());
    }

    #[test]
    fn test_full_version_contains_version() {
        let info = build_info();
        assert!(info.full_version().starts_with(info.version));
    }
}
