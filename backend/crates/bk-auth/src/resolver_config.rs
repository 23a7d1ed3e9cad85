#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Upper bound on compare-and-swap rounds for one external login
    pub max_attempts: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}
