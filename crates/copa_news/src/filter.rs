/// Post-fetch source exclusion by host suffix: listing "uol.com.br"
/// also drops "esporte.uol.com.br". Runs before similarity scoring so
/// unwanted sources never enter the pairwise comparisons.
#[derive(Debug, Clone, Default)]
pub struct DomainExcluder {
    domains: Vec<String>,
}

impl DomainExcluder {
    pub fn new(csv: &str) -> Self {
        let domains = csv
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { domains }
    }

    pub fn is_excluded(&self, host: &str) -> bool {
        self.domains
            .iter()
            .any(|d| host == d || host.ends_with(&format!(".{}", d)))
    }
}
