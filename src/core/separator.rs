use anyhow::{bail, Result};

/// Splits and joins composite `bucket<sep>name` object references.
#[derive(Debug, Clone, Copy)]
pub struct SeparatorUtility {
    separator: char,
}

impl SeparatorUtility {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }

    /// Split a composite reference into its (bucket, name) pair.
    ///
    /// Anything other than exactly two non-empty components is an input-data
    /// error reported with the offending reference.
    pub fn split(&self, reference: &str) -> Result<(String, String)> {
        let mut parts = reference.split(self.separator);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(bucket), Some(name), None) if !bucket.is_empty() && !name.is_empty() => {
                Ok((bucket.to_string(), name.to_string()))
            }
            _ => bail!(
                "malformed object reference {:?}: expected bucket{}name",
                reference,
                self.separator
            ),
        }
    }

    pub fn join(&self, bucket: &str, name: &str) -> String {
        format!("{}{}{}", bucket, self.separator, name)
    }
}

impl Default for SeparatorUtility {
    fn default() -> Self {
        Self::new('/')
    }
}
