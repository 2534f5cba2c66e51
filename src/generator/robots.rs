//! robots.txt generation.

/// Crawler policy written to `robots.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsPolicy {
    user_agent: String,
    disallow: Vec<String>,
}

impl Default for RobotsPolicy {
    /// Keep every crawler out of the whole site.
    fn default() -> Self {
        Self {
            user_agent: "*".to_string(),
            disallow: vec!["/".to_string()],
        }
    }
}

impl RobotsPolicy {
    pub fn to_text(&self) -> String {
        let mut text = format!("User-agent: {}\n", self.user_agent);
        for path in &self.disallow {
            text.push_str("Disallow: ");
            text.push_str(path);
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_disallows_everything() {
        assert_eq!(
            RobotsPolicy::default().to_text(),
            "User-agent: *\nDisallow: /\n"
        );
    }
}
