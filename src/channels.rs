//! # Channel Directory
//!
//! Maps video channel handles (e.g. "@SpaceX") to the channel ids their
//! uploads feed is keyed by.
//!
//! - Built-in `default_seed()` with verified ids.
//! - Config entries extend or override the seed.
//! - Lookup: exact handle first, then case-insensitive (with or without `@`).

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelDirectory {
    ids: HashMap<String, String>,
}

impl ChannelDirectory {
    pub fn default_seed() -> Self {
        let mut ids = HashMap::new();
        for (handle, id) in [
            ("@SpaceX", "UCtI0Hodo5o5dUb67FeUjDeA"),
            ("@Tesla", "UC5WjFlyuJ9xy7p67O6e66mA"),
            ("@lexfridman", "UCSHZKyawb77ixDdsGog4iWA"),
            ("@TheLimitingFactor", "UCIFn7ONIJHyC-lMnb7Fm_jw"),
            ("@ColdFusion", "UC4QZ_KsYlR2k619m8Fp88Hw"),
            ("@WesRoth", "UChpWqB7D3N0ZJt2d50rYQGA"),
            ("@DaveLeeInvesting", "UCQj_f4-QoD5ZpS_o5_S0DdA"),
        ] {
            ids.insert(handle.to_string(), id.to_string());
        }
        Self { ids }
    }

    /// Seed plus `extra`; blank handles or ids are ignored.
    pub fn with_overrides(mut self, extra: &HashMap<String, String>) -> Self {
        for (handle, id) in extra {
            let (h, i) = (handle.trim(), id.trim());
            if !h.is_empty() && !i.is_empty() {
                self.ids.insert(h.to_string(), i.to_string());
            }
        }
        self
    }

    pub fn channel_id(&self, handle: &str) -> Option<&str> {
        let h = handle.trim();
        if let Some(id) = self.ids.get(h) {
            return Some(id.as_str());
        }
        let key = normalize(h);
        self.ids
            .iter()
            .find(|(k, _)| normalize(k) == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for ChannelDirectory {
    fn default() -> Self {
        Self::default_seed()
    }
}

fn normalize(handle: &str) -> String {
    handle.trim().trim_start_matches('@').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_and_relaxed_lookup() {
        let d = ChannelDirectory::default_seed();
        assert_eq!(d.channel_id("@SpaceX"), Some("UCtI0Hodo5o5dUb67FeUjDeA"));
        assert_eq!(d.channel_id("spacex"), Some("UCtI0Hodo5o5dUb67FeUjDeA"));
        assert_eq!(d.channel_id("@LEXFRIDMAN"), Some("UCSHZKyawb77ixDdsGog4iWA"));
    }

    #[test]
    fn unknown_handle_is_none() {
        assert!(ChannelDirectory::default_seed().channel_id("@nobody").is_none());
    }

    #[test]
    fn overrides_extend_and_replace() {
        let mut extra = HashMap::new();
        extra.insert("@New".to_string(), "UCnew".to_string());
        extra.insert("@Tesla".to_string(), "UCother".to_string());
        extra.insert(" ".to_string(), "UCblank".to_string());
        let d = ChannelDirectory::default_seed().with_overrides(&extra);
        assert_eq!(d.channel_id("@New"), Some("UCnew"));
        assert_eq!(d.channel_id("@Tesla"), Some("UCother"));
        assert_eq!(d.len(), 8);
    }
}
