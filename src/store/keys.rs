//! Store key layout. Every key the service touches is built here so the
//! namespace stays greppable in one place.

const PASTE_PREFIX: &str = "paste:";

/// Key of a paste record: `paste:{id}`.
pub fn paste(id: &str) -> String {
    format!("{PASTE_PREFIX}{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paste_key_is_prefixed() {
        assert_eq!(paste("abc-123"), "paste:abc-123");
    }
}
