use rand::Rng;

const SUFFIX_LEN: usize = 6;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const FALLBACK_STEM: &str = "portfolio";

/// Lowercases `name`, keeps ASCII letters and digits, and joins the words
/// with single hyphens.
pub fn slug_stem(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !stem.is_empty() {
                stem.push('-');
            }
            pending_hyphen = false;
            stem.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
    }
    stem
}

fn random_suffix(rng: &mut impl Rng) -> String {
    (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

/// Public URL slug for a user's portfolio: `<stem>-<6 base36 chars>`.
/// Uniqueness is left to the store's slug constraint.
pub fn generate_slug(display_name: &str) -> String {
    let stem = slug_stem(display_name);
    let stem = if stem.is_empty() { FALLBACK_STEM } else { &stem };
    format!("{stem}-{}", random_suffix(&mut rand::thread_rng()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_collapses_separators() {
        assert_eq!(slug_stem("Ada  Lovelace"), "ada-lovelace");
        assert_eq!(slug_stem(" -Jean-Luc  Picard- "), "jean-luc-picard");
        assert_eq!(slug_stem("O'Brien, Miles"), "obrien-miles");
    }

    #[test]
    fn test_stem_drops_non_ascii() {
        assert_eq!(slug_stem("Zoë Ångström"), "zo-ngstrm");
        assert_eq!(slug_stem("李雷"), "");
    }

    #[test]
    fn test_slug_shape() {
        let slug = generate_slug("Ada Lovelace");
        let (stem, suffix) = slug.rsplit_once('-').unwrap();
        assert_eq!(stem, "ada-lovelace");
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn test_empty_name_uses_fallback_stem() {
        assert!(generate_slug("!!!").starts_with("portfolio-"));
    }
}
