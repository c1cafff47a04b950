//! Key codec: hierarchical keys to flat document identifiers
//!
//! Layout: `kind SEP id (SEP kind SEP id)*` where `SEP` is
//! [`FIELD_SEPARATOR`] and `id` is either the caller-assigned name or
//! [`ID_MARKER`] followed by a 20-digit decimal.
//!
//! Numeric ids are shifted by `2^63` before formatting so the decimal is
//! never negative and fixed width keeps lexicographic order equal to
//! numeric order, negative ids included. Every identifier of an ancestor is
//! a proper prefix of its descendants' identifiers.

use kindstore_core::key::{validate_kind, validate_name};
use kindstore_core::{Identifier, Key, KeyError, PathElement, Result, FIELD_SEPARATOR, ID_MARKER};

const ID_DIGITS: usize = 20;

fn encode_id(id: i64) -> String {
    let shifted = (i128::from(id) - i128::from(i64::MIN)) as u64;
    format!("{}{:0width$}", ID_MARKER, shifted, width = ID_DIGITS)
}

fn decode_id(raw: &str) -> std::result::Result<i64, KeyError> {
    let invalid = || KeyError::InvalidId {
        raw: raw.to_string(),
    };
    if raw.len() != ID_DIGITS || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let shifted: u64 = raw.parse().map_err(|_| invalid())?;
    Ok((i128::from(shifted) + i128::from(i64::MIN)) as i64)
}

/// Encode a complete key into its document identifier
///
/// # Errors
///
/// Returns `MalformedKey` if the key is empty, incomplete, or has a
/// component that breaks the encoding rules.
pub fn encode_key(key: &Key) -> Result<String> {
    key.validate()?;
    let mut fields = Vec::with_capacity(key.path().len() * 2);
    for element in key.path() {
        fields.push(element.kind.clone());
        fields.push(match &element.id {
            Identifier::Name(name) => name.clone(),
            Identifier::Id(id) => encode_id(*id),
            Identifier::Unassigned => {
                return Err(KeyError::Incomplete {
                    kind: element.kind.clone(),
                }
                .into())
            }
        });
    }
    Ok(fields.join(&FIELD_SEPARATOR.to_string()))
}

/// Decode a document identifier back into its key
///
/// # Errors
///
/// Returns `MalformedKey` if the field count is not a positive even number,
/// a component is empty, or a numeric id does not parse.
pub fn decode_key(encoded: &str) -> Result<Key> {
    let fields: Vec<&str> = encoded.split(FIELD_SEPARATOR).collect();
    if fields.len() % 2 != 0 || encoded.is_empty() {
        return Err(KeyError::FieldCount {
            count: if encoded.is_empty() { 0 } else { fields.len() },
        }
        .into());
    }

    let mut path = Vec::with_capacity(fields.len() / 2);
    for pair in fields.chunks(2) {
        let (kind, raw) = (pair[0], pair[1]);
        validate_kind(kind)?;
        let element = match raw.strip_prefix(ID_MARKER) {
            Some(digits) => PathElement::with_id(kind, decode_id(digits)?),
            None => {
                validate_name(raw)?;
                PathElement::with_name(kind, raw)
            }
        };
        path.push(element);
    }
    Ok(Key::from_path(path))
}

/// Regular expression matching a key's identifier and all its descendants'
///
/// The trailing group stops `Person/alice` from matching a sibling such as
/// `Person/alicex`.
///
/// # Errors
///
/// Returns `MalformedKey` if the key cannot be encoded.
pub fn ancestor_pattern(ancestor: &Key) -> Result<String> {
    let encoded = encode_key(ancestor)?;
    Ok(format!(
        "^{}(?:{}|$)",
        regex_lite::escape(&encoded),
        FIELD_SEPARATOR
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kindstore_core::Error;
    use proptest::prelude::*;
    use regex_lite::Regex;

    #[test]
    fn test_encode_named_path() {
        let key = Key::named("Person", "alice").child("Pet", Identifier::Name("rex".into()));
        assert_eq!(encode_key(&key).unwrap(), "Person\u{8}alice\u{8}Pet\u{8}rex");
    }

    #[test]
    fn test_encode_numeric_id_is_marked_and_fixed_width() {
        let encoded = encode_key(&Key::with_id("Pet", 0)).unwrap();
        assert_eq!(encoded, "Pet\u{8}\t09223372036854775808");
        let encoded = encode_key(&Key::with_id("Pet", i64::MIN)).unwrap();
        assert_eq!(encoded, "Pet\u{8}\t00000000000000000000");
        let encoded = encode_key(&Key::with_id("Pet", i64::MAX)).unwrap();
        assert_eq!(encoded, "Pet\u{8}\t18446744073709551615");
    }

    #[test]
    fn test_incomplete_key_is_rejected() {
        let err = encode_key(&Key::incomplete("Pet")).unwrap_err();
        assert!(matches!(err, Error::MalformedKey(KeyError::Incomplete { .. })));
    }

    #[test]
    fn test_separator_in_name_is_rejected() {
        let err = encode_key(&Key::named("Pet", "a\u{8}b")).unwrap_err();
        assert!(matches!(err, Error::MalformedKey(KeyError::ContainsSeparator { .. })));
    }

    #[test]
    fn test_decode_odd_field_count() {
        let err = decode_key("Pet\u{8}rex\u{8}Toy").unwrap_err();
        assert_eq!(err, Error::MalformedKey(KeyError::FieldCount { count: 3 }));
        let err = decode_key("").unwrap_err();
        assert_eq!(err, Error::MalformedKey(KeyError::FieldCount { count: 0 }));
    }

    #[test]
    fn test_decode_bad_numeric_id() {
        let err = decode_key("Pet\u{8}\tabc").unwrap_err();
        assert!(matches!(err, Error::MalformedKey(KeyError::InvalidId { .. })));
        let err = decode_key("Pet\u{8}\t99999999999999999999").unwrap_err();
        assert!(matches!(err, Error::MalformedKey(KeyError::InvalidId { .. })));
    }

    #[test]
    fn test_ids_sort_before_names() {
        let id = encode_key(&Key::with_id("Pet", i64::MAX)).unwrap();
        let name = encode_key(&Key::named("Pet", "0")).unwrap();
        assert!(id < name);
    }

    #[test]
    fn test_ancestor_pattern_excludes_extended_sibling() {
        let ancestor = Key::named("Person", "alice");
        let re = Regex::new(&ancestor_pattern(&ancestor).unwrap()).unwrap();
        let child = ancestor.child("Pet", Identifier::Id(3));
        assert!(re.is_match(&encode_key(&ancestor).unwrap()));
        assert!(re.is_match(&encode_key(&child).unwrap()));
        assert!(!re.is_match(&encode_key(&Key::named("Person", "alicex")).unwrap()));
        assert!(!re.is_match(&encode_key(&Key::named("Person", "bob")).unwrap()));
    }

    #[test]
    fn test_ancestor_pattern_escapes_metacharacters() {
        let ancestor = Key::named("Doc", "a.b*");
        let re = Regex::new(&ancestor_pattern(&ancestor).unwrap()).unwrap();
        assert!(re.is_match(&encode_key(&ancestor).unwrap()));
        assert!(!re.is_match(&encode_key(&Key::named("Doc", "aXbbb")).unwrap()));
    }

    fn arb_element() -> impl Strategy<Value = PathElement> {
        let kind = "[A-Z][A-Za-z0-9_]{0,8}";
        prop_oneof![
            (kind, "[a-z0-9 .*]{1,10}").prop_map(|(k, n)| PathElement::with_name(k, n)),
            (kind, any::<i64>()).prop_map(|(k, id)| PathElement::with_id(k, id)),
        ]
    }

    fn arb_key() -> impl Strategy<Value = Key> {
        prop::collection::vec(arb_element(), 1..5).prop_map(Key::from_path)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn round_trip(key in arb_key()) {
            let encoded = encode_key(&key).unwrap();
            prop_assert_eq!(decode_key(&encoded).unwrap(), key);
        }

        #[test]
        fn ancestor_encoding_is_proper_prefix(key in arb_key(), extra in prop::collection::vec(arb_element(), 1..3)) {
            let mut path = key.path().to_vec();
            path.extend(extra);
            let descendant = Key::from_path(path);

            let ancestor_id = encode_key(&key).unwrap();
            let descendant_id = encode_key(&descendant).unwrap();
            prop_assert!(descendant_id.starts_with(&ancestor_id));
            prop_assert!(descendant_id.len() > ancestor_id.len());

            let re = Regex::new(&ancestor_pattern(&key).unwrap()).unwrap();
            prop_assert!(re.is_match(&descendant_id));
        }

        #[test]
        fn numeric_ids_sort_numerically(a in any::<i64>(), b in any::<i64>()) {
            let left = encode_key(&Key::with_id("Pet", a)).unwrap();
            let right = encode_key(&Key::with_id("Pet", b)).unwrap();
            prop_assert_eq!(a.cmp(&b), left.cmp(&right));
        }
    }
}
