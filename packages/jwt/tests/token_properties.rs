//! Property tests for the token codec: round-trip, tamper detection, key
//! sensitivity, alphabet safety and segment discipline.

use proptest::prelude::*;
use std::sync::Arc;
use tokenward_jwt::{Claims, Header, SecretKey, TokenError, TokenSigner, build, codec, sign, verify};

const URL_SAFE_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

fn key(material: &str) -> Arc<SecretKey> {
    Arc::new(SecretKey::new(material).unwrap())
}

fn claims_strategy() -> impl Strategy<Value = Claims> {
    ("\\PC{1,16}", "\\PC{1,48}").prop_map(|(role, subject)| Claims::new(role, subject).unwrap())
}

proptest! {
    #[test]
    fn round_trip(claims in claims_strategy(), material in "[ -~]{1,64}") {
        let key = key(&material);
        let unsigned = build(&Header::hs256(), &claims).unwrap();
        let token = sign(unsigned, &key).unwrap();
        prop_assert_eq!(verify(token.as_str(), &key).unwrap(), claims);
    }

    #[test]
    fn single_character_tamper_is_detected(
        claims in claims_strategy(),
        position in any::<prop::sample::Index>(),
        replacement in any::<prop::sample::Index>(),
    ) {
        let key = key("wn5ndJfLXR4lgPVK7VhcpG73TibKSiYUaRlSvRUw");
        let token = TokenSigner::new(key.clone()).issue(&claims).unwrap().into_string();

        // Only the claims and signature segments are mutated.
        let header_end = token.find('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        let candidates: Vec<usize> = (header_end..bytes.len()).filter(|&i| bytes[i] != b'.').collect();
        let index = candidates[position.index(candidates.len())];

        let mut new_byte = URL_SAFE_ALPHABET[replacement.index(URL_SAFE_ALPHABET.len())];
        if new_byte == bytes[index] {
            new_byte = if new_byte == b'A' { b'B' } else { b'A' };
        }
        bytes[index] = new_byte;
        let tampered = String::from_utf8(bytes).unwrap();

        match verify(&tampered, &key) {
            Err(TokenError::InvalidSignature) | Err(TokenError::MalformedClaims(_)) => {}
            other => prop_assert!(false, "tampered token accepted or misclassified: {:?}", other),
        }
    }

    #[test]
    fn distinct_keys_give_distinct_signatures(
        claims in claims_strategy(),
        first in "[ -~]{1,48}",
        second in "[ -~]{1,48}",
    ) {
        prop_assume!(first != second);
        let unsigned = build(&Header::hs256(), &claims).unwrap();
        let a = sign(unsigned.clone(), &key(&first)).unwrap();
        let b = sign(unsigned, &key(&second)).unwrap();
        prop_assert_ne!(a.as_str(), b.as_str());
        prop_assert_eq!(verify(a.as_str(), &key(&second)), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn encoding_is_url_safe_and_lossless(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let encoded = codec::encode(&bytes);
        prop_assert!(!encoded.contains(['+', '/', '=']));
        prop_assert_eq!(codec::decode(&encoded).unwrap(), bytes);
    }

    #[test]
    fn decoding_hostile_input_never_panics(input in "\\PC{0,64}") {
        let _ = codec::decode(&input);
    }

    #[test]
    fn wrong_segment_count_is_malformed(input in "[A-Za-z0-9_.-]{0,64}") {
        let segments = input.split('.').count();
        prop_assume!(segments != 3);
        let key = key("wn5ndJfLXR4lgPVK7VhcpG73TibKSiYUaRlSvRUw");
        prop_assert_eq!(verify(&input, &key), Err(TokenError::MalformedToken(segments)));
    }
}

#[test]
fn empty_bytes_round_trip() {
    assert_eq!(codec::encode(b""), "");
    assert!(codec::decode("").unwrap().is_empty());
}

#[test]
fn claims_are_readable_without_the_key() {
    // HMAC gives integrity, not confidentiality.
    let token = TokenSigner::new(key("wn5ndJfLXR4lgPVK7VhcpG73TibKSiYUaRlSvRUw"))
        .issue(&Claims::new("admin", "abc").unwrap())
        .unwrap();
    let claims_segment = token.as_str().split('.').nth(1).unwrap();
    let json = codec::decode(claims_segment).unwrap();
    assert_eq!(json, br#"{"role":"admin","uuid":"abc"}"#);
}
