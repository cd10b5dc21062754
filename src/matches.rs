macro_rules! byte_map {
    // ===== 256 lookup table =====
    {
        $(#[$meta:meta])*
        $vis:vis const fn $fn_id:ident($byte:ident:$u8:ty) { $e:expr }
    } => {
        $(#[$meta])*
        $vis const fn $fn_id($byte: $u8) -> bool {
            static PAT: [bool; 256] = {
                let mut bytes = [false; 256];
                let mut $byte = 0u8;
                const fn filter($byte: $u8) -> bool {
                    $e
                }
                loop {
                    bytes[$byte as usize] = filter($byte);
                    if $byte == 255 {
                        break;
                    }
                    $byte += 1;
                }
                bytes
            };
            PAT[$byte as usize]
        }
    };
}

// ===== lookup table =====

byte_map! {
    /// query-delim = "&" / ";"
    #[inline(always)]
    pub const fn is_query_delim(byte: u8) {
        matches!(byte, b'&' | b';')
    }
}

byte_map! {
    /// Bytes that a query component decoder may rewrite.
    #[inline(always)]
    pub const fn is_query_escape(byte: u8) {
        matches!(byte, b'%' | b'+')
    }
}

// ===== Search =====

/// Returns `true` if decoding `bytes` can produce a different output.
///
/// `+` is only considered when `plus_to_space` is set.
pub const fn needs_decode(mut bytes: &[u8], plus_to_space: bool) -> bool {
    while let [byte, rest @ ..] = bytes {
        if is_query_escape(*byte) && (plus_to_space || *byte == b'%') {
            return true;
        }
        bytes = rest;
    }
    false
}

/// Split at the first occurence of `delim`, the delimiter is excluded from both sides.
pub const fn split_once(bytes: &[u8], delim: u8) -> Option<(&[u8], &[u8])> {
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == delim {
            let (lead, rest) = bytes.split_at(i);
            return Some((lead, rest.split_at(1).1));
        }
        i += 1;
    }
    None
}

#[test]
fn test_split_once() {
    assert!(split_once(b"key", b'=').is_none());

    let (left, right) = split_once(b"key=value", b'=').unwrap();
    assert_eq!(left, b"key");
    assert_eq!(right, b"value");

    let (left, right) = split_once(b"key=a=b", b'=').unwrap();
    assert_eq!(left, b"key");
    assert_eq!(right, b"a=b");

    let (left, right) = split_once(b"=", b'=').unwrap();
    assert_eq!(left, b"");
    assert_eq!(right, b"");
}

#[test]
fn test_needs_decode() {
    assert!(!needs_decode(b"plain", true));
    assert!(needs_decode(b"a%20b", false));
    assert!(needs_decode(b"a+b", true));
    assert!(!needs_decode(b"a+b", false));
}

#[test]
fn test_query_delim() {
    assert!(is_query_delim(b'&'));
    assert!(is_query_delim(b';'));
    assert!(!is_query_delim(b'='));
}
