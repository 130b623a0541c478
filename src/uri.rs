//! Percent-encoding helpers and URI template macros.
//!
//! Every interpolated value is encoded in isolation, so a `/` inside a value
//! becomes `%2F` while the slashes written in the template stay literal:
//!
//! ```rust,ignore
//! use ichnome_front::uri;
//!
//! let ws = "main";
//! let group = "a b/c";
//! assert_eq!(uri!("/" {ws} "/stats/" {group}), "/main/stats/a%20b%2Fc");
//! ```
//!
//! Paths whose slashes are meaningful go through [`PathSegments`], which
//! encodes one segment at a time and rejoins them with a literal `/`.

/// Percent-encode a single URI component.
///
/// Leaves only the unreserved set `A-Z a-z 0-9 - _ . ! ~ * ' ( )` untouched;
/// everything else (including `/`, `,`, `?`, `&`, `=`, space and every
/// non-ASCII byte) is written as `%XX` with upper-case hex digits.
pub fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        if is_unreserved(byte) {
            out.push(byte as char);
        } else {
            out.push('%');
            out.push(HEX[(byte >> 4) as usize] as char);
            out.push(HEX[(byte & 0x0f) as usize] as char);
        }
    }
    out
}

/// Decode a percent-encoded component.
///
/// Malformed escapes (`%`, `%4`, `%zz`) are kept verbatim. Byte sequences that
/// are not valid UTF-8 are replaced with U+FFFD.
pub fn decode_component(input: &str) -> String {
    decode_bytes(input.as_bytes(), false)
}

/// Decode a component from an `application/x-www-form-urlencoded` body or
/// query string, where `+` stands for a space.
pub fn decode_form_component(input: &str) -> String {
    decode_bytes(input.as_bytes(), true)
}

/// Encode a path segment by segment, keeping `/` separators literal.
///
/// `data/a b/c,d` becomes `data/a%20b/c%2Cd`.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(encode_component)
        .collect::<Vec<_>>()
        .join("/")
}

const HEX: &[u8; 16] = b"0123456789ABCDEF";

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(byte, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

fn decode_bytes(input: &[u8], plus_as_space: bool) -> String {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        match input[i] {
            b'%' if i + 2 < input.len() => {
                match (hex_value(input[i + 1]), hex_value(input[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' if plus_as_space => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

// ---------------------------------------------------------------------------
// Slot values
// ---------------------------------------------------------------------------

/// A value that may fill a slot of a [`uri!`](crate::uri!) template.
pub trait UriComponent {
    /// The encoded text spliced into the template.
    fn encode_component(&self) -> String;
}

/// A value that may fill a slot of a [`uria!`](crate::uria!) template.
///
/// Scalars encode exactly like [`UriComponent`]. Lists encode each element on
/// its own and join them with an unescaped `,`, so an element that itself
/// contains a comma stays distinguishable from the separator.
pub trait UriaComponent {
    fn encode_uria_component(&self) -> String;
}

impl UriComponent for str {
    fn encode_component(&self) -> String {
        encode_component(self)
    }
}

impl UriComponent for String {
    fn encode_component(&self) -> String {
        encode_component(self)
    }
}

impl<T: UriComponent + ?Sized> UriComponent for &T {
    fn encode_component(&self) -> String {
        (**self).encode_component()
    }
}

impl UriaComponent for str {
    fn encode_uria_component(&self) -> String {
        encode_component(self)
    }
}

impl UriaComponent for String {
    fn encode_uria_component(&self) -> String {
        encode_component(self)
    }
}

impl<T: UriaComponent + ?Sized> UriaComponent for &T {
    fn encode_uria_component(&self) -> String {
        (**self).encode_uria_component()
    }
}

impl<T: UriComponent> UriaComponent for [T] {
    fn encode_uria_component(&self) -> String {
        self.iter()
            .map(UriComponent::encode_component)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl<T: UriComponent, const N: usize> UriaComponent for [T; N] {
    fn encode_uria_component(&self) -> String {
        self.as_slice().encode_uria_component()
    }
}

impl<T: UriComponent> UriaComponent for Vec<T> {
    fn encode_uria_component(&self) -> String {
        self.as_slice().encode_uria_component()
    }
}

macro_rules! display_component {
    ($($ty:ty),* $(,)?) => {
        $(
            impl UriComponent for $ty {
                fn encode_component(&self) -> String {
                    encode_component(&self.to_string())
                }
            }

            impl UriaComponent for $ty {
                fn encode_uria_component(&self) -> String {
                    encode_component(&self.to_string())
                }
            }
        )*
    };
}

display_component!(i32, i64, u16, u32, u64, usize, bool);

/// A slot value holding a `/`-separated path.
///
/// Each segment is encoded independently and the separators are written back
/// literally, so `a b/c` becomes `a%20b/c` rather than `a%20b%2Fc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSegments<'a>(pub &'a str);

impl UriComponent for PathSegments<'_> {
    fn encode_component(&self) -> String {
        encode_path(self.0)
    }
}

impl UriaComponent for PathSegments<'_> {
    fn encode_uria_component(&self) -> String {
        encode_path(self.0)
    }
}

// ---------------------------------------------------------------------------
// Template macros
// ---------------------------------------------------------------------------

/// Build a URI from literal segments and `{expr}` slots.
///
/// String literals are copied verbatim; every `{expr}` is encoded with
/// [`UriComponent`](crate::uri::UriComponent).
#[macro_export]
macro_rules! uri {
    ($($part:tt)*) => {{
        let mut out = ::std::string::String::new();
        $( $crate::__uri_part!(out, $crate::uri::UriComponent::encode_component, $part); )*
        out
    }};
}

/// Like [`uri!`](crate::uri!), but slots may also hold lists.
#[macro_export]
macro_rules! uria {
    ($($part:tt)*) => {{
        let mut out = ::std::string::String::new();
        $( $crate::__uri_part!(out, $crate::uri::UriaComponent::encode_uria_component, $part); )*
        out
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __uri_part {
    ($out:ident, $encode:path, { $value:expr }) => {
        $out.push_str(&$encode(&$value));
    };
    ($out:ident, $encode:path, $literal:literal) => {
        $out.push_str($literal);
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_keeps_unreserved_characters() {
        assert_eq!(encode_component("AZaz09-_.!~*'()"), "AZaz09-_.!~*'()");
    }

    #[test]
    fn encode_escapes_structural_characters() {
        assert_eq!(encode_component("a b/c"), "a%20b%2Fc");
        assert_eq!(encode_component("k=v&x?y,z"), "k%3Dv%26x%3Fy%2Cz");
        assert_eq!(encode_component("100%"), "100%25");
    }

    #[test]
    fn encode_escapes_utf8_bytes() {
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[test]
    fn decode_reverses_encode() {
        for value in ["a b/c", "data/archives", "é,ü", "100%", "x+y"] {
            assert_eq!(decode_component(&encode_component(value)), value);
        }
    }

    #[test]
    fn decode_keeps_malformed_escapes() {
        assert_eq!(decode_component("%"), "%");
        assert_eq!(decode_component("%4"), "%4");
        assert_eq!(decode_component("%zz1"), "%zz1");
        assert_eq!(decode_component("a%2"), "a%2");
    }

    #[test]
    fn form_decode_maps_plus_to_space() {
        assert_eq!(decode_form_component("a+b%2Bc"), "a b+c");
        assert_eq!(decode_component("a+b"), "a+b");
    }

    #[test]
    fn encode_path_keeps_separators() {
        assert_eq!(encode_path("data/a b/c,d"), "data/a%20b/c%2Cd");
        assert_eq!(encode_path(""), "");
    }

    #[test]
    fn uri_macro_encodes_slots_only() {
        let group = "a b/c";
        assert_eq!(uri!("groups/" { group }), "groups/a%20b%2Fc");
        assert_eq!(uri!({ "ws" } "/diff"), "ws/diff");
        assert_eq!(uri!("/" { 42 } "/" { true }), "/42/true");
    }

    #[test]
    fn uri_macro_accepts_owned_and_borrowed_strings() {
        let owned = String::from("x/y");
        let borrowed: &str = "z";
        assert_eq!(uri!("/" { owned } "/" { borrowed }), "/x%2Fy/z");
    }

    #[test]
    fn uria_macro_joins_list_with_literal_comma() {
        assert_eq!(uria!("?ids=" { ["a", "b,c"] }), "?ids=a,b%2Cc");
        assert_eq!(uria!("?n=" { vec![1, 2, 3] }), "?n=1,2,3");
        assert_eq!(uria!("/" { "a/b" }), "/a%2Fb");
    }

    #[test]
    fn path_segments_slot_encodes_per_segment() {
        let path = "data/a b/c";
        assert_eq!(
            uri!("/ws/stats/g/" { PathSegments(path) }),
            "/ws/stats/g/data/a%20b/c"
        );
    }
}
