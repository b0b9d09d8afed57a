//! Read-only header lookup abstraction.
//!
//! The resolver never touches a request directly; it asks a [`HeaderSource`]
//! for raw header bytes by name. Implementations exist for `http::HeaderMap`,
//! `http::Request`, plain string maps and pair lists, references, and
//! `Option<H>` (a missing header source, for which every lookup is absent).

use std::borrow::Cow;
use std::collections::HashMap;
use std::hash::BuildHasher;

use axum::http::{HeaderMap, Request};

/// Case-insensitive, read-only access to request headers.
pub trait HeaderSource {
    /// Raw value of the first occurrence of `name`, or `None` if absent.
    fn lookup(&self, name: &str) -> Option<Cow<'_, [u8]>>;

    /// All occurrences of a list-valued header joined with `", "`.
    ///
    /// Repeated `X-Forwarded-For` lines are equivalent to a single line
    /// holding the comma-joined values, so list-valued headers go through
    /// this method.
    fn lookup_list(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        self.lookup(name)
    }
}

/// Join borrowed values with `", "`, borrowing when there is only one.
fn join_values<'a, I>(mut values: I) -> Option<Cow<'a, [u8]>>
where
    I: Iterator<Item = &'a [u8]>,
{
    let first = values.next()?;
    let Some(second) = values.next() else {
        return Some(Cow::Borrowed(first));
    };

    let mut joined = first.to_vec();
    for value in std::iter::once(second).chain(values) {
        joined.extend_from_slice(b", ");
        joined.extend_from_slice(value);
    }
    Some(Cow::Owned(joined))
}

impl HeaderSource for HeaderMap {
    #[inline]
    fn lookup(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        self.get(name).map(|value| Cow::Borrowed(value.as_bytes()))
    }

    fn lookup_list(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        join_values(self.get_all(name).iter().map(|value| value.as_bytes()))
    }
}

impl<B> HeaderSource for Request<B> {
    #[inline]
    fn lookup(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        self.headers().lookup(name)
    }

    fn lookup_list(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        self.headers().lookup_list(name)
    }
}

impl<S: BuildHasher> HeaderSource for HashMap<String, String, S> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        // Exact key first so lookups stay deterministic when keys differ only in case
        self.get(name)
            .or_else(|| {
                self.iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value)
            })
            .map(|value| Cow::Borrowed(value.as_bytes()))
    }
}

impl<K, V> HeaderSource for [(K, V)]
where
    K: AsRef<str>,
    V: AsRef<[u8]>,
{
    fn lookup(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        self.iter()
            .find(|(key, _)| key.as_ref().eq_ignore_ascii_case(name))
            .map(|(_, value)| Cow::Borrowed(value.as_ref()))
    }

    fn lookup_list(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        join_values(
            self.iter()
                .filter(|(key, _)| key.as_ref().eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_ref()),
        )
    }
}

impl<K, V, const N: usize> HeaderSource for [(K, V); N]
where
    K: AsRef<str>,
    V: AsRef<[u8]>,
{
    fn lookup(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        self.as_slice().lookup(name)
    }

    fn lookup_list(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        self.as_slice().lookup_list(name)
    }
}

impl<K, V> HeaderSource for Vec<(K, V)>
where
    K: AsRef<str>,
    V: AsRef<[u8]>,
{
    fn lookup(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        self.as_slice().lookup(name)
    }

    fn lookup_list(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        self.as_slice().lookup_list(name)
    }
}

impl<H: HeaderSource + ?Sized> HeaderSource for &H {
    fn lookup(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        (**self).lookup(name)
    }

    fn lookup_list(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        (**self).lookup_list(name)
    }
}

impl<H: HeaderSource> HeaderSource for Option<H> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        self.as_ref()?.lookup(name)
    }

    fn lookup_list(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        self.as_ref()?.lookup_list(name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_header_map_lookup_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Real-IP", HeaderValue::from_static("10.0.0.1"));

        assert_eq!(headers.lookup("x-real-ip").as_deref(), Some(&b"10.0.0.1"[..]));
        assert_eq!(headers.lookup("X-REAL-IP").as_deref(), Some(&b"10.0.0.1"[..]));
        assert!(headers.lookup("x-client-ip").is_none());
    }

    #[test]
    fn test_header_map_lookup_list_joins_repeated_values() {
        let mut headers = HeaderMap::new();
        headers.append("x-forwarded-for", HeaderValue::from_static("1.1.1.1"));
        headers.append("x-forwarded-for", HeaderValue::from_static("2.2.2.2, 3.3.3.3"));

        let joined = headers.lookup_list("x-forwarded-for").unwrap();
        assert_eq!(&*joined, b"1.1.1.1, 2.2.2.2, 3.3.3.3");
        // Plain lookup only sees the first line
        assert_eq!(headers.lookup("x-forwarded-for").as_deref(), Some(&b"1.1.1.1"[..]));
    }

    #[test]
    fn test_header_map_lookup_list_single_value_is_borrowed() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("1.1.1.1"));

        assert!(matches!(
            headers.lookup_list("x-forwarded-for"),
            Some(Cow::Borrowed(_))
        ));
    }

    #[test]
    fn test_hash_map_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("X-Client-IP".to_string(), "9.9.9.9".to_string());

        assert_eq!(headers.lookup("x-client-ip").as_deref(), Some(&b"9.9.9.9"[..]));
        assert!(headers.lookup("x-real-ip").is_none());
    }

    #[test]
    fn test_pair_slice_lookup() {
        let headers = [("X-Forwarded-For", "1.1.1.1"), ("x-forwarded-for", "2.2.2.2")];

        assert_eq!(headers.lookup("x-forwarded-for").as_deref(), Some(&b"1.1.1.1"[..]));
        assert_eq!(
            headers.lookup_list("x-forwarded-for").as_deref(),
            Some(&b"1.1.1.1, 2.2.2.2"[..])
        );
    }

    #[test]
    fn test_missing_source_yields_nothing() {
        let headers: Option<HeaderMap> = None;
        assert!(headers.lookup("x-client-ip").is_none());
        assert!(headers.lookup_list("x-forwarded-for").is_none());
    }

    #[test]
    fn test_request_delegates_to_headers() {
        let req = Request::builder()
            .header("x-real-ip", "192.168.1.1")
            .body(())
            .unwrap();

        assert_eq!(req.lookup("x-real-ip").as_deref(), Some(&b"192.168.1.1"[..]));
    }
}
