//! Route names for request spans and metrics.

use uuid::Uuid;

/// Path with identifier segments replaced, so metrics do not get one series
/// per cart or order.
pub(super) fn normalise_route(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else if !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit()) {
            normalised.push_str("{id}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_identifier_segments() {
        let cart = Uuid::now_v7();

        assert_eq!(
            normalise_route(&format!("/carts/{cart}/items")),
            "/carts/{uuid}/items"
        );
        assert_eq!(normalise_route("/shipping-services/2"), "/shipping-services/{id}");
        assert_eq!(normalise_route("/products"), "/products");
        assert_eq!(normalise_route("/"), "/");
    }
}
