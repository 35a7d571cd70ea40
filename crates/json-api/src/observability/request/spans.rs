//! Route labels for spans and metrics.

use uuid::Uuid;

/// Collapse uuid path segments so labels stay low-cardinality.
pub(super) fn route_label(path: &str) -> String {
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
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::route_label;

    #[test]
    fn uuid_segments_are_collapsed() {
        let label = route_label("/admin/products/0190a3f4-5b6c-7d8e-9f00-112233445566");

        assert_eq!(label, "/admin/products/{uuid}");
    }

    #[test]
    fn plain_paths_pass_through() {
        assert_eq!(route_label("/menu/products"), "/menu/products");
        assert_eq!(route_label("/"), "/");
    }
}
