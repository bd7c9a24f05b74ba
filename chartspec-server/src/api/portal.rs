//! Portal page handlers

use axum::response::Html;

/// GET / - Chart builder page
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_index_exposes_every_parameter() {
        let Html(page) = index().await;
        for name in [
            "type",
            "x",
            "xType",
            "y",
            "yType",
            "color",
            "colorType",
            "slice_field",
            "slice_type",
            "value_field",
            "value_type",
            "aggregate_function",
            "bin_step",
            "title",
        ] {
            assert!(page.contains(&format!("name=\"{name}\"")), "missing {name}");
        }
    }
}
